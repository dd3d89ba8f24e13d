use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use niche_core::ingest::provider::Sources;
use niche_core::workflow;

#[derive(Debug, Parser)]
#[command(name = "niche", about = "Naver keyword niche analysis")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Monthly search volume with the top 20 related keywords.
    Volume { keyword: String },

    /// 12-month DataLab search trend.
    Trend { keyword: String },

    /// Blog content count and the top 10 posts.
    Competition { keyword: String },

    /// Full niche score (0-100, grade A-F).
    Score { keyword: String },

    /// Expand a seed into related keywords, quick-score all and full-score the best.
    Expand {
        keyword: String,

        /// Number of top quick-scored keywords to full-score (1-20).
        #[arg(long)]
        full_score_count: Option<usize>,
    },

    /// Full niche score for up to 10 keywords, best first.
    Batch {
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Related keywords whose 12-month trend is rising.
    Discover {
        keyword: String,

        /// Maximum rising keywords to return (1-20).
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = niche_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let result = run(&settings, args.command).await;
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %format!("{err:#}"), "command failed");
    }
    result
}

async fn run(settings: &niche_core::config::Settings, command: Command) -> anyhow::Result<()> {
    let sources = Sources::from_settings(settings)?;

    match command {
        Command::Volume { keyword } => {
            let keyword = workflow::validate_keyword(&keyword)?;
            print_json(&workflow::lookup_volume(&sources, keyword).await?)
        }
        Command::Trend { keyword } => {
            let keyword = workflow::validate_keyword(&keyword)?;
            print_json(&workflow::lookup_trend(&sources, keyword).await?)
        }
        Command::Competition { keyword } => {
            let keyword = workflow::validate_keyword(&keyword)?;
            print_json(&workflow::lookup_competition(&sources, keyword).await?)
        }
        Command::Score { keyword } => {
            let keyword = workflow::validate_keyword(&keyword)?;
            print_json(&workflow::analyze_keyword(&sources, keyword).await?)
        }
        Command::Expand {
            keyword,
            full_score_count,
        } => {
            let keyword = workflow::validate_keyword(&keyword)?;
            let count = workflow::validate_count(
                "full_score_count",
                full_score_count,
                workflow::DEFAULT_FULL_SCORE_COUNT,
                workflow::MAX_FULL_SCORE_COUNT,
            )?;
            print_json(&workflow::expand_keyword(&sources, keyword, count).await?)
        }
        Command::Batch { keywords } => {
            let keywords = workflow::validate_batch(&keywords)?;
            print_json(&workflow::batch_analyze(&sources, &keywords).await?)
        }
        Command::Discover { keyword, limit } => {
            let keyword = workflow::validate_keyword(&keyword)?;
            let limit = workflow::validate_count(
                "limit",
                limit,
                workflow::DEFAULT_DISCOVER_LIMIT,
                workflow::MAX_DISCOVER_LIMIT,
            )?;
            print_json(&workflow::discover_trending(&sources, keyword, limit).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output failed")?;
    println!("{out}");
    Ok(())
}

fn init_sentry(settings: &niche_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
