use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Point budget for the full niche score. Competition and efficiency are reported together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NicheWeights {
    pub volume: f64,
    pub competition: f64,
    pub freshness: f64,
    pub trend: f64,
    pub efficiency: f64,
}

impl Default for NicheWeights {
    fn default() -> Self {
        Self {
            volume: 20.0,
            competition: 30.0,
            freshness: 15.0,
            trend: 20.0,
            efficiency: 15.0,
        }
    }
}

/// Point budget for the quick score (catalog metadata only).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickWeights {
    pub volume: f64,
    pub competition: f64,
    pub efficiency: f64,
    pub trend_approx: f64,
}

impl Default for QuickWeights {
    fn default() -> Self {
        Self {
            volume: 30.0,
            competition: 25.0,
            efficiency: 25.0,
            trend_approx: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub niche: NicheWeights,
    pub quick: QuickWeights,
}

impl ScoringProfile {
    /// Reads an optional JSON override from `NICHE_SCORING_PROFILE`.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var("NICHE_SCORING_PROFILE") {
            Ok(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let profile = serde_json::from_str::<Self>(raw)
            .with_context(|| format!("NICHE_SCORING_PROFILE is not a valid scoring profile: {raw}"))?;
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let n = &self.niche;
        let q = &self.quick;
        for (name, w) in [
            ("niche.volume", n.volume),
            ("niche.competition", n.competition),
            ("niche.freshness", n.freshness),
            ("niche.trend", n.trend),
            ("niche.efficiency", n.efficiency),
            ("quick.volume", q.volume),
            ("quick.competition", q.competition),
            ("quick.efficiency", q.efficiency),
            ("quick.trend_approx", q.trend_approx),
        ] {
            anyhow::ensure!(
                w.is_finite() && w >= 0.0,
                "weight {name} must be a non-negative number (got {w})"
            );
        }
        Ok(())
    }
}
