pub mod domain;
pub mod ingest;
pub mod resolver;
pub mod scoring;
pub mod time;
pub mod workflow;

#[cfg(test)]
mod testing;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub naver_searchad_customer_id: Option<String>,
        pub naver_searchad_api_key: Option<String>,
        pub naver_searchad_secret_key: Option<String>,
        pub naver_client_id: Option<String>,
        pub naver_client_secret: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    fn non_empty(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                naver_searchad_customer_id: non_empty("NAVER_SEARCHAD_CUSTOMER_ID"),
                naver_searchad_api_key: non_empty("NAVER_SEARCHAD_API_KEY"),
                naver_searchad_secret_key: non_empty("NAVER_SEARCHAD_SECRET_KEY"),
                naver_client_id: non_empty("NAVER_CLIENT_ID"),
                naver_client_secret: non_empty("NAVER_CLIENT_SECRET"),
                sentry_dsn: non_empty("SENTRY_DSN"),
            })
        }

        /// (customer id, api key, secret key)
        pub fn require_searchad_credentials(&self) -> anyhow::Result<(&str, &str, &str)> {
            let customer_id = self
                .naver_searchad_customer_id
                .as_deref()
                .context("NAVER_SEARCHAD_CUSTOMER_ID is required")?;
            let api_key = self
                .naver_searchad_api_key
                .as_deref()
                .context("NAVER_SEARCHAD_API_KEY is required")?;
            let secret_key = self
                .naver_searchad_secret_key
                .as_deref()
                .context("NAVER_SEARCHAD_SECRET_KEY is required")?;
            Ok((customer_id, api_key, secret_key))
        }

        /// (client id, client secret) for the DataLab and Search Open APIs.
        pub fn require_openapi_credentials(&self) -> anyhow::Result<(&str, &str)> {
            let client_id = self
                .naver_client_id
                .as_deref()
                .context("NAVER_CLIENT_ID is required")?;
            let client_secret = self
                .naver_client_secret
                .as_deref()
                .context("NAVER_CLIENT_SECRET is required")?;
            Ok((client_id, client_secret))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn missing_credentials_name_the_variable() {
            let settings = Settings {
                naver_searchad_customer_id: Some("123".into()),
                naver_searchad_api_key: Some("key".into()),
                ..Default::default()
            };
            let err = settings.require_searchad_credentials().unwrap_err();
            assert_eq!(err.to_string(), "NAVER_SEARCHAD_SECRET_KEY is required");

            let err = settings.require_openapi_credentials().unwrap_err();
            assert_eq!(err.to_string(), "NAVER_CLIENT_ID is required");
        }

        #[test]
        fn complete_credentials_are_returned_in_order() {
            let settings = Settings {
                naver_client_id: Some("id".into()),
                naver_client_secret: Some("secret".into()),
                ..Default::default()
            };
            assert_eq!(settings.require_openapi_credentials().unwrap(), ("id", "secret"));
        }
    }
}
