//! Credentials and overrides read from the environment (and `.env`).

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use gbomb_api::{Invoker, DEFAULT_ENDPOINT};

pub const API_KEY_VAR: &str = "GIANTBOMB_API_KEY";
pub const BASE_URL_VAR: &str = "GIANTBOMB_BASE_URL";
pub const RATE_INTERVAL_VAR: &str = "GIANTBOMB_RATE_INTERVAL_SECS";

#[derive(Debug, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub endpoint: String,
    pub interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "{} is not set. Put it in the environment or a .env file",
                    API_KEY_VAR
                )
            })?;

        let endpoint = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let interval = match lookup(RATE_INTERVAL_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!(
                        "{} must be a whole number of seconds, got {:?}",
                        RATE_INTERVAL_VAR, raw
                    )
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        if endpoint.trim().is_empty() {
            bail!("{} is set but empty", BASE_URL_VAR);
        }

        Ok(Self {
            api_key: api_key.trim().to_string(),
            endpoint,
            interval,
        })
    }

    pub fn invoker(&self) -> Result<Invoker> {
        let mut builder = Invoker::builder(&self.api_key).endpoint(&self.endpoint);
        if let Some(interval) = self.interval {
            builder = builder.interval(interval);
        }
        Ok(builder.build()?)
    }
}
