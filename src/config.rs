use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Default nesting limit for filter trees
pub const DEFAULT_MAX_FILTER_DEPTH: usize = 64;

/// Hard ceiling accepted for `LDAP_FILTER_MAX_DEPTH`
pub const MAX_FILTER_DEPTH_CEILING: usize = 1024;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub max_filter_depth: usize,
    pub search_size_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_filter_depth: DEFAULT_MAX_FILTER_DEPTH,
            search_size_limit: None,
        }
    }
}

impl Config {
    /// Reads the configuration from the environment
    ///
    /// Unset variables fall back to their defaults. A variable that is set but
    /// does not parse is an error, so a typo never disables a limit.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            max_filter_depth: parse_env("LDAP_FILTER_MAX_DEPTH")?
                .unwrap_or(DEFAULT_MAX_FILTER_DEPTH),
            search_size_limit: parse_env("LDAP_FILTER_SEARCH_SIZE_LIMIT")?,
        })
    }

    /// Validate configuration at startup
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_filter_depth == 0 {
            anyhow::bail!("LDAP_FILTER_MAX_DEPTH cannot be 0");
        }

        if self.max_filter_depth > MAX_FILTER_DEPTH_CEILING {
            anyhow::bail!(
                "LDAP_FILTER_MAX_DEPTH {} exceeds the ceiling of {}",
                self.max_filter_depth,
                MAX_FILTER_DEPTH_CEILING
            );
        }

        if self.search_size_limit == Some(0) {
            anyhow::bail!(
                "LDAP_FILTER_SEARCH_SIZE_LIMIT cannot be 0 (leave it unset for no limit)"
            );
        }

        Ok(())
    }
}

fn parse_env<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} has an invalid value '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}
