use std::path::PathBuf;

use debugger_store::config::{
    DEFAULT_EXECUTION_DISPLAY_COUNT, DEFAULT_EXECUTION_PAGE_SIZE,
    DEFAULT_GRAPH_EXECUTION_DISPLAY_COUNT, DEFAULT_GRAPH_EXECUTION_PAGE_SIZE,
};
use debugger_store::StoreConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Timeline constants for the replayed store
    pub store: StoreConfig,
    /// JSON-lines action log; the first CLI argument takes precedence
    pub action_log: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let store = StoreConfig {
            execution_page_size: env_nonzero(
                &lookup,
                "DEBUGGER_EXECUTION_PAGE_SIZE",
                DEFAULT_EXECUTION_PAGE_SIZE,
            )?,
            execution_display_count: env_nonzero(
                &lookup,
                "DEBUGGER_EXECUTION_DISPLAY_COUNT",
                DEFAULT_EXECUTION_DISPLAY_COUNT,
            )?,
            graph_execution_page_size: env_nonzero(
                &lookup,
                "DEBUGGER_GRAPH_EXECUTION_PAGE_SIZE",
                DEFAULT_GRAPH_EXECUTION_PAGE_SIZE,
            )?,
            graph_execution_display_count: env_nonzero(
                &lookup,
                "DEBUGGER_GRAPH_EXECUTION_DISPLAY_COUNT",
                DEFAULT_GRAPH_EXECUTION_DISPLAY_COUNT,
            )?,
            stick_to_bottommost_frame_in_focused_file: env_parse(
                &lookup,
                "DEBUGGER_STICK_TO_BOTTOMMOST_FRAME",
                false,
            )?,
        };

        Ok(Self {
            store,
            action_log: env_str(&lookup, "DEBUGGER_ACTION_LOG").map(PathBuf::from),
        })
    }
}

fn env_str(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env_str(lookup, key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        None => Ok(default),
    }
}

fn env_nonzero(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> anyhow::Result<usize> {
    match env_parse(lookup, key, default)? {
        0 => Err(anyhow::anyhow!("Env var {key} must be greater than zero")),
        value => Ok(value),
    }
}
