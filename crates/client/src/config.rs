//! Client configuration loaded from the environment
//!
//! `.env` files are honoured through `dotenvy`; real environment variables
//! take precedence. Every key is optional.
//!
//! | Key | Values | Default |
//! |---|---|---|
//! | `TASKRATE_DIALOG_MODE` | `dismissible`, `enforced` | `dismissible` |
//! | `TASKRATE_PERSPECTIVE` | `doer`, `creator` | `doer` |
//! | `TASKRATE_SUBJECT` | display name of the rated user | `your partner` |
//! | `TASKRATE_TASK_TITLE` | title of the task | `Untitled task` |
//! | `TASKRATE_FAKE_OUTCOME` | `accept`, `reject`, `fail`, `reject_duplicates` | `accept` |
//! | `TASKRATE_FAKE_LATENCY_MS` | milliseconds | `0` |
//! | `TASKRATE_LOG` | tracing filter used when `RUST_LOG` is unset | `taskrate_client=info` |

use std::str::FromStr;
use std::time::Duration;

use taskrate_domain::{DialogMode, Perspective};

use crate::infrastructure::FakeOutcome;

pub const DEFAULT_LOG_FILTER: &str = "taskrate_client=info";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub mode: DialogMode,
    pub perspective: Perspective,
    pub subject_label: String,
    pub task_title: String,
    pub fake_outcome: FakeOutcome,
    pub fake_latency: Option<Duration>,
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: DialogMode::Dismissible,
            perspective: Perspective::DoerRatingCreator,
            subject_label: "your partner".to_string(),
            task_title: "Untitled task".to_string(),
            fake_outcome: FakeOutcome::Accept,
            fake_latency: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let fake_latency = parse_key::<u64>(&lookup, "TASKRATE_FAKE_LATENCY_MS")?
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Ok(Self {
            mode: parse_key(&lookup, "TASKRATE_DIALOG_MODE")?.unwrap_or(defaults.mode),
            perspective: parse_key(&lookup, "TASKRATE_PERSPECTIVE")?
                .unwrap_or(defaults.perspective),
            subject_label: non_empty(&lookup, "TASKRATE_SUBJECT")
                .unwrap_or(defaults.subject_label),
            task_title: non_empty(&lookup, "TASKRATE_TASK_TITLE").unwrap_or(defaults.task_title),
            fake_outcome: parse_key(&lookup, "TASKRATE_FAKE_OUTCOME")?
                .unwrap_or(defaults.fake_outcome),
            fake_latency,
            log_filter: non_empty(&lookup, "TASKRATE_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_key<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, key) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
    }
}
