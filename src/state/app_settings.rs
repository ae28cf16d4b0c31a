use chrono::{DateTime, Utc};
use log::{LevelFilter, warn};
use showdown_api::client::{DEFAULT_SCORES_URL, DEFAULT_TIMEOUT};
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// 14:00 CST on event day.
pub const DEFAULT_EVENT_START: &str = "2026-02-15T14:00:00-06:00";
pub const DEFAULT_STREAM_CHANNEL: &str = "smpshowdown";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub scores_url: String,
    /// None means `/stats` next to the scores endpoint.
    pub roster_url: Option<String>,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub event_start: DateTime<Utc>,
    pub stream_channel: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            scores_url: DEFAULT_SCORES_URL.to_string(),
            roster_url: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_TIMEOUT,
            event_start: default_event_start(),
            stream_channel: DEFAULT_STREAM_CHANNEL.to_string(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset, blank or invalid values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Self::default();

        if let Some(url) = get("SMP_SCORES_URL") {
            settings.scores_url = url;
        }
        settings.roster_url = get("SMP_ROSTER_URL");

        if let Some(raw) = get("SMP_POLL_SECS") {
            match parse_secs(&raw) {
                Some(d) => settings.poll_interval = d,
                None => warn!("SMP_POLL_SECS={raw} is not a positive number of seconds"),
            }
        }
        if let Some(raw) = get("SMP_TIMEOUT_SECS") {
            match parse_secs(&raw) {
                Some(d) => settings.request_timeout = d,
                None => warn!("SMP_TIMEOUT_SECS={raw} is not a positive number of seconds"),
            }
        }
        if let Some(raw) = get("SMP_EVENT_START") {
            match DateTime::parse_from_rfc3339(&raw) {
                Ok(dt) => settings.event_start = dt.with_timezone(&Utc),
                Err(e) => warn!("SMP_EVENT_START={raw} is not RFC 3339: {e}"),
            }
        }
        if let Some(channel) = get("SMP_STREAM_CHANNEL") {
            settings.stream_channel = channel;
        }
        if let Some(raw) = get("SMP_LOG") {
            match raw.parse::<LevelFilter>() {
                Ok(level) => settings.log_level = Some(level),
                Err(_) => warn!("SMP_LOG={raw} is not a log level"),
            }
        }

        settings
    }

    pub fn stream_url(&self) -> String {
        format!("https://www.twitch.tv/{}", self.stream_channel)
    }
}

fn parse_secs(raw: &str) -> Option<Duration> {
    raw.parse::<u64>().ok().filter(|&s| s >= 1).map(Duration::from_secs)
}

fn default_event_start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(DEFAULT_EVENT_START)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
