use crate::roster::Roster;
use crate::wire::{ScoresResponse, WirePlayer, WireTeam};
use crate::{PlayerScore, ScoreSnapshot, TeamScore};
use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_SCORES_URL: &str = "https://apismpshowdown.vercel.app/api/scores";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);
/// The roster lives next to the scores endpoint unless configured otherwise.
const ROSTER_PATH: &str = "/stats";

/// Client for the event's scores and roster endpoints.
#[derive(Debug, Clone)]
pub struct ShowdownApi {
    client: Client,
    scores_url: Url,
    roster_url: Url,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Malformed(String),
    Timeout(Duration, String),
    InvalidUrl(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Malformed(msg) => write!(f, "Malformed response: {msg}"),
            ApiError::Timeout(after, url) => {
                write!(f, "Request to {url} timed out after {}ms", after.as_millis())
            }
            ApiError::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ShowdownApi {
    /// `roster_url` defaults to `/stats` on the scores endpoint's host.
    pub fn new(scores_url: &str, roster_url: Option<&str>, timeout: Duration) -> ApiResult<Self> {
        let scores_url = Url::parse(scores_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{scores_url}: {e}")))?;
        let roster_url = match roster_url {
            Some(raw) => Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?,
            None => scores_url
                .join(ROSTER_PATH)
                .map_err(|e| ApiError::InvalidUrl(format!("{scores_url}{ROSTER_PATH}: {e}")))?,
        };
        let client = Client::builder()
            .user_agent(concat!("smp-showdown/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Other(format!("could not build http client: {e}")))?;

        Ok(Self { client, scores_url, roster_url, timeout })
    }

    pub fn scores_url(&self) -> &str {
        self.scores_url.as_str()
    }

    pub fn roster_url(&self) -> &str {
        self.roster_url.as_str()
    }

    /// Fetch the current team and player scores.
    ///
    /// Individual bad records are dropped; a body that is not a JSON object
    /// fails the whole fetch.
    pub async fn fetch_scores(&self) -> ApiResult<ScoreSnapshot> {
        let url = self.scores_url.as_str();
        let body: Value = self
            .with_deadline(url, async {
                let response = self.send(url).await?;
                response
                    .json::<Value>()
                    .await
                    .map_err(|e| ApiError::Parsing(e, url.to_owned()))
            })
            .await?;

        if !body.is_object() {
            return Err(ApiError::Malformed(format!(
                "expected a JSON object from {url}, got {}",
                json_kind(&body)
            )));
        }
        let raw: ScoresResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        Ok(map_scores(raw))
    }

    /// Fetch and parse the tab-separated roster table.
    pub async fn fetch_roster(&self) -> ApiResult<Roster> {
        let url = self.roster_url.as_str();
        let text = self
            .with_deadline(url, async {
                let response = self.send(url).await?;
                response
                    .text()
                    .await
                    .map_err(|e| ApiError::Parsing(e, url.to_owned()))
            })
            .await?;
        Ok(Roster::parse(&text))
    }

    async fn send(&self, url: &str) -> ApiResult<Response> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))
    }

    /// Run a whole request (headers and body) against one deadline. Dropping
    /// the inner future on expiry aborts the connection.
    async fn with_deadline<T>(
        &self,
        url: &str,
        request: impl Future<Output = ApiResult<T>>,
    ) -> ApiResult<T> {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(self.timeout, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_scores(raw: ScoresResponse) -> ScoreSnapshot {
    let teams = records::<WireTeam>(raw.teams, "teams")
        .into_iter()
        .filter_map(|t| {
            let team = t.team.filter(|name| !name.is_empty())?;
            Some(TeamScore { team, score: t.score.and_then(|s| s.as_f64()) })
        })
        .collect::<Vec<_>>();

    let players = records::<WirePlayer>(raw.players, "players")
        .into_iter()
        .map(|p| PlayerScore {
            username: p.username,
            team: p.team,
            score: p.score.and_then(|s| s.as_f64()),
        })
        .collect::<Vec<_>>();

    log::debug!("scores: {} teams, {} players", teams.len(), players.len());
    ScoreSnapshot { teams, players }
}

/// Decode each element of a JSON array on its own, skipping the ones that
/// don't fit. Anything other than an array yields no records.
fn records<T: DeserializeOwned>(list: Option<Value>, field: &str) -> Vec<T> {
    let items = match list {
        Some(Value::Array(items)) => items,
        Some(other) => {
            log::warn!("`{field}` is {}, not an array; ignoring", json_kind(&other));
            return Vec::new();
        }
        None => return Vec::new(),
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("skipping malformed {field}[{i}]: {e}");
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> ScoresResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_teams_and_players() {
        let snapshot = map_scores(response(json!({
            "teams": [{"team": "Red Team", "score": 1200}],
            "players": [{"username": "Steve", "team": "red", "score": "40"}]
        })));
        assert_eq!(snapshot.teams, vec![TeamScore { team: "Red Team".into(), score: Some(1200.0) }]);
        assert_eq!(snapshot.players.len(), 1);
        assert_eq!(snapshot.players[0].username.as_deref(), Some("Steve"));
        assert_eq!(snapshot.players[0].score, Some(40.0));
    }

    #[test]
    fn malformed_records_are_skipped_individually() {
        let snapshot = map_scores(response(json!({
            "teams": [{"team": 7}, "oops", {"score": 3}, {"team": "blue", "score": 3}],
            "players": [
                42,
                {"username": ["x"], "team": "red"},
                {"username": "ok", "team": "aqua"}
            ]
        })));
        assert_eq!(snapshot.teams.len(), 1);
        assert_eq!(snapshot.teams[0].team, "blue");
        assert_eq!(snapshot.players.len(), 1);
        assert_eq!(snapshot.players[0].username.as_deref(), Some("ok"));
    }

    #[test]
    fn non_array_lists_are_empty() {
        let snapshot = map_scores(response(json!({ "teams": {"red": 1}, "players": null })));
        assert!(snapshot.teams.is_empty());
        assert!(snapshot.players.is_empty());
    }

    #[test]
    fn roster_url_defaults_next_to_scores() {
        let api = ShowdownApi::new("https://example.com/api/scores", None, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(api.roster_url(), "https://example.com/stats");

        let api = ShowdownApi::new(
            "https://example.com/api/scores",
            Some("https://cdn.example.com/roster.tsv"),
            DEFAULT_TIMEOUT,
        )
        .unwrap();
        assert_eq!(api.roster_url(), "https://cdn.example.com/roster.tsv");
    }

    #[test]
    fn bad_url_is_rejected() {
        let err = ShowdownApi::new("not a url", None, DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
