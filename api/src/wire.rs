//! Raw serde shapes of the scores endpoint.
//! These map to our clean domain types in client.rs.
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Scores  (GET /api/scores)
// ---------------------------------------------------------------------------

/// Top-level body. Both lists are kept as raw JSON so that a non-array value
/// or a single bad record never fails the whole response.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoresResponse {
    #[serde(default)]
    pub teams: Option<Value>,
    #[serde(default)]
    pub players: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    pub team: Option<String>,
    pub score: Option<WireScore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayer {
    pub username: Option<String>,
    pub team: Option<String>,
    pub score: Option<WireScore>,
}

/// Scores usually arrive as numbers, some deployments send numeric strings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireScore {
    Number(f64),
    Text(String),
    Other(Value),
}

impl WireScore {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WireScore::Number(n) => Some(*n),
            WireScore::Text(s) if s.trim().is_empty() => Some(0.0),
            WireScore::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            WireScore::Other(_) => None,
        }
    }
}
