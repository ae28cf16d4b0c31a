pub mod client;
pub mod roster;
pub mod scoreboard;
pub mod wire;

pub use roster::{Roster, RosterEntry};
pub use scoreboard::{Board, PlayerSlot, Slot, TeamPanel};

// ---------------------------------------------------------------------------
// Domain types, independent of the wire format
// ---------------------------------------------------------------------------

/// One of the eight fixed event teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamColor {
    Red,
    Orange,
    Yellow,
    Green,
    Aqua,
    Blue,
    Purple,
    Pink,
}

impl TeamColor {
    /// Canonical display order.
    pub const ALL: [TeamColor; 8] = [
        TeamColor::Red,
        TeamColor::Orange,
        TeamColor::Yellow,
        TeamColor::Green,
        TeamColor::Aqua,
        TeamColor::Blue,
        TeamColor::Purple,
        TeamColor::Pink,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TeamColor::Red => "red",
            TeamColor::Orange => "orange",
            TeamColor::Yellow => "yellow",
            TeamColor::Green => "green",
            TeamColor::Aqua => "aqua",
            TeamColor::Blue => "blue",
            TeamColor::Purple => "purple",
            TeamColor::Pink => "pink",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamColor::Red => "Red Team",
            TeamColor::Orange => "Orange Team",
            TeamColor::Yellow => "Yellow Team",
            TeamColor::Green => "Green Team",
            TeamColor::Aqua => "Aqua Team",
            TeamColor::Blue => "Blue Team",
            TeamColor::Purple => "Purple Team",
            TeamColor::Pink => "Pink Team",
        }
    }

    /// Resolve a raw API team label ("Red Team", "TEAM_RED", ...) to a team.
    pub fn from_label(raw: &str) -> Option<Self> {
        let id = normalize_team_label(raw);
        TeamColor::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Lower-case, strip every literal "team" and every underscore, then trim.
///
/// The substring removal is intentionally naive: "Teameo" becomes "eo".
pub fn normalize_team_label(raw: &str) -> String {
    raw.to_lowercase()
        .replace("team", "")
        .replace('_', "")
        .trim()
        .to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamScore {
    pub team: String, // raw label, normalized at render time
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerScore {
    pub username: Option<String>,
    pub team: Option<String>,
    pub score: Option<f64>,
}

/// One poll's worth of scores, in API order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSnapshot {
    pub teams: Vec<TeamScore>,
    pub players: Vec<PlayerScore>,
}
