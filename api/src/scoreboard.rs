//! Live scoreboard render step: turns one [`ScoreSnapshot`] plus the current
//! roster into eight fixed-size team panels.

use crate::roster::{Roster, RosterEntry, avatar_url};
use crate::{PlayerScore, ScoreSnapshot, TeamColor, TeamScore, normalize_team_label};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Every panel shows exactly this many rows.
pub const SLOTS_PER_TEAM: usize = 5;
pub const PLACEHOLDER_LABEL: &str = "TBD";
pub const SLOT_AVATAR_SIZE: u16 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSlot {
    pub username: String,
    pub score: String,
    pub avatar_url: String,
    /// Present when the username matched a roster entry.
    pub stats: Option<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Player(PlayerSlot),
    Placeholder,
}

impl Slot {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamPanel {
    pub team: TeamColor,
    pub score: String,
    pub slots: Vec<Slot>,
}

impl TeamPanel {
    pub fn placeholder(team: TeamColor) -> Self {
        Self {
            team,
            score: "0".to_string(),
            slots: vec![Slot::Placeholder; SLOTS_PER_TEAM],
        }
    }
}

/// All eight panels, in [`TeamColor::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub panels: Vec<TeamPanel>,
}

impl Board {
    /// The fail-safe board shown after any failed cycle.
    pub fn placeholders() -> Self {
        Self {
            panels: TeamColor::ALL.into_iter().map(TeamPanel::placeholder).collect(),
        }
    }

    pub fn build(snapshot: &ScoreSnapshot, roster: &Roster) -> Self {
        let mut grouped = group_players(&snapshot.players);
        let scores = team_scores(&snapshot.teams);

        let panels = TeamColor::ALL
            .into_iter()
            .map(|team| {
                let score = scores
                    .get(&team)
                    .copied()
                    .flatten()
                    .map(format_score)
                    .unwrap_or_else(|| "0".to_string());

                let players = grouped.remove(&team).unwrap_or_default();
                if players.len() > SLOTS_PER_TEAM {
                    log::debug!(
                        "{} has {} players, showing first {SLOTS_PER_TEAM}",
                        team.id(),
                        players.len()
                    );
                }

                let mut slots: Vec<Slot> = players
                    .into_iter()
                    .take(SLOTS_PER_TEAM)
                    .map(|(username, player)| Slot::Player(player_slot(username, player, roster)))
                    .collect();
                slots.resize(SLOTS_PER_TEAM, Slot::Placeholder);

                TeamPanel { team, score, slots }
            })
            .collect();

        Self { panels }
    }

    pub fn panel(&self, team: TeamColor) -> Option<&TeamPanel> {
        self.panels.iter().find(|p| p.team == team)
    }
}

fn player_slot(username: &str, player: &PlayerScore, roster: &Roster) -> PlayerSlot {
    let score = player.score.map(format_score).unwrap_or_else(|| "0".to_string());
    match roster.get(username) {
        Some(entry) => PlayerSlot {
            username: username.to_string(),
            score,
            avatar_url: entry.avatar_url(SLOT_AVATAR_SIZE),
            stats: Some(entry.clone()),
        },
        None => PlayerSlot {
            username: username.to_string(),
            score,
            avatar_url: avatar_url(username, SLOT_AVATAR_SIZE),
            stats: None,
        },
    }
}

/// Deduplicate by username (first wins, case-insensitive) and bucket by team.
///
/// A record with a username but no team still claims the username.
pub fn group_players(players: &[PlayerScore]) -> BTreeMap<TeamColor, Vec<(&str, &PlayerScore)>> {
    let mut grouped: BTreeMap<TeamColor, Vec<(&str, &PlayerScore)>> = BTreeMap::new();
    let mut seen: HashSet<String> = HashSet::new();

    for player in players {
        let Some(username) = player.username.as_deref().filter(|u| !u.is_empty()) else {
            log::debug!("skipping player record without username");
            continue;
        };
        if !seen.insert(username.to_lowercase()) {
            log::debug!("skipping duplicate player {username}");
            continue;
        }
        let Some(raw_team) = player.team.as_deref().filter(|t| !t.is_empty()) else {
            log::debug!("skipping player {username} without team");
            continue;
        };
        match TeamColor::from_label(raw_team) {
            Some(team) => grouped.entry(team).or_default().push((username, player)),
            None => log::info!(
                "Skipping player {username} from unknown team: {raw_team} ({})",
                normalize_team_label(raw_team)
            ),
        }
    }

    grouped
}

/// Map team scores by canonical team. A later entry for the same team wins.
pub fn team_scores(teams: &[TeamScore]) -> HashMap<TeamColor, Option<f64>> {
    let mut scores = HashMap::new();
    for entry in teams {
        if entry.team.is_empty() {
            continue;
        }
        match TeamColor::from_label(&entry.team) {
            Some(team) => {
                scores.insert(team, entry.score);
            }
            None => log::debug!("ignoring score for unknown team {}", entry.team),
        }
    }
    scores
}

/// Format with `,` thousands separators and at most three fraction digits.
pub fn format_score(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    // Past 1e15 an f64 has no fraction digits left, and scaling by 1000
    // could overflow to infinity.
    let (whole, frac) = if value.abs() >= 1e15 {
        (value.abs().trunc(), 0)
    } else {
        let rounded = (value.abs() * 1000.0).round() / 1000.0;
        let whole = rounded.trunc();
        (whole, ((rounded - whole) * 1000.0).round() as u64)
    };

    let digits = format!("{whole:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if value < 0.0 && (whole > 0.0 || frac > 0) {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if frac > 0 {
        out.push('.');
        out.push_str(format!("{frac:03}").trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(username: &str, team: &str, score: f64) -> PlayerScore {
        PlayerScore {
            username: Some(username.into()),
            team: Some(team.into()),
            score: Some(score),
        }
    }

    fn names(panel: &TeamPanel) -> Vec<&str> {
        panel
            .slots
            .iter()
            .filter_map(|s| match s {
                Slot::Player(p) => Some(p.username.as_str()),
                Slot::Placeholder => None,
            })
            .collect()
    }

    #[test]
    fn format_score_groups_thousands() {
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(999.0), "999");
        assert_eq!(format_score(1000.0), "1,000");
        assert_eq!(format_score(1234567.0), "1,234,567");
        assert_eq!(format_score(-4200.0), "-4,200");
    }

    #[test]
    fn format_score_keeps_three_fraction_digits() {
        assert_eq!(format_score(1234.5), "1,234.5");
        assert_eq!(format_score(0.12345), "0.123");
        assert_eq!(format_score(2.0004), "2");
        assert_eq!(format_score(f64::NAN), "0");
    }

    #[test]
    fn format_score_groups_huge_values() {
        assert_eq!(format_score(1e15), "1,000,000,000,000,000");
        assert_eq!(format_score(-2.5e15), "-2,500,000,000,000,000");

        let huge = format_score(1e306);
        assert!(huge.starts_with("1,000,000,"), "got {huge}");
        assert_eq!(huge.len(), 307 + 102);
        assert!(format_score(f64::MAX).starts_with("179,769,313,"));
    }

    #[test]
    fn short_team_is_padded_to_five_slots() {
        let snapshot = ScoreSnapshot {
            teams: vec![],
            players: vec![player("a", "Red Team", 10.0), player("b", "TEAM_RED", 20.0)],
        };
        let board = Board::build(&snapshot, &Roster::default());
        let red = board.panel(TeamColor::Red).unwrap();
        assert_eq!(red.slots.len(), SLOTS_PER_TEAM);
        assert_eq!(names(red), vec!["a", "b"]);
        assert_eq!(red.slots.iter().filter(|s| s.is_placeholder()).count(), 3);
    }

    #[test]
    fn every_panel_has_exactly_five_slots() {
        let players = (0..9).map(|i| player(&format!("p{i}"), "blue", 1.0)).collect();
        let board = Board::build(&ScoreSnapshot { teams: vec![], players }, &Roster::default());
        assert_eq!(board.panels.len(), 8);
        for panel in &board.panels {
            assert_eq!(panel.slots.len(), SLOTS_PER_TEAM);
        }
        assert_eq!(names(board.panel(TeamColor::Blue).unwrap()), vec!["p0", "p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn first_occurrence_of_username_wins() {
        let players = vec![
            player("Notch", "red", 5.0),
            player("notch", "blue", 99.0),
            player("Notch", "red", 7.0),
        ];
        let grouped = group_players(&players);
        assert_eq!(grouped.get(&TeamColor::Red).map(Vec::len), Some(1));
        assert_eq!(grouped[&TeamColor::Red][0].1.score, Some(5.0));
        assert!(grouped.get(&TeamColor::Blue).is_none());
    }

    #[test]
    fn teamless_record_still_claims_username() {
        let players = vec![
            PlayerScore { username: Some("ghost".into()), team: None, score: None },
            player("ghost", "green", 1.0),
        ];
        assert!(group_players(&players).is_empty());
    }

    #[test]
    fn unknown_team_is_dropped_without_halting() {
        let players = vec![
            player("a", "Teal Team", 1.0),
            PlayerScore { username: None, team: Some("red".into()), score: None },
            player("b", "pink", 2.0),
        ];
        let grouped = group_players(&players);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&TeamColor::Pink][0].0, "b");
    }

    #[test]
    fn team_scores_are_formatted_or_zero() {
        let snapshot = ScoreSnapshot {
            teams: vec![
                TeamScore { team: "Red Team".into(), score: Some(1500.0) },
                TeamScore { team: "aqua".into(), score: None },
                TeamScore { team: "RED".into(), score: Some(1600.0) },
                TeamScore { team: "mystery".into(), score: Some(1.0) },
            ],
            players: vec![],
        };
        let board = Board::build(&snapshot, &Roster::default());
        assert_eq!(board.panel(TeamColor::Red).unwrap().score, "1,600");
        assert_eq!(board.panel(TeamColor::Aqua).unwrap().score, "0");
        assert_eq!(board.panel(TeamColor::Pink).unwrap().score, "0");
    }

    #[test]
    fn roster_match_enriches_slot() {
        let roster = Roster::parse("username\tuuid\twon\tplayed\nDream\tuuid-1\t4\t5\n");
        let snapshot = ScoreSnapshot {
            teams: vec![],
            players: vec![player("dream", "green", 3000.0), player("stranger", "green", 1.0)],
        };
        let board = Board::build(&snapshot, &roster);
        let green = board.panel(TeamColor::Green).unwrap();

        let Slot::Player(known) = &green.slots[0] else { panic!("expected player slot") };
        assert_eq!(known.username, "dream");
        assert_eq!(known.score, "3,000");
        assert_eq!(known.avatar_url, "https://mc-heads.net/avatar/uuid-1/24");
        assert_eq!(known.stats.as_ref().map(|s| s.won), Some(4));

        let Slot::Player(unknown) = &green.slots[1] else { panic!("expected player slot") };
        assert_eq!(unknown.avatar_url, "https://mc-heads.net/avatar/stranger/24");
        assert!(unknown.stats.is_none());
    }

    #[test]
    fn missing_player_score_renders_zero() {
        let snapshot = ScoreSnapshot {
            teams: vec![],
            players: vec![PlayerScore { username: Some("x".into()), team: Some("yellow".into()), score: None }],
        };
        let board = Board::build(&snapshot, &Roster::default());
        let Slot::Player(slot) = &board.panel(TeamColor::Yellow).unwrap().slots[0] else {
            panic!("expected player slot")
        };
        assert_eq!(slot.score, "0");
    }

    #[test]
    fn placeholder_board_is_all_tbd() {
        let board = Board::placeholders();
        assert_eq!(board.panels.len(), 8);
        for panel in &board.panels {
            assert_eq!(panel.score, "0");
            assert!(panel.slots.iter().all(Slot::is_placeholder));
            assert_eq!(panel.slots.len(), SLOTS_PER_TEAM);
        }
    }
}
