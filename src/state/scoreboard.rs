use chrono::{DateTime, Local};
use showdown_api::scoreboard::SLOTS_PER_TEAM;
use showdown_api::{Board, Slot, TeamColor, TeamPanel};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// Nothing received yet since startup.
    Loading,
    Slots(Vec<Slot>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub team: TeamColor,
    pub score: String,
    pub content: PanelContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Live,
    Failed,
}

/// What the Scores tab currently shows. Only [`ScoreboardView::apply`]
/// changes panel content, and only where the new board differs.
#[derive(Debug)]
pub struct ScoreboardView {
    pub panels: Vec<PanelView>,
    /// Total panel writes since startup.
    pub writes: u64,
    pub last_sync: Option<(DateTime<Local>, SyncOutcome)>,
    pub selected_team: usize,
    pub selected_slot: usize,
}

impl Default for ScoreboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreboardView {
    pub fn new() -> Self {
        Self {
            panels: TeamColor::ALL
                .into_iter()
                .map(|team| PanelView {
                    team,
                    score: "0".to_string(),
                    content: PanelContent::Loading,
                })
                .collect(),
            writes: 0,
            last_sync: None,
            selected_team: 0,
            selected_slot: 0,
        }
    }

    /// Write each changed score and slot list; returns how many writes happened.
    pub fn apply(&mut self, board: Board) -> usize {
        let mut writes = 0;
        for TeamPanel { team, score, slots } in board.panels {
            let Some(view) = self.panels.iter_mut().find(|p| p.team == team) else {
                continue;
            };
            if view.score != score {
                view.score = score;
                writes += 1;
            }
            let content = PanelContent::Slots(slots);
            if view.content != content {
                view.content = content;
                writes += 1;
            }
        }
        self.writes += writes as u64;
        writes
    }

    pub fn record_sync(&mut self, outcome: SyncOutcome) {
        self.last_sync = Some((Local::now(), outcome));
    }

    pub fn panel(&self, team: TeamColor) -> Option<&PanelView> {
        self.panels.iter().find(|p| p.team == team)
    }

    pub fn selected_slot(&self) -> Option<&Slot> {
        match &self.panels.get(self.selected_team)?.content {
            PanelContent::Slots(slots) => slots.get(self.selected_slot),
            PanelContent::Loading => None,
        }
    }

    pub fn select_next_team(&mut self) {
        self.selected_team = (self.selected_team + 1) % self.panels.len().max(1);
    }

    pub fn select_prev_team(&mut self) {
        let len = self.panels.len().max(1);
        self.selected_team = (self.selected_team + len - 1) % len;
    }

    pub fn select_slot_down(&mut self) {
        if self.selected_slot + 1 < SLOTS_PER_TEAM {
            self.selected_slot += 1;
        }
    }

    pub fn select_slot_up(&mut self) {
        self.selected_slot = self.selected_slot.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_api::{PlayerScore, Roster, ScoreSnapshot, TeamScore};

    fn snapshot() -> ScoreSnapshot {
        ScoreSnapshot {
            teams: vec![TeamScore { team: "Red Team".into(), score: Some(2500.0) }],
            players: vec![PlayerScore {
                username: Some("Steve".into()),
                team: Some("red".into()),
                score: Some(900.0),
            }],
        }
    }

    #[test]
    fn starts_loading() {
        let view = ScoreboardView::new();
        assert_eq!(view.panels.len(), 8);
        assert!(view.panels.iter().all(|p| p.content == PanelContent::Loading));
    }

    #[test]
    fn identical_board_is_a_no_op() {
        let roster = Roster::default();
        let mut view = ScoreboardView::new();
        let first = view.apply(Board::build(&snapshot(), &roster));
        assert!(first > 0);

        let before = view.panels.clone();
        assert_eq!(view.apply(Board::build(&snapshot(), &roster)), 0);
        assert_eq!(view.panels, before);
        assert_eq!(view.writes, first as u64);
    }

    #[test]
    fn only_changed_panels_are_written() {
        let roster = Roster::default();
        let mut view = ScoreboardView::new();
        view.apply(Board::build(&snapshot(), &roster));

        let mut next = snapshot();
        next.teams[0].score = Some(2600.0);
        assert_eq!(view.apply(Board::build(&next, &roster)), 1);
        assert_eq!(view.panel(TeamColor::Red).unwrap().score, "2,600");
    }

    #[test]
    fn failure_board_replaces_stale_data() {
        let mut view = ScoreboardView::new();
        view.apply(Board::build(&snapshot(), &Roster::default()));
        view.apply(Board::placeholders());

        for panel in &view.panels {
            assert_eq!(panel.score, "0");
            let PanelContent::Slots(slots) = &panel.content else { panic!("expected slots") };
            assert_eq!(slots.len(), SLOTS_PER_TEAM);
            assert!(slots.iter().all(Slot::is_placeholder));
        }
    }

    #[test]
    fn selection_wraps_teams_and_clamps_slots() {
        let mut view = ScoreboardView::new();
        view.select_prev_team();
        assert_eq!(view.selected_team, 7);
        view.select_next_team();
        assert_eq!(view.selected_team, 0);

        for _ in 0..10 {
            view.select_slot_down();
        }
        assert_eq!(view.selected_slot, SLOTS_PER_TEAM - 1);
        view.select_slot_up();
        assert_eq!(view.selected_slot, SLOTS_PER_TEAM - 2);
        assert!(view.selected_slot().is_none(), "loading panels have no slots");
    }
}
