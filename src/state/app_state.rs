use crate::app::MenuItem;
use crate::components::banner::FRAME_COUNT;
use crate::components::bubbles::{BUBBLE_COUNT, BubbleField};
use crate::state::scoreboard::ScoreboardView;
use showdown_api::{Roster, RosterEntry};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Banner animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current sparkle frame, wraps at FRAME_COUNT.
    pub frame: usize,
    /// Monotonic tick counter; drives title colour cycling.
    pub tick: u64,
    pub bubbles: BubbleField,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            frame: 0,
            tick: 0,
            bubbles: BubbleField::new(&mut rand::thread_rng(), BUBBLE_COUNT),
        }
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % FRAME_COUNT;
        self.bubbles.advance(&mut rand::thread_rng());
    }
}

// ---------------------------------------------------------------------------
// Roster state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RosterStatus {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug)]
pub struct RosterState {
    /// Published snapshot; replaced wholesale on every load.
    pub roster: Arc<Roster>,
    pub status: RosterStatus,
    pub selected: usize,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            roster: Arc::new(Roster::default()),
            status: RosterStatus::Loading,
            selected: 0,
        }
    }
}

impl RosterState {
    pub fn publish(&mut self, roster: Arc<Roster>) {
        self.selected = self.selected.min(roster.len().saturating_sub(1));
        self.roster = roster;
        self.status = RosterStatus::Loaded;
    }

    /// Keeps the previous roster so enrichment keeps working after a failed
    /// refresh.
    pub fn fail(&mut self, message: String) {
        self.status = RosterStatus::Failed(message);
    }

    pub fn selected_entry(&self) -> Option<&RosterEntry> {
        self.roster.entries().get(self.selected)
    }

    /// Move by `delta` entries, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        let max = self.roster.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(max);
    }
}

// ---------------------------------------------------------------------------
// Top-level state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub scoreboard: ScoreboardView,
    pub roster: RosterState,
    /// Player detail popup, drawn over any tab.
    pub modal: Option<RosterEntry>,
    pub animation: AnimationState,
    pub last_error: Option<String>,
    pub show_logs: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            scoreboard: ScoreboardView::new(),
            roster: RosterState::default(),
            modal: None,
            animation: AnimationState::new(),
            last_error: None,
            show_logs: false,
        }
    }
}
