use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::scoreboard::SyncOutcome;
use log::info;
use showdown_api::{Board, Roster, ScoreSnapshot, Slot};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Home,
    Scores,
    Players,
    Stream,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Render the snapshot against the current roster. Returns true when any
    /// panel actually changed.
    pub fn on_scores_loaded(&mut self, snapshot: ScoreSnapshot) -> bool {
        self.state.last_error = None;
        let board = Board::build(&snapshot, &self.state.roster.roster);
        let writes = self.state.scoreboard.apply(board);
        self.state.scoreboard.record_sync(SyncOutcome::Live);
        writes > 0
    }

    /// Blank every panel so nothing stale stays on screen.
    pub fn on_scores_failed(&mut self, message: String) -> bool {
        self.state.last_error = Some(message);
        let writes = self.state.scoreboard.apply(Board::placeholders());
        self.state.scoreboard.record_sync(SyncOutcome::Failed);
        writes > 0
    }

    pub fn on_roster_loaded(&mut self, roster: Arc<Roster>) {
        info!("publishing roster with {} players", roster.len());
        self.state.roster.publish(roster);
    }

    pub fn on_roster_failed(&mut self, message: String) {
        self.state.roster.fail(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Player detail modal
    // -----------------------------------------------------------------------

    /// Open the modal for the highlighted Scores slot. Only roster-backed
    /// slots have stats to show.
    pub fn open_selected_slot(&mut self) -> bool {
        let Some(Slot::Player(slot)) = self.state.scoreboard.selected_slot() else {
            return false;
        };
        let Some(stats) = slot.stats.clone() else {
            return false;
        };
        self.state.modal = Some(stats);
        true
    }

    pub fn open_selected_roster_entry(&mut self) -> bool {
        let Some(entry) = self.state.roster.selected_entry().cloned() else {
            return false;
        };
        self.state.modal = Some(entry);
        true
    }

    pub fn close_modal(&mut self) {
        self.state.modal = None;
    }

    // -----------------------------------------------------------------------
    // Animation tick, every 80ms via AnimationTick
    // -----------------------------------------------------------------------

    pub fn advance_animation(&mut self) {
        self.state.animation.advance();
    }
}
