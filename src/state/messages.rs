use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use showdown_api::{Roster, ScoreSnapshot};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadRoster,
    RefreshScores,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ScoresLoaded { snapshot: ScoreSnapshot },
    /// Any failed score cycle; the board falls back to placeholders.
    ScoresFailed { message: String },
    RosterLoaded { roster: Arc<Roster> },
    RosterFailed { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    AnimationTick,
}
