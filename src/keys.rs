use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Roster cards per row on the Players tab; j/k jump a whole row.
pub const ROSTER_COLUMNS: isize = 4;

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // Quit always works, even with the modal open.
    if matches!(
        (key_event.code, key_event.modifiers),
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL)
    ) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    if guard.state.modal.is_some() {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Enter) {
            guard.close_modal();
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Home),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Scores),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Players),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Stream),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Scores navigation
        (MenuItem::Scores, Char('l') | KeyCode::Right, _) => guard.state.scoreboard.select_next_team(),
        (MenuItem::Scores, Char('h') | KeyCode::Left, _) => guard.state.scoreboard.select_prev_team(),
        (MenuItem::Scores, Char('j') | KeyCode::Down, _) => guard.state.scoreboard.select_slot_down(),
        (MenuItem::Scores, Char('k') | KeyCode::Up, _) => guard.state.scoreboard.select_slot_up(),
        (MenuItem::Scores, KeyCode::Enter, _) => {
            guard.open_selected_slot();
        }

        // Players navigation
        (MenuItem::Players, Char('l') | KeyCode::Right, _) => guard.state.roster.move_selection(1),
        (MenuItem::Players, Char('h') | KeyCode::Left, _) => guard.state.roster.move_selection(-1),
        (MenuItem::Players, Char('j') | KeyCode::Down, _) => {
            guard.state.roster.move_selection(ROSTER_COLUMNS)
        }
        (MenuItem::Players, Char('k') | KeyCode::Up, _) => {
            guard.state.roster.move_selection(-ROSTER_COLUMNS)
        }
        (MenuItem::Players, KeyCode::Enter, _) => {
            guard.open_selected_roster_entry();
        }

        // Manual refresh: roster first so the scores render enriched.
        (_, Char('r'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadRoster).await;
            let _ = network_requests.send(NetworkRequest::RefreshScores).await;
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
