use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error, info};
use showdown_api::client::ShowdownApi;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the API client and serves requests one at a time, so fetch cycles
/// never overlap; a slow request delays the next one instead.
pub struct NetworkWorker {
    client: ShowdownApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: ShowdownApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let spinner = self.start_loading_animation().await;

            let response = match request {
                NetworkRequest::LoadRoster => self.handle_load_roster().await,
                NetworkRequest::RefreshScores => self.handle_refresh_scores().await,
            };
            let is_ok = !matches!(
                response,
                NetworkResponse::ScoresFailed { .. } | NetworkResponse::RosterFailed { .. }
            );

            debug!("network request complete");
            self.stop_loading_animation(spinner, is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_roster(&self) -> NetworkResponse {
        debug!("loading roster from {}", self.client.roster_url());
        match self.client.fetch_roster().await {
            Ok(roster) => {
                info!("roster loaded: {} players", roster.len());
                NetworkResponse::RosterLoaded { roster: Arc::new(roster) }
            }
            Err(e) => {
                error!("Error loading players: {e}");
                NetworkResponse::RosterFailed { message: e.to_string() }
            }
        }
    }

    async fn handle_refresh_scores(&self) -> NetworkResponse {
        debug!("refreshing scores from {}", self.client.scores_url());
        match self.client.fetch_scores().await {
            Ok(snapshot) => NetworkResponse::ScoresLoaded { snapshot },
            Err(e) => {
                error!("Score update failed: {e}");
                NetworkResponse::ScoresFailed { message: e.to_string() }
            }
        }
    }

    async fn start_loading_animation(&self) -> JoinHandle<()> {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        })
    }

    /// Abort the spinner outright; a queued request may set the flag again
    /// before the old task sees it cleared.
    async fn stop_loading_animation(&self, spinner: JoinHandle<()>, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        spinner.abort();
        let _ = spinner.await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Collect responses until the first non-spinner one arrives.
    async fn next_result(rx: &mut mpsc::Receiver<NetworkResponse>) -> NetworkResponse {
        loop {
            match rx.recv().await.expect("worker should respond") {
                NetworkResponse::LoadingStateChanged { .. } => continue,
                other => return other,
            }
        }
    }

    #[tokio::test]
    async fn unreachable_scores_endpoint_reports_failure() {
        // Bind then drop so the port is (almost certainly) closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = ShowdownApi::new(
            &format!("http://{addr}/api/scores"),
            None,
            Duration::from_secs(2),
        )
        .unwrap();
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let task = tokio::spawn(NetworkWorker::new(api, req_rx, resp_tx).run());

        req_tx.send(NetworkRequest::RefreshScores).await.unwrap();
        assert!(matches!(next_result(&mut resp_rx).await, NetworkResponse::ScoresFailed { .. }));

        req_tx.send(NetworkRequest::LoadRoster).await.unwrap();
        assert!(matches!(next_result(&mut resp_rx).await, NetworkResponse::RosterFailed { .. }));

        task.abort();
    }

    #[tokio::test]
    async fn back_to_back_requests_leave_no_spinner_running() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = ShowdownApi::new(
            &format!("http://{addr}/api/scores"),
            None,
            Duration::from_secs(2),
        )
        .unwrap();
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(256);
        let task = tokio::spawn(NetworkWorker::new(api, req_rx, resp_tx).run());

        req_tx.send(NetworkRequest::LoadRoster).await.unwrap();
        req_tx.send(NetworkRequest::RefreshScores).await.unwrap();

        let mut last_loading = None;
        let mut results = 0;
        while results < 2 {
            match resp_rx.recv().await.expect("worker should respond") {
                NetworkResponse::LoadingStateChanged { loading_state } => {
                    last_loading = Some(loading_state.is_loading)
                }
                _ => {
                    assert_eq!(last_loading, Some(false), "spinner stopped before each result");
                    results += 1;
                }
            }
        }

        let quiet = tokio::time::timeout(Duration::from_millis(150), resp_rx.recv()).await;
        assert!(quiet.is_err(), "no spinner frames after the queue drained");

        task.abort();
    }
}
