use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

/// Periodic score refresh. The roster is only loaded on startup and on demand.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut scores_interval = interval(self.period);
        scores_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        scores_interval.tick().await;

        loop {
            scores_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::RefreshScores)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sends_refresh_every_period_after_the_first() {
        let (tx, mut rx) = mpsc::channel(8);
        let task = tokio::spawn(PeriodicRefresher::new(tx, Duration::from_secs(5)).run());

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(rx.try_recv().is_err(), "nothing before the first period");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(matches!(rx.recv().await, Some(NetworkRequest::RefreshScores)));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(matches!(rx.recv().await, Some(NetworkRequest::RefreshScores)));

        task.abort();
    }

    #[tokio::test]
    async fn stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let task = tokio::spawn(PeriodicRefresher::new(tx, Duration::from_millis(10)).run());
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("refresher should exit")
            .unwrap();
    }
}
