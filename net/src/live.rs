//! Push subscription for trajectories generated by other clients.
//!
//! The [`LiveUpdateClient`] holds one websocket to the coordinator. For each
//! notification it fetches the full waypoint sequence through a
//! [`TrajectoryApi`] and forwards a [`LiveEvent`] over an mpsc channel, so the
//! engine is only ever mutated by whoever owns the receiver.
//!
//! Undecodable payloads are logged and dropped without touching the
//! connection. When the connection ends for any reason the client waits a
//! fixed delay and reconnects, forever. There is no backoff growth and no
//! attempt limit; the loop exits only once the event receiver is dropped.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use std::sync::Arc;
use std::time::Duration;

use canvas::doc::Trajectory;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::api::TrajectoryApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, LiveError};
use crate::types::TrajectoryNotice;

/// Longest payload excerpt included in a drop warning.
const LOG_EXCERPT_CHARS: usize = 120;

/// What the subscription reports to its owner.
#[derive(Debug)]
pub enum LiveEvent {
    Connected,
    Disconnected,
    /// A notification whose trajectory was fetched; replace the active one.
    Trajectory { notice: TrajectoryNotice, trajectory: Trajectory },
    /// A notification arrived but its trajectory could not be fetched.
    FetchFailed { notice: TrajectoryNotice, error: ApiError },
}

pub struct LiveUpdateClient<A: ?Sized> {
    api: Arc<A>,
    url: String,
    reconnect_delay: Duration,
}

impl<A> LiveUpdateClient<A>
where
    A: TrajectoryApi + ?Sized + 'static,
{
    /// Subscribe to the push channel of `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if no websocket URL can be derived.
    pub fn new(api: Arc<A>, config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_url(api, config.live_url()?, config.reconnect_delay))
    }

    pub fn with_url(api: Arc<A>, url: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self { api, url: url.into(), reconnect_delay }
    }

    /// Run the connect/listen/reconnect loop on the current runtime.
    pub fn spawn(self, events: mpsc::Sender<LiveEvent>) -> JoinHandle<()> {
        tokio::spawn(self.run(events))
    }

    /// Connect, listen, and reconnect after a fixed delay until `events` closes.
    pub async fn run(self, events: mpsc::Sender<LiveEvent>) {
        loop {
            match self.session(&events).await {
                Ok(()) => tracing::info!(url = %self.url, "push channel closed"),
                Err(LiveError::ReceiverGone) => break,
                Err(err) => tracing::warn!(url = %self.url, %err, "push channel failed"),
            }
            if events.send(LiveEvent::Disconnected).await.is_err() {
                break;
            }
            tokio::time::sleep(self.reconnect_delay).await;
        }
        tracing::debug!("push subscription stopped");
    }

    /// One connection lifetime. `Ok` on a clean close.
    async fn session(&self, events: &mpsc::Sender<LiveEvent>) -> Result<(), LiveError> {
        let (mut stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(|err| LiveError::Connect(Box::new(err)))?;
        tracing::info!(url = %self.url, "push channel connected");
        forward(events, LiveEvent::Connected).await?;

        while let Some(message) = stream.next().await {
            match message.map_err(|err| LiveError::Receive(Box::new(err)))? {
                Message::Text(text) => self.handle_payload(text.as_str(), events).await?,
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => self.handle_payload(text, events).await?,
                    Err(err) => tracing::warn!(%err, len = bytes.len(), "dropping non-UTF-8 notification"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
        Ok(())
    }

    async fn handle_payload(&self, text: &str, events: &mpsc::Sender<LiveEvent>) -> Result<(), LiveError> {
        let notice = match TrajectoryNotice::parse(text) {
            Ok(notice) => notice,
            Err(err) => {
                let excerpt: String = text.chars().take(LOG_EXCERPT_CHARS).collect();
                tracing::warn!(%err, payload = %excerpt, "dropping malformed notification");
                return Ok(());
            }
        };

        let event = match self.api.fetch_trajectory(&notice.trajectory_id).await {
            Ok(waypoints) => {
                tracing::info!(
                    trajectory_id = %notice.trajectory_id,
                    waypoints = waypoints.len(),
                    "live trajectory received"
                );
                let trajectory = Trajectory::new(Some(notice.trajectory_id.clone()), waypoints);
                LiveEvent::Trajectory { notice, trajectory }
            }
            Err(error) => {
                tracing::warn!(trajectory_id = %notice.trajectory_id, %error, "live trajectory fetch failed");
                LiveEvent::FetchFailed { notice, error }
            }
        };
        forward(events, event).await
    }
}

async fn forward(events: &mpsc::Sender<LiveEvent>, event: LiveEvent) -> Result<(), LiveError> {
    events.send(event).await.map_err(|_| LiveError::ReceiverGone)
}
