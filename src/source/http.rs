//! HTTP probe source.
//!
//! Fetches the probe list from the backend on a tokio runtime. Each reload is
//! tagged by a [`Sequencer`] so a slow response can never overwrite a newer
//! one.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::ProbeSource;
use crate::backend::{BackendClient, BackendError};
use crate::data::{ProbeRow, ProbeSnapshot, Sequencer};

type Reply = (u64, Result<Vec<ProbeRow>, BackendError>);

/// A probe source backed by the list endpoint.
#[derive(Debug)]
pub struct HttpSource {
    client: BackendClient,
    runtime: Handle,
    sequencer: Sequencer,
    sender: mpsc::UnboundedSender<Reply>,
    receiver: mpsc::UnboundedReceiver<Reply>,
    description: String,
    last_error: Option<String>,
}

impl HttpSource {
    pub fn new(client: BackendClient, runtime: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let description = format!("http: {}", client.endpoint());
        Self {
            client,
            runtime,
            sequencer: Sequencer::new(),
            sender,
            receiver,
            description,
            last_error: None,
        }
    }

    /// Reloads issued but not yet answered or superseded.
    pub fn in_flight(&self) -> u64 {
        self.sequencer.in_flight()
    }
}

impl ProbeSource for HttpSource {
    fn request_reload(&mut self) {
        let sequence = self.sequencer.issue();
        let client = self.client.clone();
        let sender = self.sender.clone();
        debug!(sequence, "reload requested");
        self.runtime.spawn(async move {
            let result = client.list_probes().await;
            let _ = sender.send((sequence, result));
        });
    }

    fn poll(&mut self) -> Option<ProbeSnapshot> {
        let mut latest = None;
        // Drain everything so only the newest accepted response is returned.
        while let Ok((sequence, result)) = self.receiver.try_recv() {
            match result {
                Ok(rows) => {
                    if self.sequencer.accept(sequence) {
                        self.last_error = None;
                        latest = Some(ProbeSnapshot::new(sequence, rows));
                    } else {
                        debug!(sequence, "discarding stale reload");
                    }
                }
                Err(e) => {
                    warn!(sequence, error = %e, "reload failed");
                    if self.sequencer.applied().is_none_or(|applied| sequence > applied) {
                        self.last_error = Some(e.to_string());
                    }
                }
            }
        }
        latest
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::client::test_server::serve_once;
    use std::time::Duration;

    async fn poll_until(source: &mut HttpSource) -> Option<ProbeSnapshot> {
        for _ in 0..200 {
            if let Some(snapshot) = source.poll() {
                return Some(snapshot);
            }
            if source.error().is_some() {
                return None;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        None
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_reload_delivers_snapshot() {
        let (endpoint, _request) =
            serve_once(200, r#"[{"host": "h1", "measurement": "icmp"}]"#).await;
        let client = BackendClient::builder().endpoint(endpoint.clone()).build();
        let mut source = HttpSource::new(client, Handle::current());
        assert_eq!(source.description(), format!("http: {}", endpoint));

        source.request_reload();
        let snapshot = poll_until(&mut source).await.expect("no snapshot");
        assert_eq!(snapshot.sequence, 1);
        assert_eq!(snapshot.rows[0].host, "h1");
        assert!(source.error().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_reload_sets_error() {
        let (endpoint, _request) = serve_once(500, "{}").await;
        let client = BackendClient::builder().endpoint(endpoint).build();
        let mut source = HttpSource::new(client, Handle::current());

        source.request_reload();
        assert!(poll_until(&mut source).await.is_none());
        assert!(source.error().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_stale_reply_is_discarded() {
        let client = BackendClient::builder().build();
        let mut source = HttpSource::new(client, Handle::current());
        let first = source.sequencer.issue();
        let second = source.sequencer.issue();

        // Newer response lands first, older one afterwards.
        source
            .sender
            .send((second, Ok(vec![ProbeRow::new("icmp", "new")])))
            .unwrap();
        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.rows[0].host, "new");

        source
            .sender
            .send((first, Ok(vec![ProbeRow::new("icmp", "old")])))
            .unwrap();
        assert!(source.poll().is_none());
        assert_eq!(source.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_stale_failure_keeps_error_clear() {
        let client = BackendClient::builder().build();
        let mut source = HttpSource::new(client, Handle::current());
        let first = source.sequencer.issue();
        let second = source.sequencer.issue();

        source
            .sender
            .send((second, Ok(vec![ProbeRow::new("icmp", "new")])))
            .unwrap();
        assert!(source.poll().is_some());

        source
            .sender
            .send((first, Err(BackendError::Timeout)))
            .unwrap();
        assert!(source.poll().is_none());
        assert!(source.error().is_none());

        // A failure newer than the applied snapshot is still reported.
        let third = source.sequencer.issue();
        source
            .sender
            .send((third, Err(BackendError::Timeout)))
            .unwrap();
        assert!(source.poll().is_none());
        assert!(source.error().is_some());
    }
}
