//! Non-blocking submission of probe mutations.
//!
//! The UI thread never awaits a request. A [`Submitter`] hands the request to
//! a background task and the result comes back through [`Submitter::poll`],
//! tagged with the ticket of the dialog that sent it.

use std::fmt::Debug;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

use super::{BackendClient, BackendError, MutationResponse, ProbeRequest};

/// Ticket identifying the dialog that issued a submission.
pub type Ticket = u64;

/// Outcome of one submission.
pub type Completion = (Ticket, Result<MutationResponse, BackendError>);

/// Sends probe mutations and reports their results without blocking.
pub trait Submitter: Send + Debug {
    /// Queue `request` on behalf of the dialog holding `ticket`.
    fn submit(&mut self, ticket: Ticket, request: ProbeRequest);

    /// Next finished submission, if any.
    fn poll(&mut self) -> Option<Completion>;
}

/// Submitter posting to the backend on a tokio runtime.
#[derive(Debug)]
pub struct HttpSubmitter {
    client: BackendClient,
    runtime: Handle,
    sender: mpsc::UnboundedSender<Completion>,
    receiver: mpsc::UnboundedReceiver<Completion>,
}

impl HttpSubmitter {
    pub fn new(client: BackendClient, runtime: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            client,
            runtime,
            sender,
            receiver,
        }
    }
}

impl Submitter for HttpSubmitter {
    fn submit(&mut self, ticket: Ticket, request: ProbeRequest) {
        let client = self.client.clone();
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = client.mutate(&request).await;
            debug!(ticket, ok = result.is_ok(), "submission finished");
            // The receiver only goes away when the app shuts down.
            let _ = sender.send((ticket, result));
        });
    }

    fn poll(&mut self) -> Option<Completion> {
        self.receiver.try_recv().ok()
    }
}

/// Submitter that accepts every request locally, used with file sources.
#[derive(Debug, Default)]
pub struct OfflineSubmitter {
    submitted: Vec<(Ticket, ProbeRequest)>,
    pending: Vec<Completion>,
}

impl OfflineSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, oldest first.
    pub fn submitted(&self) -> &[(Ticket, ProbeRequest)] {
        &self.submitted
    }
}

impl Submitter for OfflineSubmitter {
    fn submit(&mut self, ticket: Ticket, request: ProbeRequest) {
        self.submitted.push((ticket, request));
        self.pending.push((
            ticket,
            Ok(MutationResponse {
                success: true,
                message: None,
            }),
        ));
    }

    fn poll(&mut self) -> Option<Completion> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}
