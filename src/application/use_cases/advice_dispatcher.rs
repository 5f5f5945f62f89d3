use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::application::{GenerateAdviceUseCase, RequestId, SendTicket};
use crate::domain::{AdviceReply, DomainError};

/// Outcome of one dispatched request, to be fed to `ChatWidget::resolve`.
#[derive(Debug)]
pub struct Resolution {
    pub id: RequestId,
    pub outcome: Result<AdviceReply, DomainError>,
}

/// Runs advice requests in the background so the UI loop stays responsive.
///
/// Each ticket gets its own task. A panic inside the request is reported as
/// `DomainError::Internal`; a cancelled ticket reports nothing.
#[derive(Clone)]
pub struct AdviceDispatcher {
    advisor: Arc<GenerateAdviceUseCase>,
    sender: mpsc::UnboundedSender<Resolution>,
}

impl AdviceDispatcher {
    pub fn new(
        advisor: Arc<GenerateAdviceUseCase>,
        sender: mpsc::UnboundedSender<Resolution>,
    ) -> Self {
        Self { advisor, sender }
    }

    /// Convenience: a dispatcher plus the receiving end of its channel.
    pub fn channel(
        advisor: Arc<GenerateAdviceUseCase>,
    ) -> (Self, mpsc::UnboundedReceiver<Resolution>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(advisor, sender), receiver)
    }

    pub fn dispatch(&self, ticket: SendTicket) -> JoinHandle<()> {
        let advisor = Arc::clone(&self.advisor);
        let sender = self.sender.clone();
        let (id, query, cancel) = ticket.into_parts();

        tokio::spawn(async move {
            let request = tokio::spawn(async move { advisor.execute(&query).await });
            let abort = request.abort_handle();

            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    abort.abort();
                    debug!("Request {id} cancelled before completion");
                    return;
                }
                joined = request => joined
                    .map_err(|e| DomainError::internal(format!("advice task failed: {e}"))),
            };

            if sender.send(Resolution { id, outcome }).is_err() {
                debug!("Receiver closed; dropping reply for request {id}");
            }
        })
    }
}
