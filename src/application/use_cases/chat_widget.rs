use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::application::GenerateAdviceUseCase;
use crate::domain::{
    AdviceReply, ChatMessage, Conversation, DomainError, FailureKind, Role, INTERNAL_ERROR_TEXT,
};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Sending,
}

/// Handle for one accepted submission. The holder runs the advice request
/// and reports back through [`ChatWidget::resolve`].
#[derive(Debug)]
pub struct SendTicket {
    id: RequestId,
    query: String,
    cancel: CancellationToken,
}

impl SendTicket {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cancelled when the widget abandons the request or is dropped.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn into_parts(self) -> (RequestId, String, CancellationToken) {
        (self.id, self.query, self.cancel)
    }
}

#[derive(Debug)]
struct Pending {
    id: RequestId,
    cancel: CancellationToken,
}

/// Conversation state for the VoltBot chat window.
///
/// Owns the message sequence, the input buffer, the open/closed flag and the
/// single outstanding request. A submission is accepted only while idle and
/// only for non-blank text; it moves the widget to [`WidgetState::Sending`]
/// until the matching [`resolve`](Self::resolve) or [`abandon`](Self::abandon).
#[derive(Debug)]
pub struct ChatWidget {
    conversation: Conversation,
    input: String,
    open: bool,
    pending: Option<Pending>,
    next_id: RequestId,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self::with_conversation(Conversation::new())
    }

    pub fn with_conversation(conversation: Conversation) -> Self {
        Self {
            conversation,
            input: String::new(),
            open: false,
            pending: None,
            next_id: 1,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn state(&self) -> WidgetState {
        if self.pending.is_some() {
            WidgetState::Sending
        } else {
            WidgetState::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending.as_ref().map(|p| p.id)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.input.pop()
    }

    /// Whether [`submit`](Self::submit) would currently be accepted.
    pub fn can_submit(&self) -> bool {
        self.pending.is_none() && !self.input.trim().is_empty()
    }

    /// Submit the input buffer.
    pub fn submit(&mut self) -> Option<SendTicket> {
        let text = self.input.clone();
        self.submit_text(&text)
    }

    /// Submit `text` as the user's next message.
    ///
    /// Returns `None` and changes nothing when `text` is blank or a request is
    /// already outstanding. Otherwise the user message is appended as typed,
    /// the input buffer is cleared and the widget enters the sending state.
    pub fn submit_text(&mut self, text: &str) -> Option<SendTicket> {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return None;
        }
        if let Some(pending) = &self.pending {
            debug!("Ignoring submission while request {} is outstanding", pending.id);
            return None;
        }

        self.conversation.push(Role::User, text, None);
        self.input.clear();

        let id = self.next_id;
        self.next_id += 1;
        let cancel = CancellationToken::new();
        self.pending = Some(Pending {
            id,
            cancel: cancel.clone(),
        });
        debug!("Request {id} submitted ({} chars)", text.len());

        Some(SendTicket {
            id,
            query: text.to_string(),
            cancel,
        })
    }

    /// Complete request `id`.
    ///
    /// A reply is appended as a model message. An error means the request
    /// failed outside the advice client; it is logged and an explicit error
    /// message is appended instead. Either way the widget returns to idle.
    /// Returns `false` for a request that is no longer outstanding.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<AdviceReply, DomainError>) -> bool {
        match &self.pending {
            Some(pending) if pending.id == id => {}
            _ => {
                debug!("Dropping reply for stale request {id}");
                return false;
            }
        }
        self.pending = None;

        match outcome {
            Ok(reply) => {
                let failure = reply.failure();
                self.conversation
                    .push(Role::Model, reply.into_text(), failure);
            }
            Err(e) => {
                error!("Advice request {id} failed: {e}");
                self.conversation
                    .push(Role::Model, INTERNAL_ERROR_TEXT, Some(FailureKind::Internal));
            }
        }
        true
    }

    /// Give up on the outstanding request without appending anything. A late
    /// reply for it is ignored by [`resolve`](Self::resolve).
    pub fn abandon(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancel.cancel();
                info!("Abandoned request {}", pending.id);
                true
            }
            None => false,
        }
    }

    /// Submit `text` and wait for the reply inline.
    ///
    /// Returns whether the submission was accepted. If this future is dropped
    /// before the reply arrives the request is abandoned, so the widget never
    /// stays in the sending state.
    pub async fn send(&mut self, advisor: &GenerateAdviceUseCase, text: &str) -> bool {
        let Some(ticket) = self.submit_text(text) else {
            return false;
        };
        let guard = SendGuard {
            widget: self,
            id: ticket.id(),
            done: false,
        };
        let reply = advisor.execute(ticket.query()).await;
        guard.finish(Ok(reply));
        true
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
        }
    }
}

struct SendGuard<'a> {
    widget: &'a mut ChatWidget,
    id: RequestId,
    done: bool,
}

impl SendGuard<'_> {
    fn finish(mut self, outcome: Result<AdviceReply, DomainError>) {
        self.widget.resolve(self.id, outcome);
        self.done = true;
    }
}

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.widget.abandon();
        }
    }
}
