use uuid::Uuid;

use crate::models::SessionId;

/// Correlation id attached to every inbound message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creates the tracing span an inbound message is handled in
///
/// Every catalog request and reply logged while handling the message carries the
/// request id and chat id.
pub fn make_span_with_request_id(request_id: &RequestId, session: SessionId) -> tracing::Span {
    tracing::info_span!(
        "incoming_message",
        request_id = %request_id,
        chat_id = %session,
    )
}
