/// Requester (chat user) id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Origin-group id: the conversation the query came from. Rate limiting is
/// partitioned on this key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Platform message id (unique within a chat).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a platform message. Deletion needs both ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// An inbound search query, already parsed out of a platform event.
#[derive(Clone, Debug)]
pub struct QueryRequest {
    /// The message that carried the query (also identifies the origin group).
    pub message: MessageRef,
    pub requester: UserId,
    /// Display name of the requester, for the response footer.
    pub requester_name: String,
    pub text: String,
}

impl QueryRequest {
    pub fn chat_id(&self) -> ChatId {
        self.message.chat_id
    }
}

/// An out-of-band request to delete a previously produced response.
#[derive(Clone, Copy, Debug)]
pub struct RetractIntent {
    pub response: MessageRef,
    pub requester: UserId,
}
