#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinerMessage {
    /// The human-readable message being relayed by the device
    pub message: String,
}

impl MinerMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The text shown for this message, or `None` if the device sent nothing readable.
    pub fn text(&self) -> Option<&str> {
        let text = self.message.trim();
        (!text.is_empty()).then_some(text)
    }
}
