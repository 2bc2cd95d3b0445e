use serde::Serialize;

/// Outbound chat message in the Slack incoming-webhook shape: a headline
/// plus exactly one attachment carrying the structured fields.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub color: String,
    pub fields: Vec<Field>,
    pub footer: String,
    pub ts: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl Field {
    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }

    pub fn long(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }
}
