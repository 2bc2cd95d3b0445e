mod format;
mod message;

pub use format::{event_message, incident_message};
pub use message::{Attachment, ChatMessage, Field};
