use serde::{Deserialize, Serialize};

/// Body of endpoints that answer with nothing but an optional message
/// (join, delete).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub msg: Option<String>,
}

impl Ack {
    pub fn message_or(&self, fallback: &str) -> String {
        self.msg
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
