use serde::{Deserialize, Serialize};

use crate::utils::{format_datetime, format_optional};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub end_datetime: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub participant_count: i64,
    #[serde(default)]
    pub club_uid: Option<String>,
}

impl Event {
    pub fn formatted_start(&self, missing: &str) -> String {
        format_datetime(self.start_datetime.as_deref(), missing)
    }

    pub fn formatted_end(&self, missing: &str) -> String {
        format_datetime(self.end_datetime.as_deref(), missing)
    }

    pub fn location_or(&self, missing: &str) -> String {
        format_optional(self.location.as_deref(), missing)
    }

    pub fn status_display(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }

    pub fn type_display(&self) -> &str {
        self.event_type.as_deref().unwrap_or("")
    }

    /// A zero or absent limit means the event is uncapped
    pub fn limit_display(&self) -> String {
        match self.limit {
            Some(limit) if limit > 0 => limit.to_string(),
            _ => "No limit".to_string(),
        }
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }
}
