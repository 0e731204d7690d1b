use serde::{Deserialize, Serialize};

use crate::utils::format_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
}

impl Club {
    pub fn status_display(&self) -> &str {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Active")
    }

    pub fn budget_display(&self) -> String {
        format!("${}", format_amount(self.budget.unwrap_or(0.0)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubMember {
    pub uid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
