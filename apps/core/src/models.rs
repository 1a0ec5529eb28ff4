use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;

/// Placeholder used when a snapshot record lacks a displayable text field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Represents a community member taken from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Opaque profile identifier (`unique_profile_id`). Empty when absent.
    pub id: String,
    /// Display name. `N/A` when absent.
    pub name: String,
    /// Primary email. `N/A` when absent.
    pub email: String,
    /// Numeric role code. `0` when absent.
    pub role: i64,
    /// Current city. `N/A` when absent.
    pub city: String,
    /// Current state. `N/A` when absent.
    pub state: String,
    /// Current country. `N/A` when absent.
    pub country: String,
    /// Primary phone number, if any.
    #[serde(default)]
    pub phone: Option<String>,
    /// LinkedIn profile URL, if any.
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Job title, if any.
    #[serde(default)]
    pub designation: Option<String>,
    /// Employer, if any.
    #[serde(default)]
    pub company: Option<String>,
    /// Whether the profile carries a picture.
    #[serde(default)]
    pub has_photo: bool,
    /// Whether the profile lists any work experience.
    #[serde(default)]
    pub has_work_history: bool,
}

/// Represents a job posting taken from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Job title. `N/A` when absent.
    pub designation: String,
    /// Hiring company. `N/A` when absent.
    pub company: String,
    /// Job location. `N/A` when absent.
    pub location: String,
    /// Employment type (full time, internship...). `N/A` when absent.
    pub job_type: String,
    /// Free-text description, if any.
    #[serde(default)]
    pub description: Option<String>,
}

/// Community information scraped from the public website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityInfo {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl Default for CommunityInfo {
    fn default() -> Self {
        Self {
            name: "Garje Marathi Global".to_string(),
            description: "A global community platform for Marathi professionals and enthusiasts."
                .to_string(),
            mission: None,
            contact_email: None,
        }
    }
}

/// Aggregate counters over the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityStats {
    pub total_members: usize,
    pub total_jobs: usize,
    pub members_with_photo: usize,
    pub members_with_work_history: usize,
}

/// The LLM models the assistant is allowed to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlmModel {
    #[default]
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "glm-4.7-flash")]
    Glm,
}

impl LlmModel {
    /// Every selectable model, in preference order.
    pub const ALL: [LlmModel; 2] = [LlmModel::Mistral, LlmModel::Glm];

    /// Public name used by clients and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmModel::Mistral => "mistral",
            LlmModel::Glm => "glm-4.7-flash",
        }
    }

    /// Identifier sent to the Ollama API.
    pub fn provider_id(&self) -> &'static str {
        match self {
            LlmModel::Mistral => "mistral",
            LlmModel::Glm => "glm-4.7-flash",
        }
    }

    /// Comma separated list of valid names, for error messages.
    pub fn available_names() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LlmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmModel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid model. Available: [{}]",
                    Self::available_names()
                ))
            })
    }
}

/// Per-call context for a chat message. Nothing survives between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatContext {
    /// Model used if the message falls through to the LLM.
    pub model: LlmModel,
}

impl ChatContext {
    pub fn new(model: LlmModel) -> Self {
        Self { model }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChatRequest {
    /// The user's message. Required and non-empty.
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub message: Option<String>,
    /// Optional model name; the server default applies when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// Successful reply of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
}
