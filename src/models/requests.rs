use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{PortfolioDraft, ProfileUpdate, TaskDraft};

/// Request to rank clients for a freelancer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to synthesize and store a proposal for one client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateProposalRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "client_id", rename = "clientId")]
    pub client_id: String,
}

/// Request to move a proposal or task to another status
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Request to replace a proposal's text after manual editing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTextRequest {
    #[serde(alias = "proposal_text", rename = "proposalText")]
    pub proposal_text: String,
}

/// Query string carrying the acting user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Request to create or update the acting user's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveProfileRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub profile: ProfileUpdate,
}

/// Request to add a task to the user's board
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub task: TaskDraft,
}

/// Request to add or edit a portfolio entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PortfolioRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(nested)]
    #[serde(flatten)]
    pub item: PortfolioDraft,
}
