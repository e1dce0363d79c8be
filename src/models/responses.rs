use serde::{Deserialize, Serialize};
use crate::models::domain::{PortfolioItem, ProposalListing, ScoredClient, Task};

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<ScoredClient>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response listing a user's proposals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalListResponse {
    pub proposals: Vec<ProposalListing>,
    pub count: usize,
}

/// Response listing a user's tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub count: usize,
}

/// Response listing a user's portfolio entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioListResponse {
    pub items: Vec<PortfolioItem>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
