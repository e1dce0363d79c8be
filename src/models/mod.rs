// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ClientRecord, ClientSummary, DashboardStats, NewProposal, NewTask, PortfolioDraft, PortfolioItem,
    PortfolioRecord, ProfileUpdate, Proposal, ProposalListing, ProposalStatus, ScoredClient, Task,
    TaskDraft, TaskStatus, UserProfile, REQUIRED_PROFILE_FIELDS,
};
pub use requests::{
    CreateTaskRequest, FindMatchesRequest, GenerateProposalRequest, PortfolioRequest, SaveProfileRequest,
    UpdateStatusRequest, UpdateTextRequest, UserQuery,
};
pub use responses::{
    ErrorResponse, FindMatchesResponse, HealthResponse, PortfolioListResponse, ProposalListResponse,
    TaskListResponse,
};
