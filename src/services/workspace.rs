use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::core::{MatchResult, Matcher, ProposalSynthesizer};
use crate::models::{
    ClientRecord, ClientSummary, DashboardStats, NewProposal, NewTask, PortfolioDraft, PortfolioItem,
    PortfolioRecord, ProfileUpdate, Proposal, ProposalListing, ProposalStatus, Task, TaskDraft, TaskStatus,
    UserProfile, REQUIRED_PROFILE_FIELDS,
};
use crate::services::store::{
    from_record, tables, text_column, to_record, DataStore, Filter, Order, Record, StoreError,
};

/// Errors surfaced by freelancer workflows
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Data store error: {0}")]
    Store(#[from] StoreError),

    #[error("Profile not found for user {0}; complete your profile first")]
    ProfileNotFound(String),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Proposal not found: {0}")]
    ProposalNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Portfolio item not found: {0}")]
    PortfolioItemNotFound(String),

    #[error("Cannot move proposal from {from} to {to}")]
    InvalidTransition { from: ProposalStatus, to: ProposalStatus },
}

/// Parse rows, logging and skipping any that do not fit the expected shape
fn parse_rows<T: DeserializeOwned>(rows: Vec<Record>, kind: &str) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match from_record::<T>(row) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed {} row: {}", kind, e);
                None
            }
        })
        .collect()
}

/// Map a missing row to the workflow's own not-found error
fn not_found_as(err: StoreError, missing: impl FnOnce() -> ServiceError) -> ServiceError {
    match err {
        StoreError::NotFound(_) => missing(),
        other => other.into(),
    }
}

fn profile_complete(profile: Option<&Record>) -> bool {
    profile.is_some_and(|row| {
        REQUIRED_PROFILE_FIELDS
            .iter()
            .all(|column| text_column(row, column).is_some_and(|value| !value.is_empty()))
    })
}

/// Wires the data store to the matcher and proposal synthesizer
///
/// Every operation takes the acting user explicitly; nothing is read from
/// ambient session state.
#[derive(Clone)]
pub struct FreelanceService {
    store: Arc<dyn DataStore>,
    matcher: Matcher,
    synthesizer: ProposalSynthesizer,
}

impl FreelanceService {
    pub fn new(store: Arc<dyn DataStore>, matcher: Matcher, synthesizer: ProposalSynthesizer) -> Self {
        Self {
            store,
            matcher,
            synthesizer,
        }
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    async fn find_one(&self, table: &str, id: &str) -> Result<Option<Record>, StoreError> {
        let rows = self.store.read(table, &[Filter::eq("id", id)], None).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn load_profile(&self, user_id: &str) -> Result<UserProfile, ServiceError> {
        match self.find_one(tables::USERS, user_id).await? {
            Some(record) => Ok(from_record(record)?),
            None => Err(ServiceError::ProfileNotFound(user_id.to_string())),
        }
    }

    /// Create or update the user's profile; only the supplied fields change
    pub async fn save_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ServiceError> {
        let mut record = to_record(&update)?;
        record.insert("id".to_string(), Value::String(user_id.to_string()));

        let stored = self.store.upsert(tables::USERS, record).await?;

        tracing::info!("Saved profile for user {}", user_id);

        Ok(from_record(stored)?)
    }

    pub async fn load_client(&self, client_id: &str) -> Result<ClientRecord, ServiceError> {
        match self.find_one(tables::CLIENTS, client_id).await? {
            Some(record) => Ok(from_record(record)?),
            None => Err(ServiceError::ClientNotFound(client_id.to_string())),
        }
    }

    pub async fn load_proposal(&self, proposal_id: &str) -> Result<Proposal, ServiceError> {
        match self.find_one(tables::PROPOSALS, proposal_id).await? {
            Some(record) => Ok(from_record(record)?),
            None => Err(ServiceError::ProposalNotFound(proposal_id.to_string())),
        }
    }

    /// All clients, newest first; rows that fail to parse are skipped
    pub async fn list_clients(&self) -> Result<Vec<ClientRecord>, ServiceError> {
        let rows = self
            .store
            .read(tables::CLIENTS, &[], Some(&Order::desc("created_at")))
            .await?;

        Ok(parse_rows(rows, "client"))
    }

    /// Rank clients for a user; a missing profile matches with no skills
    pub async fn find_matches(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<MatchResult, ServiceError> {
        let profile = match self.load_profile(user_id).await {
            Ok(profile) => profile,
            Err(ServiceError::ProfileNotFound(_)) => {
                tracing::info!("No profile for {}, ranking without skills", user_id);
                UserProfile {
                    id: user_id.to_string(),
                    ..Default::default()
                }
            }
            Err(e) => return Err(e),
        };

        let clients = self.list_clients().await?;
        let result = self.matcher.find_matches(&profile, &clients, limit);

        tracing::info!(
            "Returning {} matches for user {} (from {} clients)",
            result.matches.len(),
            user_id,
            result.total_candidates
        );

        Ok(result)
    }

    /// Synthesize a proposal for a client and store it as a draft
    pub async fn generate_proposal(
        &self,
        user_id: &str,
        client_id: &str,
    ) -> Result<Proposal, ServiceError> {
        let profile = self.load_profile(user_id).await?;
        let client = self.load_client(client_id).await?;

        let text = self.synthesizer.synthesize(&profile, &client);
        let draft = NewProposal::draft(&profile, &client, text);

        let stored = self.store.insert(tables::PROPOSALS, to_record(&draft)?).await?;

        tracing::info!("Generated draft proposal for user {} and client {}", user_id, client_id);

        Ok(from_record(stored)?)
    }

    /// A user's proposals, newest first, each with its client's summary
    ///
    /// Rows that fail to parse are skipped rather than failing the whole list.
    pub async fn list_proposals(&self, user_id: &str) -> Result<Vec<ProposalListing>, ServiceError> {
        let (rows, clients) = tokio::try_join!(
            async {
                self.store
                    .read(
                        tables::PROPOSALS,
                        &[Filter::eq("user_id", user_id)],
                        Some(&Order::desc("created_at")),
                    )
                    .await
                    .map_err(ServiceError::from)
            },
            self.list_clients(),
        )?;

        let summaries: HashMap<&str, ClientSummary> = clients
            .iter()
            .map(|client| (client.id.as_str(), ClientSummary::from(client)))
            .collect();

        let listings = parse_rows::<Proposal>(rows, "proposal")
            .into_iter()
            .map(|proposal| {
                let client = proposal
                    .client_id
                    .as_deref()
                    .and_then(|id| summaries.get(id))
                    .cloned();
                ProposalListing { proposal, client }
            })
            .collect();

        Ok(listings)
    }

    pub async fn update_proposal_status(
        &self,
        proposal_id: &str,
        status: ProposalStatus,
    ) -> Result<(), ServiceError> {
        let mut partial = Record::new();
        partial.insert("status".to_string(), Value::String(status.to_string()));
        self.touch_proposal(proposal_id, partial).await?;

        tracing::info!("Proposal {} status changed to {}", proposal_id, status);
        Ok(())
    }

    /// Mark a draft as sent; any other starting status is rejected
    pub async fn send_proposal(&self, proposal_id: &str) -> Result<(), ServiceError> {
        let proposal = self.load_proposal(proposal_id).await?;

        if proposal.status != ProposalStatus::Draft {
            return Err(ServiceError::InvalidTransition {
                from: proposal.status,
                to: ProposalStatus::Sent,
            });
        }

        self.update_proposal_status(proposal_id, ProposalStatus::Sent).await
    }

    pub async fn update_proposal_text(
        &self,
        proposal_id: &str,
        text: String,
    ) -> Result<(), ServiceError> {
        let mut partial = Record::new();
        partial.insert("proposal_text".to_string(), Value::String(text));
        self.touch_proposal(proposal_id, partial).await?;

        tracing::debug!("Saved edited text for proposal {}", proposal_id);
        Ok(())
    }

    async fn touch_proposal(&self, proposal_id: &str, partial: Record) -> Result<(), ServiceError> {
        self.touch(tables::PROPOSALS, proposal_id, partial)
            .await
            .map_err(|e| not_found_as(e, || ServiceError::ProposalNotFound(proposal_id.to_string())))
    }

    /// Apply a partial update and stamp `updated_at`
    async fn touch(&self, table: &str, id: &str, mut partial: Record) -> Result<(), StoreError> {
        partial.insert(
            "updated_at".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );

        self.store.update(table, id, partial).await
    }

    /// A user's tasks, newest first
    pub async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, ServiceError> {
        let rows = self
            .store
            .read(
                tables::TASKS,
                &[Filter::eq("user_id", user_id)],
                Some(&Order::desc("created_at")),
            )
            .await?;

        Ok(parse_rows(rows, "task"))
    }

    pub async fn create_task(&self, user_id: &str, draft: TaskDraft) -> Result<Task, ServiceError> {
        let stored = self
            .store
            .insert(tables::TASKS, to_record(&NewTask::new(user_id, draft))?)
            .await?;

        tracing::info!("Created task for user {}", user_id);

        Ok(from_record(stored)?)
    }

    pub async fn update_task_status(&self, task_id: &str, status: TaskStatus) -> Result<(), ServiceError> {
        let mut partial = Record::new();
        partial.insert("status".to_string(), Value::String(status.to_string()));

        self.touch(tables::TASKS, task_id, partial)
            .await
            .map_err(|e| not_found_as(e, || ServiceError::TaskNotFound(task_id.to_string())))?;

        tracing::info!("Task {} status changed to {}", task_id, status);
        Ok(())
    }

    /// A user's portfolio, most recent project first
    pub async fn list_portfolio(&self, user_id: &str) -> Result<Vec<PortfolioItem>, ServiceError> {
        let rows = self
            .store
            .read(
                tables::PORTFOLIO_ITEMS,
                &[Filter::eq("user_id", user_id)],
                Some(&Order::desc("project_date")),
            )
            .await?;

        Ok(parse_rows(rows, "portfolio"))
    }

    pub async fn add_portfolio_item(
        &self,
        user_id: &str,
        draft: PortfolioDraft,
    ) -> Result<PortfolioItem, ServiceError> {
        let record = to_record(&PortfolioRecord::new(user_id, draft))?;
        let stored = self.store.insert(tables::PORTFOLIO_ITEMS, record).await?;

        tracing::info!("Added portfolio item for user {}", user_id);

        Ok(from_record(stored)?)
    }

    /// Replace a portfolio entry's fields with an edited copy
    pub async fn update_portfolio_item(
        &self,
        item_id: &str,
        user_id: &str,
        draft: PortfolioDraft,
    ) -> Result<(), ServiceError> {
        let record = to_record(&PortfolioRecord::new(user_id, draft))?;

        self.store
            .update(tables::PORTFOLIO_ITEMS, item_id, record)
            .await
            .map_err(|e| not_found_as(e, || ServiceError::PortfolioItemNotFound(item_id.to_string())))?;

        tracing::debug!("Updated portfolio item {}", item_id);
        Ok(())
    }

    pub async fn delete_portfolio_item(&self, item_id: &str) -> Result<(), ServiceError> {
        if !self.store.delete(tables::PORTFOLIO_ITEMS, item_id).await? {
            return Err(ServiceError::PortfolioItemNotFound(item_id.to_string()));
        }

        tracing::info!("Deleted portfolio item {}", item_id);
        Ok(())
    }

    /// Task, proposal and portfolio counts plus profile completeness
    ///
    /// Counts come from the raw rows, so a row with odd column types still counts.
    pub async fn dashboard(&self, user_id: &str) -> Result<DashboardStats, ServiceError> {
        let by_user = [Filter::eq("user_id", user_id)];

        let (tasks, proposals, portfolio, profile) = tokio::try_join!(
            self.store.read(tables::TASKS, &by_user, None),
            self.store.read(tables::PROPOSALS, &by_user, None),
            self.store.read(tables::PORTFOLIO_ITEMS, &by_user, None),
            self.find_one(tables::USERS, user_id),
        )?;

        Ok(DashboardStats::compute(
            tasks.iter().map(|row| text_column(row, "status")),
            proposals.len(),
            portfolio.len(),
            profile_complete(profile.as_ref()),
        ))
    }
}
