use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Freelancer profile as stored in the `users` table
///
/// Every descriptive field is optional free text. Skills and services are
/// comma-separated lists; see [`crate::core::tokens::SkillSet`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub services_offered: Option<String>,
    #[serde(default)]
    pub work_history: Option<String>,
    #[serde(default)]
    pub rate_estimate: Option<String>,
}

/// Profile columns that must be non-empty for the profile to count as complete
pub const REQUIRED_PROFILE_FIELDS: [&str; 3] = ["full_name", "skills", "job_title"];

/// Editable profile fields, written with an upsert keyed on the user id
///
/// Absent fields are left untouched on an existing row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, alias = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, alias = "jobTitle", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, alias = "bioOutput", skip_serializing_if = "Option::is_none")]
    pub bio_output: Option<String>,
    #[serde(default, alias = "workHistory", skip_serializing_if = "Option::is_none")]
    pub work_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(default, alias = "servicesOffered", skip_serializing_if = "Option::is_none")]
    pub services_offered: Option<String>,
    #[serde(default, alias = "rateEstimate", skip_serializing_if = "Option::is_none")]
    pub rate_estimate: Option<String>,
    #[serde(default, alias = "professionalGoal", skip_serializing_if = "Option::is_none")]
    pub professional_goal: Option<String>,
}

/// Prospective client as stored in the `clients` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub project_description: Option<String>,
    #[serde(default)]
    pub budget_range: Option<String>,
    /// Services the client requires, in the order they were entered
    #[serde(default)]
    pub services_needed: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ClientRecord {
    pub fn required_services(&self) -> &[String] {
        self.services_needed.as_deref().unwrap_or(&[])
    }
}

/// Client ranked against a freelancer's skills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredClient {
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "projectDescription")]
    pub project_description: Option<String>,
    #[serde(rename = "budgetRange")]
    pub budget_range: Option<String>,
    #[serde(rename = "servicesNeeded")]
    pub services_needed: Vec<String>,
    #[serde(rename = "matchedServices")]
    pub matched_services: Vec<String>,
    /// Unrounded score in [0, 100]; the sort key
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    /// Score rounded for display
    #[serde(rename = "matchPercent")]
    pub match_percent: u32,
}

/// Lifecycle state of a proposal
///
/// Stored rows are parsed case-insensitively through [`FromStr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Sent => "sent",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(ProposalStatus::Draft),
            "sent" => Ok(ProposalStatus::Sent),
            "accepted" => Ok(ProposalStatus::Accepted),
            "rejected" => Ok(ProposalStatus::Rejected),
            other => Err(format!(
                "unknown proposal status '{}': expected one of draft, sent, accepted, rejected",
                other
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ProposalStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Proposal row as stored in the `proposals` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub proposal_text: Option<String>,
    #[serde(default)]
    pub estimated_rate: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ProposalStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Client columns shown next to each proposal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub name: Option<String>,
    pub company: Option<String>,
    #[serde(rename = "projectDescription")]
    pub project_description: Option<String>,
}

impl From<&ClientRecord> for ClientSummary {
    fn from(client: &ClientRecord) -> Self {
        Self {
            name: client.name.clone(),
            company: client.company.clone(),
            project_description: client.project_description.clone(),
        }
    }
}

/// A proposal together with the client it was written for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalListing {
    #[serde(flatten)]
    pub proposal: Proposal,
    /// `None` when the proposal has no client or the client row is gone
    pub client: Option<ClientSummary>,
}

/// Insert payload for a freshly generated proposal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProposal {
    pub user_id: String,
    pub client_id: String,
    pub proposal_text: String,
    pub estimated_rate: Option<String>,
    pub status: ProposalStatus,
}

impl NewProposal {
    /// Build the record persisted right after synthesis
    pub fn draft(profile: &UserProfile, client: &ClientRecord, proposal_text: String) -> Self {
        Self {
            user_id: profile.id.clone(),
            client_id: client.id.clone(),
            proposal_text,
            estimated_rate: profile.rate_estimate.clone(),
            status: ProposalStatus::Draft,
        }
    }
}

/// Board column of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!(
                "unknown task status '{}': expected one of pending, in_progress, completed",
                other
            )),
        }
    }
}

/// Task row as stored in the `tasks` table
///
/// `status` stays free text: the column is nullable and unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub task_title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields supplied when creating a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "taskTitle")]
    pub task_title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Insert payload for a task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub user_id: String,
    #[serde(flatten)]
    pub fields: TaskDraft,
}

impl NewTask {
    /// A blank due date is stored as null
    pub fn new(user_id: &str, mut fields: TaskDraft) -> Self {
        fields.due_date = fields.due_date.filter(|date| !date.trim().is_empty());
        Self {
            user_id: user_id.to_string(),
            fields,
        }
    }
}

/// Portfolio entry as stored in the `portfolio_items` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub project_date: Option<String>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub impact_results: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields supplied when adding or editing a portfolio entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PortfolioDraft {
    #[validate(length(min = 1))]
    #[serde(alias = "projectName")]
    pub project_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "clientName")]
    pub client_name: Option<String>,
    #[serde(default, alias = "projectDate")]
    pub project_date: Option<String>,
    /// Entries may themselves be comma-separated lists
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default, alias = "impactResults")]
    pub impact_results: Option<String>,
}

/// Write payload for a portfolio entry, used for both insert and edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRecord {
    pub user_id: String,
    #[serde(flatten)]
    pub fields: PortfolioDraft,
}

impl PortfolioRecord {
    /// Split technologies on commas, drop blanks, and store a blank date as null
    pub fn new(user_id: &str, mut fields: PortfolioDraft) -> Self {
        fields.technologies = fields
            .technologies
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(str::trim)
            .filter(|tech| !tech.is_empty())
            .map(String::from)
            .collect();
        fields.project_date = fields.project_date.filter(|date| !date.trim().is_empty());

        Self {
            user_id: user_id.to_string(),
            fields,
        }
    }
}

/// Summary counts for the freelancer's dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "totalTasks")]
    pub total_tasks: usize,
    #[serde(rename = "completedTasks")]
    pub completed_tasks: usize,
    pub proposals: usize,
    #[serde(rename = "portfolioItems")]
    pub portfolio_items: usize,
    #[serde(rename = "profileComplete")]
    pub profile_complete: bool,
}

impl DashboardStats {
    /// Every task counts toward the total, whatever its status column holds
    pub fn compute<'a, I>(
        task_statuses: I,
        proposals: usize,
        portfolio_items: usize,
        profile_complete: bool,
    ) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let (total_tasks, completed_tasks) =
            task_statuses
                .into_iter()
                .fold((0, 0), |(total, completed), status| {
                    let done = status == Some(TaskStatus::Completed.as_str());
                    (total + 1, completed + usize::from(done))
                });

        Self {
            total_tasks,
            completed_tasks,
            proposals,
            portfolio_items,
            profile_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("Sent".parse::<ProposalStatus>(), Ok(ProposalStatus::Sent));
        assert_eq!(" draft ".parse::<ProposalStatus>(), Ok(ProposalStatus::Draft));
        assert!("archived".parse::<ProposalStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProposalStatus::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
    }

    #[test]
    fn test_status_deserializes_any_case() {
        let status: ProposalStatus = serde_json::from_str("\"Sent\"").unwrap();
        assert_eq!(status, ProposalStatus::Sent);
        assert!(serde_json::from_str::<ProposalStatus>("\"archived\"").is_err());
    }

    #[test]
    fn test_profile_update_skips_absent_fields() {
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({
            "fullName": "Ada",
            "skills": "Rust"
        }))
        .unwrap();

        let value = serde_json::to_value(&update).unwrap();

        assert_eq!(value, serde_json::json!({"full_name": "Ada", "skills": "Rust"}));
    }

    #[test]
    fn test_new_task_blanks_due_date() {
        let task = NewTask::new(
            "u1",
            TaskDraft {
                title: Some("Invoice".to_string()),
                due_date: Some(String::new()),
                ..Default::default()
            },
        );

        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["status"], "pending");
        assert!(value["due_date"].is_null());
    }

    #[test]
    fn test_portfolio_record_splits_technologies() {
        let record = PortfolioRecord::new(
            "u1",
            PortfolioDraft {
                project_name: "Storefront".to_string(),
                technologies: vec!["React, Rust".to_string(), " ".to_string(), "Figma".to_string()],
                project_date: Some("  ".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(record.fields.technologies, vec!["React", "Rust", "Figma"]);
        assert!(record.fields.project_date.is_none());
    }

    #[test]
    fn test_task_status_parsing() {
        assert_eq!("In_Progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("blocked".parse::<TaskStatus>().is_err());
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_client_row_with_nulls() {
        let client: ClientRecord = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "name": null,
            "services_needed": null,
            "required_services": "ignored"
        }))
        .unwrap();

        assert!(client.name.is_none());
        assert!(client.required_services().is_empty());
    }

    #[test]
    fn test_proposal_row_with_null_status() {
        let proposal: Proposal = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "status": null,
            "proposal_text": "Dear Client"
        }))
        .unwrap();

        assert_eq!(proposal.status, ProposalStatus::Draft);
        assert!(proposal.client_id.is_none());
    }

    #[test]
    fn test_dashboard_counts_completed_tasks() {
        let statuses = [Some("completed"), Some("pending"), None];

        let stats = DashboardStats::compute(statuses, 2, 5, false);

        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.proposals, 2);
        assert_eq!(stats.portfolio_items, 5);
        assert!(!stats.profile_complete);
    }
}
