use crate::core::{
    scoring::{calculate_match_score, display_percent},
    tokens::SkillSet,
};
use crate::models::{ClientRecord, ScoredClient, UserProfile};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredClient>,
    pub total_candidates: usize,
}

/// Rank clients by how well a skill set covers their required services
///
/// Sorting is stable and descending by the unrounded score, so ties keep
/// their input order. The output holds at most `limit` entries.
pub fn rank(tokens: &SkillSet, clients: &[ClientRecord], limit: usize) -> Vec<ScoredClient> {
    let mut scored: Vec<ScoredClient> = clients
        .iter()
        .map(|client| {
            let (score, matched_services) = calculate_match_score(tokens, client.required_services());

            ScoredClient {
                client_id: client.id.clone(),
                name: client.name.clone(),
                company: client.company.clone(),
                industry: client.industry.clone(),
                email: client.email.clone(),
                project_description: client.project_description.clone(),
                budget_range: client.budget_range.clone(),
                services_needed: client.required_services().to_vec(),
                matched_services,
                match_score: score,
                match_percent: display_percent(score),
            }
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored.truncate(limit);
    scored
}

/// Matching entry point that applies the configured limits
#[derive(Debug, Clone)]
pub struct Matcher {
    default_limit: usize,
    max_limit: usize,
}

impl Matcher {
    pub fn new(default_limit: usize, max_limit: usize) -> Self {
        Self {
            default_limit,
            max_limit: max_limit.max(default_limit),
        }
    }

    /// Rank clients for a freelancer profile
    ///
    /// # Arguments
    /// * `profile` - The freelancer whose skills and services are matched
    /// * `clients` - Client records in their listing order
    /// * `limit` - Requested number of results; the default applies when absent
    pub fn find_matches(
        &self,
        profile: &UserProfile,
        clients: &[ClientRecord],
        limit: Option<usize>,
    ) -> MatchResult {
        let tokens = SkillSet::from_profile_fields(
            profile.skills.as_deref(),
            profile.services_offered.as_deref(),
        );
        let limit = limit.unwrap_or(self.default_limit).min(self.max_limit);

        tracing::debug!(
            "Ranking {} clients against {} skill tokens (limit {})",
            clients.len(),
            tokens.len(),
            limit
        );

        MatchResult {
            matches: rank(&tokens, clients, limit),
            total_candidates: clients.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(3, 50)
    }
}
