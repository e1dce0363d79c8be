//! Compass Match - client matching and proposal generation for freelancers
//!
//! This library ranks client records against a freelancer's declared skills
//! and services, and renders proposal text for a chosen client. Both are pure
//! functions; the service layer loads and stores records through a
//! [`services::DataStore`].

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{rank, synthesize, Matcher, MissingFieldPolicy, ProposalSynthesizer, SkillSet};
pub use models::{ClientRecord, NewProposal, Proposal, ProposalStatus, ScoredClient, UserProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let tokens = SkillSet::from_profile_fields(Some("design"), None);
        let client = ClientRecord {
            id: "c1".to_string(),
            services_needed: Some(vec!["UI design".to_string()]),
            ..Default::default()
        };

        let ranked = rank(&tokens, &[client], 3);
        assert_eq!(ranked[0].match_score, 100.0);
    }
}
