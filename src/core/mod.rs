// Core algorithm exports
pub mod matcher;
pub mod proposal;
pub mod scoring;
pub mod tokens;

pub use matcher::{rank, Matcher, MatchResult};
pub use proposal::{synthesize, MissingFieldPolicy, ProposalSynthesizer};
pub use scoring::{calculate_match_score, display_percent};
pub use tokens::{SkillSet, SkillToken};
