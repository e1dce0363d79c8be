use crate::core::tokens::SkillSet;

/// Calculate how much of a client's required service list a freelancer covers
///
/// Scoring formula:
/// score = matched_services / required_services * 100
///
/// A client without requirements scores 0. Blank entries still count in the
/// denominator and never match. Returns the unrounded score together with the
/// matched services in their original order.
pub fn calculate_match_score(tokens: &SkillSet, required_services: &[String]) -> (f64, Vec<String>) {
    if required_services.is_empty() {
        return (0.0, Vec::new());
    }

    let matched: Vec<String> = required_services
        .iter()
        .filter(|service| tokens.covers(service))
        .cloned()
        .collect();

    let score = matched.len() as f64 / required_services.len() as f64 * 100.0;

    (score, matched)
}

/// Round a score for display, halves rounding up
#[inline]
pub fn display_percent(score: f64) -> u32 {
    (score + 0.5).floor().clamp(0.0, 100.0) as u32
}
