use std::collections::BTreeSet;

/// A trimmed, lowercased, non-empty unit of a comma-separated skill list
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkillToken(String);

impl SkillToken {
    /// Normalize a raw fragment; returns `None` when nothing is left after trimming
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-way substring relation against an already lowercased service name
    #[inline]
    pub fn overlaps(&self, service_lower: &str) -> bool {
        !service_lower.trim().is_empty()
            && (self.0.contains(service_lower) || service_lower.contains(self.0.as_str()))
    }
}

/// Set of skill tokens a freelancer can offer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    tokens: BTreeSet<SkillToken>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the profile's skills and services fields into one token set
    ///
    /// Absent fields contribute nothing; duplicates collapse.
    pub fn from_profile_fields(skills: Option<&str>, services_offered: Option<&str>) -> Self {
        let tokens = [skills, services_offered]
            .into_iter()
            .flatten()
            .flat_map(|field| field.split(','))
            .filter_map(SkillToken::parse)
            .collect();

        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillToken> {
        self.tokens.iter()
    }

    /// True if any token is related to the service by substring, either direction
    pub fn covers(&self, service: &str) -> bool {
        let service_lower = service.to_lowercase();
        self.tokens.iter().any(|token| token.overlaps(&service_lower))
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter
                .into_iter()
                .filter_map(|raw| SkillToken::parse(raw.as_ref()))
                .collect(),
        }
    }
}
