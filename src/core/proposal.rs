use serde::Deserialize;

use crate::models::{ClientRecord, UserProfile};

/// Literal rendered for absent fields under [`MissingFieldPolicy::Placeholder`]
pub const MISSING_PLACEHOLDER: &str = "undefined";

/// Greeting name used when the client has no name
pub const FALLBACK_CLIENT_NAME: &str = "Client";

/// How absent profile or client fields are rendered into a proposal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Render the literal `undefined`, matching proposals produced so far
    #[default]
    Placeholder,
    /// Render nothing
    Empty,
}

impl MissingFieldPolicy {
    fn render<'a>(&self, value: Option<&'a str>) -> &'a str {
        match (value, self) {
            (Some(v), _) => v,
            (None, MissingFieldPolicy::Placeholder) => MISSING_PLACEHOLDER,
            (None, MissingFieldPolicy::Empty) => "",
        }
    }
}

/// Renders proposal text from a freelancer profile and a client
///
/// Pure and total: no I/O, no validation, and identical inputs always give
/// byte-identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProposalSynthesizer {
    missing_fields: MissingFieldPolicy,
}

impl ProposalSynthesizer {
    pub fn new(missing_fields: MissingFieldPolicy) -> Self {
        Self { missing_fields }
    }

    pub fn missing_fields(&self) -> MissingFieldPolicy {
        self.missing_fields
    }

    fn field<'a>(&self, value: &'a Option<String>) -> &'a str {
        self.missing_fields.render(value.as_deref())
    }

    pub fn synthesize(&self, profile: &UserProfile, client: &ClientRecord) -> String {
        let client_name = client
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_CLIENT_NAME);
        let requirements = client.services_needed.as_ref().map(|services| services.join(", "));
        let skills = self.field(&profile.skills);

        format!(
            "Dear {client_name},\n\
             \n\
             I am excited about your {project} project. With my expertise in {skills}, I am confident I can deliver exceptional results.\n\
             \n\
             My relevant experience includes:\n\
             {work_history}\n\
             \n\
             Services I can provide for this project:\n\
             {services}\n\
             \n\
             Based on your requirements for {requirements}, I believe my skills in {skills} make me an ideal fit for this project.\n\
             \n\
             My estimated rate for this project would be {rate}, and I am committed to delivering high-quality work within your timeline.\n\
             \n\
             I would love to discuss this opportunity further and answer any questions you may have.\n\
             \n\
             Best regards,\n\
             {full_name}\n\
             {email}\n\
             {phone}",
            project = self.field(&client.project_description),
            work_history = self.field(&profile.work_history),
            services = self.field(&profile.services_offered),
            requirements = self.field(&requirements),
            rate = self.field(&profile.rate_estimate),
            full_name = self.field(&profile.full_name),
            email = self.field(&profile.email),
            phone = self.field(&profile.phone),
        )
    }
}

/// Render a proposal with an explicit missing-field policy
pub fn synthesize(profile: &UserProfile, client: &ClientRecord, policy: MissingFieldPolicy) -> String {
    ProposalSynthesizer::new(policy).synthesize(profile, client)
}
