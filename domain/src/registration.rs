use crate::error::Error;
use crate::gateway::WebinarPlatform;
use crate::WebinarId;
use log::*;
use serde::Deserialize;
use utoipa::ToSchema;

/// Last name sent to the platform when neither a school nor a surname was given.
pub const LAST_NAME_PLACEHOLDER: &str = "—";

/// Registration form as submitted by the browser.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub webinar_id: WebinarId,
    #[serde(default)]
    pub occurrence_id: String,
    /// Full name; the first word becomes the first name.
    #[serde(default)]
    pub name: String,
    /// School or organization, registered as the last name when present.
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A registrant ready to be submitted for one webinar occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    pub webinar_id: WebinarId,
    pub occurrence_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Outcome of a registration the platform answered.
///
/// Ordinary rejections (already registered, session closed, ...) are a
/// `Rejected` value, not an `Error`; `error_message` is the platform's
/// response body, untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationResult {
    Joined { join_url: String },
    Rejected { error_message: String },
}

impl From<RegistrationForm> for RegistrationRequest {
    fn from(form: RegistrationForm) -> Self {
        let (first_name, last_name) = derive_names(&form.name, &form.school);
        let phone = form
            .phone
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty());

        Self {
            webinar_id: form.webinar_id,
            occurrence_id: form.occurrence_id.trim().to_string(),
            first_name,
            last_name,
            email: form.email.trim().to_string(),
            phone,
        }
    }
}

/// Split a full name into the first and last name the platform expects.
///
/// The first word of `name` is the first name. The last name is the school when
/// one is given, otherwise the remaining words of `name`, otherwise
/// [`LAST_NAME_PLACEHOLDER`].
pub fn derive_names(name: &str, school: &str) -> (String, String) {
    let mut words = name.split_whitespace();
    let first_name = words.next().unwrap_or_default().to_string();
    let rest = words.collect::<Vec<_>>().join(" ");

    let school = school.trim();
    let last_name = if !school.is_empty() {
        school.to_string()
    } else if !rest.is_empty() {
        rest
    } else {
        LAST_NAME_PLACEHOLDER.to_string()
    };

    (first_name, last_name)
}

/// Register the visitor described by `form` and return the platform's answer.
pub async fn register(
    platform: &dyn WebinarPlatform,
    form: RegistrationForm,
) -> Result<RegistrationResult, Error> {
    let request = RegistrationRequest::from(form);
    info!(
        "Registering for webinar {} occurrence {:?}",
        request.webinar_id, request.occurrence_id
    );

    let result = platform.register(&request).await?;
    match &result {
        RegistrationResult::Joined { .. } => {
            info!("Registered for webinar {}", request.webinar_id)
        }
        RegistrationResult::Rejected { error_message } => warn!(
            "Registration for webinar {} rejected: {}",
            request.webinar_id, error_message
        ),
    }

    Ok(result)
}
