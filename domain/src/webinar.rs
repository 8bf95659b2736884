use crate::error::{config_error, Error};
use crate::gateway::WebinarPlatform;
use crate::WebinarId;
use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use utoipa::ToSchema;

/// One scheduled instance of a (possibly recurring) webinar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub occurrence_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// The directory view of a webinar: only what the registration page needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebinarSummary {
    pub id: WebinarId,
    pub topic: String,
    pub occurrences: Vec<Occurrence>,
}

/// The session the registration page preselects.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextSession {
    pub webinar_id: WebinarId,
    pub topic: String,
    pub occurrence: Occurrence,
}

/// Fetch the directory for every webinar ID in the configuration, in configured order.
pub async fn list(
    platform: &dyn WebinarPlatform,
    config: &Config,
) -> Result<Vec<WebinarSummary>, Error> {
    let ids = configured_ids(config)?;
    debug!("Listing {} configured webinars", ids.len());

    platform.list_webinars(&ids).await
}

/// Parse the configured webinar IDs. Blank entries are already dropped by `Config`.
pub fn configured_ids(config: &Config) -> Result<Vec<WebinarId>, Error> {
    config
        .webinar_ids()
        .iter()
        .map(|id| {
            id.parse::<WebinarId>().map_err(|_| {
                warn!("Invalid webinar ID in WEBINAR_IDS: {id}");
                config_error(&format!("Invalid webinar ID in WEBINAR_IDS: {id}"))
            })
        })
        .collect()
}

/// Pick the session to preselect: the earliest occurrence starting after `now`,
/// or the earliest occurrence overall when every session is in the past.
/// Equal start times keep directory order.
pub fn next_session(webinars: &[WebinarSummary], now: DateTime<Utc>) -> Option<NextSession> {
    let mut sessions: Vec<(&WebinarSummary, &Occurrence)> = webinars
        .iter()
        .flat_map(|webinar| webinar.occurrences.iter().map(move |occ| (webinar, occ)))
        .collect();
    sessions.sort_by_key(|(_, occ)| occ.start_time);

    let (webinar, occurrence) = sessions
        .iter()
        .find(|(_, occ)| occ.start_time > now)
        .or_else(|| sessions.first())?;

    Some(NextSession {
        webinar_id: webinar.id,
        topic: webinar.topic.clone(),
        occurrence: (*occurrence).clone(),
    })
}
