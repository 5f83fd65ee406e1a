use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::platform::ApiUser;

pub type ApiProjectId = String;

/// A single project as described by the listing page. Rebuilt from scratch on every discovery
/// and never modified.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "strict", serde(deny_unknown_fields))]
pub struct ApiProject {
    pub id: ApiProjectId,
    pub name: String,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub trashed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    // Null when the last change was made by someone who has since left the project
    #[serde(default)]
    pub last_updated_by: Option<ApiUser>,

    #[serde(default)]
    pub owner: ApiUser,
}
