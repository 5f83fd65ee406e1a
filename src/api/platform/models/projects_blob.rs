use serde::{Deserialize, Serialize};

use crate::api::platform::ApiProject;

/// JSON document embedded in the project listing page.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "strict", serde(deny_unknown_fields))]
pub struct ProjectsBlob {
    #[serde(default)]
    pub total_size: usize,

    #[serde(default)]
    pub projects: Vec<ApiProject>,
}

impl ProjectsBlob {
    pub fn decode(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
