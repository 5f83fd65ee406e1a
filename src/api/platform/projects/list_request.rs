use crate::api::client::ApiRequest;

/// The dashboard page listing every project the session can see.
pub(crate) struct ListRequest;

impl ApiRequest for ListRequest {
    fn path(&self) -> Vec<String> {
        vec!["project".to_string(), String::new()]
    }
}
