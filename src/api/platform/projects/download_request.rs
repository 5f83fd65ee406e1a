use crate::api::client::ApiRequest;

pub(crate) struct DownloadRequest {
    project_id: String,
}

impl DownloadRequest {
    pub(crate) fn new(project_id: &str) -> Self {
        let project_id = project_id.to_string();
        Self { project_id }
    }
}

impl ApiRequest for DownloadRequest {
    fn path(&self) -> Vec<String> {
        vec![
            "project".to_string(),
            self.project_id.clone(),
            "download".to_string(),
            "zip".to_string(),
        ]
    }
}
