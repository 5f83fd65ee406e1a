mod download_request;
mod list_request;
mod listing_page;

pub use listing_page::{parse_listing_page, PROJECTS_BLOB_META_NAME};

use download_request::DownloadRequest;
use list_request::ListRequest;

use crate::api::client::{ApiClient, ApiError, ArchiveStream, HttpSender};
use crate::api::platform::{ApiProject, ProjectsBlob};

/// Lists the session's projects. Any failure along the way (request, missing markup, bad JSON)
/// is logged and reported as an empty list so a scheduled run never dies on discovery. Use
/// [`try_discover`] to tell "nothing there" apart from "couldn't look".
pub async fn discover<S: HttpSender>(client: &ApiClient<S>) -> Vec<ApiProject> {
    match try_discover(client).await {
        Ok(blob) => {
            tracing::info!(
                found = blob.projects.len(),
                total_size = blob.total_size,
                "discovered projects"
            );

            blob.projects
        }
        Err(err) => {
            tracing::warn!("project discovery failed, treating as no projects: {err}");
            Vec::new()
        }
    }
}

pub async fn try_discover<S: HttpSender>(
    client: &ApiClient<S>,
) -> Result<ProjectsBlob, DiscoveryError> {
    let response = client.send_request(&ListRequest).await?;
    let body = response.text().await.map_err(ApiError::from)?;

    parse_listing_page(&body)
}

/// Starts the zip export of a single project. The caller owns the returned stream.
pub async fn download<S: HttpSender>(
    client: &ApiClient<S>,
    project: &ApiProject,
) -> Result<ArchiveStream, ApiError> {
    let request = DownloadRequest::new(&project.id);
    tracing::info!(project = %project.name, id = %project.id, "downloading project archive");

    let response = client.send_request(&request).await?;

    Ok(ArchiveStream::new(response))
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to fetch the project listing: {0}")]
    Request(#[from] ApiError),

    #[error("listing page has no ol-prefetchedProjectsBlob meta element")]
    MissingMetadata,

    #[error("ol-prefetchedProjectsBlob meta element has no content attribute")]
    MissingContent,

    #[error("unable to decode the projects blob: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid selector: {0}")]
    Selector(String),
}
