mod api_project;
mod api_user;
mod projects_blob;

pub use api_project::{ApiProject, ApiProjectId};
pub use api_user::ApiUser;
pub use projects_blob::ProjectsBlob;
