pub mod models;
pub mod projects;

pub use models::{ApiProject, ApiProjectId, ApiUser, ProjectsBlob};
