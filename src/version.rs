//! Various helper methods for reporting on the compiled version of the archiver, both in the
//! startup log line and in the user agent the HTTP client presents to the remote platform.

/// Reports the full version and various useful build settings as a well-formatted and
/// semi-structured string.
pub fn full_version() -> String {
    format!(
        "build-profile={} build-timestamp={} features={} repo-version={}",
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_FEATURES"),
        env!("REPO_VERSION"),
    )
}

/// The user agent sent with every request made by [`crate::api::ApiClient`].
pub fn user_agent() -> String {
    format!("overleaf-archiver/{}", env!("CARGO_PKG_VERSION"))
}
