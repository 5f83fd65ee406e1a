use scraper::{Html, Selector};

use crate::api::platform::projects::DiscoveryError;
use crate::api::platform::ProjectsBlob;

/// Value of the `name` attribute on the meta element carrying the projects blob.
pub const PROJECTS_BLOB_META_NAME: &str = "ol-prefetchedProjectsBlob";

/// Pulls the embedded projects blob out of the listing page. The blob is JSON stored in the
/// `content` attribute; the HTML parser takes care of unescaping the attribute value.
pub fn parse_listing_page(html: &str) -> Result<ProjectsBlob, DiscoveryError> {
    let selector_src = format!(r#"meta[name="{PROJECTS_BLOB_META_NAME}"]"#);
    let selector =
        Selector::parse(&selector_src).map_err(|err| DiscoveryError::Selector(err.to_string()))?;

    let document = Html::parse_document(html);
    let element = document
        .select(&selector)
        .next()
        .ok_or(DiscoveryError::MissingMetadata)?;

    let content = element
        .value()
        .attr("content")
        .ok_or(DiscoveryError::MissingContent)?;

    let blob = ProjectsBlob::decode(content)?;

    Ok(blob)
}
