use reqwest::{Method, StatusCode};

pub(crate) trait ApiRequest {
    fn method(&self) -> Method {
        Method::GET
    }

    /// Path segments appended to the client's base URL. Each segment is percent-encoded on its
    /// own so identifiers can't escape into other parts of the URL. A trailing empty segment
    /// produces a trailing slash.
    fn path(&self) -> Vec<String>;

    fn expected_status(&self) -> StatusCode {
        StatusCode::OK
    }
}
