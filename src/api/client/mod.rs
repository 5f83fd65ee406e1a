mod archive_stream;
mod error;
mod traits;
mod transport;

pub use archive_stream::ArchiveStream;
pub use error::{ApiClientError, ApiError};
pub(crate) use traits::ApiRequest;
pub use transport::{
    cookie_header_value, CookieTransport, HttpSender, ReqwestSender, SessionCookie,
    REQUEST_TIMEOUT,
};

#[cfg(test)]
pub(crate) use transport::tests::RecordingSender;

use reqwest::{Request, Response, Url};

/// Everything needed to talk to an instance of the platform. Set once before the client is
/// built and never changed afterwards.
#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub base_url: Url,
    pub cookies: Vec<SessionCookie>,
}

impl ClientSettings {
    pub fn new(base_url: &str, cookies: Vec<SessionCookie>) -> Result<Self, ApiClientError> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { base_url, cookies })
    }
}

pub struct ApiClient<S = CookieTransport<ReqwestSender>> {
    base_url: Url,
    sender: S,
}

impl ApiClient {
    /// Builds a client that talks to the network with the session cookies from the settings
    /// attached to every request.
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiClientError> {
        let sender = CookieTransport::new(ReqwestSender::new()?, &settings.cookies)?;
        Self::with_sender(settings.base_url.clone(), sender)
    }
}

impl<S: HttpSender> ApiClient<S> {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request's path segments against the base URL, keeping any path prefix the base
    /// already has (self-hosted instances are frequently mounted under one).
    pub(crate) fn endpoint<R: ApiRequest>(&self, request: &R) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl)?
            .pop_if_empty()
            .extend(request.path());

        Ok(url)
    }

    pub(crate) async fn send_request<R: ApiRequest>(
        &self,
        request: &R,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(request)?;
        tracing::debug!(method = %request.method(), %url, "sending request");

        let response = self
            .sender
            .send(Request::new(request.method(), url))
            .await?;

        let status = response.status();
        if status != request.expected_status() {
            return Err(ApiError::UnexpectedStatus {
                status_code: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Builds a client on top of an arbitrary sender. The sender is responsible for any
    /// authentication, wrap it in a [`CookieTransport`] to get the session cookies attached.
    pub fn with_sender(base_url: Url, sender: S) -> Result<Self, ApiClientError> {
        match base_url.scheme() {
            "http" | "https" => {}
            other => return Err(ApiClientError::UnsupportedScheme(other.to_string())),
        }

        if base_url.cannot_be_a_base() {
            return Err(ApiClientError::CannotBeABase(base_url.to_string()));
        }

        Ok(Self { base_url, sender })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PathRequest(Vec<&'static str>);

    impl ApiRequest for PathRequest {
        fn path(&self) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    fn client(base: &str) -> ApiClient<RecordingSender> {
        let base_url = Url::parse(base).unwrap();
        ApiClient::with_sender(base_url, RecordingSender::default()).unwrap()
    }

    #[test]
    fn test_endpoint_on_bare_host() {
        let client = client("https://www.overleaf.com");
        let url = client.endpoint(&PathRequest(vec!["project", ""])).unwrap();
        assert_eq!(url.as_str(), "https://www.overleaf.com/project/");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = client("https://latex.example.org/overleaf/?lang=en");
        let request = PathRequest(vec!["project", "abc123", "download", "zip"]);
        let url = client.endpoint(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://latex.example.org/overleaf/project/abc123/download/zip"
        );
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = client("https://www.overleaf.com/");
        let url = client
            .endpoint(&PathRequest(vec!["project", "a/b?c"]))
            .unwrap();
        assert_eq!(url.as_str(), "https://www.overleaf.com/project/a%2Fb%3Fc");
    }

    #[test]
    fn test_rejects_unusable_base_urls() {
        let mailto = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            ApiClient::with_sender(mailto, RecordingSender::default()),
            Err(ApiClientError::UnsupportedScheme(_))
        ));

        assert!(matches!(
            ClientSettings::new("not a url", Vec::new()),
            Err(ApiClientError::BadUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_non_matching_status_is_an_error() {
        struct NotFound;

        #[async_trait::async_trait]
        impl HttpSender for NotFound {
            async fn send(&self, _request: Request) -> Result<Response, reqwest::Error> {
                let response = http::Response::builder()
                    .status(404)
                    .body("missing")
                    .unwrap();
                Ok(response.into())
            }
        }

        let base_url = Url::parse("https://www.overleaf.com").unwrap();
        let client = ApiClient::with_sender(base_url, NotFound).unwrap();
        let err = client
            .send_request(&PathRequest(vec!["project", ""]))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(404));
    }
}
