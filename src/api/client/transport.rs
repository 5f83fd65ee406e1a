use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::{Client, Request, Response};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClientError;

/// End-to-end limit on any single request, including reading the body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The lowest layer of the client, hands a fully formed request to something that can answer it.
/// Production code uses [`ReqwestSender`], tests substitute canned responses.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error>;
}

/// A single `name=value` pair pulled from an authenticated browser session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

pub struct ReqwestSender {
    client: Client,
}

impl ReqwestSender {
    pub fn new() -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .user_agent(crate::version::user_agent())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.client.execute(request).await
    }
}

/// Attaches the session cookies to every request passing through it before handing it to the
/// wrapped sender. Without any cookies requests pass through untouched.
pub struct CookieTransport<S> {
    inner: S,
    cookie_header: Option<HeaderValue>,
}

impl<S: HttpSender> CookieTransport<S> {
    pub fn new(inner: S, cookies: &[SessionCookie]) -> Result<Self, ApiClientError> {
        let cookie_header = match cookie_header_value(cookies) {
            Some(value) => {
                let header = HeaderValue::from_str(&value).map_err(|_| {
                    let names: Vec<&str> = cookies.iter().map(|c| c.name.as_str()).collect();
                    ApiClientError::InvalidCookie(names.join(","))
                })?;

                Some(header)
            }
            None => None,
        };

        Ok(Self {
            inner,
            cookie_header,
        })
    }
}

#[async_trait]
impl<S: HttpSender> HttpSender for CookieTransport<S> {
    async fn send(&self, mut request: Request) -> Result<Response, reqwest::Error> {
        if let Some(header) = &self.cookie_header {
            request.headers_mut().insert(COOKIE, header.clone());
        }

        self.inner.send(request).await
    }
}

/// Serializes cookies into a single `Cookie` header value (`a=1; b=2`).
pub fn cookie_header_value(cookies: &[SessionCookie]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    let pairs: Vec<String> = cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect();

    Some(pairs.join("; "))
}
