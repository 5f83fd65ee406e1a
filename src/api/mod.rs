//! Client for the Overleaf web application. There is no public API for listing or exporting
//! projects so this speaks to the same endpoints the browser does, authenticated with session
//! cookies lifted from a logged in browser. The base URL is configurable so self-hosted
//! instances work the same way as the hosted service.

pub mod platform;

pub(crate) mod client;

pub use client::{
    cookie_header_value, ApiClient, ApiClientError, ApiError, ArchiveStream, ClientSettings,
    CookieTransport, HttpSender, ReqwestSender, SessionCookie, REQUEST_TIMEOUT,
};
