//! HTTP transport seam.
//!
//! The loader only needs "request in, status + headers + body out". The
//! default implementation is [`CurlTransport`] (libcurl easy handle); tests
//! plug in fakes through the [`Transport`] trait.

mod headers;
mod libcurl;

pub use headers::parse_header_lines;
pub use libcurl::CurlTransport;

use crate::options::Credentials;

/// Error type transports report; boxed so implementations are free to choose.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A GET request as the loader builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// Extra headers (e.g. `Authorization` for bearer tokens).
    pub headers: Vec<(String, String)>,
    /// Basic auth credentials, applied by the transport.
    pub basic_auth: Option<Credentials>,
    /// False disables certificate and host name verification.
    pub verify_tls: bool,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            basic_auth: None,
            verify_tls: true,
        }
    }

    /// Value of a request header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Status, headers and body of the final response (after redirects).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Value of a response header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Performs GET requests, following redirects.
pub trait Transport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request)
    }
}
