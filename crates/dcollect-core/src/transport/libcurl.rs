//! libcurl-backed transport (via the curl crate).

use super::{parse_header_lines, HttpRequest, HttpResponse, Transport, TransportError};
use crate::config::CollectorConfig;
use curl::easy::{Auth, Easy, List};
use std::str;
use std::time::Duration;

/// Blocking GET through a fresh libcurl easy handle per request.
///
/// Limits left as `None` keep libcurl's defaults (no overall timeout).
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    user_agent: Option<String>,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
    max_redirects: Option<u32>,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &CollectorConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            max_redirects: cfg.max_redirects,
        }
    }

    fn configure(&self, easy: &mut Easy, request: &HttpRequest) -> Result<(), curl::Error> {
        easy.url(&request.url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        if let Some(n) = self.max_redirects {
            easy.max_redirections(n)?;
        }
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }
        if let Some(d) = self.connect_timeout {
            easy.connect_timeout(d)?;
        }
        if let Some(d) = self.timeout {
            easy.timeout(d)?;
        }

        if let Some(creds) = &request.basic_auth {
            easy.username(&creds.user)?;
            easy.password(&creds.password)?;
            let mut auth = Auth::new();
            auth.basic(true);
            easy.http_auth(&auth)?;
        }

        if !request.verify_tls {
            easy.ssl_verify_peer(false)?;
            easy.ssl_verify_host(false)?;
        }

        if !request.headers.is_empty() {
            let mut list = List::new();
            for (k, v) in &request.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut easy = Easy::new();
        self.configure(&mut easy, request)?;

        tracing::debug!("GET {}", request.url);

        let mut body = Vec::new();
        let mut header_lines: Vec<String> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!("GET {} -> HTTP {} ({} bytes)", request.url, status, body.len());

        Ok(HttpResponse {
            status,
            headers: parse_header_lines(&header_lines),
            body,
        })
    }
}
