//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod http_server;

use dcollect_core::logging;
use dcollect_core::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Dispatch;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn file_locator(path: &std::path::Path) -> String {
    format!("file://{}", path.display())
}

/// In-memory log sink for one loader.
#[derive(Clone, Default)]
pub struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl LogBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Dispatcher writing into a fresh [`LogBuf`].
pub fn capture_logs() -> (Dispatch, LogBuf) {
    let buf = LogBuf::default();
    let sink = buf.clone();
    (logging::dispatch_to(move || sink.clone()), buf)
}

/// Transport returning a canned response and recording every request.
pub struct FakeTransport {
    response: HttpResponse,
    seen: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new(status: u32, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        let headers = content_type
            .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
            .unwrap_or_default();
        Self {
            response: HttpResponse {
                status,
                headers,
                body: body.into(),
            },
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}
