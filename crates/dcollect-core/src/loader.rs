//! Resource loader: locator in, normalized tree (or raw payload) out.
//!
//! [`Loader::load`] returns a tagged result so callers can tell an
//! `Unauthorized` from a malformed document. [`Loader::load_or_none`] and
//! [`Loader::load_with`] keep the fail-soft contract: failures are logged at
//! `warn` together with the payload seen so far, and collapse to `None`.

use crate::config::CollectorConfig;
use crate::error::Failure;
use crate::format::Format;
use crate::locator::{Locator, Scheme};
use crate::options::FetchOptions;
use crate::transport::{CurlTransport, Transport};
use crate::{file, http, Tree};
use serde_json::Value;
use tracing::Dispatch;

/// Placeholder returned when a load succeeds but yields nothing.
pub const NO_DATA: &str = "no data found";

/// Successful outcome of a load.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    /// Parsed payload.
    Tree(Tree),
    /// Unparsed payload bytes (raw mode), exactly as fetched.
    Raw(Vec<u8>),
    /// Empty payload or empty document.
    NoData,
}

impl Loaded {
    /// Collapse into a single value; `NoData` becomes the string [`NO_DATA`].
    ///
    /// A raw payload becomes a string when it is UTF-8 and a sequence of
    /// byte values otherwise.
    pub fn into_value(self) -> Tree {
        match self {
            Loaded::Tree(tree) => tree,
            Loaded::Raw(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Value::String(text),
                Err(e) => Value::Array(e.into_bytes().into_iter().map(Value::from).collect()),
            },
            Loaded::NoData => Value::String(NO_DATA.to_string()),
        }
    }

    /// Raw payload as text, when it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Loaded::Raw(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Loaded::NoData)
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Loaded::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

/// Turn a fetched payload into a [`Loaded`]. `format == None` means raw mode.
///
/// Raw payloads are only `NoData` when they are empty; parsed payloads also
/// when they are all whitespace.
pub(crate) fn normalize(payload: Vec<u8>, format: Option<Format>) -> Result<Loaded, Failure> {
    let Some(format) = format else {
        if payload.is_empty() {
            return Ok(Loaded::NoData);
        }
        return Ok(Loaded::Raw(payload));
    };
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(Loaded::NoData);
    }
    match format.parse(&payload) {
        Ok(Value::Null) => Ok(Loaded::NoData),
        Ok(tree) => Ok(Loaded::Tree(tree)),
        Err(e) => Err(Failure::with_raw(e, String::from_utf8_lossy(&payload))),
    }
}

/// Fetches one resource per call. Holds no per-call state, so one loader can
/// serve concurrent callers when its transport allows it.
pub struct Loader<T = CurlTransport> {
    transport: T,
    dispatch: Option<Dispatch>,
}

impl Loader<CurlTransport> {
    pub fn new() -> Self {
        Self::with_transport(CurlTransport::new())
    }

    pub fn from_config(cfg: &CollectorConfig) -> Self {
        Self::with_transport(CurlTransport::from_config(cfg))
    }
}

impl Default for Loader<CurlTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Loader<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            dispatch: None,
        }
    }

    /// Route this loader's log events to `dispatch` instead of the global subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn scoped<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    /// Fetch and normalize `source`.
    pub fn load(&self, source: &str, options: &FetchOptions) -> Result<Loaded, Failure> {
        self.scoped(|| self.load_unscoped(source, options))
    }

    fn load_unscoped(&self, source: &str, options: &FetchOptions) -> Result<Loaded, Failure> {
        let locator = Locator::parse(source)?;
        tracing::info!("Loading {}", locator);
        match locator.scheme() {
            Scheme::Network => http::fetch(&self.transport, &locator, options),
            Scheme::File => file::fetch(&locator, options),
        }
    }

    /// Fail-soft variant of [`Loader::load`]: failures are logged and become `None`.
    pub fn load_or_none(&self, source: &str, options: &FetchOptions) -> Option<Loaded> {
        self.scoped(|| match self.load_unscoped(source, options) {
            Ok(loaded) => Some(loaded),
            Err(failure) => {
                tracing::warn!("{}", failure);
                tracing::warn!("DATA");
                tracing::warn!("{}", failure.raw.as_deref().unwrap_or_default());
                None
            }
        })
    }

    /// Fail-soft load that hands the result to `f` and returns what `f` returns.
    /// `f` is not called when the load fails.
    pub fn load_with<F, R>(&self, source: &str, options: &FetchOptions, f: F) -> Option<R>
    where
        F: FnOnce(Loaded) -> R,
    {
        self.load_or_none(source, options).map(f)
    }
}
