pub mod config;
pub mod logging;

pub mod archive;
pub mod error;
pub mod file;
pub mod format;
pub mod http;
pub mod loader;
pub mod locator;
pub mod options;
pub mod transport;

pub use error::{ErrorKind, Failure, LoadError};
pub use loader::{Loaded, Loader, NO_DATA};
pub use locator::{Locator, Scheme};
pub use options::{Credentials, FetchOptions};

/// Generic tree every supported format is normalized into. Mappings keep
/// insertion order (`serde_json` is built with `preserve_order`).
pub type Tree = serde_json::Value;
