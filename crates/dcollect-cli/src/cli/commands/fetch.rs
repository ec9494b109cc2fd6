//! `dcollect fetch <locator>` – load a resource and print it.

use anyhow::Result;
use std::io::Write;
use dcollect_core::config::CollectorConfig;
use dcollect_core::{FetchOptions, Loaded, Loader};

/// Flags of the fetch subcommand.
#[derive(Debug, Default)]
pub struct FetchArgs {
    pub user: Option<String>,
    pub password: Option<String>,
    pub bearer_token: Option<String>,
    pub insecure: bool,
    pub content_type: Option<String>,
    pub raw: bool,
    pub pretty: bool,
}

pub fn fetch_options(args: &FetchArgs) -> FetchOptions {
    let mut options = FetchOptions {
        bearer_token: args.bearer_token.clone(),
        skip_tls_verify: args.insecure,
        content_type: args.content_type.clone(),
        raw: args.raw,
        ..FetchOptions::default()
    };
    if let (Some(user), Some(password)) = (&args.user, &args.password) {
        options = options.with_credentials(user.clone(), password.clone());
    }
    options
}

/// Bytes printed for a successful load. Raw payloads are written verbatim,
/// everything else as JSON followed by a newline.
pub fn render(loaded: Loaded, pretty: bool) -> Result<Vec<u8>> {
    Ok(match loaded {
        Loaded::Raw(bytes) => bytes,
        other => {
            let value = other.into_value();
            let mut out = if pretty {
                serde_json::to_vec_pretty(&value)?
            } else {
                serde_json::to_vec(&value)?
            };
            out.push(b'\n');
            out
        }
    })
}

pub fn run_fetch(cfg: &CollectorConfig, locator: &str, args: &FetchArgs) -> Result<()> {
    let loader = Loader::from_config(cfg);
    match loader.load(locator, &fetch_options(args)) {
        Ok(loaded) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&render(loaded, args.pretty)?)?;
            stdout.flush()?;
            Ok(())
        }
        Err(failure) => {
            if let Some(raw) = failure.raw.as_deref() {
                tracing::warn!("payload before failure: {}", raw);
            }
            Err(anyhow::Error::new(failure).context(format!("loading {}", locator)))
        }
    }
}
