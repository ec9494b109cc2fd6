//! Network fetch: build the GET, classify the status, normalize the body.

use crate::error::{error_for_status, Failure, LoadError};
use crate::format::{resolve_content_type, Format};
use crate::loader::{normalize, Loaded};
use crate::locator::Locator;
use crate::options::FetchOptions;
use crate::transport::{HttpRequest, Transport};

/// `Authorization` value for a bearer token. The `Bearer ` prefix is only
/// added when the token does not already carry it (any case).
pub fn bearer_header(token: &str) -> String {
    let prefixed = token
        .get(..7)
        .is_some_and(|p| p.eq_ignore_ascii_case("bearer "));
    if prefixed {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

/// Build the request for `locator`. Credentials win over a bearer token.
pub fn build_request(locator: &Locator, options: &FetchOptions) -> HttpRequest {
    let mut request = HttpRequest::get(locator.as_str());

    if let Some(creds) = &options.credentials {
        tracing::debug!("Set Basic_auth");
        request.basic_auth = Some(creds.clone());
    } else if let Some(token) = &options.bearer_token {
        tracing::debug!("Set authorization bearer token");
        request
            .headers
            .push(("Authorization".to_string(), bearer_header(token)));
    }

    if options.skip_tls_verify && locator.is_secure() {
        tracing::warn!("Disabling SSL verification for {}", locator);
        request.verify_tls = false;
    }

    request
}

/// GET `locator` and normalize a 200 body.
pub fn fetch<T: Transport + ?Sized>(
    transport: &T,
    locator: &Locator,
    options: &FetchOptions,
) -> Result<Loaded, Failure> {
    let request = build_request(locator, options);
    let response = transport
        .get(&request)
        .map_err(|e| Failure::new(LoadError::Transport(e)))?;

    if response.status != 200 {
        let error = error_for_status(response.status);
        return Err(if response.body.is_empty() {
            Failure::new(error)
        } else {
            Failure::with_raw(error, String::from_utf8_lossy(&response.body))
        });
    }

    let format = if options.raw {
        None
    } else {
        let content_type = resolve_content_type(
            options,
            response.header("content-type"),
            locator.file_name().as_deref(),
        );
        let format = Format::from_content_type(&content_type);
        tracing::debug!("content type {} -> {:?}", content_type, format);
        Some(format)
    };

    normalize(response.body, format)
}
