//! CLI command handlers.

mod fetch;
mod unzip;

pub use fetch::{run_fetch, FetchArgs};
pub use unzip::run_unzip;

#[cfg(test)]
pub use fetch::{fetch_options, render};
