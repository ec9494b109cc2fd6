//! Tests for the unzip subcommand.

use super::parse;
use clap::Parser;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_unzip() {
    match parse(&["dcollect", "unzip", "/tmp/in.zip", "/tmp/out"]) {
        CliCommand::Unzip { file, destination } => {
            assert_eq!(file, Path::new("/tmp/in.zip"));
            assert_eq!(destination, Path::new("/tmp/out"));
        }
        _ => panic!("expected Unzip"),
    }
}

#[test]
fn cli_parse_unzip_needs_destination() {
    assert!(crate::cli::Cli::try_parse_from(["dcollect", "unzip", "/tmp/in.zip"]).is_err());
}
