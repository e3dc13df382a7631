//! CLI argument definitions
//!
//! Uses clap derive macros for argument parsing.

use crate::core::algorithm::Algorithm;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// verihash - Desktop checksum verifier
#[derive(Parser, Debug)]
#[command(name = "verihash")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// List the supported digest algorithms
    #[arg(short, long)]
    pub list: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the digest of a file
    Digest {
        /// File to digest
        file: PathBuf,

        /// Digest algorithm (SHA256, SHA3_512, MD5, ...)
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        /// Write a checksum file next to the source file
        #[arg(short, long)]
        save: bool,
    },

    /// Verify a file against an expected digest
    Verify {
        /// File to verify
        file: PathBuf,

        /// Expected digest value
        #[arg(short, long)]
        expected: String,

        /// Digest algorithm (SHA256, SHA3_512, MD5, ...)
        #[arg(short, long)]
        algorithm: Option<Algorithm>,
    },

    /// Verify the file referenced by a checksum file
    Check {
        /// Checksum file (e.g. release.sha256)
        checksum_file: PathBuf,
    },
}
