//! CLI module
//!
//! Command-line interface for verihash.

mod args;

pub use args::{Args, Commands};

use crate::config;
use crate::core::algorithm::Algorithm;
use crate::core::checksum;
use crate::core::compare::Outcome;
use crate::core::controller::{ComputeRequest, Verifier};
use crate::core::engine::{DigestEngine, EngineError, FileDigestEngine};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// List the supported digest algorithms
pub fn list_algorithms() {
    println!("Supported algorithms ({}):", Algorithm::ALL.len());
    println!();
    for algorithm in Algorithm::ALL {
        println!("   {:<12} {} hex chars", algorithm.name(), algorithm.hex_len());
    }
}

/// Compute and print the digest of a file
pub async fn digest_file(file: PathBuf, algorithm: Option<Algorithm>, save: bool) -> Result<()> {
    let algorithm = algorithm.unwrap_or_else(default_algorithm);
    let digest = compute(file.clone(), algorithm).await?;

    println!("{}", checksum::render(&file, algorithm, &digest));

    if save {
        let dest = file.with_file_name(checksum::digest_file_name(&file, algorithm));
        checksum::write_digest_file(&dest, &file, algorithm, &digest)
            .context(format!("cannot write {}", dest.display()))?;
        println!("✅ Checksum file written: {}", dest.display());
    }

    Ok(())
}

/// Verify a file against an expected digest value
pub async fn verify_file(
    file: PathBuf,
    expected: String,
    algorithm: Option<Algorithm>,
) -> Result<()> {
    let algorithm = algorithm.unwrap_or_else(default_algorithm);

    let mut verifier = Verifier::new(algorithm);
    let request = verifier.select_file(file);
    let result = run_request(&request).await?;
    verifier.apply(&request, result);
    verifier.set_expected(expected);

    report(&mut verifier)
}

/// Verify the file referenced by a checksum file
pub async fn check_file(checksum_file: PathBuf) -> Result<()> {
    let config = config::load().unwrap_or_default();
    let text = std::fs::read_to_string(&checksum_file)
        .context(format!("cannot read {}", checksum_file.display()))?;

    let mut verifier = Verifier::new(config.general.default_algorithm);
    let Some(request) =
        verifier.load_checksum_file(&text, &checksum_file, &config.extension_map())
    else {
        anyhow::bail!(
            "{}",
            verifier.message().unwrap_or("invalid checksum file")
        );
    };

    println!(
        "📄 {} attests {} ({})",
        checksum_file.display(),
        request.path.display(),
        request.algorithm.name()
    );

    let result = run_request(&request).await?;
    verifier.apply(&request, result);

    report(&mut verifier)
}

/// Run a controller compute request off the async executor
async fn run_request(request: &ComputeRequest) -> Result<Result<String, EngineError>> {
    let path = request.path.clone();
    let algorithm = request.algorithm;
    tokio::task::spawn_blocking(move || FileDigestEngine.compute(&path, algorithm))
        .await
        .context("digest task failed")
}

async fn compute(path: PathBuf, algorithm: Algorithm) -> Result<String> {
    let digest = tokio::task::spawn_blocking(move || FileDigestEngine.compute(&path, algorithm))
        .await
        .context("digest task failed")??;
    Ok(digest)
}

fn default_algorithm() -> Algorithm {
    config::load()
        .map(|config| config.general.default_algorithm)
        .unwrap_or_default()
}

/// Print the comparison outcome; mismatches and failures exit non-zero
fn report(verifier: &mut Verifier) -> Result<()> {
    if let Some(message) = verifier.message() {
        anyhow::bail!("{}", message.to_string());
    }

    if let Some(digest) = &verifier.state().computed_digest {
        println!("   Computed: {}", digest);
    }
    if !verifier.state().expected_digest.is_empty() {
        println!("   Expected: {}", verifier.state().expected_digest);
    }

    match verifier.compare() {
        Outcome::Matched => {
            println!("✅ {}", Outcome::Matched.message());
            Ok(())
        }
        other => anyhow::bail!("{}", other.message()),
    }
}
