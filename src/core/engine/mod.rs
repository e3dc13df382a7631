//! Digest engine
//!
//! Computes file digests by streaming the file through the selected hash
//! function in fixed-size chunks.

use crate::core::algorithm::Algorithm;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const BUF_SIZE: usize = 64 * 1024;

/// Digest computation failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported algorithm: {0}")]
    Unsupported(String),
}

/// Capability interface for digest computation.
///
/// The controller only ever sees this trait; tests substitute their own
/// implementations.
pub trait DigestEngine: Send + Sync {
    /// Compute the lowercase hex digest of `path` under `algorithm`.
    fn compute(&self, path: &Path, algorithm: Algorithm) -> Result<String, EngineError>;
}

/// Engine backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDigestEngine;

impl DigestEngine for FileDigestEngine {
    fn compute(&self, path: &Path, algorithm: Algorithm) -> Result<String, EngineError> {
        tracing::debug!(path = %path.display(), algorithm = %algorithm, "computing digest");
        digest_file(path, algorithm).map_err(|source| EngineError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn digest_file(path: &Path, algorithm: Algorithm) -> io::Result<String> {
    let mut file = File::open(path)?;
    match algorithm {
        // The md5 crate predates the Digest trait and hashes a full buffer.
        Algorithm::Md5 => {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            Ok(hex::encode(md5::compute(&bytes).0))
        }
        Algorithm::Sha1 => hash_reader::<Sha1>(&mut file),
        Algorithm::Sha224 => hash_reader::<Sha224>(&mut file),
        Algorithm::Sha256 => hash_reader::<Sha256>(&mut file),
        Algorithm::Sha384 => hash_reader::<Sha384>(&mut file),
        Algorithm::Sha512 => hash_reader::<Sha512>(&mut file),
        Algorithm::Sha512_224 => hash_reader::<Sha512_224>(&mut file),
        Algorithm::Sha512_256 => hash_reader::<Sha512_256>(&mut file),
        Algorithm::Sha3_224 => hash_reader::<Sha3_224>(&mut file),
        Algorithm::Sha3_256 => hash_reader::<Sha3_256>(&mut file),
        Algorithm::Sha3_384 => hash_reader::<Sha3_384>(&mut file),
        Algorithm::Sha3_512 => hash_reader::<Sha3_512>(&mut file),
    }
}

/// Stream a reader through `D`, returning the digest as lowercase hex.
fn hash_reader<D: Digest>(file: &mut File) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_sha256_empty_file() {
        let f = temp_file(b"");
        let digest = FileDigestEngine.compute(f.path(), Algorithm::Sha256).unwrap();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_vectors() {
        let f = temp_file(b"hello\n");
        let engine = FileDigestEngine;
        assert_eq!(
            engine.compute(f.path(), Algorithm::Sha256).unwrap(),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
        assert_eq!(
            engine.compute(f.path(), Algorithm::Md5).unwrap(),
            "b1946ac92492d2347c6235b4d2611184"
        );
        assert_eq!(
            engine.compute(f.path(), Algorithm::Sha1).unwrap(),
            "f572d396fae9206628714fb2ce00f72e94f2258f"
        );
    }

    #[test]
    fn test_deterministic() {
        let f = temp_file(b"some fixed content");
        let engine = FileDigestEngine;
        let first = engine.compute(f.path(), Algorithm::Sha3_256).unwrap();
        let second = engine.compute(f.path(), Algorithm::Sha3_256).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_digest_length_matches_algorithm() {
        let f = temp_file(b"length check");
        let engine = FileDigestEngine;
        for algorithm in Algorithm::ALL {
            let digest = engine.compute(f.path(), algorithm).unwrap();
            assert_eq!(digest.len(), algorithm.hex_len(), "{}", algorithm);
            assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
            assert_eq!(digest, digest.to_lowercase());
        }
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let result = FileDigestEngine.compute(Path::new("/no/such/file"), Algorithm::Sha256);
        assert!(matches!(result, Err(EngineError::Unreadable { .. })));
    }
}
