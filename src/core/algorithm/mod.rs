//! Digest algorithm catalogue
//!
//! The twelve supported hash functions, their textual names and digest sizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A selectable digest algorithm.
///
/// Parsing accepts the `openssl dgst` spellings (`SHA2-256`, `SHA3-512`),
/// the `shasum` spellings (`SHA256`, `SHA512/224`) and the identifiers this
/// application itself uses (`SHA512_224`, `SHA3_256`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

/// Error returned when an algorithm name is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid algorithm name: '{0}'")]
pub struct InvalidAlgorithmName(String);

impl Algorithm {
    /// Every supported algorithm, in selector display order.
    pub const ALL: [Algorithm; 12] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha512_224,
        Algorithm::Sha512_256,
        Algorithm::Sha3_224,
        Algorithm::Sha3_256,
        Algorithm::Sha3_384,
        Algorithm::Sha3_512,
    ];

    /// Identifier shown in selection surfaces (GUI combo box, `--algorithm`).
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha224 => "SHA224",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha384 => "SHA384",
            Algorithm::Sha512 => "SHA512",
            Algorithm::Sha512_224 => "SHA512_224",
            Algorithm::Sha512_256 => "SHA512_256",
            Algorithm::Sha3_224 => "SHA3_224",
            Algorithm::Sha3_256 => "SHA3_256",
            Algorithm::Sha3_384 => "SHA3_384",
            Algorithm::Sha3_512 => "SHA3_512",
        }
    }

    /// Length of this algorithm's digest in hex characters.
    pub fn hex_len(self) -> usize {
        match self {
            Algorithm::Md5 => 32,
            Algorithm::Sha1 => 40,
            Algorithm::Sha224 | Algorithm::Sha512_224 | Algorithm::Sha3_224 => 56,
            Algorithm::Sha256 | Algorithm::Sha512_256 | Algorithm::Sha3_256 => 64,
            Algorithm::Sha384 | Algorithm::Sha3_384 => 96,
            Algorithm::Sha512 | Algorithm::Sha3_512 => 128,
        }
    }

    /// Infer an algorithm from a digest length.
    ///
    /// Several algorithms share a length; the canonical pick per length is
    /// MD5, SHA1, SHA224, SHA256, SHA384, SHA512. The truncated SHA-512 and
    /// SHA-3 variants are only reachable via an explicit tag or extension.
    pub fn from_hex_len(len: usize) -> Option<Algorithm> {
        match len {
            32 => Some(Algorithm::Md5),
            40 => Some(Algorithm::Sha1),
            56 => Some(Algorithm::Sha224),
            64 => Some(Algorithm::Sha256),
            96 => Some(Algorithm::Sha384),
            128 => Some(Algorithm::Sha512),
            _ => None,
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = InvalidAlgorithmName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase().as_str() {
            "MD5" => Ok(Algorithm::Md5), // openssl and md5sum
            "SHA1" => Ok(Algorithm::Sha1), // openssl and shasum

            "SHA2-224" | "SHA224" => Ok(Algorithm::Sha224),
            "SHA2-256" | "SHA256" => Ok(Algorithm::Sha256),
            "SHA2-384" | "SHA384" => Ok(Algorithm::Sha384),
            "SHA2-512" | "SHA512" => Ok(Algorithm::Sha512),

            // openssl, shasum and our own selector spellings
            "SHA2-512/224" | "SHA512/224" | "SHA512_224" => Ok(Algorithm::Sha512_224),
            "SHA2-512/256" | "SHA512/256" | "SHA512_256" => Ok(Algorithm::Sha512_256),

            "SHA3-224" | "SHA3_224" => Ok(Algorithm::Sha3_224),
            "SHA3-256" | "SHA3_256" => Ok(Algorithm::Sha3_256),
            "SHA3-384" | "SHA3_384" => Ok(Algorithm::Sha3_384),
            "SHA3-512" | "SHA3_512" => Ok(Algorithm::Sha3_512),

            _ => Err(InvalidAlgorithmName(value)),
        }
    }
}

impl FromStr for Algorithm {
    type Err = InvalidAlgorithmName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::try_from(s.to_string())
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> String {
        algorithm.name().to_string()
    }
}

impl fmt::Display for Algorithm {
    /// The `openssl dgst` tag spelling, used by tagged checksum files.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha224 => "SHA2-224",
            Algorithm::Sha256 => "SHA2-256",
            Algorithm::Sha384 => "SHA2-384",
            Algorithm::Sha512 => "SHA2-512",
            Algorithm::Sha512_224 => "SHA2-512/224",
            Algorithm::Sha512_256 => "SHA2-512/256",
            Algorithm::Sha3_224 => "SHA3-224",
            Algorithm::Sha3_256 => "SHA3-256",
            Algorithm::Sha3_384 => "SHA3-384",
            Algorithm::Sha3_512 => "SHA3-512",
        };
        write!(f, "{}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("MD5".parse::<Algorithm>().unwrap(), Algorithm::Md5);
        assert_eq!("sha256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!("SHA2-256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!(
            "SHA2-512/224".parse::<Algorithm>().unwrap(),
            Algorithm::Sha512_224
        );
        assert_eq!(
            "SHA512_224".parse::<Algorithm>().unwrap(),
            Algorithm::Sha512_224
        );
        assert_eq!(
            "SHA3-384".parse::<Algorithm>().unwrap(),
            Algorithm::Sha3_384
        );
        assert!("SHA2".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_name_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_display_round_trip() {
        for algorithm in Algorithm::ALL {
            let tag = algorithm.to_string();
            assert_eq!(tag.parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_hex_len() {
        assert_eq!(Algorithm::Md5.hex_len(), 32);
        assert_eq!(Algorithm::Sha1.hex_len(), 40);
        assert_eq!(Algorithm::Sha256.hex_len(), 64);
        assert_eq!(Algorithm::Sha512_224.hex_len(), 56);
        assert_eq!(Algorithm::Sha3_512.hex_len(), 128);
    }

    #[test]
    fn test_from_hex_len_prefers_canonical() {
        assert_eq!(Algorithm::from_hex_len(32), Some(Algorithm::Md5));
        assert_eq!(Algorithm::from_hex_len(56), Some(Algorithm::Sha224));
        assert_eq!(Algorithm::from_hex_len(64), Some(Algorithm::Sha256));
        assert_eq!(Algorithm::from_hex_len(128), Some(Algorithm::Sha512));
        assert_eq!(Algorithm::from_hex_len(63), None);
    }

    #[test]
    fn test_default_is_sha256() {
        assert_eq!(Algorithm::default(), Algorithm::Sha256);
    }
}
