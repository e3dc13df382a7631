//! Checksum files
//!
//! Parses published checksum files into `{algorithm, file, digest}` records
//! and writes freshly generated digests back out in the tagged format.
//!
//! Two line conventions are accepted: the tagged `openssl dgst` form
//! (`SHA2-256 (name.tar.gz) = <hex>`) and the plain `sha256sum` form
//! (`<hex>  name.tar.gz`). The plain form does not name its algorithm, so it
//! is inferred from the checksum file's own extension or the digest length.

use crate::core::algorithm::Algorithm;
use regex::Regex;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const TAGGED_DIGEST_PATTERN: &str =
    r"^(?P<algorithm>.+?)\s?\((?P<filename>.+?)\)\s?=\s(?P<digest>[0-9a-fA-F]+)$";

fn tagged_digest_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(TAGGED_DIGEST_PATTERN).expect("pattern is a valid regex"))
}

/// The parse result of a checksum file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    pub algorithm: Algorithm,
    /// The attested file, resolved against the checksum file's directory.
    pub file: PathBuf,
    /// Lowercase hex digest.
    pub digest: String,
}

/// Checksum file parsing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("checksum file is empty or malformed")]
    Malformed,

    #[error("cannot determine the digest algorithm of the checksum file")]
    UnknownAlgorithm,

    #[error("checksum file does not name a file")]
    MissingFilename,
}

/// Maps checksum-file extensions to algorithms.
///
/// Keys are matched case-insensitively. The default map covers the selector
/// identifiers (`sha256`, `sha512_224`) and the file-name-safe tag spellings
/// this application writes (`sha2-256`, `sha2-512_224`); the config file can
/// extend or override it.
#[derive(Debug, Clone)]
pub struct ExtensionMap(BTreeMap<String, Algorithm>);

impl Default for ExtensionMap {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        for algorithm in Algorithm::ALL {
            map.insert(algorithm.name().to_ascii_lowercase(), algorithm);
            map.insert(
                algorithm.to_string().to_ascii_lowercase().replace('/', "_"),
                algorithm,
            );
        }
        Self(map)
    }
}

impl ExtensionMap {
    pub fn new(entries: BTreeMap<String, Algorithm>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(ext, algorithm)| (ext.to_ascii_lowercase(), algorithm))
                .collect(),
        )
    }

    pub fn lookup(&self, extension: &str) -> Option<Algorithm> {
        self.0.get(&extension.to_ascii_lowercase()).copied()
    }

    /// The built-in extension entries, used to seed new config files.
    pub fn default_entries() -> BTreeMap<String, Algorithm> {
        ExtensionMap::default().0
    }
}

/// Parse the contents of a checksum file.
///
/// Only the first non-blank line is considered. `checksum_path` is the
/// checksum file's own path, used for extension-based algorithm inference and
/// to resolve a relative attested file name.
pub fn parse(
    text: &str,
    checksum_path: &Path,
    extensions: &ExtensionMap,
) -> Result<ChecksumRecord, ParseError> {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(ParseError::Malformed)?;

    let (algorithm, file_name, digest) = match parse_tagged(line) {
        Some(parts) => parts?,
        None => parse_plain(line, checksum_path, extensions)?,
    };

    if file_name.is_empty() {
        return Err(ParseError::MissingFilename);
    }

    let file = PathBuf::from(file_name);
    let file = match checksum_path.parent() {
        Some(dir) if file.is_relative() => dir.join(file),
        _ => file,
    };

    Ok(ChecksumRecord {
        algorithm,
        file,
        digest: digest.to_ascii_lowercase(),
    })
}

type LineParts<'a> = (Algorithm, &'a str, &'a str);

/// Tagged form: `SHA2-256 (name) = hex`. Returns None if the line does not
/// have the tagged shape at all.
fn parse_tagged(line: &str) -> Option<Result<LineParts<'_>, ParseError>> {
    let captures = tagged_digest_regex().captures(line)?;
    let (Some(algorithm), Some(file_name), Some(digest)) = (
        captures.name("algorithm"),
        captures.name("filename"),
        captures.name("digest"),
    ) else {
        return Some(Err(ParseError::Malformed));
    };
    let algorithm = match algorithm.as_str().parse::<Algorithm>() {
        Ok(algorithm) => algorithm,
        Err(_) => return Some(Err(ParseError::UnknownAlgorithm)),
    };
    Some(Ok((algorithm, file_name.as_str().trim(), digest.as_str())))
}

/// Plain sum form: `hex  name`, with an optional `*` binary-mode marker
/// before the name.
fn parse_plain<'a>(
    line: &'a str,
    checksum_path: &Path,
    extensions: &ExtensionMap,
) -> Result<LineParts<'a>, ParseError> {
    let (digest, rest) = match line.split_once(char::is_whitespace) {
        Some(parts) => parts,
        // A lone hex token is a record that never names its file.
        None if is_hex(line) => return Err(ParseError::MissingFilename),
        None => return Err(ParseError::Malformed),
    };
    if digest.is_empty() || !is_hex(digest) {
        return Err(ParseError::Malformed);
    }

    let file_name = rest.trim_start();
    let file_name = file_name.strip_prefix('*').unwrap_or(file_name);

    let algorithm = checksum_path
        .extension()
        .and_then(OsStr::to_str)
        .and_then(|ext| extensions.lookup(ext))
        .or_else(|| Algorithm::from_hex_len(digest.len()))
        .ok_or(ParseError::UnknownAlgorithm)?;

    Ok((algorithm, file_name, digest))
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Default checksum-file name for `source`, algorithm as the extension.
///
/// `/` is not valid in a file name, so the truncated SHA-512 tags are spelled
/// with an underscore.
pub fn digest_file_name(source: &Path, algorithm: Algorithm) -> PathBuf {
    let extension = match algorithm {
        Algorithm::Sha512_224 => "SHA2-512_224".to_string(),
        Algorithm::Sha512_256 => "SHA2-512_256".to_string(),
        _ => algorithm.to_string(),
    };
    let mut name = PathBuf::from(source.file_stem().unwrap_or(OsStr::new("digest_file")));
    name.set_extension(extension);
    name
}

/// Render the tagged checksum line for a digest of `source`.
pub fn render(source: &Path, algorithm: Algorithm, digest: &str) -> String {
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    format!("{} ({}) = {}", algorithm, name, digest)
}

/// Write the tagged checksum line for `source` to `dest`.
pub fn write_digest_file(
    dest: &Path,
    source: &Path,
    algorithm: Algorithm,
    digest: &str,
) -> io::Result<()> {
    tracing::info!(dest = %dest.display(), "writing checksum file");
    fs::write(dest, render(source, algorithm, digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA256_HEX: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    fn default_map() -> ExtensionMap {
        ExtensionMap::default()
    }

    #[test]
    fn test_plain_line_with_sha256_extension() {
        let text = format!("{}  release.tar.gz\n", SHA256_HEX);
        let record = parse(&text, Path::new("downloads/release.sha256"), &default_map()).unwrap();
        assert_eq!(record.algorithm, Algorithm::Sha256);
        assert_eq!(record.file, PathBuf::from("downloads/release.tar.gz"));
        assert_eq!(record.digest, SHA256_HEX);
    }

    #[test]
    fn test_plain_line_binary_marker() {
        let text = format!("{} *release.tar.gz", SHA256_HEX);
        let record = parse(&text, Path::new("release.sha256"), &default_map()).unwrap();
        assert_eq!(record.file, PathBuf::from("release.tar.gz"));
    }

    #[test]
    fn test_digest_is_lowercased() {
        let text = format!("{}  release.tar.gz", SHA256_HEX.to_uppercase());
        let record = parse(&text, Path::new("release.sha256"), &default_map()).unwrap();
        assert_eq!(record.digest, SHA256_HEX);
    }

    #[test]
    fn test_tagged_line() {
        let text = format!("SHA2-256 (release.tar.gz) = {}", SHA256_HEX);
        let record = parse(&text, Path::new("mirror/release.txt"), &default_map()).unwrap();
        assert_eq!(record.algorithm, Algorithm::Sha256);
        assert_eq!(record.file, PathBuf::from("mirror/release.tar.gz"));
        assert_eq!(record.digest, SHA256_HEX);
    }

    #[test]
    fn test_tagged_line_unknown_tag() {
        let text = format!("WHIRLPOOL (release.tar.gz) = {}", SHA256_HEX);
        let err = parse(&text, Path::new("release.txt"), &default_map()).unwrap_err();
        assert_eq!(err, ParseError::UnknownAlgorithm);
    }

    #[test]
    fn test_first_non_blank_line_wins() {
        let text = format!("\n\n{}  a.iso\n{}  b.iso\n", SHA256_HEX, SHA256_HEX);
        let record = parse(&text, Path::new("a.sha256"), &default_map()).unwrap();
        assert_eq!(record.file, PathBuf::from("a.iso"));
    }

    #[test]
    fn test_length_inference_without_extension() {
        // 40 hex chars and no usable extension: inferred as SHA-1
        let text = "f572d396fae9206628714fb2ce00f72e94f2258f  hello.txt";
        let record = parse(text, Path::new("CHECKSUM"), &default_map()).unwrap();
        assert_eq!(record.algorithm, Algorithm::Sha1);
    }

    #[test]
    fn test_extension_beats_length_inference() {
        // 64 hex chars would infer SHA256, but the extension pins SHA3-256
        let text = format!("{}  release.tar.gz", SHA256_HEX);
        let record = parse(&text, Path::new("release.sha3-256"), &default_map()).unwrap();
        assert_eq!(record.algorithm, Algorithm::Sha3_256);
    }

    #[test]
    fn test_custom_extension_map() {
        let mut entries = BTreeMap::new();
        entries.insert("SUM".to_string(), Algorithm::Sha512);
        let map = ExtensionMap::new(entries);
        assert_eq!(map.lookup("sum"), Some(Algorithm::Sha512));
        assert_eq!(map.lookup("sha256"), None);
    }

    #[test]
    fn test_unknown_algorithm_when_nothing_infers() {
        // 63 hex chars matches no digest length and "txt" maps to nothing
        let text = format!("{}  release.tar.gz", &SHA256_HEX[1..]);
        let err = parse(&text, Path::new("release.txt"), &default_map()).unwrap_err();
        assert_eq!(err, ParseError::UnknownAlgorithm);
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert_eq!(
            parse("", Path::new("a.sha256"), &default_map()).unwrap_err(),
            ParseError::Malformed
        );
        assert_eq!(
            parse("\n  \n", Path::new("a.sha256"), &default_map()).unwrap_err(),
            ParseError::Malformed
        );
        assert_eq!(
            parse("not-hex-at-all  file", Path::new("a.sha256"), &default_map()).unwrap_err(),
            ParseError::Malformed
        );
    }

    #[test]
    fn test_missing_filename() {
        let err = parse(SHA256_HEX, Path::new("a.sha256"), &default_map()).unwrap_err();
        assert_eq!(err, ParseError::MissingFilename);
    }

    #[test]
    fn test_absolute_file_not_rebased() {
        let text = format!("{}  /opt/data/release.tar.gz", SHA256_HEX);
        let record = parse(&text, Path::new("sums/release.sha256"), &default_map()).unwrap();
        assert_eq!(record.file, PathBuf::from("/opt/data/release.tar.gz"));
    }

    #[test]
    fn test_render_parses_back() {
        let source = Path::new("/tmp/release.tar.gz");
        let line = render(source, Algorithm::Sha512_256, SHA256_HEX);
        assert_eq!(
            line,
            format!("SHA2-512/256 (release.tar.gz) = {}", SHA256_HEX)
        );
        let record = parse(&line, Path::new("release.SHA2-512_256"), &default_map()).unwrap();
        assert_eq!(record.algorithm, Algorithm::Sha512_256);
        assert_eq!(record.digest, SHA256_HEX);
    }

    #[test]
    fn test_digest_file_name() {
        let source = Path::new("release.tar.gz");
        assert_eq!(
            digest_file_name(source, Algorithm::Sha256),
            PathBuf::from("release.tar.SHA2-256")
        );
        assert_eq!(
            digest_file_name(source, Algorithm::Sha512_224),
            PathBuf::from("release.tar.SHA2-512_224")
        );
    }
}
