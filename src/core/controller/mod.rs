//! Verification state controller
//!
//! Owns the selection state of the verify workflow and is the only place
//! that mutates it. Digest computation is asynchronous: every event that
//! needs one hands back a generation-tagged [`ComputeRequest`] for the
//! caller to run (worker thread in the GUI, `spawn_blocking` in the CLI),
//! and [`Verifier::apply`] commits the result only while the request's
//! generation is still current. A superseded computation is dropped
//! silently; it is not an error.

use crate::core::algorithm::Algorithm;
use crate::core::checksum::{self, ExtensionMap};
use crate::core::compare::{self, Outcome};
use crate::core::engine::EngineError;
use std::path::{Path, PathBuf};

/// The mutable aggregate driving the verify workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_file: Option<PathBuf>,
    pub algorithm: Algorithm,
    pub computed_digest: Option<String>,
    pub expected_digest: String,
    pub busy: bool,
}

impl SelectionState {
    fn empty(algorithm: Algorithm) -> Self {
        Self {
            selected_file: None,
            algorithm,
            computed_digest: None,
            expected_digest: String::new(),
            busy: false,
        }
    }
}

/// A digest computation handed out to a worker.
///
/// Carries the `(path, algorithm)` pair and the selection generation as they
/// stood at request time.
#[derive(Debug, Clone)]
pub struct ComputeRequest {
    pub path: PathBuf,
    pub algorithm: Algorithm,
    generation: u64,
}

/// The verification state controller.
pub struct Verifier {
    state: SelectionState,
    outcome: Option<Outcome>,
    message: Option<String>,
    generation: u64,
}

impl Verifier {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            state: SelectionState::empty(algorithm),
            outcome: None,
            message: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The outcome recorded by the last comparison, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The user-visible error from a failed computation or parse, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Select a file for verification and start computing its digest.
    pub fn select_file(&mut self, path: PathBuf) -> ComputeRequest {
        tracing::debug!(path = %path.display(), algorithm = %self.state.algorithm, "file selected");
        self.message = None;
        self.outcome = None;
        self.state.computed_digest = None;
        self.state.selected_file = Some(path.clone());
        self.state.busy = true;
        self.generation += 1;
        ComputeRequest {
            path,
            algorithm: self.state.algorithm,
            generation: self.generation,
        }
    }

    /// Switch the digest algorithm.
    ///
    /// Digests are not comparable across algorithms, so a selected file is
    /// recomputed from scratch; with no file selected only the tag is stored.
    pub fn change_algorithm(&mut self, algorithm: Algorithm) -> Option<ComputeRequest> {
        if self.state.algorithm == algorithm {
            return None;
        }
        self.state.algorithm = algorithm;
        let path = self.state.selected_file.clone()?;
        Some(self.select_file(path))
    }

    /// Update the expected digest.
    ///
    /// The recorded outcome is dropped; with a stable computed digest already
    /// present it is re-derived at once, so typing an expected value after a
    /// file is hashed shows match/mismatch immediately.
    pub fn set_expected(&mut self, text: impl Into<String>) {
        self.state.expected_digest = text.into();
        self.outcome = None;
        if !self.state.expected_digest.is_empty()
            && self.state.computed_digest.is_some()
            && !self.state.busy
        {
            self.derive_outcome();
        }
    }

    /// Compare the computed digest against the expected value and record the
    /// outcome. While a computation is in flight this is `Indeterminate`.
    pub fn compare(&mut self) -> Outcome {
        let outcome = if self.state.busy {
            Outcome::Indeterminate
        } else {
            self.classify()
        };
        self.outcome = Some(outcome);
        outcome
    }

    /// Load a parsed checksum file: install its expected digest and
    /// algorithm, then start computing the digest of the attested file.
    ///
    /// A parse failure records a user-visible message and changes nothing
    /// else.
    pub fn load_checksum_file(
        &mut self,
        text: &str,
        checksum_path: &Path,
        extensions: &ExtensionMap,
    ) -> Option<ComputeRequest> {
        match checksum::parse(text, checksum_path, extensions) {
            Ok(record) => {
                self.state.algorithm = record.algorithm;
                self.state.expected_digest = record.digest;
                Some(self.select_file(record.file))
            }
            Err(err) => {
                tracing::warn!(path = %checksum_path.display(), %err, "checksum file rejected");
                self.message = Some(err.to_string());
                None
            }
        }
    }

    /// Reset the selection to its initial empty form. The algorithm tag is
    /// kept; any in-flight computation is orphaned.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = SelectionState::empty(self.state.algorithm);
        self.outcome = None;
        self.message = None;
    }

    /// Commit the result of a computation, unless the selection has moved on
    /// since the request was handed out.
    pub fn apply(&mut self, request: &ComputeRequest, result: Result<String, EngineError>) {
        if request.generation != self.generation {
            tracing::debug!(path = %request.path.display(), "discarding stale digest result");
            return;
        }
        self.state.busy = false;
        match result {
            Ok(digest) => {
                self.state.computed_digest = Some(digest);
                if !self.state.expected_digest.is_empty() {
                    self.derive_outcome();
                }
            }
            Err(err) => {
                self.state.computed_digest = None;
                self.message = Some(err.to_string());
            }
        }
    }

    fn classify(&self) -> Outcome {
        compare::compare(
            self.state.computed_digest.as_deref(),
            Some(self.state.expected_digest.as_str()),
        )
    }

    fn derive_outcome(&mut self) {
        self.outcome = Some(self.classify());
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}
