//! Comparison policy
//!
//! Pure classification of a computed digest against the user's expected value.

/// Result of comparing a computed digest with an expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    Mismatched,
    /// Expected digest present, no computed digest yet.
    MissingComputed,
    /// Computed digest present, no expected digest entered.
    MissingExpected,
    MissingBoth,
    /// A computation is still in flight; only the controller produces this.
    Indeterminate,
}

impl Outcome {
    pub fn is_match(self) -> bool {
        self == Outcome::Matched
    }

    /// User-facing message for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Matched => "Digests match",
            Outcome::Mismatched => "Digests do not match",
            Outcome::MissingComputed => "Select a file and try again",
            Outcome::MissingExpected => "Enter the expected digest for the file and try again",
            Outcome::MissingBoth => "Select a file, enter its expected digest and try again",
            Outcome::Indeterminate => "Digest computation is still running, try again in a moment",
        }
    }
}

/// Compare a computed digest against the expected value.
///
/// Empty strings count as absent. Equality is case-insensitive textual
/// comparison of the hex representation; no whitespace tolerance.
pub fn compare(computed: Option<&str>, expected: Option<&str>) -> Outcome {
    let computed = computed.filter(|s| !s.is_empty());
    let expected = expected.filter(|s| !s.is_empty());
    match (computed, expected) {
        (Some(computed), Some(expected)) => {
            if computed.eq_ignore_ascii_case(expected) {
                Outcome::Matched
            } else {
                Outcome::Mismatched
            }
        }
        (None, Some(_)) => Outcome::MissingComputed,
        (Some(_), None) => Outcome::MissingExpected,
        (None, None) => Outcome::MissingBoth,
    }
}
