//! Stand-in for the external `Stroke` collaborator.
//!
//! Stroke parsing and key-chord encoding are out of scope for this crate;
//! the translator only ever consumes a stroke's RTFCRE text form and the
//! ordered set of steno keys it depresses (see crate docs). This module
//! gives the rest of the crate, and its tests, a concrete type to work
//! against instead of a trait nobody could implement meaningfully in
//! isolation.

use std::fmt;

/// One simultaneously-depressed chord of stenotype keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stroke {
    rtfcre: String,
    steno_keys: Vec<String>,
    is_correction: bool,
}

impl Stroke {
    /// Build a stroke from its canonical RTFCRE text and the keys it
    /// depresses.
    pub fn new(rtfcre: impl Into<String>, steno_keys: Vec<String>) -> Self {
        Self {
            rtfcre: rtfcre.into(),
            steno_keys,
            is_correction: false,
        }
    }

    /// Build a stroke from its depressed keys alone, deriving the RTFCRE
    /// form by concatenating them in order. Used to synthesize the "stroke
    /// minus one affix key" alternative during prefix/suffix folding.
    pub fn from_keys(steno_keys: Vec<String>) -> Self {
        let rtfcre = steno_keys.join("");
        Self {
            rtfcre,
            steno_keys,
            is_correction: false,
        }
    }

    /// Build the system's configured correction ("undo") chord.
    pub fn correction(rtfcre: impl Into<String>, steno_keys: Vec<String>) -> Self {
        Self {
            rtfcre: rtfcre.into(),
            steno_keys,
            is_correction: true,
        }
    }

    /// Canonical text form, used as a dictionary key component.
    pub fn rtfcre(&self) -> &str {
        &self.rtfcre
    }

    /// The individual keys actually depressed, in a stable order.
    pub fn steno_keys(&self) -> &[String] {
        &self.steno_keys
    }

    /// True for the system's configured correction chord.
    pub fn is_correction(&self) -> bool {
        self.is_correction
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rtfcre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_keys_joins_in_order() {
        let s = Stroke::from_keys(vec!["W".into(), "O".into(), "R".into(), "K".into()]);
        assert_eq!(s.rtfcre(), "WORK");
        assert!(!s.is_correction());
    }

    #[test]
    fn correction_flag_is_set() {
        let s = Stroke::correction("*", vec!["*".into()]);
        assert!(s.is_correction());
    }
}
