//! Error taxonomy for the engine.
//!
//! Each concern gets its own small enum rather than one crate-wide catch-all,
//! following the dictionary loader's `ParseError` in the teacher crate: a
//! `Debug`-derived enum, a `Display` impl that defers to `Debug`, and a plain
//! `impl Error`.

use std::error::Error;
use std::fmt;

/// Errors raised by mutations on a [`crate::dictionary::SingleDictionary`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DictionaryError {
    /// A mutation was attempted on a dictionary marked `readonly`.
    ReadonlyViolation,
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for DictionaryError {}

/// Errors raised by mutations or lookups on a
/// [`crate::dictionary::DictionaryCollection`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CollectionError {
    /// `set` was called with no explicit path and no writable child exists.
    NoWritableDictionary,
    /// `set` or a path-based lookup named a dictionary that isn't in the
    /// collection.
    UnknownDictionaryPath(String),
    Dictionary(DictionaryError),
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for CollectionError {}

impl From<DictionaryError> for CollectionError {
    fn from(e: DictionaryError) -> Self {
        CollectionError::Dictionary(e)
    }
}

/// Errors surfaced by the [`crate::translator::Translator`] state machine.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TranslatorError {
    /// A stroke mapped to a macro name that isn't registered in the
    /// [`crate::macros::MacroRegistry`].
    MissingMacro(String),
}

impl fmt::Display for TranslatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for TranslatorError {}
