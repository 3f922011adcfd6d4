//! Core translation engine for a stenographic input system.
//!
//! Takes one stroke at a time and turns it into text by looking it up in a
//! prioritized stack of dictionaries, greedily folding in as many recent
//! strokes as the longest dictionary key allows, and retroactively
//! replacing already-emitted text when a longer match appears. Downstream
//! concerns — stroke/key-chord encoding, dictionary file formats, macro
//! *implementations* beyond the built-in `undo`, and output formatting —
//! are out of scope; this crate only implements the translation state
//! machine, the dictionary stack it looks things up in, and the
//! orthography joiner that downstream formatting consults to stitch a stem
//! and a suffix together.

pub mod dictionary;
pub mod error;
pub mod escape;
pub mod macros;
pub mod orthography;
pub mod record;
pub mod state;
pub mod stroke;
pub mod system;
pub mod translator;

pub use dictionary::collection::DictionaryCollection;
pub use dictionary::SingleDictionary;
pub use error::{CollectionError, DictionaryError, TranslatorError};
pub use escape::{escape_translation, unescape_translation};
pub use macros::{MacroInvocation, MacroRegistry};
pub use record::{FormattingAnnotation, TranslationRecord};
pub use state::TranslatorState;
pub use stroke::Stroke;
pub use system::System;
pub use translator::Translator;
