//! Macro dispatch: strokes that name a behavior instead of (or in addition
//! to) a piece of text.
//!
//! Mirrors the teacher's `Command`/special-action dispatch in spirit, but
//! where the teacher matches on a closed `Command` enum produced by its own
//! parser, this crate's macro names come from arbitrary dictionary text
//! (`=name:cmdline`) or one of four legacy aliases, so dispatch is a string
//! keyed registry instead.

use std::collections::HashMap;

use crate::error::TranslatorError;
use crate::stroke::Stroke;
use crate::translator::Translator;

/// A macro name plus its command-line argument, as decoded from a stroke's
/// dictionary mapping (or synthesized for a correction stroke or legacy
/// alias).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroInvocation {
    pub name: String,
    pub cmdline: String,
}

/// Decode a stroke's dictionary mapping (if any) into a macro invocation,
/// per the dispatch rules:
/// - no mapping + correction stroke => the built-in `undo` macro.
/// - one of the four legacy literal aliases => its aliased command name.
/// - a mapping starting with `=` => `name:cmdline`, split on the first `:`.
/// - anything else => not a macro.
pub fn decode(mapping: Option<&str>, stroke: &Stroke) -> Option<MacroInvocation> {
    match mapping {
        None => {
            if stroke.is_correction() {
                Some(MacroInvocation {
                    name: "undo".to_string(),
                    cmdline: String::new(),
                })
            } else {
                None
            }
        }
        Some(text) => {
            if let Some(name) = legacy_alias(text) {
                return Some(MacroInvocation {
                    name: name.to_string(),
                    cmdline: String::new(),
                });
            }
            if let Some(rest) = text.strip_prefix('=') {
                if rest.is_empty() {
                    return None;
                }
                return Some(match rest.split_once(':') {
                    Some((name, cmdline)) => MacroInvocation {
                        name: name.to_string(),
                        cmdline: cmdline.to_string(),
                    },
                    None => MacroInvocation {
                        name: rest.to_string(),
                        cmdline: String::new(),
                    },
                });
            }
            None
        }
    }
}

fn legacy_alias(text: &str) -> Option<&'static str> {
    match text {
        "{*}" => Some("retrospective_toggle_asterisk"),
        "{*!}" => Some("retrospective_delete_space"),
        "{*?}" => Some("retrospective_insert_space"),
        "{*+}" => Some("repeat_last_stroke"),
        _ => None,
    }
}

/// A macro's implementation: given the translator, the triggering stroke,
/// and the command-line argument, mutate translator state via its public
/// undo/do/flush operations.
pub type MacroFn = fn(&mut Translator, &Stroke, &str);

/// Registry of macro implementations keyed by name.
pub struct MacroRegistry {
    macros: HashMap<String, MacroFn>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self {
            macros: HashMap::new(),
        }
    }

    /// A registry with just the built-in `undo` macro registered. Embedders
    /// add the four legacy-alias macros and any of their own with
    /// [`Self::register`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("undo", undo_macro);
        registry
    }

    pub fn register(&mut self, name: &str, implementation: MacroFn) {
        self.macros.insert(name.to_string(), implementation);
    }

    pub fn get(&self, name: &str) -> Option<MacroFn> {
        self.macros.get(name).copied()
    }

    pub fn dispatch(
        &self,
        translator: &mut Translator,
        stroke: &Stroke,
        invocation: &MacroInvocation,
    ) -> Result<(), TranslatorError> {
        match self.get(&invocation.name) {
            Some(implementation) => {
                implementation(translator, stroke, &invocation.cmdline);
                Ok(())
            }
            None => Err(TranslatorError::MissingMacro(invocation.name.clone())),
        }
    }
}

impl Default for MacroRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Pop the newest undoable record, discarding any non-undoable no-op
/// records sitting on top of it, then restore whatever it had replaced.
fn undo_macro(translator: &mut Translator, _stroke: &Stroke, _cmdline: &str) {
    loop {
        match translator.state.translations.pop() {
            Some(record) if record.has_undo() => {
                let replaced = record.replaced.clone();
                translator.to_undo_push_front(vec![record]);
                translator.do_records(replaced);
                return;
            }
            Some(_non_undoable) => continue,
            None => return,
        }
    }
}
