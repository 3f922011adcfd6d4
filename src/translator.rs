//! The core per-stroke state machine: greedy longest-match lookup with
//! retroactive replacement, affix folding, and undo bookkeeping.
//!
//! Grounded on the teacher's `plojo_standard::dictionary::translate`
//! (greedy longest-match over accumulated strokes) and, for the affix
//! folding and undo semantics that module doesn't attempt, on
//! `Translator._find_translation` in `original_source/plover/translation.py`.

use std::rc::Rc;

use crate::dictionary::collection::DictionaryCollection;
use crate::error::TranslatorError;
use crate::macros::{self, MacroRegistry};
use crate::record::TranslationRecord;
use crate::state::TranslatorState;
use crate::stroke::Stroke;
use crate::system::System;

/// `(undo, do, prev)` notification fired once per call to [`Translator::flush`]
/// that has anything to report.
pub type Listener =
    Box<dyn Fn(&[TranslationRecord], &[TranslationRecord], Option<&[TranslationRecord]>)>;

/// Drives dictionary lookups stroke by stroke, maintaining a bounded window
/// of translation history for retroactive replacement and undo.
pub struct Translator {
    pub dictionary: DictionaryCollection,
    pub state: TranslatorState,
    /// Minimum number of strokes retained regardless of dictionary key
    /// length; caller-configured, default 0.
    pub min_undo_length: usize,
    system: Rc<System>,
    listeners: Vec<Listener>,
    to_undo: Vec<TranslationRecord>,
    to_do: usize,
}

impl Translator {
    pub fn new(dictionary: DictionaryCollection, system: Rc<System>) -> Self {
        Self {
            dictionary,
            state: TranslatorState::new(),
            min_undo_length: 0,
            system,
            listeners: Vec::new(),
            to_undo: Vec::new(),
            to_do: 0,
        }
    }

    pub fn add_listener(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// The retained-stroke horizon: `max(dictionary.longest_key, min_undo_length)`.
    pub fn horizon(&self) -> usize {
        self.dictionary.longest_key().max(self.min_undo_length)
    }

    /// Process one stroke: dispatch to a macro if the stroke's mapping (or
    /// absence plus `is_correction`) names one, otherwise run the greedy
    /// dictionary lookup and fold the result into history. Always ends by
    /// flushing pending notifications.
    pub fn translate(
        &mut self,
        stroke: Stroke,
        macros: &MacroRegistry,
    ) -> Result<(), TranslatorError> {
        let key = vec![stroke.rtfcre().to_string()];
        let mapping = self.dictionary.lookup(&key).map(|s| s.to_string());
        let invocation = macros::decode(mapping.as_deref(), &stroke);

        match invocation {
            Some(invocation) => {
                macros.dispatch(self, &stroke, &invocation)?;
            }
            None => {
                let record = self.find_translation(&stroke);
                let replaced = record.replaced.clone();
                self.undo(replaced);
                self.do_records(vec![record]);
            }
        }
        self.flush(None);
        Ok(())
    }

    /// Pop `records` off the back of `state.translations`, in reverse order,
    /// asserting each pop matches what we expect to find there. A record
    /// not yet emitted (still counted in `to_do`) is simply un-counted;
    /// an already-emitted record must be queued for an undo notification.
    pub(crate) fn undo(&mut self, records: Vec<TranslationRecord>) {
        for expected in records.iter().rev() {
            let popped = match self.state.translations.pop() {
                Some(record) => record,
                None => continue,
            };
            debug_assert_eq!(popped.rtfcre_key, expected.rtfcre_key);
            if self.to_do > 0 {
                self.to_do -= 1;
            } else {
                self.to_undo.insert(0, popped);
            }
        }
    }

    /// Append `records` to the end of `state.translations`, counting them as
    /// pending new output.
    pub(crate) fn do_records(&mut self, records: Vec<TranslationRecord>) {
        self.to_do += records.len();
        self.state.translations.extend(records);
    }

    /// Prepend `records` to `to_undo`, preserving their relative order.
    /// Exposed for the built-in `undo` macro, which discovers records to
    /// retract one at a time while walking back through history.
    pub(crate) fn to_undo_push_front(&mut self, records: Vec<TranslationRecord>) {
        self.to_undo.splice(0..0, records);
    }

    /// Emit a `(undo, do, prev)` notification to every listener if there is
    /// anything to report, then shrink history back down to the horizon.
    pub fn flush(&mut self, extra: Option<Vec<TranslationRecord>>) {
        let prev = self.state.prev(Some(self.to_do));

        let mut do_list: Vec<TranslationRecord> = if self.to_do > 0 {
            let start = self.state.translations.len() - self.to_do;
            self.state.translations[start..].to_vec()
        } else {
            Vec::new()
        };
        if let Some(mut extra_records) = extra {
            do_list.append(&mut extra_records);
        }

        let undo_list = std::mem::take(&mut self.to_undo);
        self.to_do = 0;

        if !undo_list.is_empty() || !do_list.is_empty() {
            for listener in &self.listeners {
                listener(&undo_list, &do_list, prev.as_deref());
            }
        }

        let horizon = self.horizon();
        self.state.restrict_size(horizon);
    }

    /// Greedy longest-match lookup with affix folding, per the algorithm in
    /// crate docs: try normal, then suffix folding, then prefix folding,
    /// each at decreasing numbers of consumed trailing records.
    fn find_translation(&self, stroke: &Stroke) -> TranslationRecord {
        let horizon = self.dictionary.longest_key();

        let mut total = 1usize;
        let mut consumed = 0usize;
        for record in self.state.translations.iter().rev() {
            let next_total = total + record.strokes.len();
            if next_total > horizon {
                break;
            }
            total = next_total;
            consumed += 1;
        }
        let n = self.state.translations.len();
        let recent = &self.state.translations[n - consumed..];

        if let Some(record) = self.try_normal(recent, stroke) {
            return record;
        }
        if !self.system.suffix_keys.is_empty() && stroke_has_any_key(stroke, &self.system.suffix_keys)
        {
            if let Some(record) = self.try_suffix(recent, stroke) {
                return record;
            }
        }
        if !self.system.prefix_keys.is_empty() {
            if let Some(record) = self.try_prefix(recent, stroke) {
                return record;
            }
        }

        TranslationRecord::unmapped(stroke.clone())
    }

    fn try_normal(&self, recent: &[TranslationRecord], stroke: &Stroke) -> Option<TranslationRecord> {
        for start in 0..=recent.len() {
            let consumed = &recent[start..];
            let test_seq = rtfcre_seq(consumed, stroke);
            if let Some(text) = self.dictionary.lookup(&test_seq) {
                return Some(build_record(consumed, stroke, test_seq, text.to_string()));
            }
        }
        None
    }

    fn try_suffix(&self, recent: &[TranslationRecord], stroke: &Stroke) -> Option<TranslationRecord> {
        let pairs = affix_alternatives(stroke, &self.system.suffix_keys, &self.system);
        if pairs.is_empty() {
            return None;
        }
        for start in 0..=recent.len() {
            let consumed = &recent[start..];
            let test_seq = rtfcre_seq(consumed, stroke);
            if let Some(text) = self.lookup_affixes(&test_seq, &pairs, false) {
                return Some(build_record(consumed, stroke, test_seq, text));
            }
        }
        None
    }

    fn try_prefix(&self, recent: &[TranslationRecord], stroke: &Stroke) -> Option<TranslationRecord> {
        for start in 0..=recent.len() {
            let consumed = &recent[start..];
            let first_stroke = consumed.first().map(|r| &r.strokes[0]).unwrap_or(stroke);
            if !stroke_has_any_key(first_stroke, &self.system.prefix_keys) {
                continue;
            }
            let pairs = affix_alternatives(first_stroke, &self.system.prefix_keys, &self.system);
            if pairs.is_empty() {
                continue;
            }
            let test_seq = rtfcre_seq(consumed, stroke);
            if let Some(text) = self.lookup_affixes(&test_seq, &pairs, true) {
                return Some(build_record(consumed, stroke, test_seq, text));
            }
        }
        None
    }

    /// For each `(affix_key, alt_rtfcre)` pair, substitute `alt_rtfcre` at
    /// the appropriate end of `test_seq`, look up both the modified
    /// sequence and the lone affix key, and join the two mappings with a
    /// literal space (the signal downstream formatting must orthographically
    /// join the pieces).
    fn lookup_affixes(
        &self,
        test_seq: &[String],
        pairs: &[(String, String)],
        prefix: bool,
    ) -> Option<String> {
        for (affix_key, alt_rtfcre) in pairs {
            let mut modified = test_seq.to_vec();
            let idx = if prefix { 0 } else { modified.len() - 1 };
            modified[idx] = alt_rtfcre.clone();

            let main_mapping = self.dictionary.lookup(&modified)?;
            let affix_key_seq = vec![affix_key.clone()];
            let affix_mapping = match self.dictionary.lookup(&affix_key_seq) {
                Some(m) => m,
                None => continue,
            };

            return Some(if prefix {
                format!("{} {}", affix_mapping, main_mapping)
            } else {
                format!("{} {}", main_mapping, affix_mapping)
            });
        }
        None
    }
}

fn stroke_has_any_key(stroke: &Stroke, keys: &[String]) -> bool {
    stroke.steno_keys().iter().any(|k| keys.contains(k))
}

/// Build the `(affix_key, alt_rtfcre)` pairs for every configured affix key
/// present in `stroke`, where `alt_rtfcre` is the RTFCRE form of `stroke`
/// with that one key removed, keys reordered by the system's canonical
/// `KEY_ORDER` so the synthesized chord reads the way the keyboard lays out
/// rather than in whatever order the stroke happened to list them.
fn affix_alternatives(
    stroke: &Stroke,
    affix_keys: &[String],
    system: &System,
) -> Vec<(String, String)> {
    stroke
        .steno_keys()
        .iter()
        .filter(|k| affix_keys.contains(k))
        .map(|affix_key| {
            let mut remaining: Vec<String> = stroke
                .steno_keys()
                .iter()
                .filter(|k| *k != affix_key)
                .cloned()
                .collect();
            remaining.sort_by_key(|k| system.key_order_of(k));
            (affix_key.clone(), Stroke::from_keys(remaining).rtfcre().to_string())
        })
        .collect()
}

fn rtfcre_seq(records: &[TranslationRecord], stroke: &Stroke) -> Vec<String> {
    let mut seq: Vec<String> = records
        .iter()
        .flat_map(|r| r.rtfcre_key.iter().cloned())
        .collect();
    seq.push(stroke.rtfcre().to_string());
    seq
}

fn build_record(
    consumed: &[TranslationRecord],
    stroke: &Stroke,
    rtfcre_key: Vec<String>,
    text: String,
) -> TranslationRecord {
    let mut strokes: Vec<Stroke> = consumed.iter().flat_map(|r| r.strokes.clone()).collect();
    strokes.push(stroke.clone());
    TranslationRecord {
        strokes,
        rtfcre_key,
        text: Some(text),
        replaced: consumed.to_vec(),
        formatting: Vec::new(),
        is_retrospective_command: false,
    }
}
