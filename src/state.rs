//! The translator's retained history: a sliding window of
//! [`TranslationRecord`]s bounded by the undo horizon, plus one record of
//! left context beyond it.

use crate::record::TranslationRecord;

/// The translator's undo/redo history and formatter left-context.
#[derive(Debug, Default)]
pub struct TranslatorState {
    pub translations: Vec<TranslationRecord>,
    pub tail: Option<TranslationRecord>,
}

impl TranslatorState {
    pub fn new() -> Self {
        Self {
            translations: Vec::new(),
            tail: None,
        }
    }

    /// Left context for the formatter.
    ///
    /// With `count`, returns the records that existed before the most recent
    /// `count` were added. Without it, returns the whole history. If that
    /// view is empty, falls back to `[tail]` when a tail is present.
    pub fn prev(&self, count: Option<usize>) -> Option<Vec<TranslationRecord>> {
        let view: Vec<TranslationRecord> = match count {
            Some(n) => {
                let keep = self.translations.len().saturating_sub(n);
                self.translations[..keep].to_vec()
            }
            None => self.translations.clone(),
        };

        if view.is_empty() {
            self.tail.clone().map(|t| vec![t])
        } else {
            Some(view)
        }
    }

    /// Trim `translations` to at most `n` strokes total, walking from newest
    /// to oldest. The most recent record pushed out becomes the new `tail`.
    pub fn restrict_size(&mut self, n: usize) {
        let mut total = 0usize;
        let mut keep_from = self.translations.len();
        for (i, record) in self.translations.iter().enumerate().rev() {
            total += record.strokes.len();
            keep_from = i;
            if total >= n {
                break;
            }
        }
        if keep_from == 0 {
            return;
        }
        let mut evicted: Vec<TranslationRecord> = self.translations.drain(..keep_from).collect();
        if let Some(newest_evicted) = evicted.pop() {
            self.tail = Some(newest_evicted);
        }
    }
}
