//! The unit of translation history: one dictionary lookup's worth of
//! strokes, text, and whatever it displaced.

use crate::stroke::Stroke;

/// Opaque black-box annotation a downstream formatter may attach to a
/// record. The core never inspects these beyond [`TranslationRecord::has_undo`].
#[derive(Debug, Clone, Default)]
pub struct FormattingAnnotation {
    /// Text this annotation caused to be emitted to the output stream.
    pub emitted_text: String,
    /// True if applying this annotation required backspacing over and
    /// replacing previously emitted text.
    pub is_backspace_replacement: bool,
}

/// One dictionary lookup's worth of translation history.
#[derive(Debug, Clone)]
pub struct TranslationRecord {
    pub strokes: Vec<Stroke>,
    pub rtfcre_key: Vec<String>,
    pub text: Option<String>,
    pub replaced: Vec<TranslationRecord>,
    pub formatting: Vec<FormattingAnnotation>,
    pub is_retrospective_command: bool,
}

impl TranslationRecord {
    /// A record for a stroke with no dictionary mapping: raw steno will be
    /// shown downstream.
    pub fn unmapped(stroke: Stroke) -> Self {
        let rtfcre_key = vec![stroke.rtfcre().to_string()];
        Self {
            strokes: vec![stroke],
            rtfcre_key,
            text: None,
            replaced: Vec::new(),
            formatting: Vec::new(),
            is_retrospective_command: false,
        }
    }

    /// True if undoing this record is safe:
    /// - it hasn't been seen by a formatter yet (`formatting` empty), or
    /// - it displaced earlier records that must be restored, or
    /// - some attached annotation actually did something (emitted text, or
    ///   a backspace-replacement) that undoing must reverse.
    ///
    /// A record with formatting that did nothing is a pure no-op and
    /// undoing it would mis-target earlier text.
    pub fn has_undo(&self) -> bool {
        if self.formatting.is_empty() {
            return true;
        }
        if !self.replaced.is_empty() {
            return true;
        }
        self.formatting
            .iter()
            .any(|a| !a.emitted_text.is_empty() || a.is_backspace_replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(text: &str) -> Stroke {
        Stroke::new(text, vec![text.to_string()])
    }

    #[test]
    fn unseen_record_has_undo() {
        let record = TranslationRecord::unmapped(stroke("KAT"));
        assert!(record.has_undo());
    }

    #[test]
    fn record_with_replaced_has_undo_even_with_empty_formatting_annotation() {
        let mut record = TranslationRecord::unmapped(stroke("HROG"));
        record.formatting.push(FormattingAnnotation::default());
        record.replaced.push(TranslationRecord::unmapped(stroke("KAT")));
        assert!(record.has_undo());
    }

    #[test]
    fn no_op_formatted_record_has_no_undo() {
        let mut record = TranslationRecord::unmapped(stroke("KAT"));
        record.formatting.push(FormattingAnnotation::default());
        assert!(!record.has_undo());
    }

    #[test]
    fn record_with_emitted_text_has_undo() {
        let mut record = TranslationRecord::unmapped(stroke("KAT"));
        record.formatting.push(FormattingAnnotation {
            emitted_text: "cat".to_string(),
            is_backspace_replacement: false,
        });
        assert!(record.has_undo());
    }
}
