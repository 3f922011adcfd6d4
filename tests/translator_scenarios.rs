//! Black-box coverage of the translator against a toy dictionary, one
//! scenario per listener notification sequence.

use std::cell::RefCell;
use std::rc::Rc;

use steno_translator::dictionary::collection::DictionaryCollection;
use steno_translator::{MacroRegistry, SingleDictionary, Stroke, System, TranslationRecord, Translator};

/// Records every `(undo, do)` notification pair the translator fires, so a
/// scenario can assert against the whole sequence at once.
struct Blackbox {
    translator: Translator,
    macros: MacroRegistry,
    notifications: Rc<RefCell<Vec<(Vec<TranslationRecord>, Vec<TranslationRecord>)>>>,
}

impl Blackbox {
    fn new(dict: SingleDictionary) -> Self {
        let mut collection = DictionaryCollection::new();
        collection.set_dicts(vec![dict]);
        Self::from_collection(collection, System::english_stenotype())
    }

    fn from_collection(collection: DictionaryCollection, system: System) -> Self {
        let mut translator = Translator::new(collection, Rc::new(system));
        let notifications = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notifications);
        translator.add_listener(Box::new(move |undo, do_list, _prev| {
            sink.borrow_mut().push((undo.to_vec(), do_list.to_vec()));
        }));
        Self {
            translator,
            macros: MacroRegistry::with_builtins(),
            notifications,
        }
    }

    fn stroke(&mut self, rtfcre: &str) {
        let keys: Vec<String> = rtfcre.chars().map(|c| c.to_string()).collect();
        self.translator
            .translate(Stroke::new(rtfcre, keys), &self.macros)
            .expect("translate should not error in these scenarios");
    }

    fn stroke_with_keys(&mut self, rtfcre: &str, keys: Vec<&str>) {
        let keys: Vec<String> = keys.into_iter().map(|k| k.to_string()).collect();
        self.translator
            .translate(Stroke::new(rtfcre, keys), &self.macros)
            .expect("translate should not error in these scenarios");
    }

    fn correction(&mut self, rtfcre: &str) {
        self.translator
            .translate(
                Stroke::correction(rtfcre, vec![rtfcre.to_string()]),
                &self.macros,
            )
            .expect("translate should not error in these scenarios");
    }

    fn texts(&self) -> Vec<(Vec<Option<String>>, Vec<Option<String>>)> {
        self.notifications
            .borrow()
            .iter()
            .map(|(undo, do_list)| {
                (
                    undo.iter().map(|r| r.text.clone()).collect(),
                    do_list.iter().map(|r| r.text.clone()).collect(),
                )
            })
            .collect()
    }
}

fn outline(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn toy_dict() -> SingleDictionary {
    let mut dict = SingleDictionary::new();
    dict.set(outline(&["KAT"]), "cat".to_string()).unwrap();
    dict.set(outline(&["KAT", "HROG"]), "catalogue".to_string())
        .unwrap();
    dict.set(outline(&["TKUP"]), "undo".to_string()).unwrap();
    dict.set(outline(&["HEL"]), "hello".to_string()).unwrap();
    dict.set(outline(&["HEL", "HROE"]), "hello there".to_string())
        .unwrap();
    dict
}

#[test]
fn scenario_1_retroactive_replace() {
    let mut bb = Blackbox::new(toy_dict());
    bb.stroke("KAT");
    bb.stroke("HROG");

    let texts = bb.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], (vec![], vec![Some("cat".to_string())]));
    assert_eq!(
        texts[1],
        (
            vec![Some("cat".to_string())],
            vec![Some("catalogue".to_string())]
        )
    );
}

#[test]
fn scenario_2_correction_chord_restores_replaced_record() {
    let mut bb = Blackbox::new(toy_dict());
    bb.stroke("KAT");
    bb.stroke("HROG");
    bb.correction("*");

    let texts = bb.texts();
    assert_eq!(texts.len(), 3);
    assert_eq!(
        texts[2],
        (
            vec![Some("catalogue".to_string())],
            vec![Some("cat".to_string())]
        )
    );
}

#[test]
fn scenario_3_no_mapping_shows_raw_stroke() {
    let mut bb = Blackbox::new(toy_dict());
    bb.stroke("ZZZ");

    let texts = bb.texts();
    assert_eq!(texts, vec![(vec![], vec![None])]);
}

#[test]
fn scenario_4_suffix_folding_joins_with_a_literal_space() {
    let mut dict = SingleDictionary::new();
    dict.set(outline(&["WORK"]), "work".to_string()).unwrap();
    dict.set(outline(&["D"]), "{^ed}".to_string()).unwrap();

    let mut system = System::english_stenotype();
    system.suffix_keys = vec!["D".to_string()];

    let mut collection = DictionaryCollection::new();
    collection.set_dicts(vec![dict]);
    let mut bb = Blackbox::from_collection(collection, system);

    bb.stroke_with_keys("WORKD", vec!["W", "O", "R", "K", "D"]);

    let texts = bb.texts();
    assert_eq!(texts, vec![(vec![], vec![Some("work {^ed}".to_string())])]);
}

#[test]
fn scenario_5_reverse_lookup_override() {
    let mut high = SingleDictionary::new();
    high.set(outline(&["A"]), "hi".to_string()).unwrap();

    let mut low = SingleDictionary::new();
    low.set(outline(&["A"]), "hello".to_string()).unwrap();
    low.set(outline(&["B"]), "hello".to_string()).unwrap();

    let mut collection = DictionaryCollection::new();
    collection.set_dicts(vec![high, low]);

    let result = collection.reverse_lookup("hello");
    assert_eq!(result, [outline(&["B"])].into_iter().collect());
}

#[test]
fn scenario_6_orthography_consonant_doubling() {
    let system = System::english_stenotype();
    assert_eq!(steno_translator::orthography::add_suffix(&system, "run", "ing"), "running");
}

#[test]
fn invariant_6_escape_unescape_are_inverses() {
    use steno_translator::{escape_translation, unescape_translation};

    for text in [
        "plain text",
        "line one\nline two",
        "a\\tab-like literal",
        "mixed \\n literal and a real \t tab\r\n",
    ] {
        assert_eq!(unescape_translation(&escape_translation(text)), text);
    }
}

#[test]
fn invariant_repeated_strokes_each_emit_exactly_one_do_and_no_undo() {
    let mut bb = Blackbox::new(toy_dict());
    bb.stroke("HEL");

    let texts = bb.texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].0.len(), 0);
    assert_eq!(texts[0].1.len(), 1);
}

#[test]
fn multi_stroke_entries_fold_before_a_shorter_match_wins() {
    let mut bb = Blackbox::new(toy_dict());
    bb.stroke("HEL");
    bb.stroke("HROE");

    let texts = bb.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(
        texts[1],
        (
            vec![Some("hello".to_string())],
            vec![Some("hello there".to_string())]
        )
    );
}
