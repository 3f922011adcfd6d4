//! Process-wide, read-only configuration for one steno system.
//!
//! Loading a system from disk, wiring it into a plugin registry, and any UI
//! around choosing one are all out of scope here (see crate docs) — this
//! module only holds the fields the translator and orthography joiner
//! actually consume, mirroring the subset of `plover.system` this crate
//! depends on.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// A single orthographic rule: if `pattern` matches the literal string
/// `stem + " ^ " + suffix`, `replacement` (a regex replace template that may
/// reference capture groups as `$1`, `$2`, ...) produces the joined form.
#[derive(Clone)]
pub struct OrthographyRule {
    pub pattern: Regex,
    pub replacement: String,
}

impl OrthographyRule {
    /// Compile a rule. The pattern is always matched case-insensitively, per
    /// the rule language.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }
}

/// Immutable, process-wide configuration for one steno system.
pub struct System {
    pub keys: Vec<String>,
    pub number_key: Option<String>,
    pub numbers: HashMap<String, String>,
    pub key_order: HashMap<String, i32>,
    pub implicit_hyphen_keys: HashSet<String>,
    pub implicit_hyphens: HashSet<String>,
    pub undo_stroke_steno: String,
    pub prefix_keys: Vec<String>,
    pub suffix_keys: Vec<String>,
    pub orthography_rules: Vec<OrthographyRule>,
    pub orthography_rules_aliases: HashMap<String, String>,
    pub orthography_words: HashMap<String, u32>,
}

impl System {
    /// Ordinal of `key`, or -1 for a key the system doesn't know about.
    /// Numbers share their base key's ordinal.
    pub fn key_order_of(&self, key: &str) -> i32 {
        if let Some(&ord) = self.key_order.get(key) {
            return ord;
        }
        if let Some(base) = self.numbers.get(key) {
            return *self.key_order.get(base).unwrap_or(&-1);
        }
        -1
    }
}

/// Parse the wordlist file format: whitespace-delimited, alternating
/// word/rank tokens, where the rank token is a single printable character
/// interpreted by its code point (smaller code point = more frequent).
pub fn parse_wordlist(contents: &str) -> HashMap<String, u32> {
    let mut fields = contents.split_whitespace();
    let mut words = HashMap::new();
    while let (Some(word), Some(rank)) = (fields.next(), fields.next()) {
        if let Some(ch) = rank.chars().next() {
            words.insert(word.to_string(), ch as u32);
        }
    }
    words
}

const BUILTIN_WORDLIST: &str = include_str!("orthography_words.txt");

lazy_static! {
    static ref ENGLISH_ORTHOGRAPHY_RULES: Vec<OrthographyRule> = english_orthography_rules();
    static ref ENGLISH_ORTHOGRAPHY_WORDS: HashMap<String, u32> = parse_wordlist(BUILTIN_WORDLIST);
}

/// Port of Plover's English orthography rules
/// (`plover/system/english_stenotype.py`), re-expressed as single regexes
/// matched against the literal `stem + " ^ " + suffix` infix this crate's
/// [`crate::orthography`] module uses.
fn english_orthography_rules() -> Vec<OrthographyRule> {
    let specs: &[(&str, &str)] = &[
        // artistic + ly = artistically
        (r"^(.*[aeiou]c) \^ ly$", "${1}ally"),
        // statute + ry = statutory
        (r"^(.*t)e \^ ry$", "${1}ory"),
        // frequent + cy = frequency (tcy/tecy removal)
        (r"^(.*[naeiou])te? \^ cy$", "${1}cy"),
        // establish + s = establishes (sibilant pluralization)
        (r"^(.*(?:s|sh|x|z|zh)) \^ s$", "${1}es"),
        // speech + s = speeches (soft ch pluralization)
        (
            r"^(.*(?:oa|ea|i|ee|oo|au|ou|l|n|[gin]ar|t)ch) \^ s$",
            "${1}es",
        ),
        // cherry + s = cherries (consonant + y pluralization)
        (r"^(.+[bcdfghjklmnpqrstvwxz])y \^ s$", "${1}ies"),
        // die + ing = dying
        (r"^(.+)ie \^ ing$", "${1}ying"),
        // metallurgy + ist = metallurgist
        (r"^(.+[cdfghlmnpr])y \^ ist$", "${1}ist"),
        // beauty + ful = beautiful (y -> i)
        (
            r"^(.+[bcdfghjklmnpqrstvwxz])y \^ ([a-hj-xz].*)$",
            "${1}i${2}",
        ),
        // write + en = written
        (r"^(.+)te \^ en$", "${1}tten"),
        // free + ed = freed
        (r"^(.+e)e \^ (e.+)$", "${1}${2}"),
        // narrate + ing = narrating (silent e)
        (
            r"^(.+[bcdfghjklmnpqrstuvwxz])e \^ ([aeiouy].*)$",
            "${1}${2}",
        ),
        // defer + ed = deferred (consonant doubling)
        (
            r"^(.*(?:[bcdfghjklmnprstvwxyz]|qu)[aeiou])([bcdfgklmnprtvz]) \^ ([aeiouy].*)$",
            "${1}${2}${2}${3}",
        ),
    ];
    specs
        .iter()
        .filter_map(|(pattern, replacement)| OrthographyRule::new(pattern, replacement).ok())
        .collect()
}

impl System {
    /// A system modeling the keyboard layout and orthography rules of
    /// English stenotype, the way Plover's built-in `english_stenotype`
    /// system does. Intended as a sensible default for embedders and as the
    /// fixture for this crate's own tests.
    pub fn english_stenotype() -> Self {
        let keys: Vec<String> = [
            "#", "S-", "T-", "K-", "P-", "W-", "H-", "R-", "A-", "O-", "*", "-E", "-U", "-F",
            "-R", "-P", "-B", "-L", "-G", "-T", "-S", "-D", "-Z",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let mut key_order = HashMap::new();
        for (i, key) in keys.iter().enumerate() {
            key_order.insert(key.clone(), i as i32);
        }

        Self {
            keys,
            number_key: Some("#".to_string()),
            numbers: HashMap::new(),
            key_order,
            implicit_hyphen_keys: HashSet::new(),
            implicit_hyphens: HashSet::new(),
            undo_stroke_steno: "*".to_string(),
            prefix_keys: Vec::new(),
            suffix_keys: Vec::new(),
            orthography_rules: ENGLISH_ORTHOGRAPHY_RULES.clone(),
            orthography_rules_aliases: HashMap::new(),
            orthography_words: ENGLISH_ORTHOGRAPHY_WORDS.clone(),
        }
    }
}
