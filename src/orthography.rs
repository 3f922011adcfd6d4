//! Morphological joining of a stem and a suffix, e.g. `run` + `ing` =
//! `running`.
//!
//! Ported from Plover's `orthography.py`/`english_stenotype.py` by way of
//! the teacher's `diff::parser::orthography` module, which carries the same
//! rule set expressed as paired regexes. This module keeps Plover's
//! single-combined-regex form instead, matching each rule against the
//! literal `stem + " ^ " + suffix` infix.

use crate::system::System;

/// Join `word` and `suffix` using `system`'s orthography rules and frequency
/// wordlist.
pub fn add_suffix(system: &System, word: &str, suffix: &str) -> String {
    let (head, remainder) = match suffix.find(' ') {
        Some(idx) => (&suffix[..idx], &suffix[idx..]),
        None => (suffix, ""),
    };

    let joined = join_without_remainder(system, word, head);
    format!("{}{}", joined, remainder)
}

fn join_without_remainder(system: &System, word: &str, suffix: &str) -> String {
    let simple = format!("{}{}", word, suffix);

    let mut candidates: Vec<String> = Vec::new();
    if system.orthography_words.contains_key(&simple) {
        candidates.push(simple.clone());
    }

    candidates.extend(rule_candidates(system, word, suffix));

    if let Some(alias) = system.orthography_rules_aliases.get(suffix) {
        candidates.extend(rule_candidates(system, word, alias));
    }

    if candidates.is_empty() {
        return simple;
    }

    let in_dict: Vec<&String> = candidates
        .iter()
        .filter(|c| system.orthography_words.contains_key(c.as_str()))
        .collect();

    if !in_dict.is_empty() {
        let mut best = in_dict[0];
        let mut best_rank = system.orthography_words[best.as_str()];
        for candidate in &in_dict[1..] {
            let rank = system.orthography_words[candidate.as_str()];
            if rank < best_rank {
                best = candidate;
                best_rank = rank;
            }
        }
        best.clone()
    } else {
        candidates[0].clone()
    }
}

fn rule_candidates(system: &System, word: &str, suffix: &str) -> Vec<String> {
    let infix = format!("{} ^ {}", word, suffix);
    let mut out = Vec::new();
    for rule in &system.orthography_rules {
        if rule.pattern.is_match(&infix) {
            let expanded = rule.pattern.replace(&infix, rule.replacement.as_str());
            out.push(expanded.into_owned());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_suffix_is_idempotent() {
        let system = System::english_stenotype();
        assert_eq!(add_suffix(&system, "cat", ""), "cat");
    }

    #[test]
    fn consonant_doubling_running() {
        let system = System::english_stenotype();
        assert_eq!(add_suffix(&system, "run", "ing"), "running");
    }

    #[test]
    fn silent_e_narrating() {
        let system = System::english_stenotype();
        assert_eq!(add_suffix(&system, "narrate", "ing"), "narrating");
    }

    #[test]
    fn write_en_written() {
        let system = System::english_stenotype();
        assert_eq!(add_suffix(&system, "write", "en"), "written");
    }

    #[test]
    fn free_plus_ed_is_freed() {
        let system = System::english_stenotype();
        assert_eq!(add_suffix(&system, "free", "ed"), "freed");
    }

    #[test]
    fn cherry_pluralizes_with_ies() {
        let system = System::english_stenotype();
        assert_eq!(add_suffix(&system, "cherry", "s"), "cherries");
    }

    #[test]
    fn no_matching_rule_falls_back_to_simple_concatenation() {
        let system = System::english_stenotype();
        assert_eq!(add_suffix(&system, "xyzzy", "qqq"), "xyzzyqqq");
    }

    #[test]
    fn remainder_after_space_is_reappended_verbatim() {
        let system = System::english_stenotype();
        assert_eq!(
            add_suffix(&system, "run", "ing {^} extra"),
            "running {^} extra"
        );
    }
}
