//! A single stroke-outline-to-text dictionary, plus the prioritized
//! [`collection::DictionaryCollection`] that stacks several of them.
//!
//! Grounded on the teacher's `plojo_standard::dictionary` module, which
//! likewise keeps a forward map alongside a reverse index rather than
//! scanning the forward map on every reverse lookup.

pub mod collection;

use std::collections::{HashMap, HashSet};

use crate::error::DictionaryError;

/// An outline: the RTFCRE form of each stroke that makes up a dictionary key.
pub type Outline = Vec<String>;

/// Opaque handle returned by [`SingleDictionary::add_longest_key_listener`],
/// used to deregister later. Avoids depending on closure identity, which
/// Rust closures don't reliably expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// One stroke-outline-to-text dictionary.
///
/// Mirrors Plover's `StenoDictionary`: a forward map plus a reverse index
/// kept in sync on every mutation, so `reverse_lookup` never has to scan the
/// whole dictionary.
pub struct SingleDictionary {
    forward: HashMap<Outline, String>,
    reverse: HashMap<String, HashSet<Outline>>,
    longest_key: usize,
    pub enabled: bool,
    pub readonly: bool,
    pub path: Option<String>,
    pub timestamp: Option<u64>,
    listeners: Vec<(ListenerHandle, Box<dyn Fn(usize)>)>,
    next_handle: u64,
}

impl SingleDictionary {
    /// An empty, writable, enabled dictionary with no backing path.
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
            longest_key: 0,
            enabled: true,
            readonly: false,
            path: None,
            timestamp: None,
            listeners: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn longest_key(&self) -> usize {
        self.longest_key
    }

    /// Register a callback fired with the new `longest_key` whenever it
    /// changes.
    pub fn add_longest_key_listener(&mut self, callback: Box<dyn Fn(usize)>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, callback));
        handle
    }

    pub fn remove_longest_key_listener(&mut self, handle: ListenerHandle) {
        self.listeners.retain(|(h, _)| *h != handle);
    }

    fn notify_longest_key(&self) {
        for (_, callback) in &self.listeners {
            callback(self.longest_key);
        }
    }

    fn set_longest_key(&mut self, new_len: usize) {
        if new_len != self.longest_key {
            self.longest_key = new_len;
            self.notify_longest_key();
        }
    }

    pub fn get(&self, key: &[String]) -> Option<&str> {
        self.forward.get(key).map(|s| s.as_str())
    }

    fn reverse_remove(&mut self, text: &str, key: &Outline) {
        if let Some(keys) = self.reverse.get_mut(text) {
            keys.remove(key);
            if keys.is_empty() {
                self.reverse.remove(text);
            }
        }
    }

    fn reverse_add(&mut self, text: &str, key: Outline) {
        self.reverse
            .entry(text.to_string())
            .or_insert_with(HashSet::new)
            .insert(key);
    }

    pub fn set(&mut self, key: Outline, text: String) -> Result<(), DictionaryError> {
        if self.readonly {
            return Err(DictionaryError::ReadonlyViolation);
        }
        if let Some(old_text) = self.forward.get(&key).cloned() {
            self.reverse_remove(&old_text, &key);
        }
        self.reverse_add(&text, key.clone());
        let new_len = key.len();
        self.forward.insert(key, text);
        if new_len > self.longest_key {
            self.set_longest_key(new_len);
        }
        Ok(())
    }

    pub fn delete(&mut self, key: &[String]) -> Result<(), DictionaryError> {
        if self.readonly {
            return Err(DictionaryError::ReadonlyViolation);
        }
        let key_vec = key.to_vec();
        if let Some(text) = self.forward.remove(&key_vec) {
            self.reverse_remove(&text, &key_vec);
            if key_vec.len() == self.longest_key {
                let new_longest = self.forward.keys().map(|k| k.len()).max().unwrap_or(0);
                self.set_longest_key(new_longest);
            }
        }
        Ok(())
    }

    /// Load many pairs at once. If the dictionary is currently empty this
    /// loads the forward map in one pass and rebuilds the reverse index and
    /// `longest_key` afterward, rather than paying the incremental-update
    /// cost of `set` once per pair.
    pub fn bulk_update(&mut self, pairs: Vec<(Outline, String)>) -> Result<(), DictionaryError> {
        if self.readonly {
            return Err(DictionaryError::ReadonlyViolation);
        }
        if self.forward.is_empty() {
            let mut longest = 0;
            for (key, text) in pairs {
                longest = longest.max(key.len());
                self.reverse_add(&text, key.clone());
                self.forward.insert(key, text);
            }
            self.set_longest_key(longest);
        } else {
            for (key, text) in pairs {
                self.set(key, text)?;
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
        self.set_longest_key(0);
    }

    pub fn reverse_lookup(&self, text: &str) -> HashSet<Outline> {
        self.reverse.get(text).cloned().unwrap_or_default()
    }

    /// Case-folded equality match against the reverse index.
    pub fn similar_reverse_lookup(&self, text: &str) -> HashSet<Outline> {
        let folded = text.to_lowercase();
        let mut result = HashSet::new();
        for (candidate, keys) in &self.reverse {
            if candidate.to_lowercase() == folded {
                result.extend(keys.iter().cloned());
            }
        }
        result
    }

    /// Texts in the reverse index starting with `prefix`, capped at `max`.
    pub fn partial_reverse_lookup(&self, prefix: &str, max: usize) -> Vec<String> {
        let mut texts: Vec<String> = self
            .reverse
            .keys()
            .filter(|text| text.starts_with(prefix))
            .cloned()
            .collect();
        texts.sort();
        texts.truncate(max);
        texts
    }

    /// Texts in the reverse index matching `pattern`, capped at `max`.
    pub fn regex_reverse_lookup(&self, pattern: &regex::Regex, max: usize) -> Vec<String> {
        let mut texts: Vec<String> = self
            .reverse
            .keys()
            .filter(|text| pattern.is_match(text))
            .cloned()
            .collect();
        texts.sort();
        texts.truncate(max);
        texts
    }
}

impl Default for SingleDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline(parts: &[&str]) -> Outline {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut dict = SingleDictionary::new();
        dict.set(outline(&["KAT"]), "cat".to_string()).unwrap();
        assert_eq!(dict.get(&outline(&["KAT"])), Some("cat"));
        assert_eq!(dict.longest_key(), 1);
    }

    #[test]
    fn readonly_rejects_mutation() {
        let mut dict = SingleDictionary::new();
        dict.readonly = true;
        let err = dict.set(outline(&["KAT"]), "cat".to_string()).unwrap_err();
        assert_eq!(err, DictionaryError::ReadonlyViolation);
    }

    #[test]
    fn delete_recomputes_longest_key() {
        let mut dict = SingleDictionary::new();
        dict.set(outline(&["KAT"]), "cat".to_string()).unwrap();
        dict.set(outline(&["KAT", "HROG"]), "catalogue".to_string())
            .unwrap();
        assert_eq!(dict.longest_key(), 2);
        dict.delete(&outline(&["KAT", "HROG"])).unwrap();
        assert_eq!(dict.longest_key(), 1);
    }

    #[test]
    fn reverse_lookup_finds_all_keys_for_text() {
        let mut dict = SingleDictionary::new();
        dict.set(outline(&["A"]), "hello".to_string()).unwrap();
        dict.set(outline(&["B"]), "hello".to_string()).unwrap();
        let mut found: Vec<Outline> = dict.reverse_lookup("hello").into_iter().collect();
        found.sort();
        assert_eq!(found, vec![outline(&["A"]), outline(&["B"])]);
    }

    #[test]
    fn overwriting_a_key_updates_reverse_index() {
        let mut dict = SingleDictionary::new();
        dict.set(outline(&["KAT"]), "cat".to_string()).unwrap();
        dict.set(outline(&["KAT"]), "caterpillar".to_string())
            .unwrap();
        assert!(dict.reverse_lookup("cat").is_empty());
        assert_eq!(
            dict.reverse_lookup("caterpillar"),
            [outline(&["KAT"])].into_iter().collect()
        );
    }

    #[test]
    fn bulk_update_on_empty_dictionary_rebuilds_index() {
        let mut dict = SingleDictionary::new();
        dict.bulk_update(vec![
            (outline(&["KAT"]), "cat".to_string()),
            (outline(&["KAT", "HROG"]), "catalogue".to_string()),
        ])
        .unwrap();
        assert_eq!(dict.longest_key(), 2);
        assert_eq!(dict.get(&outline(&["KAT"])), Some("cat"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut dict = SingleDictionary::new();
        dict.set(outline(&["KAT"]), "cat".to_string()).unwrap();
        dict.clear();
        assert_eq!(dict.longest_key(), 0);
        assert!(dict.get(&outline(&["KAT"])).is_none());
    }

    #[test]
    fn similar_reverse_lookup_is_case_insensitive() {
        let mut dict = SingleDictionary::new();
        dict.set(outline(&["A"]), "Hello".to_string()).unwrap();
        assert_eq!(
            dict.similar_reverse_lookup("hello"),
            [outline(&["A"])].into_iter().collect()
        );
    }
}
