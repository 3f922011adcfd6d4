//! A priority-ordered stack of [`SingleDictionary`] instances, the unit the
//! translator actually looks things up against.

use std::collections::HashSet;

use super::{ListenerHandle, Outline, SingleDictionary};
use crate::error::CollectionError;

type FilterFn = Box<dyn Fn(&Outline, &str) -> bool>;

/// Ordered stack of dictionaries; index 0 is highest priority.
///
/// Forward lookup returns the first hit walking high to low priority.
/// Reverse lookup has to run the other way: lower-priority hits are only
/// real if nothing above overrides that key, which `reverse_lookup` below
/// implements by walking low to high and subtracting overrides as it goes.
pub struct DictionaryCollection {
    dicts: Vec<SingleDictionary>,
    filters: Vec<FilterFn>,
    longest_key: usize,
    listeners: Vec<Box<dyn Fn(usize)>>,
}

impl DictionaryCollection {
    pub fn new() -> Self {
        Self {
            dicts: Vec::new(),
            filters: Vec::new(),
            longest_key: 0,
            listeners: Vec::new(),
        }
    }

    pub fn longest_key(&self) -> usize {
        self.longest_key
    }

    pub fn add_listener(&mut self, callback: Box<dyn Fn(usize)>) {
        self.listeners.push(callback);
    }

    fn notify(&self) {
        for callback in &self.listeners {
            callback(self.longest_key);
        }
    }

    fn recompute_longest_key(&mut self) {
        let new_longest = self
            .dicts
            .iter()
            .filter(|d| d.enabled)
            .map(|d| d.longest_key())
            .max()
            .unwrap_or(0);
        if new_longest != self.longest_key {
            self.longest_key = new_longest;
            self.notify();
        }
    }

    /// Replace the dictionary stack, highest priority first, and
    /// re-aggregate `longest_key`.
    pub fn set_dicts(&mut self, dicts: Vec<SingleDictionary>) {
        self.dicts = dicts;
        self.recompute_longest_key();
    }

    pub fn add_filter(&mut self, filter: FilterFn) {
        self.filters.push(filter);
    }

    pub fn dicts(&self) -> &[SingleDictionary] {
        &self.dicts
    }

    pub fn dicts_mut(&mut self) -> &mut [SingleDictionary] {
        &mut self.dicts
    }

    /// Call after mutating a child dictionary directly (e.g. via
    /// `dicts_mut`) to re-aggregate `longest_key`.
    pub fn refresh_longest_key(&mut self) {
        self.recompute_longest_key();
    }

    /// First hit walking high to low priority among enabled dictionaries,
    /// unless a filter rejects it — a filter rejection stops the search
    /// entirely rather than falling through to a lower-priority hit.
    pub fn lookup(&self, key: &[String]) -> Option<&str> {
        for dict in self.dicts.iter().filter(|d| d.enabled) {
            if let Some(text) = dict.get(key) {
                let key_vec = key.to_vec();
                if self.filters.iter().any(|f| f(&key_vec, text)) {
                    return None;
                }
                return Some(text);
            }
        }
        None
    }

    /// Identical to [`Self::lookup`] but ignores filters.
    pub fn raw_lookup(&self, key: &[String]) -> Option<&str> {
        self.dicts
            .iter()
            .filter(|d| d.enabled)
            .find_map(|dict| dict.get(key))
    }

    /// Keys that actually produce `text` under current precedence: walk
    /// lowest to highest priority, and at each step drop any accumulated key
    /// that the current (higher-priority) dictionary also defines — those
    /// are overridden and unreachable — before adding this dictionary's own
    /// hits.
    pub fn reverse_lookup(&self, text: &str) -> HashSet<Outline> {
        let mut candidates: HashSet<Outline> = HashSet::new();
        for dict in self.dicts.iter().filter(|d| d.enabled).rev() {
            candidates.retain(|key| dict.get(key).is_none());
            candidates.extend(dict.reverse_lookup(text));
        }
        candidates
    }

    /// Reverse-lookup many candidate texts at once: sort case-insensitively,
    /// collapse consecutive duplicates, drop texts with no surviving keys,
    /// and cap the result at `max_count`.
    pub fn multi_reverse_lookup(
        &self,
        texts: &[String],
        max_count: usize,
    ) -> Vec<(String, HashSet<Outline>)> {
        let mut sorted: Vec<String> = texts.to_vec();
        sorted.sort_by_key(|t| t.to_lowercase());
        sorted.dedup();

        let mut results = Vec::new();
        for text in sorted {
            let keys = self.reverse_lookup(&text);
            if !keys.is_empty() {
                results.push((text, keys));
            }
            if results.len() >= max_count {
                break;
            }
        }
        results
    }

    /// Index of the first enabled, non-readonly dictionary.
    fn first_writable_index(&self) -> Option<usize> {
        self.dicts
            .iter()
            .position(|d| d.enabled && !d.readonly)
    }

    fn index_of_path(&self, path: &str) -> Option<usize> {
        self.dicts
            .iter()
            .position(|d| d.path.as_deref() == Some(path))
    }

    /// Look up a loaded dictionary by its path, highest priority first.
    pub fn get_by_path(&self, path: &str) -> Result<&SingleDictionary, CollectionError> {
        self.index_of_path(path)
            .map(|i| &self.dicts[i])
            .ok_or_else(|| CollectionError::UnknownDictionaryPath(path.to_string()))
    }

    /// Write into the dictionary named by `path`, or the highest-priority
    /// writable dictionary if `path` is absent.
    pub fn set(
        &mut self,
        key: Outline,
        text: String,
        path: Option<&str>,
    ) -> Result<(), CollectionError> {
        let index = match path {
            Some(p) => self
                .index_of_path(p)
                .ok_or_else(|| CollectionError::UnknownDictionaryPath(p.to_string()))?,
            None => self
                .first_writable_index()
                .ok_or(CollectionError::NoWritableDictionary)?,
        };
        let key_len = key.len();
        self.dicts[index].set(key, text)?;
        if key_len > self.longest_key {
            self.longest_key = key_len;
            self.notify();
        }
        Ok(())
    }
}

impl Default for DictionaryCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned when a caller wants to wire a collection to observe a
/// child's own longest-key listener. Not used by this crate internally (the
/// collection recomputes eagerly on `set_dicts`/`set`/`refresh_longest_key`)
/// but kept for embedders that mutate a [`SingleDictionary`] out from under
/// the collection and need one-way "child notifies parent" wiring, per the
/// cyclic-listener design note.
pub fn wire_child_listener(
    child: &mut SingleDictionary,
    on_change: Box<dyn Fn(usize)>,
) -> ListenerHandle {
    child.add_longest_key_listener(on_change)
}
