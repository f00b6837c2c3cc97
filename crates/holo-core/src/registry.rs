//! Read-only lookup tables keyed by string id.
//!
//! Entries are declared as `'static` slices so listing order matches
//! declaration order; a hash index over the ids is built lazily on first
//! lookup and never mutated afterwards.

use fnv::FnvHashMap;
use std::sync::OnceLock;

/// Anything stored in a [`Registry`] exposes its lookup id.
pub trait Keyed {
    fn key(&self) -> &str;
}

pub struct Registry<T: 'static> {
    entries: &'static [T],
    index: OnceLock<FnvHashMap<&'static str, usize>>,
}

impl<T: Keyed> Registry<T> {
    pub const fn new(entries: &'static [T]) -> Self {
        Self {
            entries,
            index: OnceLock::new(),
        }
    }

    fn index(&self) -> &FnvHashMap<&'static str, usize> {
        self.index.get_or_init(|| {
            let mut map = FnvHashMap::default();
            for (i, entry) in self.entries.iter().enumerate() {
                // First declaration wins if an id is ever repeated
                map.entry(entry.key()).or_insert(i);
            }
            map
        })
    }

    pub fn get(&self, key: &str) -> Option<&'static T> {
        let entries = self.entries;
        self.index().get(key).map(|&i| &entries[i])
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.index().contains_key(key)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'static, T> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.key())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of `key` in declaration order, used by hosts to cycle selections.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index().get(key).copied()
    }

    pub fn at(&self, position: usize) -> Option<&'static T> {
        self.entries.get(position)
    }
}
