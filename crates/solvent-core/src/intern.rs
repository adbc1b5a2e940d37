//! Interning tables.
//!
//! The arena uses an [`InternTable`] for symbol names so every distinct name
//! maps to a single [`SymbolId`](crate::SymbolId).

use hashbrown::HashMap;
use std::hash::Hash;

/// A generic interning table mapping values to dense `u32` ids.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    map: HashMap<T, u32>,
    values: Vec<T>,
}

impl<T: Clone + Eq + Hash> Default for InternTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> InternTable<T> {
    /// Creates a new empty interning table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            values: Vec::new(),
        }
    }

    /// Interns a value, returning its id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct values are interned.
    #[allow(clippy::cast_possible_truncation)]
    pub fn intern(&mut self, value: T) -> u32 {
        if let Some(&id) = self.map.get(&value) {
            return id;
        }

        assert!(self.values.len() < u32::MAX as usize, "intern table capacity exceeded");
        let id = self.values.len() as u32;
        self.map.insert(value.clone(), id);
        self.values.push(value);
        id
    }

    /// Gets a value by its id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&T> {
        self.values.get(id as usize)
    }

    /// Gets the id of a value, if it has been interned.
    #[must_use]
    pub fn get_id(&self, value: &T) -> Option<u32> {
        self.map.get(value).copied()
    }

    /// Returns the number of interned values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
