// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Container abstraction shared by every traversal.
//!
//! A [`Container`] is either an ordered sequence (integer-indexed) or a keyed
//! mapping (string-keyed, traversed in insertion order). The kind is chosen at
//! the API boundary, so each engine has exactly two concrete code paths and
//! never inspects values at runtime.

use indexmap::IndexMap;
use std::fmt;

/// Position of an element inside a [`Container`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl Key {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

/// The two container shapes an operation can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Sequence,
    Mapping,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Sequence => write!(f, "sequence"),
            Kind::Mapping => write!(f, "mapping"),
        }
    }
}

/// Ordered sequence or insertion-ordered mapping of elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Container<T> {
    Sequence(Vec<T>),
    Mapping(IndexMap<String, T>),
}

impl<T> Container<T> {
    /// Build a mapping from `(key, value)` pairs. A repeated key keeps its
    /// first position and takes the last value.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, T)>,
    {
        Container::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Container::Sequence(_) => Kind::Sequence,
            Container::Mapping(_) => Kind::Mapping,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Container::Sequence(items) => items.len(),
            Container::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in traversal order: `0..len` for sequences, insertion order for mappings.
    pub fn keys(&self) -> Vec<Key> {
        match self {
            Container::Sequence(items) => (0..items.len()).map(Key::Index).collect(),
            Container::Mapping(entries) => entries.keys().cloned().map(Key::Name).collect(),
        }
    }

    pub fn get(&self, key: &Key) -> Option<&T> {
        match (self, key) {
            (Container::Sequence(items), Key::Index(i)) => items.get(*i),
            (Container::Mapping(entries), Key::Name(name)) => entries.get(name),
            _ => None,
        }
    }

    /// Iterate `(key, &value)` pairs in traversal order.
    pub fn iter(&self) -> Entries<'_, T> {
        match self {
            Container::Sequence(items) => Entries::Sequence(items.iter().enumerate()),
            Container::Mapping(entries) => Entries::Mapping(entries.iter()),
        }
    }

    /// Consume the container into `(key, value)` pairs in traversal order.
    pub fn into_entries(self) -> Vec<(Key, T)> {
        match self {
            Container::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::Index(i), v))
                .collect(),
            Container::Mapping(entries) => entries
                .into_iter()
                .map(|(k, v)| (Key::Name(k), v))
                .collect(),
        }
    }

    /// A new, empty container of the same kind.
    pub fn empty_like<U>(&self) -> Container<U> {
        self.kind().empty()
    }

    /// Owned snapshot of kind and key order, detached from the element values.
    pub fn shape(&self) -> Shape {
        Shape {
            kind: self.kind(),
            keys: self.keys(),
        }
    }

    /// Add an element at the end of the traversal order.
    ///
    /// Sequences ignore the key and push, so filtered results stay dense.
    pub fn append(&mut self, key: Key, value: T) {
        match self {
            Container::Sequence(items) => items.push(value),
            Container::Mapping(entries) => {
                entries.insert(key.to_string(), value);
            }
        }
    }

    pub fn as_sequence(&self) -> Option<&[T]> {
        match self {
            Container::Sequence(items) => Some(items),
            Container::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, T>> {
        match self {
            Container::Sequence(_) => None,
            Container::Mapping(entries) => Some(entries),
        }
    }
}

impl Kind {
    pub fn empty<U>(self) -> Container<U> {
        match self {
            Kind::Sequence => Container::Sequence(Vec::new()),
            Kind::Mapping => Container::Mapping(IndexMap::new()),
        }
    }
}

impl<T> From<Vec<T>> for Container<T> {
    fn from(items: Vec<T>) -> Self {
        Container::Sequence(items)
    }
}

impl<T> From<IndexMap<String, T>> for Container<T> {
    fn from(entries: IndexMap<String, T>) -> Self {
        Container::Mapping(entries)
    }
}

impl<'a, T> IntoIterator for &'a Container<T> {
    type Item = (Key, &'a T);
    type IntoIter = Entries<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`Container`] in traversal order.
pub enum Entries<'a, T> {
    Sequence(std::iter::Enumerate<std::slice::Iter<'a, T>>),
    Mapping(indexmap::map::Iter<'a, String, T>),
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (Key, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Sequence(inner) => inner.next().map(|(i, v)| (Key::Index(i), v)),
            Entries::Mapping(inner) => inner.next().map(|(k, v)| (Key::Name(k.clone()), v)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Entries::Sequence(inner) => inner.size_hint(),
            Entries::Mapping(inner) => inner.size_hint(),
        }
    }
}

/// Kind and key order of a container, kept after the container itself is
/// no longer borrowed so asynchronous results can be rebuilt in the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: Kind,
    keys: Vec<Key>,
}

impl Shape {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Rebuild a container from values tagged with their traversal slot.
    ///
    /// Entries are placed in slot order regardless of the order they arrive in;
    /// slots with no entry are left out.
    pub fn assemble<U, I>(&self, slotted: I) -> Container<U>
    where
        I: IntoIterator<Item = (usize, U)>,
    {
        let mut slotted: Vec<(usize, U)> = slotted.into_iter().collect();
        slotted.sort_by_key(|(slot, _)| *slot);

        let mut result = self.kind.empty();
        for (slot, value) in slotted {
            if let Some(key) = self.keys.get(slot) {
                result.append(key.clone(), value);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_keys_are_index_range() {
        let c = Container::from(vec!["a", "b", "c"]);
        assert_eq!(c.kind(), Kind::Sequence);
        assert_eq!(c.keys(), vec![Key::Index(0), Key::Index(1), Key::Index(2)]);
    }

    #[test]
    fn test_mapping_keys_follow_insertion_order() {
        let c = Container::mapping([("z", 1), ("a", 2), ("m", 3)]);
        assert_eq!(c.kind(), Kind::Mapping);
        assert_eq!(c.keys(), vec![Key::from("z"), Key::from("a"), Key::from("m")]);
    }

    #[test]
    fn test_empty_like_preserves_kind() {
        let seq = Container::from(vec![1, 2]);
        let map = Container::mapping([("a", 1)]);

        let empty_seq: Container<String> = seq.empty_like();
        let empty_map: Container<String> = map.empty_like();

        assert_eq!(empty_seq, Container::Sequence(vec![]));
        assert_eq!(empty_map.kind(), Kind::Mapping);
        assert!(empty_map.is_empty());
    }

    #[test]
    fn test_get_rejects_mismatched_key_kind() {
        let seq = Container::from(vec![10, 20]);
        assert_eq!(seq.get(&Key::Index(1)), Some(&20));
        assert_eq!(seq.get(&Key::from("1")), None);

        let map = Container::mapping([("a", 1)]);
        assert_eq!(map.get(&Key::from("a")), Some(&1));
        assert_eq!(map.get(&Key::Index(0)), None);
    }

    #[test]
    fn test_append_compacts_sequences() {
        let mut c: Container<i32> = Kind::Sequence.empty();
        c.append(Key::Index(2), 3);
        c.append(Key::Index(5), 6);
        assert_eq!(c, Container::Sequence(vec![3, 6]));
    }

    #[test]
    fn test_shape_assemble_sorts_by_slot() {
        let shape = Container::mapping([("a", ()), ("b", ()), ("c", ())]).shape();
        let rebuilt = shape.assemble(vec![(2, "third"), (0, "first")]);

        let expected = Container::mapping([("a", "first"), ("c", "third")]);
        assert_eq!(rebuilt, expected);
        assert_eq!(rebuilt.keys(), vec![Key::from("a"), Key::from("c")]);
    }

    #[test]
    fn test_into_entries_keeps_order() {
        let c = Container::mapping([("b", 2), ("a", 1)]);
        assert_eq!(
            c.into_entries(),
            vec![(Key::from("b"), 2), (Key::from("a"), 1)]
        );
    }
}
