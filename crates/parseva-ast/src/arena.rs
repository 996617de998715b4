use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

pub struct Key<T>(u32, PhantomData<T>);

impl<T> std::fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl<T> std::hash::Hash for Key<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Key<T> {}

impl<T> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> Key<T> {
    pub fn new(index: u32) -> Self {
        Self(index, PhantomData)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl<T> From<u32> for Key<T> {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

/// A run of consecutively allocated keys.
pub struct Range<T> {
    pub start: Key<T>,
    pub end: Key<T>,
}

impl<T> std::fmt::Debug for Range<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Range({}..{})", self.start.0, self.end.0)
    }
}

impl<T> std::hash::Hash for Range<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl<T> Copy for Range<T> {}

impl<T> PartialEq for Range<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<T> Eq for Range<T> {}

impl<T> Clone for Range<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Range<T> {
    pub const EMPTY: Self = Self { start: Key(0, PhantomData), end: Key(0, PhantomData) };

    pub fn new(start: Key<T>, end: Key<T>) -> Self {
        Self { start, end }
    }

    pub fn single(key: Key<T>) -> Self {
        Self { start: key, end: Key::new(key.index() + 1) }
    }

    pub fn len(self) -> usize {
        self.end.0.saturating_sub(self.start.0) as usize
    }

    pub fn is_empty(self) -> bool {
        self.start.0 >= self.end.0
    }

    pub fn iter(self) -> impl DoubleEndedIterator<Item = Key<T>> + ExactSizeIterator {
        (self.start.0..self.end.0).map(Key::new)
    }

    /// Removes and returns the first key.
    pub fn pop_front(&mut self) -> Option<Key<T>> {
        if self.is_empty() {
            return None;
        }
        let first = self.start;
        self.start = Key::new(first.0 + 1);
        Some(first)
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { items: Default::default() }
    }
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn alloc(&mut self, value: T) -> Key<T> {
        let idx = self.next_key();
        self.items.push(value);
        idx
    }

    /// The key the next `alloc` will return.
    pub(crate) fn next_key(&self) -> Key<T> {
        Key::new(self.items.len().try_into().expect("arena overflow"))
    }

    pub(crate) fn iter_enumerated(&self) -> impl DoubleEndedIterator<Item = (Key<T>, &T)> {
        self.items.iter().enumerate().map(|(i, item)| (Key::new(i as u32), item))
    }

    #[allow(clippy::len_without_is_empty)]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Index<Key<T>> for Arena<T> {
    type Output = T;
    fn index(&self, index: Key<T>) -> &Self::Output {
        &self.items[index.index() as usize]
    }
}

impl<T> IndexMut<Key<T>> for Arena<T> {
    fn index_mut(&mut self, index: Key<T>) -> &mut Self::Output {
        &mut self.items[index.index() as usize]
    }
}

impl<T> Index<Range<T>> for Arena<T> {
    type Output = [T];

    fn index(&self, range: Range<T>) -> &Self::Output {
        let start = range.start.index() as usize;
        let end = range.end.index() as usize;
        &self.items[start..end]
    }
}
