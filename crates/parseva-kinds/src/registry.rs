use std::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

use crate::{Error, TokenKind, TokenTable};

type FxIndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Bidirectional mapping between token names and token kinds.
///
/// Built once from a [`TokenTable`] and immutable afterwards, so a single
/// registry can be shared by reference between threads flattening different
/// trees.
#[derive(Debug, Default)]
pub struct Registry {
    by_name: FxIndexMap<Box<str>, TokenKind>,
    /// Indexed by kind; the first name declared for a kind wins.
    names: Vec<Option<Box<str>>>,
}

impl Registry {
    pub fn build(table: &TokenTable) -> Result<Self, Error> {
        let mut by_name = FxIndexMap::default();

        for (name, kind) in table.iter() {
            if kind > TokenKind::MAX {
                return Err(Error::KindOutOfRange { name: name.into(), kind });
            }
            match by_name.get(name) {
                Some(&first) if first != kind => {
                    return Err(Error::DuplicateTokenName { name: name.into(), first, second: kind });
                }
                Some(_) => {}
                None => {
                    by_name.insert(Box::from(name), kind);
                }
            }
        }

        let len = by_name.values().filter_map(|kind| kind.slot()).max().map_or(0, |max| max + 1);
        let mut names = vec![None; len];
        for (name, kind) in &by_name {
            if let Some(slot) = kind.slot() {
                names[slot].get_or_insert_with(|| name.clone());
            }
        }

        Ok(Self { by_name, names })
    }

    /// Looks up the kind registered for `name`.
    pub fn resolve(&self, name: &str) -> Result<TokenKind, Error> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownTokenName { name: name.into() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The first name declared for `kind`.
    pub fn name(&self, kind: TokenKind) -> Option<&str> {
        self.names.get(kind.slot()?)?.as_deref()
    }

    /// Registered names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenKind)> {
        self.by_name.iter().map(|(name, kind)| (&**name, *kind))
    }

    /// Kinds that have a name, in ascending order.
    pub fn kinds(&self) -> impl Iterator<Item = (TokenKind, &str)> {
        self.names.iter().enumerate().filter_map(|(slot, name)| {
            Some((TokenKind::new(slot as i32), name.as_deref()?))
        })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
