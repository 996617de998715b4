//! Token identifiers and their names.
//!
//! A [`TokenTable`] is read from the parser generator's token definitions, a
//! [`Registry`] is built from it once and then shared read-only by everything
//! that needs to classify nodes.

mod kind;
pub mod names;
mod registry;
mod table;

pub use kind::TokenKind;
pub use registry::Registry;
pub use table::{TableError, TokenTable};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A structural label does not end with [`names::CONTEXT_SUFFIX`].
    #[error("malformed structural label `{label}`: expected a `Context` suffix")]
    MalformedLabel { label: Box<str> },

    /// A canonical name is absent from the registry.
    #[error("unknown token name `{name}`")]
    UnknownTokenName { name: Box<str> },

    /// The same name was declared with two different values.
    #[error("token `{name}` is declared as both {first} and {second}")]
    DuplicateTokenName { name: Box<str>, first: TokenKind, second: TokenKind },

    /// A token was declared with a kind above [`TokenKind::MAX`].
    #[error("token `{name}` has kind {kind}, above the maximum of {max}", max = TokenKind::MAX)]
    KindOutOfRange { name: Box<str>, kind: TokenKind },
}
