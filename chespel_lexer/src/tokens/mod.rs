//! Token model for the Chespel rule language
//!
//! - [`TokenKind`] is the closed set of categories, each with its
//!   `(is_prefix, is_full)` predicate pair
//! - [`Token`] pairs a category with the exact text it was scanned from
//! - [`vocabulary`] holds the fixed word lists behind exact-match categories

pub mod kind;
pub mod token;
pub mod vocabulary;

pub use kind::TokenKind;
pub use token::{reassemble, Token};
pub use vocabulary::ModuleName;
