//! Pure domain rules for the topic and product catalog.
//!
//! Nothing in this crate performs I/O. The database and HTTP crates build on
//! these types so the rules can be unit-tested in isolation.

pub mod error;
pub mod i18n;
pub mod lang;
pub mod naming;
pub mod pagination;
pub mod types;
