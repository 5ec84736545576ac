//! Request extractors shared by handlers.
//!
//! - [`lang::RequestLang`] -- Language for user-visible messages.

pub mod lang;
