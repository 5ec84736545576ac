pub mod categories;
pub mod products;
pub mod themes;
pub mod topics;
