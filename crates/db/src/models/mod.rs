//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Query-specification structs listing the optional read predicates

pub mod category;
pub mod product;
pub mod status;
pub mod theme;
pub mod topic;
pub mod validation;
