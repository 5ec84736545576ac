//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement writes open
//! their own transaction.

pub mod category_repo;
pub mod product_repo;
pub mod theme_repo;
pub mod topic_link_repo;
pub mod topic_repo;

pub use category_repo::CategoryRepo;
pub use product_repo::ProductRepo;
pub use theme_repo::ThemeRepo;
pub use topic_link_repo::TopicLinkRepo;
pub use topic_repo::TopicRepo;

/// Build a `LIKE` pattern matching `needle` anywhere, with `%`, `_` and `\`
/// in the needle escaped so they match literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("spo"), "%spo%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
