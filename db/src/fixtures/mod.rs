//! Test fixtures for engine and command tests.
//!
//! Fixtures are loaded at compile time using `include_str!`.
//!
//! ## Available Fixtures
//!
//! - [`BLOG`] - Posts, users and comments related by naming convention
//! - [`AUTHORED`] - Posts with `author_id` and `fan_ids`, which need overrides
//! - [`OVERRIDES`] - Relationship overrides matching [`AUTHORED`]
//!
//! ## Usage
//!
//! ```ignore
//! use db::fixtures;
//! use db::test_utils::load_store;
//!
//! let store = load_store(fixtures::BLOG);
//! ```

/// Blog data linked by convention.
///
/// Contains:
/// - 2 posts, each with a `user_id`
/// - 2 users
/// - 2 comments, both on post 1 via `post_id`
///
/// Use for: lookup, list, count, one-to-many and many-to-one traversal
pub const BLOG: &str = include_str!("blog.json");

/// Blog data whose relationships do not follow the naming convention.
///
/// Contains:
/// - 3 posts with `author_id` (many-to-one) and `fan_ids` (many-to-many)
/// - 3 users
///
/// Use with [`OVERRIDES`] for: override naming, many-to-many traversal
pub const AUTHORED: &str = include_str!("authored.json");

/// Overrides for [`AUTHORED`]: `Author`/`AuthoredPosts` and `Fans`/`Favorited`.
pub const OVERRIDES: &str = include_str!("overrides.json");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverrideConfig;
    use crate::store::RecordStore;

    #[test]
    fn test_blog_loads() {
        let store = RecordStore::from_json_str(BLOG).expect("BLOG should load");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_authored_loads() {
        let store = RecordStore::from_json_str(AUTHORED).expect("AUTHORED should load");
        assert_eq!(store.collection("users").map(|u| u.len()), Some(3));
    }

    #[test]
    fn test_overrides_parse() {
        let overrides: OverrideConfig =
            serde_json::from_str(OVERRIDES).expect("OVERRIDES should be valid");
        assert!(overrides.get("posts", "fan_ids").is_some());
    }
}
