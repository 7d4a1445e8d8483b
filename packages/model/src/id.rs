//! Opaque id tokens for document entities.

use uuid::Uuid;

/// Generate a fresh id with an entity prefix, e.g. `field-3f1a…`.
///
/// Ids are opaque strings; nothing in the model parses them back apart
/// from the prefix being handy in logs.
pub fn fresh_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = fresh_id("field");
        let b = fresh_id("field");
        assert_ne!(a, b);
        assert!(a.starts_with("field-"));
    }
}
