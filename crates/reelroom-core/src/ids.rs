//! Random entity identifier generation.
//!
//! All entity IDs are collision-resistant random strings (UUIDv4, simple
//! form). They are deliberately not time-ordered: creation order must come
//! from the stored `created_at` timestamp, never from comparing ID values.
//! Caller-supplied IDs (video registration, chat turns, upload slots) are
//! accepted verbatim alongside server-generated ones.

use uuid::Uuid;

/// Generate a new random entity identifier.
///
/// # Example
///
/// ```
/// use reelroom_core::ids::new_id;
///
/// let id = new_id();
/// assert_eq!(id.len(), 32);
/// ```
#[inline]
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Check that a caller-supplied entity ID is usable as a key segment.
///
/// IDs are embedded in `#`-delimited storage keys, so an ID carrying the
/// delimiter would change shape on the way through the key space. Empty
/// IDs are rejected for the same reason: the key would lose its segment.
pub fn validate_id(id: &str) -> crate::Result<()> {
    if id.is_empty() {
        return Err(crate::Error::InvalidInput("id must not be empty".to_string()));
    }
    if id.contains('#') {
        return Err(crate::Error::InvalidInput(format!(
            "id must not contain '#': {id}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_id_has_no_key_separator() {
        // IDs are embedded in PK/SK strings delimited by '#'.
        let id = new_id();
        assert!(!id.contains('#'));
    }

    #[test]
    fn test_generated_ids_always_validate() {
        assert!(validate_id(&new_id()).is_ok());
    }

    #[test]
    fn test_validate_rejects_delimiter_and_empty() {
        assert!(matches!(
            validate_id("a#b"),
            Err(crate::Error::InvalidInput(_))
        ));
        assert!(matches!(validate_id(""), Err(crate::Error::InvalidInput(_))));
        assert!(validate_id("plain-id_1").is_ok());
    }
}
