//! Call identifier generation.

use uuid::Uuid;

/// Generates a time-ordered identifier for one dispatched call.
///
/// UUID v7 sorts by creation time, so call ids read in dispatch order
/// when they show up in logs.
#[must_use]
pub fn generate_call_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_call_id_format() {
        let id = generate_call_id();
        assert_eq!(id.len(), 36);
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 7);
    }

    #[test]
    fn test_call_id_uniqueness() {
        assert_ne!(generate_call_id(), generate_call_id());
    }
}
