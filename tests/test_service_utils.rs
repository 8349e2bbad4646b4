// cargo test --test test_service_utils

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use collab_lib::services::utils::{get_current_timestamp, to_canonical_json};
    use std::collections::BTreeMap;

    #[test]
    fn test_get_current_timestamp_format() {
        let timestamp = get_current_timestamp();
        println!("Current Timestamp: {}", timestamp);

        // ISO 8601 in UTC mit Mikrosekunden-Präzision und Z-Suffix.
        assert!(timestamp.ends_with('Z'));
        let fractional = timestamp.split('.').nth(1).expect("timestamp must carry fractional seconds");
        assert_eq!(fractional.len(), 7, "six fractional digits plus the Z suffix");

        let parsed = DateTime::parse_from_rfc3339(&timestamp)
            .map(|dt| dt.with_timezone(&Utc));
        assert!(parsed.is_ok(), "timestamp must parse as RFC 3339: {:?}", parsed.err());
    }

    #[test]
    fn test_canonical_json_is_deterministic() {
        // Gleicher logischer Inhalt → identischer kanonischer String,
        // unabhängig von der Einfügereihenfolge.
        let mut first = BTreeMap::new();
        first.insert("zeta", 1u32);
        first.insert("alpha", 2u32);

        let mut second = BTreeMap::new();
        second.insert("alpha", 2u32);
        second.insert("zeta", 1u32);

        let canonical_first = to_canonical_json(&first).unwrap();
        let canonical_second = to_canonical_json(&second).unwrap();
        assert_eq!(canonical_first, canonical_second);
        assert!(!canonical_first.contains(' '), "canonical form carries no extra whitespace");
        println!("SUCCESS: Canonical JSON is order-independent and compact.");
    }
}
