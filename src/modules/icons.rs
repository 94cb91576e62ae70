//! Icon resolver — name to marker glyph lookup
//!
//! Best-effort representative markers for node names, matched by lowercase
//! substring against an ordered catalog. The catalog is a slice, not a map:
//! first match in catalog order wins, and that order is part of the
//! observable contract ("North Germany" picks whichever of its matching keys
//! comes first).

/// Marker used when no catalog key matches.
pub const DEFAULT_MARKER: &str = "●";

/// (key, marker) pairs, scanned in order. Keys are lowercase.
pub const CATALOG: &[(&str, &str)] = &[
    // Regions
    //   ("world", "🌐"),
    ("asia", "⛩"),
    ("europe", "🏛"),
    ("africa", "🦁"),
    // Countries
    ("china", "🏮"),
    ("india", "🛕"),
    ("germany", "🍺"),
    ("france", "🥖"),
    ("nigeria", "🌍"),
    ("egypt", "🏺"),
    // Cities
    ("beijing", "🏯"),
    ("shanghai", "🌃"),
    ("delhi", "🕌"),
    ("mumbai", "🌇"),
    ("paris", "🗼"),
    ("berlin", "🐻"),
];

/// Resolve a display name to its marker, or the default marker if no
/// catalog key is a substring of the lowercased name.
pub fn resolve(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    CATALOG
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, marker)| *marker)
        .unwrap_or(DEFAULT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_for(key: &str) -> &'static str {
        CATALOG.iter().find(|(k, _)| *k == key).unwrap().1
    }

    #[test]
    fn test_exact_name_matches() {
        assert_eq!(resolve("France"), marker_for("france"));
        assert_eq!(resolve("BEIJING"), marker_for("beijing"));
    }

    #[test]
    fn test_substring_matches() {
        assert_eq!(resolve("North Germany"), marker_for("germany"));
        assert_eq!(resolve("Greater Mumbai Region"), marker_for("mumbai"));
    }

    #[test]
    fn test_first_match_in_catalog_order_wins() {
        // Both "france" and "paris" are substrings; "france" is listed first.
        assert_eq!(resolve("Paris, France"), marker_for("france"));
        assert_ne!(resolve("Paris, France"), DEFAULT_MARKER);
    }

    #[test]
    fn test_no_match_falls_back_to_default() {
        assert_eq!(resolve("Atlantis"), DEFAULT_MARKER);
        assert_eq!(resolve(""), DEFAULT_MARKER);
    }

    #[test]
    fn test_catalog_insertion_order_is_stable() {
        let keys: Vec<&str> = CATALOG.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            [
                "asia", "europe", "africa", "china", "india", "germany", "france", "nigeria",
                "egypt", "beijing", "shanghai", "delhi", "mumbai", "paris", "berlin"
            ]
        );
    }
}
