use std::sync::LazyLock;

use regex::Regex;

use crate::model::ClassifiedLocation;

/// Five digits, optionally followed by a `-` or space and four more.
static ZIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(?:[- ][0-9]{4})?$").expect("zip pattern is valid"));

/// Segment starting with a state code that ends at a word boundary.
static STATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:{})\b", US_STATES.join("|"))).expect("state pattern is valid")
});

/// USPS abbreviations of the 50 states.
pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

/// Classify a raw location string.
///
/// A comma-free ZIP code wins over everything else; then exactly two
/// comma-separated segments whose second one opens with a known state code
/// as a whole word (`"WI"`, `"WI x"`, `"WI."`). Segments are trimmed, nothing
/// else is normalized.
pub fn classify(raw: &str) -> ClassifiedLocation {
    let segments: Vec<&str> = raw.split(',').map(str::trim).collect();

    match segments.as_slice() {
        [code] if ZIP_PATTERN.is_match(code) => {
            ClassifiedLocation::Zip { code: (*code).to_string() }
        }
        [city, state] if is_us_state(state) => ClassifiedLocation::Direct {
            city: (*city).to_string(),
            state: (*state).to_string(),
        },
        _ => ClassifiedLocation::Invalid { raw: raw.to_string() },
    }
}

/// Whether `segment` leads with a state code (case sensitive).
pub fn is_us_state(segment: &str) -> bool {
    STATE_PATTERN.is_match(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip(code: &str) -> ClassifiedLocation {
        ClassifiedLocation::Zip { code: code.into() }
    }

    fn invalid(raw: &str) -> ClassifiedLocation {
        ClassifiedLocation::Invalid { raw: raw.into() }
    }

    #[test]
    fn five_digit_zip() {
        assert_eq!(classify("12345"), zip("12345"));
        assert_eq!(classify("10001"), zip("10001"));
    }

    #[test]
    fn zip_plus_four() {
        assert_eq!(classify("12345-6789"), zip("12345-6789"));
        assert_eq!(classify("12345 6789"), zip("12345 6789"));
    }

    #[test]
    fn zip_is_trimmed() {
        assert_eq!(classify("  53703 "), zip("53703"));
    }

    #[test]
    fn malformed_zips_are_invalid() {
        for raw in ["1000", "123456", "1234a", "12345-678", "12345--6789", "12345_6789", ""] {
            assert_eq!(classify(raw), invalid(raw), "{raw:?} must be invalid");
        }
    }

    #[test]
    fn non_ascii_digits_are_not_a_zip() {
        assert_eq!(classify("١٢٣٤٥"), invalid("١٢٣٤٥"));
    }

    #[test]
    fn zip_with_comma_is_not_a_zip() {
        assert_eq!(classify("12345,"), invalid("12345,"));
        assert_eq!(classify("12345, 67890"), invalid("12345, 67890"));
    }

    #[test]
    fn city_state_pair() {
        assert_eq!(
            classify("Madison, WI"),
            ClassifiedLocation::Direct { city: "Madison".into(), state: "WI".into() }
        );
        assert_eq!(
            classify("  New York ,NY  "),
            ClassifiedLocation::Direct { city: "New York".into(), state: "NY".into() }
        );
    }

    #[test]
    fn every_state_code_is_accepted() {
        for state in US_STATES {
            let raw = format!("Springfield, {state}");
            assert!(
                matches!(classify(&raw), ClassifiedLocation::Direct { .. }),
                "{raw} should be a direct location"
            );
        }
    }

    #[test]
    fn state_must_lead_as_whole_word() {
        for raw in ["Madison, Wi", "Madison, wi", "Madison, WIS", "Madison, WI2", "Madison, DC", "Madison, x WI"] {
            assert_eq!(classify(raw), invalid(raw), "{raw:?} must be invalid");
        }
    }

    #[test]
    fn state_followed_by_other_text_is_accepted() {
        assert_eq!(
            classify("Madison, WI x"),
            ClassifiedLocation::Direct { city: "Madison".into(), state: "WI x".into() }
        );
        assert_eq!(
            classify("Madison, WI."),
            ClassifiedLocation::Direct { city: "Madison".into(), state: "WI.".into() }
        );
    }

    #[test]
    fn wrong_segment_count_is_invalid() {
        for raw in ["Madison", "Three, Words, Invalid", "Madison, WI, US"] {
            assert_eq!(classify(raw), invalid(raw), "{raw:?} must be invalid");
        }
    }

    #[test]
    fn invalid_keeps_raw_untrimmed() {
        assert_eq!(classify(" bogus "), invalid(" bogus "));
    }
}
