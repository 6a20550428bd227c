// Splits a `label: value` line from netsh verbose output

/// Find the label/value split in a line.
///
/// A space or a colon counts as a separator character. The line is split at the
/// first point where two separators occur back to back, which matches both
/// `"Metric:  256"` (colon then space) and `"SitePrefixLength   0"` (plain spaces).
/// The character that completes the pair belongs to neither half, and both halves
/// are trimmed. Returns `None` when no such pair exists.
pub fn classify(line: &str) -> Option<(&str, &str)> {
    let mut run = 0;

    for (index, c) in line.char_indices() {
        if c == ' ' || c == ':' {
            run += 1;
        } else {
            run = 0;
        }

        if run >= 2 {
            // `c` is a single-byte separator
            return Some((line[..index].trim(), line[index + 1..].trim()));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Destination Prefix:  2001:db8::/32", "Destination Prefix:", "2001:db8::/32")]
    #[case("Destination Prefix: ::/0", "Destination Prefix:", "::/0")]
    #[case("Gateway/Interface Name: fe80::1", "Gateway/Interface Name:", "fe80::1")]
    #[case("Interface Index:                5", "Interface Index:", "5")]
    #[case("Publish:   Yes", "Publish:", "Yes")]
    #[case("SitePrefixLength   42", "SitePrefixLength", "42")]
    #[case("SitePrefixLength  0", "SitePrefixLength", "0")]
    #[case("ValidLifeTime        infinite", "ValidLifeTime", "infinite")]
    #[case("PreferredLifeTime   2h59m58s  ", "PreferredLifeTime", "2h59m58s")]
    fn test_classify_splits_label_and_value(
        #[case] line: &str,
        #[case] label: &str,
        #[case] value: &str,
    ) {
        assert_eq!(classify(line), Some((label, value)));
    }

    #[rstest]
    #[case("")]
    #[case("Destination")]
    #[case("Type Manual")]
    #[case("a:b c:d e")]
    #[case("---------------------------")]
    fn test_classify_no_match(#[case] line: &str) {
        assert_eq!(classify(line), None);
    }

    #[test]
    fn test_classify_first_split_wins() {
        // The value's own "::" must not move the split point
        assert_eq!(
            classify("Source Prefix:  ::/0"),
            Some(("Source Prefix:", "::/0"))
        );
        assert_eq!(classify("a  b  c"), Some(("a", "b  c")));
    }

    #[test]
    fn test_classify_split_character_is_dropped() {
        // The second separator is consumed; everything after it is the value
        assert_eq!(classify("x::y"), Some(("x:", "y")));
        assert_eq!(classify("key ::value"), Some(("key", ":value")));
    }

    #[test]
    fn test_classify_blank_line() {
        assert_eq!(classify("    "), Some(("", "")));
        assert_eq!(classify(" "), None);
    }

    #[test]
    fn test_classify_non_ascii_value() {
        assert_eq!(
            classify("Gateway/Interface Name:  Ethernet Zwölf"),
            Some(("Gateway/Interface Name:", "Ethernet Zwölf"))
        );
    }
}
