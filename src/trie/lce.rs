//! Longest common extension by direct comparison

/// Length of the common prefix of the suffixes starting at `i` and `j`,
/// capped at `limit`.
///
/// Compares byte by byte until a mismatch, until either suffix ends or until
/// `limit` bytes matched. Costs O(min(result, limit)) and is only used where
/// block fingerprints diverge.
///
/// # Panics
/// Panics if `i` or `j` is not a valid suffix start.
pub fn lce(text: &[u8], i: usize, j: usize, limit: usize) -> usize {
    assert!(
        i < text.len() && j < text.len(),
        "LCE positions ({}, {}) out of range for text of length {}",
        i,
        j,
        text.len()
    );
    text[i..]
        .iter()
        .zip(&text[j..])
        .take(limit)
        .take_while(|(a, b)| a == b)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lce() {
        let text = b"banana$";
        assert_eq!(lce(text, 1, 3, usize::MAX), 3); // "anana$" vs "ana$"
        assert_eq!(lce(text, 2, 4, usize::MAX), 2); // "nana$" vs "na$"
        assert_eq!(lce(text, 0, 1, usize::MAX), 0);
        assert_eq!(lce(text, 6, 6, usize::MAX), 1);
        assert_eq!(lce(text, 3, 3, usize::MAX), 4);
    }

    #[test]
    fn test_lce_stops_at_shorter_suffix() {
        let text = b"aaaa";
        assert_eq!(lce(text, 0, 2, 10), 2);
    }

    #[test]
    fn test_lce_stops_at_limit() {
        let text = b"abababababab$";
        assert_eq!(lce(text, 0, 2, usize::MAX), 10);
        assert_eq!(lce(text, 0, 2, 4), 4);
        assert_eq!(lce(text, 0, 2, 0), 0);
        // A mismatch before the limit still ends the scan
        assert_eq!(lce(text, 0, 1, 4), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_lce_out_of_range() {
        lce(b"abc$", 1, 4, 1);
    }
}
