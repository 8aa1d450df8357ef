//! Exact byte-pattern search
//!
//! Boyer-Moore with the bad-character rule only. CSB files can be several
//! megabytes and the `Collision` marker may sit anywhere, so a naive scan is
//! avoided.

/// A preprocessed search pattern.
#[derive(Debug, Clone)]
pub struct BoyerMoore {
    pattern: Vec<u8>,
    /// Last index of each byte value in the pattern
    last_occurrence: [Option<usize>; 256],
}

impl BoyerMoore {
    /// Preprocess `pattern` into a last-occurrence table.
    #[must_use]
    pub fn new(pattern: &[u8]) -> Self {
        let mut last_occurrence = [None; 256];
        for (i, &byte) in pattern.iter().enumerate() {
            last_occurrence[byte as usize] = Some(i);
        }

        Self {
            pattern: pattern.to_vec(),
            last_occurrence,
        }
    }

    /// The pattern being searched for.
    #[must_use]
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Find the offset of the first occurrence of the pattern in `haystack`.
    ///
    /// An empty pattern matches at offset 0.
    #[must_use]
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        let m = self.pattern.len();
        if m == 0 {
            return Some(0);
        }
        if m > haystack.len() {
            return None;
        }

        let mut shift = 0;
        while shift <= haystack.len() - m {
            // Compare right to left; `j` is one past the mismatching index
            let mut j = m;
            while j > 0 && self.pattern[j - 1] == haystack[shift + j - 1] {
                j -= 1;
            }

            if j == 0 {
                return Some(shift);
            }

            let mismatch = j - 1;
            shift += match self.last_occurrence[haystack[shift + mismatch] as usize] {
                Some(last) if last < mismatch => mismatch - last,
                Some(_) => 1,
                None => mismatch + 1,
            };
        }

        None
    }
}

/// Convenience wrapper for a one-off search.
#[must_use]
pub fn find_bytes(haystack: &[u8], pattern: &[u8]) -> Option<usize> {
    BoyerMoore::new(pattern).find(haystack)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &[u8] = b"Collision";

    fn planted(len: usize, at: usize) -> Vec<u8> {
        let mut data: Vec<u8> = (0..len).map(|i| (i % 7) as u8 + b'a').collect();
        data[at..at + MARKER.len()].copy_from_slice(MARKER);
        data
    }

    #[test]
    fn test_finds_planted_marker() {
        let search = BoyerMoore::new(MARKER);
        for len in [9, 10, 64, 1000, 65_536] {
            for at in [0, (len - MARKER.len()) / 2, len - MARKER.len()] {
                let data = planted(len, at);
                assert_eq!(search.find(&data), Some(at), "len {len}, planted at {at}");
            }
        }
    }

    #[test]
    fn test_returns_first_occurrence() {
        let mut data = planted(200, 150);
        data[20..20 + MARKER.len()].copy_from_slice(MARKER);
        assert_eq!(find_bytes(&data, MARKER), Some(20));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(find_bytes(b"Collisio", MARKER), None);
        assert_eq!(find_bytes(b"", MARKER), None);
        assert_eq!(find_bytes(b"collision Collisionn", b"Collisionx"), None);
        // Partial marker at the tail
        assert_eq!(find_bytes(b"xxxxxxxxCollisio", MARKER), None);
    }

    #[test]
    fn test_overlapping_prefix() {
        assert_eq!(find_bytes(b"aaaab", b"aab"), Some(2));
        assert_eq!(find_bytes(b"CollCollision", MARKER), Some(4));
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(find_bytes(b"abc", b""), Some(0));
    }
}
