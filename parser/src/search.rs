/// The byte sequence that ends an HTTP header block.
pub const TERMINATOR: &[u8; 4] = b"\r\n\r\n";

const PRIME: u32 = 101;
const BASE: u32 = 256;

fn hash(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0, |acc, &byte| (acc * BASE + u32::from(byte)) % PRIME)
}

/// Rabin-Karp search for `needle` in `haystack`.
///
/// Returns the index one past the end of the leftmost occurrence, or `None`
/// when there is no occurrence. An empty needle, or one longer than the
/// haystack, never matches.
pub fn search(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let k = needle.len();
    if k == 0 || k > haystack.len() {
        return None;
    }
    let last = haystack.len() - k;

    // BASE^(k-1), weight of the byte leaving the window
    let leading_weight = (1..k).fold(1, |acc, _| acc * BASE % PRIME);

    let needle_hash = hash(needle);
    let mut window_hash = hash(&haystack[..k]);

    for i in 0..=last {
        if window_hash == needle_hash && &haystack[i..i + k] == needle {
            return Some(i + k);
        }

        if i < last {
            let outgoing = u32::from(haystack[i]) * leading_weight % PRIME;
            window_hash =
                ((window_hash + PRIME - outgoing) * BASE + u32::from(haystack[i + k])) % PRIME;
        }
    }

    None
}

/// Searches a stream that arrives as consecutive windows.
///
/// Keeps the last `needle.len() - 1` bytes seen so an occurrence split
/// across two windows is still found. Only the seam and the new window are
/// scanned on each call, never the bytes already searched.
#[derive(Debug, Clone)]
pub struct SeamSearch<'n> {
    needle: &'n [u8],
    tail: Vec<u8>,
}

impl<'n> SeamSearch<'n> {
    pub fn new(needle: &'n [u8]) -> Self {
        Self {
            needle,
            tail: Vec::with_capacity(needle.len().saturating_sub(1)),
        }
    }

    pub fn needle(&self) -> &'n [u8] {
        self.needle
    }

    /// Searches the next window.
    ///
    /// The returned index is relative to `window`. A hit that started in a
    /// previous window ends inside `1..needle.len()`.
    pub fn feed(&mut self, window: &[u8]) -> Option<usize> {
        let keep = self.needle.len().checked_sub(1)?;

        if !self.tail.is_empty() {
            let head = &window[..window.len().min(keep)];
            let mut probe = Vec::with_capacity(self.tail.len() + head.len());
            probe.extend_from_slice(&self.tail);
            probe.extend_from_slice(head);

            if let Some(end) = search(&probe, self.needle) {
                return Some(end - self.tail.len());
            }
        }

        if let Some(end) = search(window, self.needle) {
            return Some(end);
        }

        self.tail.extend_from_slice(window);
        if self.tail.len() > keep {
            self.tail.drain(..self.tail.len() - keep);
        }
        None
    }

    pub fn reset(&mut self) {
        self.tail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_finds_terminator() {
        let input = b"GET / HTTP/1.0\r\nHost: x\r\n\r\nbody";
        assert_eq!(search(input, TERMINATOR), Some(27));
    }

    #[test]
    fn test_search_leftmost_match_wins() {
        assert_eq!(search(b"abcabc", b"abc"), Some(3));
        assert_eq!(search(b"xxabcabc", b"bc"), Some(5));
    }

    #[test]
    fn test_search_needle_longer_than_haystack() {
        assert_eq!(search(b"\r\n", TERMINATOR), None);
    }

    #[test]
    fn test_search_empty_needle() {
        assert_eq!(search(b"anything", b""), None);
    }

    #[test]
    fn test_search_match_at_very_end() {
        assert_eq!(search(b"abcd\r\n\r\n", TERMINATOR), Some(8));
    }

    #[test]
    fn test_search_exact_length() {
        assert_eq!(search(TERMINATOR, TERMINATOR), Some(4));
    }

    #[test]
    fn test_search_hash_collision_is_rejected() {
        // with modulus 101 many four byte windows share a hash; every hit must be verified
        let needle = [0u8, 0, 0, 101];
        let haystack = [0u8, 0, 0, 0, 0, 0, 0];
        assert_eq!(search(&haystack, &needle), None);
    }

    #[test]
    fn test_seam_search_split_terminator() {
        let mut seam = SeamSearch::new(TERMINATOR);
        assert_eq!(seam.feed(b"GET / HTTP/1.0\r\n\r"), None);
        assert_eq!(seam.feed(b"\nrest"), Some(1));
    }

    #[test]
    fn test_seam_search_byte_by_byte() {
        let mut seam = SeamSearch::new(TERMINATOR);
        assert_eq!(seam.feed(b"\r"), None);
        assert_eq!(seam.feed(b"\n"), None);
        assert_eq!(seam.feed(b"\r"), None);
        assert_eq!(seam.feed(b"\n"), Some(1));
    }

    #[test]
    fn test_seam_search_reset_forgets_tail() {
        let mut seam = SeamSearch::new(TERMINATOR);
        assert_eq!(seam.feed(b"ab\r\n\r"), None);
        seam.reset();
        assert_eq!(seam.feed(b"\nab"), None);
    }
}
