const WORDS: usize = (1 << 16) / 64;

/// Marker set over all 65536 syndrome values, one bit each.
/// Owned by a single table build or self-test run and dropped with it.
pub struct SyndromeSet {
    words: Box<[u64]>,
    len: usize,
}

impl SyndromeSet {
    pub fn new() -> Self {
        Self {
            words: vec![0u64; WORDS].into_boxed_slice(),
            len: 0,
        }
    }

    /// Marks `syndrome`. Returns false if it was already marked.
    #[inline]
    pub fn insert(&mut self, syndrome: u16) -> bool {
        let (word, mask) = Self::locate(syndrome);
        if self.words[word] & mask != 0 {
            return false;
        }
        self.words[word] |= mask;
        self.len += 1;
        true
    }

    #[inline]
    pub fn contains(&self, syndrome: u16) -> bool {
        let (word, mask) = Self::locate(syndrome);
        self.words[word] & mask != 0
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn locate(syndrome: u16) -> (usize, u64) {
        ((syndrome >> 6) as usize, 1u64 << (syndrome & 63))
    }
}

impl Default for SyndromeSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_contains_clear() {
        let mut set = SyndromeSet::new();
        assert!(set.insert(0));
        assert!(set.insert(0xffff));
        assert!(set.insert(64));
        assert!(!set.insert(64));
        assert!(set.contains(0xffff));
        assert!(!set.contains(63));
        assert_eq!(set.len(), 3);

        set.clear();
        assert_eq!(set.len(), 0);
        assert!(!set.contains(0xffff));
    }
}
