/// 256-bit membership table used for character classes and delimiter sets.
///
/// Matching is byte oriented, so a flat bitmap gives O(1) tests with no
/// hashing and a 32-byte footprint that is cheap to copy into a match call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CharBitmap {
    bits: [u64; 4],
}

impl CharBitmap {
    pub const fn empty() -> Self {
        CharBitmap { bits: [0; 4] }
    }

    #[inline(always)]
    pub fn insert(&mut self, byte: u8) {
        self.bits[(byte >> 6) as usize] |= 1u64 << (byte & 63);
    }

    pub fn insert_range(&mut self, lo: u8, hi: u8) {
        for b in lo..=hi {
            self.insert(b);
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.insert(b);
        }
    }

    pub fn union_with(&mut self, other: &CharBitmap) {
        for i in 0..4 {
            self.bits[i] |= other.bits[i];
        }
    }

    #[inline(always)]
    pub fn contains(&self, byte: u8) -> bool {
        self.bits[(byte >> 6) as usize] & (1u64 << (byte & 63)) != 0
    }

    /// Add the opposite-case letter for every ASCII letter already present.
    pub fn fold_case(&mut self) {
        for b in b'a'..=b'z' {
            if self.contains(b) {
                self.insert(b - 32);
            }
        }
        for b in b'A'..=b'Z' {
            if self.contains(b) {
                self.insert(b + 32);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }
}
