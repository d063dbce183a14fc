//! One bit per leaf index (1 = claimed, 0 = not claimed).
//!
//! The free functions work on a borrowed byte slice so the on-chain bitmap
//! account, whose size is fixed at creation, can share them. [`ClaimBitmap`]
//! is the growable owned form used off-chain.

/// Number of bytes needed to hold `bits` bits.
pub const fn bytes_for(bits: u64) -> usize {
    bits.div_ceil(8) as usize
}

fn locate(index: u64) -> (usize, u8) {
    ((index / 8) as usize, 1u8 << (index % 8))
}

/// Indices past the end of the slice read as unclaimed.
pub fn is_set(bits: &[u8], index: u64) -> bool {
    let (byte_index, mask) = locate(index);
    bits.get(byte_index).is_some_and(|byte| byte & mask != 0)
}

/// Sets the bit for `index`. Returns `false` when the slice is too short.
pub fn try_set(bits: &mut [u8], index: u64) -> bool {
    let (byte_index, mask) = locate(index);
    match bits.get_mut(byte_index) {
        Some(byte) => {
            *byte |= mask;
            true
        }
        None => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimBitmap {
    claimed: Vec<u8>,
}

impl ClaimBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, index: u64) -> bool {
        is_set(&self.claimed, index)
    }

    /// Marks `index` as claimed, growing the bitmap when needed.
    pub fn set_claimed(&mut self, index: u64) {
        let (byte_index, _) = locate(index);
        if byte_index >= self.claimed.len() {
            self.claimed.resize(byte_index + 1, 0);
        }
        try_set(&mut self.claimed, index);
    }

    pub fn count(&self) -> u64 {
        self.claimed.iter().map(|byte| u64::from(byte.count_ones())).sum()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.claimed
    }
}
