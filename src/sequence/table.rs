//! The fixed 31-state activation table.
//!
//! Each entry is a 5-bit mask with one bit per [`Family`](crate::Family). Internally entries are
//! indexed from zero; the public state accessors are 1-based and wrap in both directions, so
//! `entry_for_state(0)` is the last entry and `entry_for_state(32)` is the first one again.

/// Number of families (bits per entry).
pub const FAMILY_COUNT: usize = 5;

/// Number of entries in the activation table.
pub const SEQUENCE_LEN: usize = 31;

/// One activation pattern: `bits[k] != 0` means bit position `k` is lit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SequenceEntry(pub [u8; FAMILY_COUNT]);

impl SequenceEntry {
    /// Raw bits in position order.
    pub fn bits(self) -> [u8; FAMILY_COUNT] {
        self.0
    }

    /// `true` when bit position `bit` is lit; out-of-range bits are unlit.
    pub fn is_set(self, bit: usize) -> bool {
        self.0.get(bit).is_some_and(|&b| b != 0)
    }

    /// Number of lit bits.
    pub fn weight(self) -> u32 {
        self.0.iter().filter(|&&b| b != 0).count() as u32
    }

    /// The entry read as a binary number, first bit most significant (`[1,0,1,0,0]` is `0x14`).
    pub fn code(self) -> u8 {
        self.0
            .iter()
            .fold(0u8, |acc, &b| (acc << 1) | u8::from(b != 0))
    }
}

const SEQUENCE: [SequenceEntry; SEQUENCE_LEN] = [
    SequenceEntry([1, 0, 0, 0, 0]),
    SequenceEntry([1, 0, 1, 0, 0]),
    SequenceEntry([1, 0, 1, 0, 1]),
    SequenceEntry([1, 0, 1, 1, 1]),
    SequenceEntry([0, 0, 1, 1, 1]),
    SequenceEntry([0, 0, 0, 1, 1]),
    SequenceEntry([1, 0, 0, 1, 1]),
    SequenceEntry([1, 0, 0, 1, 0]),
    SequenceEntry([0, 0, 0, 1, 0]),
    SequenceEntry([0, 0, 1, 1, 0]),
    SequenceEntry([1, 0, 1, 1, 0]),
    SequenceEntry([1, 1, 1, 1, 0]),
    SequenceEntry([1, 1, 1, 0, 0]),
    SequenceEntry([0, 1, 1, 0, 0]),
    SequenceEntry([0, 0, 1, 0, 0]),
    SequenceEntry([0, 0, 1, 0, 1]),
    SequenceEntry([0, 1, 1, 0, 1]),
    SequenceEntry([1, 1, 1, 0, 1]),
    SequenceEntry([1, 1, 1, 1, 1]),
    SequenceEntry([1, 1, 0, 1, 1]),
    SequenceEntry([1, 1, 0, 1, 0]),
    SequenceEntry([0, 1, 0, 1, 0]),
    SequenceEntry([0, 1, 1, 1, 0]),
    SequenceEntry([0, 1, 1, 1, 1]),
    SequenceEntry([0, 1, 0, 1, 1]),
    SequenceEntry([0, 0, 0, 1, 1]),
    SequenceEntry([0, 0, 0, 0, 1]),
    SequenceEntry([1, 0, 0, 0, 1]),
    SequenceEntry([1, 1, 0, 0, 1]),
    SequenceEntry([0, 1, 0, 0, 1]),
    SequenceEntry([0, 1, 0, 0, 0]),
];

/// All entries in run order.
pub fn entries() -> &'static [SequenceEntry; SEQUENCE_LEN] {
    &SEQUENCE
}

/// 1-based, cyclic accessor. Never fails.
pub fn entry_for_state(state1: i64) -> SequenceEntry {
    let n = SEQUENCE_LEN as i64;
    let idx = (state1.rem_euclid(n) + n - 1) % n;
    SEQUENCE[idx as usize]
}

/// 0-based accessor used by the renderers; out-of-range indices are clamped to the last entry.
pub fn entry_at(index: usize) -> SequenceEntry {
    SEQUENCE[index.min(SEQUENCE_LEN - 1)]
}

/// Next 1-based state, wrapping 31 -> 1.
pub fn next_state(state1: i64) -> i64 {
    let n = SEQUENCE_LEN as i64;
    state1.rem_euclid(n) + 1
}

/// Previous 1-based state, wrapping 1 -> 31.
pub fn prev_state(state1: i64) -> i64 {
    let n = SEQUENCE_LEN as i64;
    (state1.rem_euclid(n) + n - 2) % n + 1
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/table.rs"]
mod tests;
