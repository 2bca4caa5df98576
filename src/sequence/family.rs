use std::collections::BTreeMap;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{HengeError, HengeResult};
use crate::sequence::table::{FAMILY_COUNT, SequenceEntry, entry_at};

/// One of the five color/activation groups cycling round-robin across ring slots.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Slots 0, 5, 10, ...
    Yellow,
    /// Slots 1, 6, 11, ...
    Red,
    /// Slots 2, 7, 12, ...
    Green,
    /// Slots 3, 8, 13, ...
    Blue,
    /// Slots 4, 9, 14, ...
    Magenta,
}

impl Family {
    /// Round-robin order used when assigning families to slots.
    pub const CYCLE: [Family; FAMILY_COUNT] = [
        Family::Yellow,
        Family::Red,
        Family::Green,
        Family::Blue,
        Family::Magenta,
    ];

    /// Position in [`Family::CYCLE`].
    pub fn ordinal(self) -> usize {
        match self {
            Self::Yellow => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Blue => 3,
            Self::Magenta => 4,
        }
    }

    /// Base sprite/theme color.
    pub fn color(self) -> Rgba8Premul {
        match self {
            Self::Yellow => Rgba8Premul::opaque(250, 204, 21),
            Self::Red => Rgba8Premul::opaque(226, 48, 58),
            Self::Green => Rgba8Premul::opaque(46, 176, 96),
            Self::Blue => Rgba8Premul::opaque(44, 112, 228),
            Self::Magenta => Rgba8Premul::opaque(206, 52, 190),
        }
    }
}

/// Family assigned to ring slot `i`.
pub fn family_for_slot(i: usize) -> Family {
    Family::CYCLE[i % FAMILY_COUNT]
}

/// Configured family -> bit position table, as loaded from configuration.
///
/// This is unvalidated data; [`ActivationMapper::new`] checks it once at startup.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FamilyBitLayout(pub BTreeMap<Family, u8>);

impl Default for FamilyBitLayout {
    fn default() -> Self {
        Self(
            Family::CYCLE
                .iter()
                .map(|&f| (f, f.ordinal() as u8))
                .collect(),
        )
    }
}

impl FamilyBitLayout {
    /// Bit position of `family`; fails when it is missing or outside the entry width.
    pub fn bit_for(&self, family: Family) -> HengeResult<usize> {
        let bit = self
            .0
            .get(&family)
            .copied()
            .ok_or(HengeError::MissingFamilyBit { family })?;
        if usize::from(bit) >= FAMILY_COUNT {
            return Err(HengeError::validation(format!(
                "family {family:?} bit position {bit} is outside 0..{FAMILY_COUNT}"
            )));
        }
        Ok(usize::from(bit))
    }
}

/// Validated family/bit mapping. Construction fails on table mismatches; lookups never fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationMapper {
    bit_of: [usize; FAMILY_COUNT],
}

impl ActivationMapper {
    /// Checks that every family has a distinct in-range bit.
    pub fn new(layout: &FamilyBitLayout) -> HengeResult<Self> {
        let mut bit_of = [0usize; FAMILY_COUNT];
        let mut used = [false; FAMILY_COUNT];
        for family in Family::CYCLE {
            let bit = layout.bit_for(family)?;
            if used[bit] {
                return Err(HengeError::validation(format!(
                    "bit position {bit} is assigned to more than one family"
                )));
            }
            used[bit] = true;
            bit_of[family.ordinal()] = bit;
        }
        Ok(Self { bit_of })
    }

    /// Bit of `family` in a sequence entry.
    pub fn bit_position(&self, family: Family) -> usize {
        self.bit_of[family.ordinal()]
    }

    /// `true` when `family` is lit in `entry`.
    pub fn is_family_active_in_entry(&self, family: Family, entry: SequenceEntry) -> bool {
        entry.is_set(self.bit_position(family))
    }

    /// `state_index` is 0-based and clamped to the table.
    pub fn is_family_active_in_state(&self, family: Family, state_index: usize) -> bool {
        self.is_family_active_in_entry(family, entry_at(state_index))
    }

    /// `true` when ring slot `slot` is lit at 0-based `state_index`.
    pub fn is_slot_visible(&self, slot: usize, state_index: usize) -> bool {
        self.is_family_active_in_state(family_for_slot(slot), state_index)
    }

    /// Per-slot bitmask (bit `i` = slot `i` lit) for rings of up to 64 slots.
    pub fn slot_mask(&self, slot_count: usize, state_index: usize) -> u64 {
        (0..slot_count.min(64))
            .filter(|&i| self.is_slot_visible(i, state_index))
            .fold(0u64, |m, i| m | (1u64 << i))
    }
}

impl Default for ActivationMapper {
    fn default() -> Self {
        Self {
            bit_of: [0, 1, 2, 3, 4],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/family.rs"]
mod tests;
