use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// A single named defect, used when defect masks are written out as lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Defect {
    Blocked,
    Broken,
}

impl Defect {
    pub const ALL: [Defect; 2] = [Self::Blocked, Self::Broken];

    pub fn flag(&self) -> DefectFlags {
        match self {
            Self::Blocked => DefectFlags::BLOCKED,
            Self::Broken => DefectFlags::BROKEN,
        }
    }
}

/// Bitmask of the defects a neuron carries.
///
/// `NONE` is the empty mask; OR-ing it into a mask changes nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Defect>", into = "Vec<Defect>")]
pub struct DefectFlags(u8);

impl DefectFlags {
    pub const NONE: DefectFlags = DefectFlags(0);
    pub const BLOCKED: DefectFlags = DefectFlags(1 << 0);
    pub const BROKEN: DefectFlags = DefectFlags(1 << 1);
    /// Union of every defect.
    pub const ALL: DefectFlags = DefectFlags(Self::BLOCKED.0 | Self::BROKEN.0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build a mask from raw bits, dropping bits that name no defect.
    pub const fn from_bits_truncate(bits: u8) -> DefectFlags {
        DefectFlags(bits & Self::ALL.0)
    }

    pub fn insert(&mut self, flags: DefectFlags) {
        self.0 |= flags.0;
    }

    pub fn remove(&mut self, flags: DefectFlags) {
        self.0 &= !flags.0;
    }

    pub fn contains_any(self, flags: DefectFlags) -> bool {
        self.0 & flags.0 != 0
    }

    pub fn is_nothing(self) -> bool {
        self.0 == Self::NONE.0
    }

    pub fn is_everything(self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Exact equality, not a superset test.
    pub fn is_exact(self, flags: DefectFlags) -> bool {
        self.0 == flags.0
    }

    /// The individual defects set in this mask.
    pub fn iter(self) -> impl Iterator<Item = Defect> {
        Defect::ALL.into_iter().filter(move |d| self.contains_any(d.flag()))
    }
}

impl BitOr for DefectFlags {
    type Output = DefectFlags;

    fn bitor(self, rhs: DefectFlags) -> DefectFlags {
        DefectFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for DefectFlags {
    fn bitor_assign(&mut self, rhs: DefectFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for DefectFlags {
    type Output = DefectFlags;

    fn bitand(self, rhs: DefectFlags) -> DefectFlags {
        DefectFlags(self.0 & rhs.0)
    }
}

impl BitAndAssign for DefectFlags {
    fn bitand_assign(&mut self, rhs: DefectFlags) {
        self.0 &= rhs.0;
    }
}

/// Complement within `ALL`.
impl Not for DefectFlags {
    type Output = DefectFlags;

    fn not(self) -> DefectFlags {
        DefectFlags(!self.0 & Self::ALL.0)
    }
}

impl From<Defect> for DefectFlags {
    fn from(defect: Defect) -> Self {
        defect.flag()
    }
}

impl From<Vec<Defect>> for DefectFlags {
    fn from(defects: Vec<Defect>) -> Self {
        defects
            .into_iter()
            .fold(DefectFlags::NONE, |mask, d| mask | d.flag())
    }
}

impl From<DefectFlags> for Vec<Defect> {
    fn from(flags: DefectFlags) -> Self {
        flags.iter().collect()
    }
}

impl fmt::Debug for DefectFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nothing() {
            return f.write_str("DefectFlags(None)");
        }
        let names: Vec<String> = self.iter().map(|d| format!("{:?}", d)).collect();
        write!(f, "DefectFlags({})", names.join(" | "))
    }
}

/// Activation intensity of a neuron, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum NeuronExcitation {
    CriticalLow,
    VeryLow,
    Low,
    #[default]
    Normal,
    High,
    VeryHigh,
    CriticalHigh,
}

impl NeuronExcitation {
    pub const ALL: [NeuronExcitation; 7] = [
        Self::CriticalLow,
        Self::VeryLow,
        Self::Low,
        Self::Normal,
        Self::High,
        Self::VeryHigh,
        Self::CriticalHigh,
    ];
}

/// Direction a signal travels through a neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignalDirection {
    #[default]
    None,
    Forward,
    Backward,
}

impl SignalDirection {
    pub const ALL: [SignalDirection; 3] = [Self::None, Self::Forward, Self::Backward];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mask_is_nothing() {
        let mask = DefectFlags::default();
        assert_eq!(mask, DefectFlags::NONE);
        assert!(mask.is_nothing());
        assert!(!mask.is_everything());
    }

    #[test]
    fn none_is_identity_for_or() {
        assert_eq!(DefectFlags::BROKEN | DefectFlags::NONE, DefectFlags::BROKEN);
        assert_eq!(
            DefectFlags::NONE | DefectFlags::BLOCKED | DefectFlags::BROKEN,
            DefectFlags::ALL
        );
    }

    #[test]
    fn insert_and_remove() {
        let mut mask = DefectFlags::NONE;
        mask.insert(DefectFlags::BROKEN);
        mask.insert(DefectFlags::BLOCKED);
        assert!(mask.is_everything());
        mask.remove(DefectFlags::BLOCKED);
        assert!(mask.is_exact(DefectFlags::BROKEN));
        mask.remove(DefectFlags::NONE);
        assert!(mask.is_exact(DefectFlags::BROKEN));
    }

    #[test]
    fn remove_from_empty_stays_empty() {
        for flags in [DefectFlags::NONE, DefectFlags::BLOCKED, DefectFlags::ALL] {
            let mut mask = DefectFlags::NONE;
            mask.remove(flags);
            assert!(mask.is_nothing());
        }
    }

    #[test]
    fn is_exact_is_not_superset() {
        assert!(!DefectFlags::ALL.is_exact(DefectFlags::BROKEN));
        assert!(DefectFlags::ALL.contains_any(DefectFlags::BROKEN));
    }

    #[test]
    fn complement_stays_within_all() {
        assert_eq!(!DefectFlags::NONE, DefectFlags::ALL);
        assert_eq!(!DefectFlags::BROKEN, DefectFlags::BLOCKED);
        assert_eq!(!DefectFlags::ALL, DefectFlags::NONE);
    }

    #[test]
    fn truncates_unknown_bits() {
        assert_eq!(DefectFlags::from_bits_truncate(0xff), DefectFlags::ALL);
        assert_eq!(DefectFlags::from_bits_truncate(0b100), DefectFlags::NONE);
    }

    #[test]
    fn ron_uses_defect_names() {
        let text = ron::to_string(&DefectFlags::ALL).unwrap();
        assert!(text.contains("Blocked") && text.contains("Broken"));
        let parsed: DefectFlags = ron::from_str("[Broken]").unwrap();
        assert_eq!(parsed, DefectFlags::BROKEN);
        let empty: DefectFlags = ron::from_str("[]").unwrap();
        assert!(empty.is_nothing());
    }

    #[test]
    fn debug_lists_defects() {
        assert_eq!(format!("{:?}", DefectFlags::NONE), "DefectFlags(None)");
        assert_eq!(format!("{:?}", DefectFlags::ALL), "DefectFlags(Blocked | Broken)");
    }

    #[test]
    fn excitation_is_ordered() {
        assert_eq!(NeuronExcitation::default(), NeuronExcitation::Normal);
        assert!(NeuronExcitation::CriticalLow < NeuronExcitation::Normal);
        assert!(NeuronExcitation::VeryHigh < NeuronExcitation::CriticalHigh);
        let mut sorted = NeuronExcitation::ALL;
        sorted.sort();
        assert_eq!(sorted, NeuronExcitation::ALL);
    }

    mod proptests {
        use crate::schema::neuron::DefectFlags;
        use proptest::prelude::*;

        fn any_mask() -> impl Strategy<Value = DefectFlags> {
            (0u8..=DefectFlags::ALL.bits()).prop_map(DefectFlags::from_bits_truncate)
        }

        proptest! {
            #[test]
            fn prop_insert_is_idempotent(m in any_mask(), f in any_mask()) {
                let mut once = m;
                once.insert(f);
                let mut twice = once;
                twice.insert(f);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn prop_remove_is_idempotent(m in any_mask(), f in any_mask()) {
                let mut once = m;
                once.remove(f);
                let mut twice = once;
                twice.remove(f);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn prop_insert_then_remove_clears_flags(m in any_mask(), f in any_mask()) {
                let mut mask = m;
                mask.insert(f);
                mask.remove(f);
                prop_assert_eq!(mask, m & !f);
                prop_assert_eq!(mask == m, !m.contains_any(f));
            }

            #[test]
            fn prop_is_everything_matches_all(m in any_mask()) {
                prop_assert_eq!(m.is_everything(), m == DefectFlags::ALL);
            }

            #[test]
            fn prop_is_exact_is_equality(m in any_mask(), f in any_mask()) {
                prop_assert_eq!(m.is_exact(f), m == f);
            }
        }
    }
}
