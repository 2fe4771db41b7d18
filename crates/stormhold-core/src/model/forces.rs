use core::fmt;
use core::ops::{Add, AddAssign, Sub};
use serde::{Deserialize, Serialize};

/// One faction's forces at one location, or in reserve.
///
/// Dial strength is tracked in half-point units so that half-strength
/// commitments stay exact: a normal force dialed at full strength is
/// worth [`FULL`] halves, at half strength [`HALF`]. Elite special
/// forces (Nomad stormriders, Magnate vanguard) count double.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battalion {
    pub normal: u8,
    pub special: u8,
}

/// Dial value of one force at half strength, in half-point units.
pub const HALF: u32 = 1;
/// Dial value of one force at full strength, in half-point units.
pub const FULL: u32 = 2;

impl Battalion {
    pub const EMPTY: Battalion = Battalion {
        normal: 0,
        special: 0,
    };

    pub const fn new(normal: u8, special: u8) -> Self {
        Self { normal, special }
    }

    pub const fn total(self) -> u16 {
        self.normal as u16 + self.special as u16
    }

    pub const fn is_empty(self) -> bool {
        self.normal == 0 && self.special == 0
    }

    /// Greatest dial this battalion can reach, in half-point units,
    /// with every force at full strength.
    pub const fn max_dial_halves(self, elite_specials: bool) -> u32 {
        let special_full = if elite_specials { 2 * FULL } else { FULL };
        self.normal as u32 * FULL + self.special as u32 * special_full
    }

    pub fn contains(self, other: Battalion) -> bool {
        self.normal >= other.normal && self.special >= other.special
    }
}

impl Add for Battalion {
    type Output = Battalion;

    fn add(self, rhs: Battalion) -> Battalion {
        Battalion {
            normal: self.normal.saturating_add(rhs.normal),
            special: self.special.saturating_add(rhs.special),
        }
    }
}

impl AddAssign for Battalion {
    fn add_assign(&mut self, rhs: Battalion) {
        *self = *self + rhs;
    }
}

impl Sub for Battalion {
    type Output = Battalion;

    fn sub(self, rhs: Battalion) -> Battalion {
        Battalion {
            normal: self.normal.saturating_sub(rhs.normal),
            special: self.special.saturating_sub(rhs.special),
        }
    }
}

impl fmt::Display for Battalion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.special == 0 {
            write!(f, "{}", self.normal)
        } else {
            write!(f, "{}+{}s", self.normal, self.special)
        }
    }
}

/// A committed dial split across force classes and strength levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceCommit {
    pub normal_full: u8,
    pub normal_half: u8,
    pub special_full: u8,
    pub special_half: u8,
}

impl ForceCommit {
    pub const fn none() -> Self {
        Self {
            normal_full: 0,
            normal_half: 0,
            special_full: 0,
            special_half: 0,
        }
    }

    pub const fn committed(self) -> Battalion {
        Battalion {
            normal: self.normal_full + self.normal_half,
            special: self.special_full + self.special_half,
        }
    }

    pub const fn dial_halves(self, elite_specials: bool) -> u32 {
        let special_full = if elite_specials { 2 * FULL } else { FULL };
        let special_half = if elite_specials { FULL } else { HALF };
        self.normal_full as u32 * FULL
            + self.normal_half as u32 * HALF
            + self.special_full as u32 * special_full
            + self.special_half as u32 * special_half
    }

    /// Forces dialed at full strength must be paid for; halves fight
    /// unsupported.
    pub const fn paid_forces(self) -> u16 {
        self.normal_full as u16 + self.special_full as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battalion_arithmetic_saturates() {
        let a = Battalion::new(3, 1);
        let b = Battalion::new(5, 0);
        assert_eq!(a - b, Battalion::new(0, 1));
        assert_eq!((a + b).total(), 9);
    }

    #[test]
    fn elite_specials_double_dial() {
        let b = Battalion::new(2, 3);
        assert_eq!(b.max_dial_halves(false), 10);
        assert_eq!(b.max_dial_halves(true), 16);
    }

    #[test]
    fn commit_dial_and_payment() {
        let commit = ForceCommit {
            normal_full: 4,
            normal_half: 2,
            special_full: 1,
            special_half: 1,
        };
        // 4*2 + 2*1 + 1*4 + 1*2 = 16 halves = dial 8 for an elite roster.
        assert_eq!(commit.dial_halves(true), 16);
        assert_eq!(commit.dial_halves(false), 13);
        assert_eq!(commit.paid_forces(), 5);
        assert_eq!(commit.committed(), Battalion::new(6, 2));
    }

    #[test]
    fn contains_checks_both_classes() {
        let pool = Battalion::new(4, 2);
        assert!(pool.contains(Battalion::new(4, 2)));
        assert!(!pool.contains(Battalion::new(5, 0)));
        assert!(!pool.contains(Battalion::new(0, 3)));
    }
}
