// ── Unit identity ──

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the two independently tracked SMuFF units.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    A,
    B,
}

impl Unit {
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Suffix carried by inbound field names and element ids for this unit.
    ///
    /// Unit A is the unqualified default (`tool`), unit B appends `B`
    /// (`toolB`, `feeder2B`).
    pub fn qualifier(self) -> &'static str {
        match self {
            Self::A => "",
            Self::B => "B",
        }
    }
}

/// Exactly one value per unit, addressed by [`Unit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPair<T> {
    pub a: T,
    pub b: T,
}

impl<T> UnitPair<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn get(&self, unit: Unit) -> &T {
        match unit {
            Unit::A => &self.a,
            Unit::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, unit: Unit) -> &mut T {
        match unit {
            Unit::A => &mut self.a,
            Unit::B => &mut self.b,
        }
    }

    /// Iterate `(unit, value)` in unit order.
    pub fn iter(&self) -> impl Iterator<Item = (Unit, &T)> {
        [(Unit::A, &self.a), (Unit::B, &self.b)].into_iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(Unit, &T) -> U) -> UnitPair<U> {
        UnitPair {
            a: f(Unit::A, &self.a),
            b: f(Unit::B, &self.b),
        }
    }
}

impl<T> Index<Unit> for UnitPair<T> {
    type Output = T;

    fn index(&self, unit: Unit) -> &T {
        self.get(unit)
    }
}

impl<T> IndexMut<Unit> for UnitPair<T> {
    fn index_mut(&mut self, unit: Unit) -> &mut T {
        self.get_mut(unit)
    }
}
