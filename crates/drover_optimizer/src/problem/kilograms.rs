use std::{
    iter::Sum,
    ops::{Add, AddAssign, Div, Sub, SubAssign},
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Kilograms(f64);

impl Kilograms {
    pub const ZERO: Kilograms = Kilograms(0.0);

    pub fn new(value: f64) -> Self {
        Kilograms(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Eq for Kilograms {}

impl PartialOrd for Kilograms {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kilograms {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Kilograms {
    fn from(value: f64) -> Self {
        Kilograms::new(value)
    }
}

impl Add for Kilograms {
    type Output = Kilograms;

    fn add(self, other: Kilograms) -> Kilograms {
        Kilograms(self.0 + other.0)
    }
}

impl AddAssign for Kilograms {
    fn add_assign(&mut self, other: Kilograms) {
        self.0 += other.0;
    }
}

impl Sub for Kilograms {
    type Output = Kilograms;

    fn sub(self, other: Kilograms) -> Kilograms {
        Kilograms(self.0 - other.0)
    }
}

impl SubAssign for Kilograms {
    fn sub_assign(&mut self, other: Kilograms) {
        self.0 -= other.0;
    }
}

impl Div<Kilograms> for Kilograms {
    type Output = f64;

    fn div(self, other: Kilograms) -> f64 {
        self.0 / other.0
    }
}

impl Sum for Kilograms {
    fn sum<I: Iterator<Item = Kilograms>>(iter: I) -> Kilograms {
        iter.fold(Kilograms::ZERO, |acc, x| acc + x)
    }
}
