use serde::{Serialize, Serializer};

const SCALE: u64 = 1_000_000_000; // 9 decimal digits after the point

/// Non-negative ratio in fixed point, units of 1e-9.
///
/// Construction truncates toward zero instead of rounding, so a stored
/// value never exceeds the exact rational it approximates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Ratio9(u64);

impl Ratio9 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(SCALE);

    /// `numer / denom`, truncated to 9 fractional digits.
    ///
    /// # Panics
    /// Panics if `denom == 0`. Callers must reject an empty roster
    /// before dividing.
    pub fn div_floor(numer: u64, denom: u64) -> Self {
        assert!(denom > 0, "Ratio9::div_floor: denominator is zero");
        Self((numer as u128 * SCALE as u128 / denom as u128) as u64)
    }

    /// The value in units of 1e-9.
    pub const fn nanos(self) -> u64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }
}

impl std::fmt::Display for Ratio9 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:09}", self.0 / SCALE, self.0 % SCALE)
    }
}

impl Serialize for Ratio9 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}
