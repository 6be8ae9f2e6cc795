use anyhow::anyhow;
use derive_more::Display;
use std::{fmt::Display, ops};

/// A range between two numeric values, inclusive on both ends. Used for
/// clamping values into a valid domain (e.g. the `[-1, 1]` domain of `asin`)
/// and for tracking the bounds of drawn geometry.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + Display + PartialOrd + ops::Sub<Output = T>> NumRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// A range that contains exactly one value
    pub const fn single(value: T) -> Self {
        Self::new(value, value)
    }

    /// Max minus min
    pub fn span(&self) -> T {
        self.max - self.min
    }

    /// Check if a value is in this range. Ranges are inclusive on both ends.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks if the value is in this range. If it isn't, return an error.
    pub fn ensure_contains(&self, value: T) -> anyhow::Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(anyhow!("value {} is not in range {}", value, self))
        }
    }

    /// Force a value into this range. If it's already in the range, return
    /// that value. If it's outside the range, return the bound (lower or upper)
    /// that's closest to the value. NaN passes through untouched.
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Grow this range just enough that it contains the given value
    pub fn include(self, value: T) -> Self {
        Self {
            min: if value < self.min { value } else { self.min },
            max: if value > self.max { value } else { self.max },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_span() {
        let range: NumRange<f64> = NumRange::new(1.0, 3.0);
        assert_approx_eq!(range.span(), 2.0);
    }

    #[test]
    fn test_contains() {
        let range: NumRange<f64> = NumRange::new(1.0, 3.0);
        assert!(!range.contains(0.9));
        assert!(range.contains(1.0));
        assert!(range.contains(2.0));
        assert!(range.contains(3.0));
        assert!(!range.contains(3.1));

        // Test a zero-length span, it should contain exactly one value
        let range: NumRange<f64> = NumRange::single(1.0);
        assert!(!range.contains(0.9));
        assert!(range.contains(1.0));
        assert!(!range.contains(1.1));
    }

    #[test]
    fn test_ensure_contains() {
        let range: NumRange<f64> = NumRange::new(-1.0, 1.0);
        assert!(range.ensure_contains(0.5).is_ok());
        let err = range.ensure_contains(1.5).unwrap_err();
        assert_eq!(err.to_string(), "value 1.5 is not in range [-1, 1]");
    }

    #[test]
    fn test_clamp() {
        let range: NumRange<f64> = NumRange::new(1.0, 3.0);
        assert_approx_eq!(range.clamp(0.0), 1.0);
        assert_approx_eq!(range.clamp(1.0), 1.0);
        assert_approx_eq!(range.clamp(2.0), 2.0);
        assert_approx_eq!(range.clamp(3.0), 3.0);
        assert_approx_eq!(range.clamp(6.0), 3.0);

        // Test a zero-length span, it should always map to the same value
        let range: NumRange<f64> = NumRange::single(1.0);
        assert_approx_eq!(range.clamp(0.0), 1.0);
        assert_approx_eq!(range.clamp(1.0), 1.0);
        assert_approx_eq!(range.clamp(1.5), 1.0);
    }

    #[test]
    fn test_include() {
        let range = NumRange::single(0.0).include(-2.0).include(5.0).include(1.0);
        assert_eq!(range, NumRange::new(-2.0, 5.0));
    }
}
