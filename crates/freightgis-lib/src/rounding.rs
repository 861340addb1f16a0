//! Rounding applied to values reported back to callers.

/// Round to two decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use freightgis_lib::round2;
///
/// assert_eq!(round2(3944.4212), 3944.42);
/// assert_eq!(round2(-0.125), -0.13);
/// ```
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(125.0), 125.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
