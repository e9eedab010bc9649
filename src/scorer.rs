//! Percentile scoring
//!
//! Places a measured value on a 0-100 scale between a reference
//! population's min and max. Out-of-range values clamp to the bounds;
//! the result is truncated, not rounded.

use crate::error::EngineError;

/// Compute the percentile rank of `value` within `[min, max]`.
///
/// Clamps `value` into the range first, so inputs outside it saturate at
/// 0 or 100. Truncates the interpolated position to an integer: 49.9
/// scores 49, never 50. Fails with [`EngineError::DegenerateRange`] when
/// `min == max`, where the interpolation is undefined.
pub fn percentile(min: f64, max: f64, value: f64) -> Result<u8, EngineError> {
    if min == max {
        return Err(EngineError::DegenerateRange(min));
    }

    let clamped = if min < max {
        value.clamp(min, max)
    } else {
        // Inverted range: mathematically defined but an upstream
        // data-quality problem; clamp with the bounds swapped.
        value.clamp(max, min)
    };

    let pct = (clamped - min) / (max - min) * 100.0;
    Ok(pct.trunc() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_worked_examples() {
        // (82.5 - 60) / 30 * 100 = 75.0 exactly
        assert_eq!(percentile(60.0, 90.0, 82.5).unwrap(), 75);
        // (82.6 - 60) / 30 * 100 = 75.33... truncates to 75
        assert_eq!(percentile(60.0, 90.0, 82.6).unwrap(), 75);
    }

    #[test]
    fn test_truncates_never_rounds() {
        // 49.9% position must score 49
        assert_eq!(percentile(0.0, 100.0, 49.9).unwrap(), 49);
        assert_eq!(percentile(0.0, 100.0, 99.99).unwrap(), 99);
    }

    #[test]
    fn test_clamping_law() {
        assert_eq!(percentile(60.0, 90.0, 10.0).unwrap(), 0);
        assert_eq!(percentile(60.0, 90.0, 60.0).unwrap(), 0);
        assert_eq!(percentile(60.0, 90.0, 150.0).unwrap(), 100);
        assert_eq!(percentile(60.0, 90.0, 90.0).unwrap(), 100);
    }

    #[test]
    fn test_monotone_within_bounds() {
        let mut last = 0;
        for i in 0..=300 {
            let v = 60.0 + (i as f64) * 0.1;
            let p = percentile(60.0, 90.0, v).unwrap();
            assert!(p >= last, "percentile decreased at value {v}");
            assert!(p <= 100);
            last = p;
        }
    }

    #[test]
    fn test_degenerate_range_errors() {
        for v in [0.0, 7.2, 95.0] {
            let err = percentile(7.2, 7.2, v).unwrap_err();
            assert!(matches!(err, EngineError::DegenerateRange(m) if m == 7.2));
        }
    }

    #[test]
    fn test_inverted_range_is_defined() {
        // min > max produces an inverted but valid result; the reference
        // store's upstream loader is responsible for preventing this.
        assert_eq!(percentile(90.0, 60.0, 90.0).unwrap(), 0);
        assert_eq!(percentile(90.0, 60.0, 60.0).unwrap(), 100);
        assert_eq!(percentile(90.0, 60.0, 75.0).unwrap(), 50);
    }
}
