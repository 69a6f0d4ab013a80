//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f32 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f32_to_i64(value: f32) -> i64 {
    let value = f64::from(value);
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Convert usize to i64, saturating at the i64 maximum.
#[must_use]
pub fn i64_from_usize(value: usize) -> i64 {
    cast::<usize, i64>(value).unwrap_or(i64::MAX)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Clamp a f64 to the f32 range and downcast, returning 0.0 for non-finite values.
#[must_use]
pub fn clamp_f64_to_f32(value: f64) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let min = cast::<f32, f64>(f32::MIN).unwrap_or(f64::MIN);
    let max = cast::<f32, f64>(f32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max);
    cast::<f64, f32>(clamped).unwrap_or(0.0)
}

/// Clamp logged hours to a finite non-negative value.
#[must_use]
pub fn sanitize_hours(hours: f32) -> f32 {
    if hours.is_finite() { hours.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounder_handles_non_finite() {
        assert_eq!(round_f32_to_i64(1.6), 2);
        assert_eq!(round_f32_to_i64(-1.6), -2);
        assert_eq!(round_f32_to_i64(f32::NAN), 0);
        assert_eq!(round_f32_to_i64(f32::INFINITY), 0);
    }

    #[test]
    fn usize_conversion_saturates() {
        assert_eq!(i64_from_usize(12), 12);
        assert_eq!(i64_from_usize(usize::MAX), i64::MAX);
    }

    #[test]
    fn sanitize_rejects_garbage_hours() {
        assert!((sanitize_hours(2.5) - 2.5).abs() < f32::EPSILON);
        assert!((sanitize_hours(-3.0) - 0.0).abs() < f32::EPSILON);
        assert!((sanitize_hours(f32::NAN) - 0.0).abs() < f32::EPSILON);
    }
}
