use crate::FcError;

/// Pass `v` through if it is finite.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, FcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FcError::NonFinite { what, value: v })
    }
}

/// Require a finite, strictly positive value.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, FcError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(FcError::InvalidArg { what })
    }
}

/// Round to the nearest integer, ties toward positive infinity.
///
/// `f64::round` breaks ties away from zero, which differs for negative halves
/// (-2.5 -> -3). The models here were calibrated with half-up rounding.
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Round to one decimal place with half-up ties.
pub fn round_to_tenths(v: f64) -> f64 {
    round_half_up(v * 10.0) / 10.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_half_up_within_half(v in -1.0e6_f64..1.0e6_f64) {
            let r = round_half_up(v);
            prop_assert!((r - v).abs() <= 0.5);
            prop_assert_eq!(r.fract(), 0.0);
        }
    }
}
