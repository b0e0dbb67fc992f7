use approx::assert_relative_eq;
use ndarray::{array, Array2};

use fitsview_core::error::FitsViewError;
use fitsview_core::normalize::{
    compute_bounds, parse_percentile, percentile, NormBounds, NormalizationState, ScaleMode,
};

fn ramp(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((1, n), |(_, x)| (x + 1) as f64)
}

#[test]
fn test_default_state() {
    let s = NormalizationState::default();
    assert_eq!(s.mode, ScaleMode::Linear);
    assert_eq!(s.vmin_percentile, 5.0);
    assert_eq!(s.vmax_percentile, 95.0);
}

#[test]
fn test_percentile_linear_interpolation() {
    // 1..=10: rank = p/100 * 9
    let data = ramp(10);
    assert_relative_eq!(percentile(&data, 0.0).unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(percentile(&data, 100.0).unwrap(), 10.0, epsilon = 1e-12);
    assert_relative_eq!(percentile(&data, 50.0).unwrap(), 5.5, epsilon = 1e-12);
    assert_relative_eq!(percentile(&data, 5.0).unwrap(), 1.45, epsilon = 1e-12);
    assert_relative_eq!(percentile(&data, 95.0).unwrap(), 9.55, epsilon = 1e-12);
}

#[test]
fn test_percentile_ignores_nan() {
    let data = array![[f64::NAN, 1.0, 3.0, f64::INFINITY]];
    assert_relative_eq!(percentile(&data, 50.0).unwrap(), 2.0, epsilon = 1e-12);
}

#[test]
fn test_percentile_all_nan() {
    let data = array![[f64::NAN, f64::NAN]];
    assert!(matches!(percentile(&data, 50.0), Err(FitsViewError::EmptyImage)));
}

#[test]
fn test_bounds_linear_default() {
    let data = ramp(10);
    let b = compute_bounds(&data, &NormalizationState::default()).unwrap();
    assert_relative_eq!(b.low, 1.45, epsilon = 1e-12);
    assert_relative_eq!(b.high, 9.55, epsilon = 1e-12);
    assert_eq!(b.mode, ScaleMode::Linear);
}

#[test]
fn test_log_bounds_on_positive_data() {
    let data = Array2::from_shape_fn((20, 20), |(y, x)| 0.1 + (y * 20 + x) as f64);
    for (lo, hi) in [(0.0, 100.0), (5.0, 95.0), (49.0, 51.0), (10.0, 10.5)] {
        let state = NormalizationState {
            mode: ScaleMode::Log,
            vmin_percentile: lo,
            vmax_percentile: hi,
        };
        let b = compute_bounds(&data, &state).unwrap();
        assert!(b.low < b.high, "p{lo}..p{hi} gave {b:?}");
        assert!(b.low > 0.0);
    }
}

#[test]
fn test_log_rejected_on_non_positive() {
    for bad in [0.0, -3.0] {
        let data = array![[1.0, 2.0], [bad, 4.0]];
        let state = NormalizationState {
            mode: ScaleMode::Log,
            ..NormalizationState::default()
        };
        let err = compute_bounds(&data, &state).unwrap_err();
        assert!(matches!(err, FitsViewError::LogScaleDomain(v) if v == bad));
    }
}

#[test]
fn test_log_ignores_nan_blanks() {
    let data = array![[f64::NAN, 2.0, 4.0]];
    let state = NormalizationState {
        mode: ScaleMode::Log,
        ..NormalizationState::default()
    };
    assert!(compute_bounds(&data, &state).is_ok());
}

#[test]
fn test_log_rejects_negative_infinity() {
    let data = array![[1.0, 2.0], [3.0, f64::NEG_INFINITY]];
    let state = NormalizationState {
        mode: ScaleMode::Log,
        ..NormalizationState::default()
    };
    let err = compute_bounds(&data, &state).unwrap_err();
    assert!(matches!(err, FitsViewError::LogScaleDomain(v) if v == f64::NEG_INFINITY));

    // Positive infinity is in the log domain; it is only left out of the percentiles.
    let data = array![[1.0, 2.0], [3.0, f64::INFINITY]];
    assert!(compute_bounds(&data, &state).is_ok());
}

#[test]
fn test_reversed_percentiles_rejected() {
    let data = ramp(10);
    let state = NormalizationState {
        mode: ScaleMode::Linear,
        vmin_percentile: 95.0,
        vmax_percentile: 5.0,
    };
    assert!(matches!(
        state.validate(),
        Err(FitsViewError::PercentileOrder { vmin, vmax }) if vmin == 95.0 && vmax == 5.0
    ));
    assert!(compute_bounds(&data, &state).is_err());

    let equal = NormalizationState {
        vmin_percentile: 50.0,
        vmax_percentile: 50.0,
        ..state
    };
    let b = compute_bounds(&data, &equal).unwrap();
    assert_eq!(b.low, b.high);
}

#[test]
fn test_out_of_range_percentiles_rejected() {
    let data = ramp(10);
    for (lo, hi) in [(-1.0, 95.0), (5.0, 100.5), (f64::NAN, 50.0), (0.0, f64::INFINITY)] {
        let state = NormalizationState {
            mode: ScaleMode::Linear,
            vmin_percentile: lo,
            vmax_percentile: hi,
        };
        assert!(matches!(
            compute_bounds(&data, &state),
            Err(FitsViewError::PercentileOutOfRange(_))
        ));
    }
}

#[test]
fn test_parse_percentile() {
    assert_eq!(parse_percentile(" 2.5 ").unwrap(), 2.5);
    assert_eq!(parse_percentile("100").unwrap(), 100.0);
    assert!(matches!(
        parse_percentile("abc"),
        Err(FitsViewError::InvalidPercentile(s)) if s == "abc"
    ));
    assert!(matches!(parse_percentile(""), Err(FitsViewError::InvalidPercentile(_))));
    assert!(matches!(
        parse_percentile("101"),
        Err(FitsViewError::PercentileOutOfRange(_))
    ));
}

#[test]
fn test_apply_linear() {
    let b = NormBounds {
        low: 10.0,
        high: 20.0,
        mode: ScaleMode::Linear,
    };
    assert_eq!(b.apply(10.0), Some(0.0));
    assert_eq!(b.apply(15.0), Some(0.5));
    assert_eq!(b.apply(30.0), Some(1.0));
    assert_eq!(b.apply(-5.0), Some(0.0));
    assert_eq!(b.apply(f64::NAN), None);
}

#[test]
fn test_apply_log() {
    let b = NormBounds {
        low: 1.0,
        high: 100.0,
        mode: ScaleMode::Log,
    };
    assert_relative_eq!(b.apply(10.0).unwrap(), 0.5, epsilon = 1e-12);
    assert_eq!(b.apply(0.0), None);
    assert_eq!(b.apply(-1.0), None);
}

#[test]
fn test_apply_zero_width_range() {
    let b = NormBounds {
        low: 5.0,
        high: 5.0,
        mode: ScaleMode::Linear,
    };
    assert_eq!(b.apply(5.0), Some(0.0));
    assert_eq!(b.apply(7.0), Some(0.0));
}

#[test]
fn test_scale_mode_parse_and_display() {
    assert_eq!("LOG".parse::<ScaleMode>().unwrap(), ScaleMode::Log);
    assert_eq!("linear".parse::<ScaleMode>().unwrap(), ScaleMode::Linear);
    assert!("sqrt".parse::<ScaleMode>().is_err());
    assert_eq!(format!("{}", ScaleMode::Log), "Log");
}
