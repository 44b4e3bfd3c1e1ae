//! Typed lookups into a JSON params object.
//!
//! Each helper returns `default` when the key is missing or holds the wrong
//! JSON type, so engines can be configured from partial objects and never
//! fail on bad input.

use serde_json::Value;

/// `params[name]` as `f64`; integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as `usize`; only non-negative integers are accepted.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// `value` clamped to `range`, or `default` when `value` is NaN or infinite.
pub fn clamp_param(value: f64, default: f64, range: (f64, f64)) -> f64 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_reads_float_and_integer() {
        let params = json!({"fade_alpha": 0.2, "margin": 30});
        assert!((param_f64(&params, "fade_alpha", 0.12) - 0.2).abs() < f64::EPSILON);
        assert!((param_f64(&params, "margin", 20.0) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_on_missing_wrong_type_or_null() {
        let params = json!({"time_step": "fast", "restoring": null});
        assert_eq!(param_f64(&params, "time_step", 0.003), 0.003);
        assert_eq!(param_f64(&params, "restoring", 0.001), 0.001);
        assert_eq!(param_f64(&params, "noise_scale", 0.003), 0.003);
    }

    #[test]
    fn param_f64_on_non_object_returns_default() {
        assert_eq!(param_f64(&json!([1, 2, 3]), "turns", 4.0), 4.0);
    }

    #[test]
    fn param_usize_rejects_negative_and_fractional() {
        let params = json!({"a": -5, "b": 2.5, "c": 300});
        assert_eq!(param_usize(&params, "a", 1), 1);
        assert_eq!(param_usize(&params, "b", 1), 1);
        assert_eq!(param_usize(&params, "c", 1), 300);
    }

    #[test]
    fn param_bool_reads_bool_only() {
        let params = json!({"clamp_noise": true, "other": 1});
        assert!(param_bool(&params, "clamp_noise", false));
        assert!(!param_bool(&params, "other", false));
    }

    #[test]
    fn param_string_reads_string_only() {
        let params = json!({"palette": "ember", "n": 3});
        assert_eq!(param_string(&params, "palette", "swirl"), "ember");
        assert_eq!(param_string(&params, "n", "swirl"), "swirl");
        assert_eq!(param_string(&params, "missing", "swirl"), "swirl");
    }

    #[test]
    fn clamp_param_limits_to_range() {
        assert_eq!(clamp_param(0.5, 0.1, (0.0, 1.0)), 0.5);
        assert_eq!(clamp_param(1e308, 0.1, (0.0, 1.0)), 1.0);
        assert_eq!(clamp_param(-500.0, 20.0, (0.0, 200.0)), 0.0);
    }

    #[test]
    fn clamp_param_replaces_non_finite_with_default() {
        assert_eq!(clamp_param(f64::NAN, 0.003, (0.0, 0.1)), 0.003);
        assert_eq!(clamp_param(f64::INFINITY, 20.0, (0.0, 200.0)), 20.0);
        assert_eq!(clamp_param(f64::NEG_INFINITY, 5.0, (1.0, 20.0)), 5.0);
    }
}
