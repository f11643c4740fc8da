//! Pure helper functions for extracting typed style overrides from a
//! `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected shape, the default is returned.
//! These never fail; they always produce a usable value.

use serde_json::Value;

use crate::color::Color;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Like [`param_f64`], clamped to [0, 1]. Used for chances and alphas.
pub fn param_unit(params: &Value, name: &str, default: f64) -> f64 {
    param_f64(params, name, default).clamp(0.0, 1.0)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a color from `params[name]`.
///
/// Accepts `[r, g, b]` or `[r, g, b, a]` with channels in [0, 255] and alpha
/// in [0, 1]; channels are clamped. Anything else yields `default`.
pub fn param_color(params: &Value, name: &str, default: Color) -> Color {
    let Some(items) = params.get(name).and_then(Value::as_array) else {
        return default;
    };
    let channels: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
    match channels.as_deref() {
        Some([r, g, b]) => Color::rgb(
            r.clamp(0.0, 255.0),
            g.clamp(0.0, 255.0),
            b.clamp(0.0, 255.0),
        ),
        Some([r, g, b, a]) => Color::rgba(
            r.clamp(0.0, 255.0),
            g.clamp(0.0, 255.0),
            b.clamp(0.0, 255.0),
            a.clamp(0.0, 1.0),
        ),
        _ => default,
    }
}

/// JSON form of a color, the inverse of [`param_color`].
pub fn color_json(color: Color) -> Value {
    match color.a {
        Some(a) => serde_json::json!([color.r, color.g, color.b, a]),
        None => serde_json::json!([color.r, color.g, color.b]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"count": 10});
        assert!((param_f64(&params, "count", 0.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing_or_wrong_type() {
        assert_eq!(param_f64(&json!({"other": 1.0}), "speed", 3.0), 3.0);
        assert_eq!(param_f64(&json!({"speed": "fast"}), "speed", 1.0), 1.0);
        assert_eq!(param_f64(&json!({"speed": null}), "speed", 5.0), 5.0);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!("not an object");
        assert_eq!(param_f64(&params, "speed", 7.0), 7.0);
    }

    // -- param_unit --

    #[test]
    fn param_unit_clamps() {
        assert_eq!(param_unit(&json!({"p": 1.5}), "p", 0.2), 1.0);
        assert_eq!(param_unit(&json!({"p": -2}), "p", 0.2), 0.0);
        assert_eq!(param_unit(&json!({}), "p", 0.2), 0.2);
    }

    // -- param_bool --

    #[test]
    fn param_bool_extracts_and_defaults() {
        assert!(param_bool(&json!({"enabled": true}), "enabled", false));
        assert!(!param_bool(&json!({"enabled": false}), "enabled", true));
        assert!(param_bool(&json!({}), "enabled", true));
        assert!(!param_bool(&json!({"enabled": 1}), "enabled", false));
    }

    // -- param_color --

    #[test]
    fn param_color_reads_rgb_and_rgba() {
        let params = json!({"a": [1, 2, 3], "b": [10, 20, 30, 0.5]});
        assert_eq!(param_color(&params, "a", Color::BLACK), Color::rgb(1.0, 2.0, 3.0));
        assert_eq!(
            param_color(&params, "b", Color::BLACK),
            Color::rgba(10.0, 20.0, 30.0, 0.5)
        );
    }

    #[test]
    fn param_color_clamps_channels() {
        let params = json!({"c": [300, -4, 12, 2.0]});
        assert_eq!(
            param_color(&params, "c", Color::BLACK),
            Color::rgba(255.0, 0.0, 12.0, 1.0)
        );
    }

    #[test]
    fn param_color_falls_back_on_bad_shape() {
        let params = json!({"short": [1, 2], "text": "red", "mixed": [1, "x", 3]});
        for key in ["short", "text", "mixed", "missing"] {
            assert_eq!(param_color(&params, key, Color::WHITE), Color::WHITE, "{key}");
        }
    }

    #[test]
    fn color_json_reads_back() {
        for c in [Color::rgb(1.0, 2.0, 3.0), Color::rgba(4.0, 5.0, 6.0, 0.25)] {
            let params = json!({ "c": color_json(c) });
            assert_eq!(param_color(&params, "c", Color::BLACK), c);
        }
    }
}
