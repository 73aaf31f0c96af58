//! Validation and defaulting of a parsed `@plugin` payload into [`PluginSpec`].
//!
//! Single pass, fail-fast: the first violated contract aborts the whole call
//! and no partial spec is returned. Re-normalizing an already canonical spec
//! is a no-op.

use serde_json::Value;

use super::error::SpecError;
use super::model::{Param, PluginSpec, DEFAULT_ENGINE, DEFAULT_PARAM_TYPE};

/// Validates the parsed payload and produces the canonical spec.
///
/// Top level must be an object with a non-empty string `name` and an array
/// `params`. `engine` falls back to [`DEFAULT_ENGINE`] unless it is a
/// non-empty string.
pub fn normalize(value: &Value) -> Result<PluginSpec, SpecError> {
    let obj = value
        .as_object()
        .ok_or_else(|| SpecError::InvalidSpec("top level must be an object".to_string()))?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SpecError::InvalidSpec("missing 'name' (string)".to_string()))?
        .to_string();

    let engine = obj
        .get("engine")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ENGINE)
        .to_string();

    let raw_params = obj
        .get("params")
        .and_then(Value::as_array)
        .ok_or_else(|| SpecError::InvalidSpec("'params' must be an array".to_string()))?;

    let params = raw_params
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_param(raw, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PluginSpec {
        name,
        engine,
        params,
    })
}

/// Normalizes one `params` element. `index` is carried into every error so
/// the caller can point at the offending entry.
fn normalize_param(value: &Value, index: usize) -> Result<Param, SpecError> {
    let obj = value.as_object().ok_or_else(|| SpecError::InvalidParam {
        index,
        reason: "not an object".to_string(),
    })?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SpecError::InvalidParam {
            index,
            reason: "missing 'id' (string)".to_string(),
        })?
        .to_string();

    // An empty-string label is kept verbatim; only a missing or non-string
    // label falls back to the id. Same rule for `type`.
    let label = obj
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or(&id)
        .to_string();

    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PARAM_TYPE)
        .to_string();

    match kind.as_str() {
        "enum" => {
            let options = obj
                .get("options")
                .and_then(Value::as_array)
                .filter(|opts| !opts.is_empty())
                .ok_or_else(|| SpecError::InvalidParam {
                    index,
                    reason: format!("'{id}' is enum but has no 'options' array"),
                })?
                .clone();
            // An explicit `null` counts as a supplied default; only a missing
            // key falls back to the first option. A supplied default is not
            // required to be a member of `options`.
            let default = match obj.get("default") {
                Some(value) => value.clone(),
                None => options[0].clone(),
            };
            Ok(Param::Enum {
                id,
                label,
                options,
                default,
            })
        }
        "bool" => Ok(Param::Bool {
            id,
            label,
            default: truthy(obj.get("default")),
        }),
        // Everything else (knob, slider, or any unrecognized string) is a
        // numeric control.
        _ => {
            let min = coerce_number(obj.get("min"));
            let max = coerce_number(obj.get("max"));
            if !min.is_finite() || !max.is_finite() {
                return Err(SpecError::InvalidParam {
                    index,
                    reason: format!("'{id}' must have numeric 'min' and 'max' for type '{kind}'"),
                });
            }
            let default = coerce_number(obj.get("default"));
            let default = if default.is_finite() {
                default
            } else {
                min + (max - min) * 0.5
            };
            Ok(Param::Numeric {
                id,
                label,
                kind,
                min,
                max,
                default,
            })
        }
    }
}

/// Loose numeric coercion for `min`/`max`/`default` on numeric params.
///
/// A missing key yields NaN (so the caller's finiteness check or midpoint
/// fallback kicks in), `null` yields 0, booleans map to 0/1, and strings are
/// trimmed and parsed (an empty or whitespace-only string is 0). Arrays and
/// objects never coerce.
pub(crate) fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

/// Truthiness for the `bool` param default: absent, `null`, `false`, `0`,
/// `-0`, and `""` are false; every other value (including any array or
/// object) is true.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
