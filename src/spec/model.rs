use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Engine sentinel used when a spec does not name one.
pub const DEFAULT_ENGINE: &str = "auto";

/// Control type assigned when a param does not declare one.
pub const DEFAULT_PARAM_TYPE: &str = "knob";

/// A fully normalized plugin specification.
///
/// Constructed fresh on every pipeline invocation and never mutated after; the
/// caller owns it outright. Serializes to the wire shape the analyze API and
/// the header generator both consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    /// Non-empty plugin name.
    pub name: String,
    /// Target synthesis engine; [`DEFAULT_ENGINE`] when the source spec left
    /// it out.
    pub engine: String,
    /// Parameters in declaration order (the order drives UI layout downstream).
    ///
    /// Ids are not checked for uniqueness here; consumers that key on id (the
    /// header generator emits one row per entry) inherit whatever the source
    /// spec declared.
    pub params: Vec<Param>,
}

/// One normalized parameter, tagged by its `type` string on the wire.
///
/// `bool` and `enum` select their variants exactly; every other type string
/// (`knob`, `slider`, or anything unrecognized) is a numeric control and keeps
/// its declared string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ParamRepr", try_from = "ParamRepr")]
pub enum Param {
    /// Continuous control: `knob`, `slider`, or any other type string.
    Numeric {
        id: String,
        label: String,
        kind: String,
        min: f64,
        max: f64,
        default: f64,
    },
    /// On/off switch (`type: "bool"`).
    Bool {
        id: String,
        label: String,
        default: bool,
    },
    /// One-of-N selection (`type: "enum"`). `options` is never empty; the
    /// default is not required to be a member of `options` when the source
    /// spec supplied one explicitly.
    Enum {
        id: String,
        label: String,
        options: Vec<Value>,
        default: Value,
    },
}

impl Param {
    pub fn id(&self) -> &str {
        match self {
            Param::Numeric { id, .. } | Param::Bool { id, .. } | Param::Enum { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Param::Numeric { label, .. }
            | Param::Bool { label, .. }
            | Param::Enum { label, .. } => label,
        }
    }

    /// The `type` string this param carries on the wire.
    pub fn type_name(&self) -> &str {
        match self {
            Param::Numeric { kind, .. } => kind,
            Param::Bool { .. } => "bool",
            Param::Enum { .. } => "enum",
        }
    }
}

/// Wire shape shared by all three variants. `Param` round-trips through this
/// so the open-ended `type` tag (any string that is not `bool`/`enum` is
/// numeric) stays representable.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ParamRepr {
    id: String,
    label: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<Value>>,
    default: Value,
}

impl From<Param> for ParamRepr {
    fn from(param: Param) -> Self {
        match param {
            Param::Numeric {
                id,
                label,
                kind,
                min,
                max,
                default,
            } => ParamRepr {
                id,
                label,
                kind,
                min: Some(min),
                max: Some(max),
                options: None,
                default: Value::from(default),
            },
            Param::Bool { id, label, default } => ParamRepr {
                id,
                label,
                kind: "bool".to_string(),
                min: None,
                max: None,
                options: None,
                default: Value::Bool(default),
            },
            Param::Enum {
                id,
                label,
                options,
                default,
            } => ParamRepr {
                id,
                label,
                kind: "enum".to_string(),
                min: None,
                max: None,
                options: Some(options),
                default,
            },
        }
    }
}

impl TryFrom<ParamRepr> for Param {
    type Error = String;

    fn try_from(repr: ParamRepr) -> Result<Self, Self::Error> {
        let ParamRepr {
            id,
            label,
            kind,
            min,
            max,
            options,
            default,
        } = repr;

        match kind.as_str() {
            "bool" => {
                let default = default
                    .as_bool()
                    .ok_or_else(|| format!("param '{id}': bool default must be a boolean"))?;
                Ok(Param::Bool { id, label, default })
            }
            "enum" => {
                let options = options
                    .filter(|opts| !opts.is_empty())
                    .ok_or_else(|| format!("param '{id}': enum requires non-empty 'options'"))?;
                Ok(Param::Enum {
                    id,
                    label,
                    options,
                    default,
                })
            }
            _ => {
                let min = min.ok_or_else(|| format!("param '{id}': missing numeric 'min'"))?;
                let max = max.ok_or_else(|| format!("param '{id}': missing numeric 'max'"))?;
                let default = default
                    .as_f64()
                    .ok_or_else(|| format!("param '{id}': numeric default must be a number"))?;
                if !min.is_finite() || !max.is_finite() || !default.is_finite() {
                    return Err(format!("param '{id}': min/max/default must be finite"));
                }
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
}
