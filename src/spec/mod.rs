//! Plugin spec extraction and normalization.
//!
//! This module is the single source of truth for what counts as a valid plugin
//! spec. It locates the `/* @plugin ... @endplugin */` block inside arbitrary
//! HTML/JS text, parses the payload as JSON, and folds every declared parameter
//! into one of three canonical variants (numeric, bool, enum). Downstream
//! consumers (the analyze API, the header generator) take the canonical form
//! without re-validating.
//!
//! The whole pipeline is pure and does no I/O; it fails fast on the first
//! violated contract.

pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;

pub use error::SpecError;
pub use extract::extract_block;
pub use model::{Param, PluginSpec, DEFAULT_ENGINE, DEFAULT_PARAM_TYPE};
pub use normalize::normalize;

/// Run the full pipeline on raw host text: extract the embedded block, parse
/// it as JSON, and normalize the result into a canonical [`PluginSpec`].
pub fn parse_plugin_spec(text: &str) -> Result<PluginSpec, SpecError> {
    let payload = extract::extract_block(text)?;
    let value: serde_json::Value = serde_json::from_str(payload)?;
    normalize::normalize(&value)
}
