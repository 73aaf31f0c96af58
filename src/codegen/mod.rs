//! Renders a canonical plugin spec into the C++ parameter header the JUCE
//! build consumes.
//!
//! Pure templating over already-validated data: the spec file is deserialized
//! straight into [`PluginSpec`], which rejects anything the pipeline could not
//! have produced, and no further checks happen here.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CodegenError, Result};
use crate::spec::{Param, PluginSpec};

/// Reads the canonical spec JSON at `spec_path` and writes the generated
/// header to `header_path`, creating parent directories as needed. Returns
/// the written path.
pub fn generate(spec_path: &Path, header_path: &Path) -> Result<PathBuf> {
    if !spec_path.exists() {
        return Err(CodegenError::SpecFileNotFound(spec_path.to_path_buf()).into());
    }

    let raw = fs::read_to_string(spec_path)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CodegenError::SpecFileEmpty(spec_path.to_path_buf()).into());
    }

    let spec: PluginSpec =
        serde_json::from_str(raw).map_err(|source| CodegenError::BadSpecFile {
            path: spec_path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        "Generating JUCE params for \"{}\" (engine: {})",
        spec.name,
        spec.engine
    );
    tracing::info!("Found {} parameter(s).", spec.params.len());

    let header = render_header(&spec, &spec_path.display().to_string());

    if let Some(parent) = header_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(header_path, header)?;

    tracing::info!("Wrote {}", header_path.display());

    Ok(header_path.to_path_buf())
}

/// Renders the header text. `spec_origin` is only echoed into the banner so
/// readers of the generated file know where it came from.
pub fn render_header(spec: &PluginSpec, spec_origin: &str) -> String {
    let mut header = String::new();

    header.push_str("// ===================================================================\n");
    header.push_str("//  AUTO-GENERATED FILE — DO NOT EDIT BY HAND\n");
    header.push_str(&format!("//  Generated from {}\n", spec_origin));
    header.push_str(&format!("//  Plugin: {}\n", spec.name));
    header.push_str(&format!("//  Engine: {}\n", spec.engine));
    header.push_str("// ===================================================================\n");
    header.push('\n');
    header.push_str("#pragma once\n\n");
    header.push_str("#include <cstddef>\n\n");
    header.push_str("struct HtmlToVstParamSpec {\n");
    header.push_str("    const char* id;\n");
    header.push_str("    const char* label;\n");
    header.push_str("    const char* type;   // \"knob\", \"enum\", \"bool\", ...\n");
    header.push_str("    double minValue;\n");
    header.push_str("    double maxValue;\n");
    header.push_str("    double defaultValue;\n");
    header.push_str("};\n\n");

    header.push_str("static constexpr HtmlToVstParamSpec kHtmlToVstParams[] = {\n");

    let count = spec.params.len();
    for (idx, param) in spec.params.iter().enumerate() {
        let (min, max, default) = param_range(param);
        header.push_str(&format!(
            "    {{ \"{}\", \"{}\", \"{}\", {}, {}, {} }}",
            escape(param.id()),
            escape(param.label()),
            escape(param.type_name()),
            min,
            max,
            default
        ));
        header.push_str(if idx == count - 1 { "\n" } else { ",\n" });
    }

    header.push_str("};\n\n");
    header.push_str(
        "static constexpr std::size_t kNumHtmlToVstParams = sizeof(kHtmlToVstParams) / sizeof(HtmlToVstParamSpec);\n",
    );

    header
}

/// Each row carries a numeric (min, max, default) triple regardless of
/// variant: bools map onto 0/1, enums onto 0..N-1 index space.
fn param_range(param: &Param) -> (f64, f64, f64) {
    match param {
        Param::Numeric {
            min, max, default, ..
        } => (*min, *max, *default),
        Param::Bool { default, .. } => (0.0, 1.0, if *default { 1.0 } else { 0.0 }),
        Param::Enum {
            options, default, ..
        } => {
            // A default that matches no option (permitted upstream) lands on
            // index 0.
            let max = options.len().saturating_sub(1) as f64;
            let index = options
                .iter()
                .position(|opt| opt == default)
                .map_or(0.0, |i| i as f64);
            (0.0, max, index)
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('"', "\\\"")
}
