#[cfg(test)]
mod codegen_tests {
    use std::fs;
    use tempfile::tempdir;
    use vstforge::codegen;
    use vstforge::error::{CodegenError, ForgeError};

    const CANONICAL_SPEC: &str = r#"{
  "name": "Dust Synth",
  "engine": "subtractive",
  "params": [
    { "id": "cutoff", "label": "Cutoff", "type": "knob", "min": 20.0, "max": 20000.0, "default": 800.0 },
    { "id": "drive", "label": "drive", "type": "bool", "default": true },
    { "id": "wave", "label": "Wave", "type": "enum", "options": ["saw", "square", "sine"], "default": "square" }
  ]
}"#;

    #[test]
    fn test_generate_writes_header() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("currentSpec.json");
        // Nested path, so generate must create the directories.
        let header_path = dir.path().join("juce-plugin/Source/GeneratedParams.h");

        fs::write(&spec_path, CANONICAL_SPEC).unwrap();

        let written = codegen::generate(&spec_path, &header_path).unwrap();
        assert_eq!(written, header_path);

        let header = fs::read_to_string(&header_path).unwrap();
        assert!(header.contains("//  Plugin: Dust Synth"));
        assert!(header.contains("//  Engine: subtractive"));
        assert!(header.contains("struct HtmlToVstParamSpec {"));
        assert!(header.contains("    { \"cutoff\", \"Cutoff\", \"knob\", 20, 20000, 800 },"));
        assert!(header.contains("    { \"drive\", \"drive\", \"bool\", 0, 1, 1 },"));
        assert!(header.contains("    { \"wave\", \"Wave\", \"enum\", 0, 2, 1 }\n"));
        assert!(header.contains(
            "static constexpr std::size_t kNumHtmlToVstParams = sizeof(kHtmlToVstParams) / sizeof(HtmlToVstParamSpec);"
        ));
    }

    #[test]
    fn test_banner_names_the_spec_file() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("currentSpec.json");
        let header_path = dir.path().join("GeneratedParams.h");
        fs::write(&spec_path, CANONICAL_SPEC).unwrap();

        codegen::generate(&spec_path, &header_path).unwrap();

        let header = fs::read_to_string(&header_path).unwrap();
        assert!(header.contains(&format!("//  Generated from {}", spec_path.display())));
    }

    #[test]
    fn test_missing_spec_file() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("nope.json");
        let header_path = dir.path().join("GeneratedParams.h");

        let err = codegen::generate(&spec_path, &header_path).unwrap_err();
        match err {
            ForgeError::Codegen(CodegenError::SpecFileNotFound(path)) => {
                assert_eq!(path, spec_path)
            }
            other => panic!("expected SpecFileNotFound, got {other:?}"),
        }
        assert!(!header_path.exists());
    }

    #[test]
    fn test_empty_spec_file() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("currentSpec.json");
        let header_path = dir.path().join("GeneratedParams.h");
        fs::write(&spec_path, "   \n\t\n").unwrap();

        let err = codegen::generate(&spec_path, &header_path).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Codegen(CodegenError::SpecFileEmpty(_))
        ));
    }

    #[test]
    fn test_non_canonical_spec_rejected() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("currentSpec.json");
        let header_path = dir.path().join("GeneratedParams.h");
        // An enum with no options can never come out of the pipeline.
        fs::write(
            &spec_path,
            r#"{"name":"X","engine":"auto","params":[{"id":"w","label":"w","type":"enum","options":[],"default":"a"}]}"#,
        )
        .unwrap();

        let err = codegen::generate(&spec_path, &header_path).unwrap_err();
        match &err {
            ForgeError::Codegen(CodegenError::BadSpecFile { path, .. }) => {
                assert_eq!(path, &spec_path)
            }
            other => panic!("expected BadSpecFile, got {other:?}"),
        }
        assert!(err.to_string().contains("not a canonical plugin spec"));
    }

    #[test]
    fn test_pipeline_output_feeds_generator() {
        let dir = tempdir().unwrap();
        let spec = vstforge::spec::parse_plugin_spec(
            "/* @plugin {\"name\":\"Foo\",\"params\":[{\"id\":\"gain\",\"min\":0,\"max\":10}]} @endplugin */",
        )
        .unwrap();

        let spec_path = dir.path().join("spec.json");
        fs::write(&spec_path, serde_json::to_string(&spec).unwrap()).unwrap();

        let header_path = dir.path().join("out/GeneratedParams.h");
        codegen::generate(&spec_path, &header_path).unwrap();

        let header = fs::read_to_string(&header_path).unwrap();
        assert!(header.contains("    { \"gain\", \"gain\", \"knob\", 0, 10, 5 }\n"));
        assert!(header.contains("//  Engine: auto"));
    }

    #[test]
    fn test_empty_params_generate_empty_table() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("spec.json");
        let header_path = dir.path().join("GeneratedParams.h");
        fs::write(
            &spec_path,
            r#"{"name":"Bare","engine":"auto","params":[]}"#,
        )
        .unwrap();

        codegen::generate(&spec_path, &header_path).unwrap();

        let header = fs::read_to_string(&header_path).unwrap();
        assert!(header.contains("kHtmlToVstParams[] = {\n};\n"));
    }
}
