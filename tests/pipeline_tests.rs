#[cfg(test)]
mod pipeline_tests {
    use serde_json::json;
    use vstforge::spec::{parse_plugin_spec, Param, SpecError};

    // A sketch the way browser editors export them: markup, styles, and the
    // declaration block buried in script among ordinary comments.
    const SKETCH: &str = r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body { background: #111; color: #eee; }
    .knob { width: 64px; height: 64px; }
  </style>
</head>
<body>
  <canvas id="scope"></canvas>
  <script>
    /* Oscillator sketch, exported from the browser editor. */

    /* @plugin
    {
      "name": "Dust Synth",
      "engine": "subtractive",
      "params": [
        { "id": "cutoff", "label": "Cutoff", "type": "knob", "min": 20, "max": 20000, "default": 800 },
        { "id": "resonance", "type": "slider", "min": 0, "max": 1 },
        { "id": "drive", "type": "bool", "default": 1 },
        { "id": "wave", "type": "enum", "options": ["saw", "square", "sine"], "default": "square" }
      ]
    }
    @endplugin */

    const ctx = new AudioContext();
  </script>
</body>
</html>"#;

    #[test]
    fn test_full_sketch_normalizes() {
        let spec = parse_plugin_spec(SKETCH).unwrap();

        assert_eq!(spec.name, "Dust Synth");
        assert_eq!(spec.engine, "subtractive");
        assert_eq!(spec.params.len(), 4);

        assert_eq!(
            spec.params[0],
            Param::Numeric {
                id: "cutoff".to_string(),
                label: "Cutoff".to_string(),
                kind: "knob".to_string(),
                min: 20.0,
                max: 20000.0,
                default: 800.0,
            }
        );

        // No label and no default: falls back to id and midpoint.
        assert_eq!(
            spec.params[1],
            Param::Numeric {
                id: "resonance".to_string(),
                label: "resonance".to_string(),
                kind: "slider".to_string(),
                min: 0.0,
                max: 1.0,
                default: 0.5,
            }
        );

        // Numeric 1 coerces to true.
        assert_eq!(
            spec.params[2],
            Param::Bool {
                id: "drive".to_string(),
                label: "drive".to_string(),
                default: true,
            }
        );

        assert_eq!(
            spec.params[3],
            Param::Enum {
                id: "wave".to_string(),
                label: "wave".to_string(),
                options: vec![json!("saw"), json!("square"), json!("sine")],
                default: json!("square"),
            }
        );
    }

    #[test]
    fn test_ordinary_comments_do_not_match() {
        let text = "<script>/* just a comment */ var x = 1;</script>";
        let err = parse_plugin_spec(text).unwrap_err();
        assert!(matches!(err, SpecError::BlockNotFound));
    }

    #[test]
    fn test_reparsing_serialized_spec_is_identity() {
        let spec = parse_plugin_spec(SKETCH).unwrap();
        let value = serde_json::to_value(&spec).unwrap();
        let again = vstforge::spec::normalize(&value).unwrap();
        assert_eq!(again, spec);
    }

    #[test]
    fn test_params_object_rejected_end_to_end() {
        let text = "/* @plugin {\"name\":\"Foo\",\"params\":{\"gain\":{}}} @endplugin */";
        let err = parse_plugin_spec(text).unwrap_err();
        match err {
            SpecError::InvalidSpec(reason) => assert_eq!(reason, "'params' must be an array"),
            other => panic!("expected InvalidSpec, got {other:?}"),
        }
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        // The HTTP layer surfaces these verbatim; they must name the problem.
        let cases = [
            ("<html></html>", "No @plugin block found in the provided text"),
            (
                "/* @plugin {\"params\":[]} @endplugin */",
                "Invalid plugin spec: missing 'name' (string)",
            ),
            (
                "/* @plugin {\"name\":\"X\",\"params\":[{\"id\":\"g\",\"min\":\"a\",\"max\":1}]} @endplugin */",
                "Invalid param at index 0: 'g' must have numeric 'min' and 'max' for type 'knob'",
            ),
        ];

        for (input, expected) in cases {
            let err = parse_plugin_spec(input).unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }
}
