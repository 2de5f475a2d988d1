//! Reading pipeline definitions and input data from disk

use super::{Pipeline, PipelineInput};
use crate::error::{PipelineError, Result};
use std::path::Path;
use tracing::debug;

/// Parse a pipeline from TOML content
pub fn parse_pipeline_toml(content: &str) -> Result<Pipeline> {
    Ok(toml::from_str(content)?)
}

/// Parse a pipeline from JSON content
pub fn parse_pipeline_json(content: &str) -> Result<Pipeline> {
    Ok(serde_json::from_str(content)?)
}

/// Parse input data: a JSON array becomes a sequence, a JSON object a mapping
pub fn parse_input(content: &str) -> Result<PipelineInput> {
    serde_json::from_str(content).map_err(PipelineError::InvalidInput)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a pipeline file, choosing the format from its extension
pub fn load_pipeline(path: &Path) -> Result<Pipeline> {
    let parse: fn(&str) -> Result<Pipeline> = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_pipeline_toml,
        Some("json") => parse_pipeline_json,
        _ => {
            return Err(PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let content = read(path)?;
    let pipeline = parse(&content)?;
    debug!(
        path = %path.display(),
        steps = pipeline.steps.len(),
        "Loaded pipeline"
    );
    Ok(pipeline)
}

/// Load JSON input data from a file
pub fn load_input(path: &Path) -> Result<PipelineInput> {
    parse_input(&read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Combine, MapFn, Predicate, ReduceStep, Step};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const CHAINED_TOML: &str = r#"
name = "chained"

[[steps]]
map = { add = 1 }

[[steps]]
filter = { divisible_by = 3 }

[[steps]]
reduce = { combine = "sum", seed = 0 }
"#;

    #[test]
    fn test_parse_toml_pipeline() {
        let pipeline = parse_pipeline_toml(CHAINED_TOML).unwrap();
        assert_eq!(pipeline.name.as_deref(), Some("chained"));
        assert_eq!(
            pipeline.steps,
            vec![
                Step::Map(MapFn::Add(1.into())),
                Step::Filter(Predicate::DivisibleBy(3)),
                Step::Reduce(ReduceStep {
                    combine: Combine::Sum,
                    seed: Some(json!(0)),
                }),
            ]
        );
    }

    #[test]
    fn test_parse_toml_unit_ops_and_ranges() {
        let content = r#"
[[steps]]
map = "square"

[[steps]]
filter = { in_range = { lo = 4, hi = 6 } }

[[steps]]
reduce = { combine = { join = " " } }
"#;
        let pipeline = parse_pipeline_toml(content).unwrap();
        assert_eq!(pipeline.steps[0], Step::Map(MapFn::Square));
        assert_eq!(
            pipeline.steps[1],
            Step::Filter(Predicate::InRange { lo: 4.0, hi: 6.0 })
        );
        assert_eq!(
            pipeline.steps[2],
            Step::Reduce(ReduceStep {
                combine: Combine::Join(" ".to_string()),
                seed: None,
            })
        );
    }

    #[test]
    fn test_parse_json_pipeline() {
        let content = r#"{
            "steps": [
                {"map": {"prefix": "Call me "}},
                {"filter": {"ends_with": "l"}}
            ]
        }"#;
        let pipeline = parse_pipeline_json(content).unwrap();
        assert_eq!(pipeline.summary(), vec!["map prefix", "filter ends_with"]);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_pipeline_toml("[[steps]]\nmap = \"cube\"").unwrap_err();
        assert!(matches!(err, PipelineError::Toml(_)));
    }

    #[test]
    fn test_load_pipeline_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let toml_path = temp_dir.path().join("chained.toml");
        fs::write(&toml_path, CHAINED_TOML).unwrap();
        assert_eq!(load_pipeline(&toml_path).unwrap().steps.len(), 3);

        let json_path = temp_dir.path().join("square.json");
        fs::write(&json_path, r#"{"steps": [{"map": "square"}]}"#).unwrap();
        assert_eq!(load_pipeline(&json_path).unwrap().summary(), vec!["map square"]);
    }

    #[test]
    fn test_malformed_json_pipeline_is_a_definition_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, r#"{"steps": [{"map": "square"}"#).unwrap();
        let err = load_pipeline(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
        assert!(err.is_definition_error());

        let err = parse_input("[1, 2").unwrap_err();
        assert!(!err.is_definition_error());
    }

    #[test]
    fn test_load_pipeline_unsupported_extension() {
        let err = load_pipeline(Path::new("pipeline.yaml")).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_pipeline_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_pipeline(&temp_dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn test_load_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("values.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert_eq!(
            load_input(&path).unwrap(),
            PipelineInput::Sequence(vec![json!(1), json!(2), json!(3)])
        );
    }

    #[test]
    fn test_parse_input_rejects_scalars() {
        assert!(matches!(parse_input("42"), Err(PipelineError::InvalidInput(_))));
    }
}
