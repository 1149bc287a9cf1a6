use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// One `{step, params}` entry of a pipeline document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub step: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl Invocation {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            params: Map::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Accepted pipeline document shapes: a bare list of invocations, or an
/// object with a `pipeline` list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PipelineDocument {
    List(Vec<Invocation>),
    Wrapped { pipeline: Vec<Invocation> },
}

pub fn parse_pipeline(json: &str) -> Result<Vec<Invocation>> {
    let doc: PipelineDocument = serde_json::from_str(json)?;
    Ok(match doc {
        PipelineDocument::List(steps) | PipelineDocument::Wrapped { pipeline: steps } => steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn parses_bare_list() {
        let steps = parse_pipeline(
            r#"[{"step": "brightness", "params": {"factor": 1.2}}, {"step": "rotate"}]"#,
        )
        .unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], Invocation::new("brightness").param("factor", 1.2));
        assert!(steps[1].params.is_empty());
    }

    #[test]
    fn parses_wrapped_document() {
        let steps = parse_pipeline(
            r#"{"pipeline": [{"step": "box_blur", "params": {"kernel_size": 7}}]}"#,
        )
        .unwrap();
        assert_eq!(steps, vec![Invocation::new("box_blur").param("kernel_size", 7)]);
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(parse_pipeline("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_entries_without_step() {
        let err = parse_pipeline(r#"[{"params": {}}]"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
