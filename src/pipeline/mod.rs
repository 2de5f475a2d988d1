//! Declarative map/filter/reduce pipelines over JSON values
//!
//! A pipeline is an ordered list of steps, each one a single call into the
//! core primitives. Steps never fuse: every `map` and `filter` produces a new
//! collection that the next step reads.
//!
//! ```toml
//! name = "chained"
//!
//! [[steps]]
//! map = { add = 1 }
//!
//! [[steps]]
//! filter = { divisible_by = 3 }
//!
//! [[steps]]
//! reduce = { combine = "sum", seed = 0 }
//! ```

pub mod loader;
pub mod ops;

pub use loader::{load_input, load_pipeline, parse_input, parse_pipeline_json, parse_pipeline_toml};
pub use ops::{Combine, MapFn, OpError, Predicate};

use crate::core::{try_filter_assoc, try_filter_seq, try_map_assoc, try_map_seq, try_reduce_seq};
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, trace};

/// A reduce step: how to combine, and where to start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReduceStep {
    pub combine: Combine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<Value>,
}

impl ReduceStep {
    /// The configured seed, or the combine function's natural one
    pub fn seed(&self) -> Value {
        self.seed
            .clone()
            .unwrap_or_else(|| self.combine.default_seed())
    }
}

/// One pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Map(MapFn),
    Filter(Predicate),
    Reduce(ReduceStep),
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Self::Map(f) => format!("map {}", f.name()),
            Self::Filter(p) => format!("filter {}", p.name()),
            Self::Reduce(r) => format!("reduce {}", r.combine.name()),
        }
    }

    pub fn is_reduce(&self) -> bool {
        matches!(self, Self::Reduce(_))
    }
}

/// Data a pipeline starts from: a JSON array or a JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PipelineInput {
    Sequence(Vec<Value>),
    Mapping(HashMap<String, Value>),
}

/// What a pipeline produces
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutput {
    Sequence(Vec<Value>),
    Mapping(HashMap<String, Value>),
    Value(Value),
}

impl PipelineOutput {
    /// Render as JSON; mapping keys come out sorted
    pub fn to_json(&self) -> Value {
        match self {
            Self::Sequence(items) => Value::Array(items.clone()),
            Self::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            Self::Value(value) => value.clone(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Value(_) => "value",
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Sequence(items) => items.len(),
            Self::Mapping(entries) => entries.len(),
            Self::Value(_) => 1,
        }
    }
}

impl From<PipelineInput> for PipelineOutput {
    fn from(input: PipelineInput) -> Self {
        match input {
            PipelineInput::Sequence(items) => Self::Sequence(items),
            PipelineInput::Mapping(entries) => Self::Mapping(entries),
        }
    }
}

/// An ordered list of steps, optionally ending in one reduce
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { name: None, steps }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check the step list is runnable: non-empty, and reduce only in last position
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(PipelineError::EmptyPipeline);
        }
        let len = self.steps.len();
        if let Some(position) = self.steps[..len - 1].iter().position(Step::is_reduce) {
            return Err(PipelineError::ReduceNotLast { position, len });
        }
        Ok(())
    }

    /// One line per step, e.g. `map add`
    pub fn summary(&self) -> Vec<String> {
        self.steps.iter().map(Step::describe).collect()
    }

    /// Run every step in order, stopping at the first failing element
    pub fn run(&self, input: PipelineInput) -> Result<PipelineOutput> {
        self.validate()?;

        let mut current = PipelineOutput::from(input);
        for (index, step) in self.steps.iter().enumerate() {
            debug!(
                step = index,
                op = %step.describe(),
                input = current.kind(),
                len = current.len(),
                "Running pipeline step"
            );
            current = run_step(index, step, current)?;
            trace!(step = index, output = current.kind(), len = current.len(), "Step finished");
        }
        Ok(current)
    }
}

fn run_step(index: usize, step: &Step, current: PipelineOutput) -> Result<PipelineOutput> {
    let seq_err = |source| PipelineError::Step {
        step: index,
        source,
    };
    let entry_err = |source| PipelineError::EntryStep {
        step: index,
        source,
    };

    match (current, step) {
        (PipelineOutput::Sequence(items), Step::Map(f)) => {
            let mapped = try_map_seq(&items, |v| f.apply(v)).map_err(seq_err)?;
            Ok(PipelineOutput::Sequence(mapped))
        }
        (PipelineOutput::Sequence(items), Step::Filter(p)) => {
            let kept = try_filter_seq(&items, |v| p.test(v)).map_err(seq_err)?;
            Ok(PipelineOutput::Sequence(kept))
        }
        (PipelineOutput::Sequence(items), Step::Reduce(r)) => {
            let folded = try_reduce_seq(&items, r.seed(), |acc, v| r.combine.combine(acc, v))
                .map_err(seq_err)?;
            Ok(PipelineOutput::Value(folded))
        }
        (PipelineOutput::Mapping(entries), Step::Map(f)) => {
            let mapped = try_map_assoc(&entries, |v| f.apply(v)).map_err(entry_err)?;
            Ok(PipelineOutput::Mapping(mapped))
        }
        (PipelineOutput::Mapping(entries), Step::Filter(p)) => {
            let kept = try_filter_assoc(&entries, |v| p.test(v)).map_err(entry_err)?;
            Ok(PipelineOutput::Mapping(kept))
        }
        (PipelineOutput::Mapping(_), Step::Reduce(_)) => {
            Err(PipelineError::ReduceOnMapping { step: index })
        }
        // validate() keeps reduce in last position, so nothing follows a single value
        (PipelineOutput::Value(_), _) => Err(PipelineError::ReduceNotLast {
            position: index.saturating_sub(1),
            len: index + 1,
        }),
    }
}
