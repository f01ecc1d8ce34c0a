//! Processes, components, and implementations.
//!
//! A `Process` is a named black-box interface; an `Implementation` is
//! one concrete decomposition of it: a framed partial order plus the
//! components realizing its internal elements. These are passive
//! records — the embeddability engine reads only the FPO graph and the
//! components' metadata (through a theory), and never verifies that the
//! FPO boundary matches the process interface.

use crate::fpo::FramedPartialOrder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An abstract causal process: a named input/output interface.
///
/// Purely descriptive; not consumed by the embeddability engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Process {
    pub fn new<I, O>(name: impl Into<String>, inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            name: name.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
            metadata: None,
        }
    }
}

/// One box inside an implementation.
///
/// The metadata is theory-significant but opaque to the kernel, e.g.
/// `{"quantum": true}` for a box a classical theory must reject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether the metadata carries a truthy boolean under `key`.
    pub fn metadata_flag(&self, key: &str) -> bool {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// One concrete decomposition of a process: its FPO plus the components
/// realizing the internal elements.
///
/// The FPO is owned exclusively — no aliasing with any other
/// implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    pub process: Process,
    pub fpo: FramedPartialOrder,
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Implementation {
    pub fn new(process: Process, fpo: FramedPartialOrder) -> Self {
        Self {
            process,
            fpo,
            components: Vec::new(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }
}

/// An ordered collection of implementations of (typically) one process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImplementationSet {
    pub implementations: Vec<Implementation>,
}

impl ImplementationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, implementation: Implementation) {
        self.implementations.push(implementation);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Implementation> {
        self.implementations.iter()
    }

    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }
}
