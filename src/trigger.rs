//! Trigger attribution and callback descriptors.
//!
//! Every event this crate moves carries opaque context identifying which
//! user-facing trigger produced it. The context is threaded through envelopes
//! and callback invocations unchanged; this core never interprets it beyond
//! including it in log entries and escalations.

use serde::{Deserialize, Serialize};

/// The UI-layer entity a trigger belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSource {
    /// Stable identifier of the entity.
    pub id: String,
    /// Display name used in diagnostics.
    pub name: String,
}

impl TriggerSource {
    /// Create a trigger source.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Attribution context threaded through every event.
///
/// Carried for error reporting back to the UI layer; opaque to this core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMeta {
    /// Entity the trigger belongs to, when known.
    pub source: Option<TriggerSource>,
    /// Name of the property whose binding fired the trigger.
    pub trigger_property_name: Option<String>,
}

impl TriggerMeta {
    /// Create attribution with both source and property name.
    pub fn new(source: TriggerSource, trigger_property_name: impl Into<String>) -> Self {
        Self {
            source: Some(source),
            trigger_property_name: Some(trigger_property_name.into()),
        }
    }

    /// Create attribution with only a property name.
    pub fn for_property(trigger_property_name: impl Into<String>) -> Self {
        Self {
            source: None,
            trigger_property_name: Some(trigger_property_name.into()),
        }
    }
}

/// The kind of event a trigger fired under.
///
/// Opaque pass-through context: callers define the vocabulary, this core
/// threads it into callback invocations unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType(String);

impl EventType {
    /// Create an event type.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The event type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to user-authored callback logic.
///
/// Resolution and execution are delegated to the callback-execution
/// collaborator; this core only decides *whether* a descriptor is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackDescriptor {
    /// The dynamic binding that names the user logic to run.
    pub binding: String,
}

impl CallbackDescriptor {
    /// Create a descriptor from a dynamic binding.
    pub fn new(binding: impl Into<String>) -> Self {
        Self {
            binding: binding.into(),
        }
    }
}
