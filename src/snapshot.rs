//! Host binding backed by a metadata snapshot file.
//!
//! A snapshot captures everything the pipeline asks a host for, in YAML or
//! JSON:
//!
//! ```yaml
//! application: Shakespeare
//! routes:
//!   - { controller: api/characters, action: index, verb: GET, path: "/api/characters(.:format)" }
//! models:
//!   - name: Character
//!     serializer: CharacterSerializer
//!     columns: { id: integer, name: string }
//! serializers:
//!   - name: CharacterSerializer
//!     model: Character
//!     attributes: { id: integer, name: string }
//!     associations:
//!       - { name: quotes, kind: has_many, class_name: Quote }
//! controllers:
//!   - path: api/characters
//!     class: Api::CharactersController
//!     permitted_params:
//!       - character: [name, { aliases: [label] }]
//!     scopes:
//!       - { name: by_name, type: default }
//! ```

use crate::files::read_document;
use crate::host::{
    AssociationDescriptor, Cardinality, ControllerParameterSource, HostRoute, ModelSchemaSource,
    PermittedParam, RouteSource, ScopeDefinition, SerializerDescriptor, SerializerSource,
};
use anyhow::Result;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// In-memory host metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostSnapshot {
    #[serde(default)]
    pub application: Option<String>,
    #[serde(default)]
    pub routes: Vec<SnapshotRoute>,
    #[serde(default)]
    pub models: Vec<SnapshotModel>,
    #[serde(default)]
    pub serializers: Vec<SnapshotSerializer>,
    #[serde(default)]
    pub controllers: Vec<SnapshotController>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRoute {
    #[serde(default)]
    pub controller: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub verb: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotModel {
    pub name: String,
    #[serde(default)]
    pub serializer: Option<String>,
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotSerializer {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    /// Kept as a JSON map so declaration order survives
    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,
    #[serde(default)]
    pub associations: Vec<SnapshotAssociation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    HasMany,
    HasOne,
    BelongsTo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotAssociation {
    pub name: String,
    pub kind: AssociationKind,
    #[serde(default)]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotController {
    pub path: String,
    #[serde(default, rename = "class")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub permitted_params: Option<Vec<SnapshotParam>>,
    #[serde(default)]
    pub scopes: Vec<SnapshotScope>,
}

/// `name` or `{ group: [..] }`; group keys keep their declaration order
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SnapshotParam {
    Attribute(String),
    Group(serde_json::Map<String, Value>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotScope {
    pub name: String,
    #[serde(default = "default_scope_type", rename = "type")]
    pub scope_type: String,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub using: Vec<String>,
}

fn default_scope_type() -> String {
    "default".to_string()
}

impl HostSnapshot {
    /// Load a snapshot from a YAML or JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        read_document(path)
    }

    fn model(&self, name: &str) -> Option<&SnapshotModel> {
        self.models.iter().find(|m| m.name == name)
    }

    fn controller(&self, path: &str) -> Option<&SnapshotController> {
        self.controllers.iter().find(|c| c.path == path)
    }
}

impl RouteSource for HostSnapshot {
    fn routes(&self) -> Vec<HostRoute> {
        self.routes
            .iter()
            .map(|r| HostRoute {
                controller: r.controller.clone(),
                action: r.action.clone(),
                verb: r.verb.clone(),
                path: r.path.clone(),
            })
            .collect()
    }

    fn application_name(&self) -> Option<String> {
        self.application.clone()
    }
}

impl ModelSchemaSource for HostSnapshot {
    fn resolve_model(&self, name: &str) -> Option<String> {
        self.model(name).map(|m| m.name.clone())
    }

    fn column_type(&self, model: &str, column: &str) -> Option<String> {
        self.model(model)?.columns.get(column).cloned()
    }
}

impl SerializerSource for HostSnapshot {
    fn serializers(&self) -> Vec<SerializerDescriptor> {
        self.serializers
            .iter()
            .map(|s| SerializerDescriptor {
                name: s.name.clone(),
                model: s.model.clone(),
                attributes: s
                    .attributes
                    .iter()
                    .map(|(name, declared)| (name.clone(), value_text(declared)))
                    .collect(),
                associations: s
                    .associations
                    .iter()
                    .map(|a| AssociationDescriptor {
                        name: a.name.clone(),
                        cardinality: match a.kind {
                            AssociationKind::HasMany => Cardinality::Many,
                            AssociationKind::HasOne | AssociationKind::BelongsTo => {
                                Cardinality::One
                            }
                        },
                        class_name: a.class_name.clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    fn serializer_for(&self, model: &str) -> Option<String> {
        self.model(model)?.serializer.clone()
    }
}

impl ControllerParameterSource for HostSnapshot {
    fn resolve_controller(&self, path: &str) -> Option<String> {
        self.controller(path)?.class_name.clone()
    }

    fn permitted_params(&self, path: &str) -> Option<Vec<PermittedParam>> {
        let params = self.controller(path)?.permitted_params.as_ref()?;
        Some(convert_params(params))
    }

    fn scopes(&self, path: &str) -> Vec<ScopeDefinition> {
        self.controller(path)
            .map(|c| {
                c.scopes
                    .iter()
                    .map(|s| ScopeDefinition {
                        name: s.name.clone(),
                        scope_type: s.scope_type.clone(),
                        default: s.default.as_ref().map(value_text),
                        using: s.using.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn convert_params(params: &[SnapshotParam]) -> Vec<PermittedParam> {
    params
        .iter()
        .flat_map(|param| match param {
            SnapshotParam::Attribute(name) => vec![PermittedParam::Attribute(name.clone())],
            SnapshotParam::Group(groups) => groups
                .iter()
                .map(|(name, children)| PermittedParam::Group {
                    name: name.clone(),
                    attributes: params_from_value(children),
                })
                .collect(),
        })
        .collect()
}

/// Nested group contents: a list of names and groups, or a single name
fn params_from_value(value: &Value) -> Vec<PermittedParam> {
    match value {
        Value::String(name) => vec![PermittedParam::Attribute(name.clone())],
        Value::Array(items) => items.iter().flat_map(params_from_value).collect(),
        Value::Object(groups) => groups
            .iter()
            .map(|(name, children)| PermittedParam::Group {
                name: name.clone(),
                attributes: params_from_value(children),
            })
            .collect(),
        other => {
            debug!("Ignoring permitted parameter entry {}", other);
            Vec::new()
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
