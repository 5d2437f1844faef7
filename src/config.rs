//! Documentation config file.
//!
//! The file carries global settings plus declarative overrides keyed the same
//! way the override DSL keys its callbacks:
//!
//! ```yaml
//! title: Shakespeare API
//! namespaces: [api]
//! excluded_serializers: [InternalSerializer]
//! controllers:
//!   api/characters:
//!     notes: Characters appear in works.
//!     actions:
//!       destroy: { nodoc: true }
//! serializers:
//!   quote:
//!     json: { text: string }
//! ```
//!
//! [`DocConfig::register`] turns every entry into an ordinary callback, so a
//! file-driven override behaves exactly like one registered in code.

use crate::configuration::{ActionConfig, ControllerConfig, GlobalConfig, SerializerConfig};
use crate::files::read_document;
use crate::presenter::ShapeMap;
use crate::registry::Registry;
use crate::render::RendererKind;
use crate::toc::TocEntry;
use anyhow::Result;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level config document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    pub title: Option<String>,
    pub app_name: Option<String>,
    pub preamble: Option<String>,
    pub namespaces: Vec<String>,
    pub toc: Vec<TocEntry>,
    pub renderer: Option<RendererKind>,
    pub excluded_serializers: Vec<String>,
    /// Keyed by full controller path
    pub controllers: BTreeMap<String, ControllerOverride>,
    /// Keyed by serializer configuration name
    pub serializers: BTreeMap<String, SerializerOverride>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ControllerOverride {
    pub notes: Option<String>,
    pub nodoc: Option<bool>,
    pub serializer: Option<String>,
    pub json: Option<Value>,
    pub permitted_params: Option<Value>,
    pub actions: BTreeMap<String, ActionOverride>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionOverride {
    pub description: Option<String>,
    pub notes: Option<String>,
    pub nodoc: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SerializerOverride {
    pub notes: Option<String>,
    pub nodoc: Option<bool>,
    pub json: Option<Value>,
}

impl DocConfig {
    /// Load a config file, YAML or JSON by extension
    pub fn from_path(path: &Path) -> Result<Self> {
        read_document(path)
    }

    /// A registry holding only this config's callbacks
    pub fn into_registry(self) -> Registry {
        let mut registry = Registry::new();
        self.register(&mut registry);
        registry
    }

    /// Register every setting and override as a callback.
    pub fn register(self, registry: &mut Registry) {
        for namespace in &self.namespaces {
            registry.namespace(namespace, |_| {});
        }

        let global = GlobalSettings {
            title: self.title,
            app_name: self.app_name,
            preamble: self.preamble,
            toc: self.toc,
            renderer: self.renderer,
            excluded_serializers: self.excluded_serializers,
        };
        registry.global(move |g| global.apply(g));

        for (name, over) in self.serializers {
            debug!("Config override for serializer {}", name);
            let json = over.json.as_ref().map(ShapeMap::from_json);
            registry.serializer(&name, move |s| over.apply(s, json.as_ref()));
        }

        for (path, mut over) in self.controllers {
            debug!("Config override for controller {}", path);
            let actions = std::mem::take(&mut over.actions);
            let json = over.json.as_ref().map(ShapeMap::from_json);
            let permitted = over.permitted_params.as_ref().map(ShapeMap::from_json);

            let mut scope = registry.controller(&path, move |c| {
                over.apply(c, json.as_ref(), permitted.as_ref())
            });
            for (action, action_over) in actions {
                scope = scope.action(&action, move |a| action_over.apply(a));
            }
        }
    }
}

struct GlobalSettings {
    title: Option<String>,
    app_name: Option<String>,
    preamble: Option<String>,
    toc: Vec<TocEntry>,
    renderer: Option<RendererKind>,
    excluded_serializers: Vec<String>,
}

impl GlobalSettings {
    fn apply(&self, global: &mut GlobalConfig) {
        if let Some(title) = &self.title {
            global.title = Some(title.clone());
        }
        if let Some(app_name) = &self.app_name {
            global.app_name = app_name.clone();
        }
        if let Some(preamble) = &self.preamble {
            global.preamble = Some(preamble.clone());
        }
        if let Some(renderer) = self.renderer {
            global.renderer = renderer;
        }
        global.toc.extend(self.toc.iter().cloned());
        global
            .excluded_serializers
            .extend(self.excluded_serializers.iter().cloned());
    }
}

impl SerializerOverride {
    fn apply(&self, config: &mut SerializerConfig, json: Option<&ShapeMap>) {
        if let Some(notes) = &self.notes {
            config.notes = Some(notes.clone());
        }
        if let Some(nodoc) = self.nodoc {
            config.nodoc = nodoc;
        }
        if let Some(json) = json {
            config.json = Some(json.clone());
        }
    }
}

impl ControllerOverride {
    fn apply(
        &self,
        config: &mut ControllerConfig,
        json: Option<&ShapeMap>,
        permitted: Option<&ShapeMap>,
    ) {
        if let Some(notes) = &self.notes {
            config.notes = Some(notes.clone());
        }
        if let Some(nodoc) = self.nodoc {
            config.nodoc = nodoc;
        }
        if let Some(serializer) = &self.serializer {
            config.serializer = Some(serializer.clone());
        }
        if let Some(json) = json {
            config.json = Some(json.clone());
        }
        if let Some(permitted) = permitted {
            config.permitted_params = Some(permitted.clone());
        }
    }
}

impl ActionOverride {
    fn apply(&self, config: &mut ActionConfig) {
        if let Some(description) = &self.description {
            config.description = Some(description.clone());
        }
        if let Some(notes) = &self.notes {
            config.notes = Some(notes.clone());
        }
        if let Some(nodoc) = self.nodoc {
            config.nodoc = nodoc;
        }
    }
}
