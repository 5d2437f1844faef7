//! Documentation records built during one generation run.
//!
//! Every record moves through the same steps: created empty, filled by the
//! interrogators, optionally handed once to an override callback, then
//! fallback-filled. Fields an override sets explicitly are `Some` by the time
//! fallback-filling runs, and fallback-filling only ever fills `None`s.

use crate::interrogation::{self, Interrogator};
use crate::presenter::ShapeMap;
use crate::registry::ActionHook;
use crate::render::RendererKind;
use crate::toc::TocEntry;
use std::collections::HashMap;
use std::fmt;

/// Run-wide settings.
pub struct GlobalConfig {
    /// Document title; falls back to the `global_header` translation
    pub title: Option<String>,
    /// Entries placed at the top of the table of contents
    pub toc: Vec<TocEntry>,
    /// Free text placed after the table of contents
    pub preamble: Option<String>,
    /// Controller path prefixes in scope, without trailing separator
    pub namespaces: Vec<String>,
    pub app_name: String,
    pub renderer: RendererKind,
    /// Serializer class names never documented
    pub excluded_serializers: Vec<String>,
    /// Interrogators, run in order at every stage
    pub interrogators: Vec<Box<dyn Interrogator>>,
}

impl GlobalConfig {
    pub fn new(app_name: &str) -> Self {
        Self {
            title: None,
            toc: Vec::new(),
            preamble: None,
            namespaces: Vec::new(),
            app_name: app_name.to_string(),
            renderer: RendererKind::default(),
            excluded_serializers: Vec::new(),
            interrogators: interrogation::default_interrogators(),
        }
    }

    /// The namespace prefix `controller` falls under, if any
    pub fn namespace_of(&self, controller: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .map(String::as_str)
            .find(|ns| {
                controller
                    .strip_prefix(ns)
                    .map_or(false, |rest| rest.starts_with('/'))
            })
    }
}

impl fmt::Debug for GlobalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalConfig")
            .field("title", &self.title)
            .field("toc", &self.toc)
            .field("preamble", &self.preamble)
            .field("namespaces", &self.namespaces)
            .field("app_name", &self.app_name)
            .field("renderer", &self.renderer)
            .field("excluded_serializers", &self.excluded_serializers)
            .field("interrogators", &self.interrogators.len())
            .finish()
    }
}

/// A route in a documented namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub controller_path: String,
    pub action: String,
    /// Verb with regex anchors removed
    pub verb: String,
    /// Path spec as declared by the host
    pub path: String,
}

/// A serializer resolved to its model class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub resource_class: String,
    pub serializer: String,
    /// Underscored serializer name without the `_serializer` suffix
    pub configuration_name: String,
}

/// Documentation record for one serializer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SerializerConfig {
    /// Key override callbacks are registered under
    pub configuration_name: String,
    /// Qualified serializer class name; also the document anchor
    pub serializer: String,
    pub resource_name: String,
    pub resource_class: String,
    /// Attribute shape collected by interrogation
    pub attributes_for_json: Option<ShapeMap>,
    /// Documented shape
    pub json: Option<ShapeMap>,
    pub notes: Option<String>,
    pub nodoc: bool,
}

/// Documentation record for one controller.
#[derive(Debug, Default)]
pub struct ControllerConfig {
    /// Controller path, unique within a run; also the document anchor
    pub path: String,
    pub resource_name: String,
    pub resource_class: Option<String>,
    pub controller_class: Option<String>,
    /// Serializer this controller's JSON shape comes from
    pub serializer: Option<String>,
    pub attributes_for_json: Option<ShapeMap>,
    pub attributes_for_permitted_params: Option<ShapeMap>,
    pub json: Option<ShapeMap>,
    pub permitted_params: Option<ShapeMap>,
    pub notes: Option<String>,
    pub nodoc: bool,
    pub actions: Vec<ActionConfig>,
    action_hooks: ActionHooks,
}

impl ControllerConfig {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }

    /// Register an override for one of this controller's actions.
    ///
    /// Meant to be called from the controller's own override callback; it
    /// takes precedence over a `path#action` registration.
    pub fn action<F>(&mut self, name: &str, hook: F) -> &mut Self
    where
        F: Fn(&mut ActionConfig) + Send + Sync + 'static,
    {
        self.action_hooks.0.insert(name.to_string(), Box::new(hook));
        self
    }

    pub(crate) fn action_hook(&self, name: &str) -> Option<&ActionHook> {
        self.action_hooks.0.get(name)
    }
}

#[derive(Default)]
struct ActionHooks(HashMap<String, ActionHook>);

impl fmt::Debug for ActionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.0.keys().collect();
        names.sort();
        f.debug_list().entries(names).finish()
    }
}

/// Documentation record for one action of a controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionConfig {
    pub action: String,
    pub description: Option<String>,
    pub verb: String,
    /// Path spec with the format placeholder rewritten to `.json`
    pub pathspec: String,
    /// Path of the owning controller
    pub controller_path: String,
    pub notes: Option<String>,
    /// GET parameter name to description; index actions only
    pub scopes: Vec<(String, Option<String>)>,
    pub nodoc: bool,
}

impl ActionConfig {
    pub fn new(controller_path: &str) -> Self {
        Self {
            controller_path: controller_path.to_string(),
            ..Default::default()
        }
    }

    /// Anchor of this action in the rendered document
    pub fn anchor(&self) -> String {
        format!("{}.{}", self.controller_path, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_of_requires_separator() {
        let mut global = GlobalConfig::new("Demo");
        global.namespaces = vec!["api".to_string(), "admin".to_string()];

        assert_eq!(global.namespace_of("api/widgets"), Some("api"));
        assert_eq!(global.namespace_of("admin/users"), Some("admin"));
        assert_eq!(global.namespace_of("apiary/bees"), None);
        assert_eq!(global.namespace_of("api"), None);
    }

    #[test]
    fn test_action_anchor() {
        let mut action = ActionConfig::new("api/widgets");
        action.action = "index".to_string();
        assert_eq!(action.anchor(), "api/widgets.index");
    }

    #[test]
    fn test_controller_local_action_hooks() {
        let mut controller = ControllerConfig::new("api/widgets");
        controller.action("index", |a| a.nodoc = true);

        let mut action = ActionConfig::new("api/widgets");
        let hook = controller.action_hook("index").unwrap();
        hook(&mut action);

        assert!(action.nodoc);
        assert!(controller.action_hook("show").is_none());
        assert_eq!(format!("{:?}", controller.action_hooks), "[\"index\"]");
    }
}
