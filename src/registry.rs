//! Override callbacks registered before a run.
//!
//! The registry is filled through a small DSL and then only read while the
//! pipeline runs:
//!
//! ```
//! use apidoc_from_metadata::registry::Registry;
//!
//! let mut registry = Registry::new();
//! registry.global(|g| g.title = Some("Library API".to_string()));
//! registry.namespace("api", |ns| {
//!     ns.controller("characters", |c| c.notes = Some("Read only.".to_string()))
//!         .action("destroy", |a| a.nodoc = true);
//! });
//! registry.serializer("quote", |s| s.nodoc = true);
//! ```
//!
//! Each entity has at most one callback; registering again under the same key
//! replaces the earlier one.

use crate::configuration::{ActionConfig, ControllerConfig, GlobalConfig, SerializerConfig};
use log::debug;
use std::collections::HashMap;

pub type GlobalHook = Box<dyn Fn(&mut GlobalConfig) + Send + Sync>;
pub type SerializerHook = Box<dyn Fn(&mut SerializerConfig) + Send + Sync>;
pub type ControllerHook = Box<dyn Fn(&mut ControllerConfig) + Send + Sync>;
pub type ActionHook = Box<dyn Fn(&mut ActionConfig) + Send + Sync>;

/// Name-keyed override callbacks for one configuration.
#[derive(Default)]
pub struct Registry {
    global: Option<GlobalHook>,
    namespaces: Vec<String>,
    controllers: HashMap<String, ControllerHook>,
    serializers: HashMap<String, SerializerHook>,
    /// Keyed by `path#action`
    actions: HashMap<String, ActionHook>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback applied to the run's [`GlobalConfig`]
    pub fn global<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut GlobalConfig) + Send + Sync + 'static,
    {
        self.global = Some(Box::new(hook));
        self
    }

    /// Declare a namespace and register controllers relative to it.
    pub fn namespace<F>(&mut self, name: &str, block: F) -> &mut Self
    where
        F: FnOnce(&mut NamespaceScope<'_>),
    {
        let name = name.trim_end_matches('/').to_string();
        if !self.namespaces.contains(&name) {
            self.namespaces.push(name.clone());
        }
        let mut scope = NamespaceScope {
            registry: self,
            prefix: name,
        };
        block(&mut scope);
        self
    }

    /// Register the callback for the controller at `path`.
    pub fn controller<F>(&mut self, path: &str, hook: F) -> ControllerScope<'_>
    where
        F: Fn(&mut ControllerConfig) + Send + Sync + 'static,
    {
        debug!("Registering controller override: {}", path);
        self.controllers.insert(path.to_string(), Box::new(hook));
        ControllerScope {
            registry: self,
            path: path.to_string(),
        }
    }

    /// Register the callback for the serializer configured as `name`
    pub fn serializer<F>(&mut self, name: &str, hook: F) -> &mut Self
    where
        F: Fn(&mut SerializerConfig) + Send + Sync + 'static,
    {
        debug!("Registering serializer override: {}", name);
        self.serializers.insert(name.to_string(), Box::new(hook));
        self
    }

    /// Register an action callback under its full `path#action` key
    pub fn action<F>(&mut self, key: &str, hook: F) -> &mut Self
    where
        F: Fn(&mut ActionConfig) + Send + Sync + 'static,
    {
        debug!("Registering action override: {}", key);
        self.actions.insert(key.to_string(), Box::new(hook));
        self
    }

    /// Namespaces declared so far, in declaration order
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn global_hook(&self) -> Option<&GlobalHook> {
        self.global.as_ref()
    }

    pub fn controller_hook(&self, path: &str) -> Option<&ControllerHook> {
        self.controllers.get(path)
    }

    pub fn serializer_hook(&self, name: &str) -> Option<&SerializerHook> {
        self.serializers.get(name)
    }

    pub fn action_hook(&self, path: &str, action: &str) -> Option<&ActionHook> {
        self.actions.get(&action_key(path, action))
    }
}

/// Registration scope inside [`Registry::namespace`]
pub struct NamespaceScope<'a> {
    registry: &'a mut Registry,
    prefix: String,
}

impl NamespaceScope<'_> {
    /// Register a controller by its path relative to the namespace
    pub fn controller<F>(&mut self, name: &str, hook: F) -> ControllerScope<'_>
    where
        F: Fn(&mut ControllerConfig) + Send + Sync + 'static,
    {
        let path = format!("{}/{}", self.prefix, name.trim_start_matches('/'));
        self.registry.controller(&path, hook)
    }

    pub fn serializer<F>(&mut self, name: &str, hook: F) -> &mut Self
    where
        F: Fn(&mut SerializerConfig) + Send + Sync + 'static,
    {
        self.registry.serializer(name, hook);
        self
    }
}

/// Registration scope returned by a controller registration, for nesting
/// action callbacks.
pub struct ControllerScope<'a> {
    registry: &'a mut Registry,
    path: String,
}

impl ControllerScope<'_> {
    pub fn action<F>(self, name: &str, hook: F) -> Self
    where
        F: Fn(&mut ActionConfig) + Send + Sync + 'static,
    {
        let key = action_key(&self.path, name);
        self.registry.action(&key, hook);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn action_key(path: &str, action: &str) -> String {
    format!("{}#{}", path, action)
}
