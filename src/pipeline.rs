//! One documentation run.
//!
//! [`Documenter::build`] walks every entity through interrogate, override,
//! fallback-fill and returns the nodoc-filtered [`Documentation`];
//! [`Documentation::render`] hands it to the configured renderer.

use crate::configuration::{
    ActionConfig, ControllerConfig, GlobalConfig, Resource, Route, SerializerConfig,
};
use crate::error::{Error, Result};
use crate::host::Host;
use crate::inflect::capitalize;
use crate::interrogation::Context;
use crate::registry::Registry;
use crate::render::{create_renderer, DocumentModel};
use crate::translator::{Params, Translator};
use log::{debug, info};

/// Application name used when the host does not report one
const DEFAULT_APP_NAME: &str = "Application";

/// Namespace documented when no registration declared one
const DEFAULT_NAMESPACE: &str = "api";

/// Final documentation model of one run
#[derive(Debug)]
pub struct Documentation {
    pub global: GlobalConfig,
    pub serializers: Vec<SerializerConfig>,
    pub controllers: Vec<ControllerConfig>,
}

impl Documentation {
    /// Render with the renderer selected in the global settings
    pub fn render(&self, translator: &Translator) -> String {
        let model = DocumentModel {
            global: &self.global,
            serializers: &self.serializers,
            controllers: &self.controllers,
        };
        create_renderer(self.global.renderer).render(&model, translator)
    }
}

/// Runs the documentation pipeline against one host.
pub struct Documenter<'a> {
    host: &'a dyn Host,
    registry: &'a Registry,
    translator: &'a Translator,
}

impl<'a> Documenter<'a> {
    pub fn new(host: &'a dyn Host, registry: &'a Registry, translator: &'a Translator) -> Self {
        Self {
            host,
            registry,
            translator,
        }
    }

    /// Build and render the document.
    pub fn generate(&self) -> Result<String> {
        let documentation = self.build()?;
        info!(
            "Rendering {} serializers and {} controllers",
            documentation.serializers.len(),
            documentation.controllers.len()
        );
        Ok(documentation.render(self.translator))
    }

    /// Build the nodoc-filtered documentation model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationContract`] when an entity comes out of
    /// interrogation and overrides without its identifying key.
    pub fn build(&self) -> Result<Documentation> {
        let global = self.global_config();
        debug!("Global settings: {:?}", global);

        let ctx = Context {
            global: &global,
            host: self.host,
            translator: self.translator,
        };

        let routes: Vec<Route> = global
            .interrogators
            .iter()
            .flat_map(|i| i.interrogate_routes(&ctx))
            .collect();
        let resources: Vec<Resource> = global
            .interrogators
            .iter()
            .flat_map(|i| i.interrogate_resources(&ctx))
            .collect();
        info!("Found {} routes and {} serializers", routes.len(), resources.len());

        let serializers = resources
            .iter()
            .map(|resource| self.serializer_config(&ctx, resource))
            .collect::<Result<Vec<_>>>()?;

        let mut controllers = Vec::new();
        for (path, routes) in group_by_controller(&routes) {
            controllers.push(self.controller_config(&ctx, path, &routes, &serializers)?);
        }

        Ok(Documentation {
            global,
            serializers: serializers.into_iter().filter(|s| !s.nodoc).collect(),
            controllers: without_nodoc(controllers),
        })
    }

    fn global_config(&self) -> GlobalConfig {
        let app_name = self
            .host
            .application_name()
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        let mut global = GlobalConfig::new(&app_name);
        global.namespaces = self.registry.namespaces().to_vec();

        if let Some(hook) = self.registry.global_hook() {
            hook(&mut global);
        }

        if global.namespaces.is_empty() {
            global.namespaces.push(DEFAULT_NAMESPACE.to_string());
        }
        if global.title.is_none() {
            let params = Params::new().with("app_name", global.app_name.clone());
            let fallback = format!("{} API", global.app_name);
            global.title = Some(self.translator.text("global_header", &params, &fallback));
        }
        global
    }

    fn serializer_config(&self, ctx: &Context<'_>, resource: &Resource) -> Result<SerializerConfig> {
        let mut config = SerializerConfig::default();
        for interrogator in &ctx.global.interrogators {
            interrogator.interrogate_serializer(ctx, resource, &mut config);
        }
        if config.configuration_name.is_empty() {
            return Err(Error::contract("interrogate_serializer", "configuration_name"));
        }
        if config.serializer.is_empty() {
            return Err(Error::contract("interrogate_serializer", "serializer"));
        }

        if let Some(hook) = self.registry.serializer_hook(&config.configuration_name) {
            debug!("Applying serializer override: {}", config.configuration_name);
            hook(&mut config);
        }

        if config.json.is_none() {
            config.json = config.attributes_for_json.clone();
        }
        Ok(config)
    }

    fn controller_config(
        &self,
        ctx: &Context<'_>,
        path: &str,
        routes: &[&Route],
        serializers: &[SerializerConfig],
    ) -> Result<ControllerConfig> {
        let mut config = ControllerConfig::new(path);
        for interrogator in &ctx.global.interrogators {
            interrogator.interrogate_controller(ctx, path, serializers, &mut config);
        }
        if config.path.is_empty() {
            return Err(Error::contract("interrogate_controller", "path"));
        }

        if let Some(hook) = self.registry.controller_hook(&config.path) {
            debug!("Applying controller override: {}", config.path);
            hook(&mut config);
        }

        if config.json.is_none() {
            config.json = match &config.attributes_for_json {
                Some(attributes) => Some(attributes.clone()),
                None => config
                    .serializer
                    .as_deref()
                    .and_then(|name| serializers.iter().find(|s| s.serializer == name))
                    .and_then(|linked| linked.json.clone()),
            };
        }
        if config.permitted_params.is_none() {
            config.permitted_params = config.attributes_for_permitted_params.clone();
        }

        let actions = routes
            .iter()
            .map(|route| self.action_config(ctx, &config, route))
            .collect::<Result<Vec<_>>>()?;
        config.actions = actions;
        Ok(config)
    }

    fn action_config(
        &self,
        ctx: &Context<'_>,
        controller: &ControllerConfig,
        route: &Route,
    ) -> Result<ActionConfig> {
        let mut config = ActionConfig::new(&controller.path);
        for interrogator in &ctx.global.interrogators {
            interrogator.interrogate_action(ctx, controller, route, &mut config);
        }
        if config.action.is_empty() {
            return Err(Error::contract("interrogate_action", "action"));
        }

        let hook = controller
            .action_hook(&config.action)
            .or_else(|| self.registry.action_hook(&controller.path, &config.action));
        if let Some(hook) = hook {
            debug!("Applying action override: {}", config.anchor());
            hook(&mut config);
        }

        if config.description.is_none() {
            config.description = Some(format!(
                "{} {}",
                capitalize(&config.action),
                controller.resource_name
            ));
        }
        Ok(config)
    }
}

/// Build and render documentation in one call.
pub fn generate(host: &dyn Host, registry: &Registry, translator: &Translator) -> Result<String> {
    Documenter::new(host, registry, translator).generate()
}

/// Routes grouped by controller path, both in first-seen order
fn group_by_controller(routes: &[Route]) -> Vec<(&str, Vec<&Route>)> {
    let mut groups: Vec<(&str, Vec<&Route>)> = Vec::new();
    for route in routes {
        match groups.iter_mut().find(|(path, _)| *path == route.controller_path) {
            Some((_, list)) => list.push(route),
            None => groups.push((route.controller_path.as_str(), vec![route])),
        }
    }
    groups
}

/// Drop nodoc controllers with all their actions, and nodoc actions
fn without_nodoc(controllers: Vec<ControllerConfig>) -> Vec<ControllerConfig> {
    controllers
        .into_iter()
        .filter(|c| {
            if c.nodoc {
                debug!("Excluding controller {} and its actions", c.path);
            }
            !c.nodoc
        })
        .map(|mut c| {
            c.actions.retain(|a| !a.nodoc);
            c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interrogation::test_support::FakeHost;
    use crate::interrogation::Interrogator;
    use crate::presenter::ShapeMap;
    use pretty_assertions::assert_eq;

    fn translator() -> Translator {
        Translator::with_defaults("en").unwrap()
    }

    #[test]
    fn test_build_defaults() {
        let host = FakeHost::widgets();
        let registry = Registry::new();
        let translator = translator();

        let doc = Documenter::new(&host, &registry, &translator).build().unwrap();

        assert_eq!(doc.global.namespaces, vec!["api".to_string()]);
        assert_eq!(doc.global.title, Some("API Documentation for Widgets".to_string()));
        assert_eq!(doc.serializers.len(), 1);
        assert_eq!(doc.controllers.len(), 1);

        let widgets = &doc.controllers[0];
        assert_eq!(widgets.path, "api/widgets");
        assert_eq!(widgets.serializer, Some("WidgetSerializer".to_string()));
        assert_eq!(widgets.json, doc.serializers[0].json);
        assert!(widgets.permitted_params.is_some());

        let actions: Vec<(&str, &str)> = widgets
            .actions
            .iter()
            .map(|a| (a.action.as_str(), a.verb.as_str()))
            .collect();
        assert_eq!(actions, vec![("index", "GET"), ("show", "GET")]);
    }

    #[test]
    fn test_title_literal_fallback_without_translation() {
        let host = FakeHost::widgets();
        let registry = Registry::new();
        let translator = Translator::new("en");

        let doc = Documenter::new(&host, &registry, &translator).build().unwrap();
        assert_eq!(doc.global.title, Some("Widgets API".to_string()));
        assert_eq!(
            doc.controllers[0].actions[1].description,
            Some("Show Widget".to_string())
        );
    }

    #[test]
    fn test_override_is_not_overwritten_by_fallback() {
        let host = FakeHost::widgets();
        let mut registry = Registry::new();
        registry.serializer("widget", |s| {
            let mut json = ShapeMap::new();
            json.insert_text("custom", "text");
            s.json = Some(json);
        });
        registry
            .controller("api/widgets", |c| c.json = Some(ShapeMap::new()))
            .action("index", |a| a.description = Some("All of them".to_string()));
        let translator = translator();

        let doc = Documenter::new(&host, &registry, &translator).build().unwrap();

        let json = doc.serializers[0].json.as_ref().unwrap();
        assert_eq!(json.len(), 1);
        assert!(json.get("custom").is_some());
        assert_eq!(doc.controllers[0].json, Some(ShapeMap::new()));
        assert_eq!(
            doc.controllers[0].actions[0].description,
            Some("All of them".to_string())
        );
    }

    #[test]
    fn test_controller_local_action_hook_wins() {
        let host = FakeHost::widgets();
        let mut registry = Registry::new();
        registry
            .controller("api/widgets", |c| {
                c.action("show", |a| a.notes = Some("local".to_string()));
            })
            .action("show", |a| a.notes = Some("registry".to_string()));
        let translator = translator();

        let doc = Documenter::new(&host, &registry, &translator).build().unwrap();
        let show = &doc.controllers[0].actions[1];
        assert_eq!(show.notes, Some("local".to_string()));
    }

    #[test]
    fn test_nodoc_controller_drops_its_actions() {
        let mut host = FakeHost::widgets();
        host.routes.push(crate::interrogation::test_support::route(
            "api/parts",
            "index",
            "GET",
            "/api/parts(.:format)",
        ));
        let mut registry = Registry::new();
        registry.controller("api/widgets", |c| c.nodoc = true);
        let translator = translator();

        let doc = Documenter::new(&host, &registry, &translator).build().unwrap();
        let paths: Vec<&str> = doc.controllers.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["api/parts"]);

        let out = doc.render(&translator);
        assert!(!out.contains("api/widgets"));
        assert!(out.contains("api/parts.index"));
    }

    #[test]
    fn test_nodoc_action_and_serializer() {
        let host = FakeHost::widgets();
        let mut registry = Registry::new();
        registry.action("api/widgets#show", |a| a.nodoc = true);
        registry.serializer("widget", |s| s.nodoc = true);
        let translator = translator();

        let doc = Documenter::new(&host, &registry, &translator).build().unwrap();
        assert!(doc.serializers.is_empty());
        assert_eq!(doc.controllers[0].actions.len(), 1);
        // The link survives: the controller still inherits the shape.
        assert!(doc.controllers[0].json.is_some());
    }

    #[test]
    fn test_registered_namespace_replaces_default() {
        let host = FakeHost::widgets();
        let mut registry = Registry::new();
        registry.namespace("admin", |_| {});
        let translator = translator();

        let doc = Documenter::new(&host, &registry, &translator).build().unwrap();
        let paths: Vec<&str> = doc.controllers.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["admin/users"]);
        assert_eq!(doc.controllers[0].resource_name, "User");
    }

    struct Blank;

    impl Interrogator for Blank {
        fn interrogate_routes(&self, _ctx: &Context<'_>) -> Vec<Route> {
            vec![Route {
                controller_path: "api/widgets".to_string(),
                action: String::new(),
                verb: "GET".to_string(),
                path: "/api/widgets".to_string(),
            }]
        }
    }

    #[test]
    fn test_missing_action_name_is_contract_violation() {
        let host = FakeHost::default();
        let mut registry = Registry::new();
        registry.global(|g| g.interrogators = vec![Box::new(Blank)]);
        let translator = translator();

        let err = Documenter::new(&host, &registry, &translator).build().unwrap_err();
        assert!(matches!(err, Error::ConfigurationContract { .. }));
        assert!(err.to_string().contains("interrogate_action"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let host = FakeHost::widgets();
        let registry = Registry::new();
        let translator = translator();

        let first = generate(&host, &registry, &translator).unwrap();
        let second = generate(&host, &registry, &translator).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("# API Documentation for Widgets\n"));
    }
}
