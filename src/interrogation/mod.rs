//! Interrogators: read host metadata and fill documentation records.
//!
//! An interrogator answers some of the pipeline's questions and leaves the
//! others to the default no-op. The run calls every interrogator of
//! [`GlobalConfig::interrogators`] in order at each stage, so later
//! interrogators see what earlier ones filled in.
//!
//! Interrogators only see a [`Context`]: the host, the translator and the
//! global settings. Override callbacks are out of their reach.
//!
//! - [`routes::RoutesInterrogator`] - routes under the configured namespaces
//! - [`serializers::SerializersInterrogator`] - serializer resources and shapes
//! - [`controller::ControllerInterrogator`] - resource naming and permitted parameters
//! - [`serializers::SerializerLinkInterrogator`] - controller to serializer links
//! - [`action::ActionInterrogator`] - per-route action records

pub mod action;
pub mod controller;
pub mod routes;
pub mod serializers;

use crate::configuration::{
    ActionConfig, ControllerConfig, GlobalConfig, Resource, Route, SerializerConfig,
};
use crate::host::Host;
use crate::translator::{Params, Translator};

/// Read-only inputs shared by all interrogators during one run
pub struct Context<'a> {
    pub global: &'a GlobalConfig,
    pub host: &'a dyn Host,
    pub translator: &'a Translator,
}

impl Context<'_> {
    /// Interpolation parameters describing a controller's resource
    pub fn resource_params(&self, controller: &ControllerConfig) -> Params {
        resource_params(&controller.resource_name, &controller.path)
    }
}

pub(crate) fn resource_params(resource_name: &str, controller_path: &str) -> Params {
    Params::new()
        .with("resource", resource_name)
        .with("resources", crate::inflect::pluralize(resource_name))
        .with("controller", controller_path)
}

/// Trait for interrogating the host at each pipeline stage.
///
/// Every method defaults to doing nothing.
pub trait Interrogator {
    /// Routes to document
    fn interrogate_routes(&self, _ctx: &Context<'_>) -> Vec<Route> {
        Vec::new()
    }

    /// Serializer resources to document
    fn interrogate_resources(&self, _ctx: &Context<'_>) -> Vec<Resource> {
        Vec::new()
    }

    fn interrogate_serializer(
        &self,
        _ctx: &Context<'_>,
        _resource: &Resource,
        _config: &mut SerializerConfig,
    ) {
    }

    /// Fill a controller record; `serializers` are the fully processed
    /// serializer records of the run
    fn interrogate_controller(
        &self,
        _ctx: &Context<'_>,
        _path: &str,
        _serializers: &[SerializerConfig],
        _config: &mut ControllerConfig,
    ) {
    }

    fn interrogate_action(
        &self,
        _ctx: &Context<'_>,
        _controller: &ControllerConfig,
        _route: &Route,
        _config: &mut ActionConfig,
    ) {
    }
}

/// The standard interrogator chain
pub fn default_interrogators() -> Vec<Box<dyn Interrogator>> {
    vec![
        Box::new(routes::RoutesInterrogator),
        Box::new(serializers::SerializersInterrogator),
        Box::new(controller::ControllerInterrogator),
        Box::new(serializers::SerializerLinkInterrogator),
        Box::new(action::ActionInterrogator),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::host::{
        AssociationDescriptor, Cardinality, ControllerParameterSource, HostRoute,
        ModelSchemaSource, PermittedParam, RouteSource, ScopeDefinition, SerializerDescriptor,
        SerializerSource,
    };

    /// A small in-memory host shared by interrogator tests
    #[derive(Default)]
    pub struct FakeHost {
        pub routes: Vec<HostRoute>,
        pub models: Vec<(&'static str, Vec<(&'static str, &'static str)>, Option<&'static str>)>,
        pub serializers: Vec<SerializerDescriptor>,
        pub permitted: Vec<(&'static str, Vec<PermittedParam>)>,
        pub scopes: Vec<(&'static str, Vec<ScopeDefinition>)>,
    }

    impl FakeHost {
        pub fn widgets() -> Self {
            FakeHost {
                routes: vec![
                    route("api/widgets", "index", "^GET$", "/api/widgets(.:format)"),
                    route("api/widgets", "show", "GET", "/api/widgets/:id(.:format)"),
                    route("admin/users", "index", "GET", "/admin/users(.:format)"),
                    route("", "", "GET", "/health"),
                ],
                models: vec![
                    (
                        "Widget",
                        vec![("id", "integer"), ("name", "string"), ("price", "float")],
                        Some("WidgetSerializer"),
                    ),
                    ("Part", vec![("id", "integer")], None),
                ],
                serializers: vec![
                    SerializerDescriptor {
                        name: "WidgetSerializer".to_string(),
                        model: Some("Widget".to_string()),
                        attributes: vec![
                            ("id".to_string(), "integer".to_string()),
                            ("name".to_string(), "string".to_string()),
                        ],
                        associations: vec![
                            AssociationDescriptor {
                                name: "parts".to_string(),
                                cardinality: Cardinality::Many,
                                class_name: Some("Part".to_string()),
                            },
                            AssociationDescriptor {
                                name: "owner".to_string(),
                                cardinality: Cardinality::One,
                                class_name: None,
                            },
                        ],
                    },
                    SerializerDescriptor {
                        name: "GhostSerializer".to_string(),
                        model: Some("Ghost".to_string()),
                        attributes: vec![],
                        associations: vec![],
                    },
                ],
                permitted: vec![(
                    "api/widgets",
                    vec![PermittedParam::Group {
                        name: "widget".to_string(),
                        attributes: vec![
                            PermittedParam::Attribute("name".to_string()),
                            PermittedParam::Attribute("price".to_string()),
                            PermittedParam::Attribute("colour".to_string()),
                            PermittedParam::Group {
                                name: "parts".to_string(),
                                attributes: vec![PermittedParam::Attribute("id".to_string())],
                            },
                        ],
                    }],
                )],
                scopes: vec![(
                    "api/widgets",
                    vec![
                        ScopeDefinition {
                            name: "by_name".to_string(),
                            scope_type: "default".to_string(),
                            default: None,
                            using: vec![],
                        },
                        ScopeDefinition {
                            name: "created".to_string(),
                            scope_type: "hash".to_string(),
                            default: None,
                            using: vec!["from".to_string(), "to".to_string()],
                        },
                    ],
                )],
            }
        }
    }

    pub fn route(controller: &str, action: &str, verb: &str, path: &str) -> HostRoute {
        HostRoute {
            controller: controller.to_string(),
            action: action.to_string(),
            verb: verb.to_string(),
            path: path.to_string(),
        }
    }

    impl RouteSource for FakeHost {
        fn routes(&self) -> Vec<HostRoute> {
            self.routes.clone()
        }

        fn application_name(&self) -> Option<String> {
            Some("Widgets".to_string())
        }
    }

    impl ModelSchemaSource for FakeHost {
        fn resolve_model(&self, name: &str) -> Option<String> {
            self.models
                .iter()
                .find(|(n, _, _)| *n == name)
                .map(|(n, _, _)| n.to_string())
        }

        fn column_type(&self, model: &str, column: &str) -> Option<String> {
            let (_, columns, _) = self.models.iter().find(|(n, _, _)| *n == model)?;
            columns
                .iter()
                .find(|(c, _)| *c == column)
                .map(|(_, t)| t.to_string())
        }
    }

    impl SerializerSource for FakeHost {
        fn serializers(&self) -> Vec<SerializerDescriptor> {
            self.serializers.clone()
        }

        fn serializer_for(&self, model: &str) -> Option<String> {
            self.models
                .iter()
                .find(|(n, _, _)| *n == model)
                .and_then(|(_, _, s)| s.map(str::to_string))
        }
    }

    impl ControllerParameterSource for FakeHost {
        fn resolve_controller(&self, path: &str) -> Option<String> {
            if path == "api/widgets" {
                Some("Api::WidgetsController".to_string())
            } else {
                None
            }
        }

        fn permitted_params(&self, path: &str) -> Option<Vec<PermittedParam>> {
            self.permitted
                .iter()
                .find(|(p, _)| *p == path)
                .map(|(_, params)| params.clone())
        }

        fn scopes(&self, path: &str) -> Vec<ScopeDefinition> {
            self.scopes
                .iter()
                .find(|(p, _)| *p == path)
                .map(|(_, scopes)| scopes.clone())
                .unwrap_or_default()
        }
    }
}
