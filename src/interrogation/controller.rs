use crate::configuration::{ControllerConfig, SerializerConfig};
use crate::host::PermittedParam;
use crate::inflect::{camelize, singularize};
use crate::interrogation::{Context, Interrogator};
use crate::presenter::{type_label, JsonType, Shape, ShapeMap};
use log::debug;

/// Derives a controller's resource name, model and controller classes, and
/// the shape of its permitted parameters.
pub struct ControllerInterrogator;

impl Interrogator for ControllerInterrogator {
    fn interrogate_controller(
        &self,
        ctx: &Context<'_>,
        path: &str,
        _serializers: &[SerializerConfig],
        config: &mut ControllerConfig,
    ) {
        config.path = path.to_string();
        config.resource_name = resource_name(ctx, path);
        config.resource_class = ctx.host.resolve_model(&config.resource_name);
        config.controller_class = ctx.host.resolve_controller(path);

        if config.resource_class.is_none() {
            debug!("No model class named {} for {}", config.resource_name, path);
        }

        if config.attributes_for_permitted_params.is_none() {
            if let Some(params) = ctx.host.permitted_params(path) {
                config.attributes_for_permitted_params =
                    Some(permitted_shape(ctx, config.resource_class.as_deref(), &params));
            }
        }
    }
}

/// `api/widgets` -> `Widget`: drop the namespace, camel-case, singularize.
fn resource_name(ctx: &Context<'_>, path: &str) -> String {
    let relative = match ctx.global.namespace_of(path) {
        Some(ns) => &path[ns.len() + 1..],
        None => path,
    };
    singularize(&camelize(relative))
}

/// Map permitted attribute names to their model column types, recursing into
/// nested groups. Unknown columns are documented as `String`.
fn permitted_shape(ctx: &Context<'_>, model: Option<&str>, params: &[PermittedParam]) -> ShapeMap {
    params
        .iter()
        .map(|param| match param {
            PermittedParam::Attribute(name) => {
                let shape = model
                    .and_then(|m| ctx.host.column_type(m, name))
                    .map(|declared| type_label(&declared))
                    .unwrap_or(Shape::Type(JsonType::String));
                (name.clone(), shape)
            }
            PermittedParam::Group { name, attributes } => {
                (name.clone(), Shape::Object(permitted_shape(ctx, model, attributes)))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::GlobalConfig;
    use crate::interrogation::test_support::FakeHost;
    use crate::presenter::present;
    use crate::translator::Translator;
    use pretty_assertions::assert_eq;

    fn global() -> GlobalConfig {
        let mut global = GlobalConfig::new("Widgets");
        global.namespaces = vec!["api".to_string()];
        global
    }

    #[test]
    fn test_resource_name_derivation() {
        let host = FakeHost::widgets();
        let global = global();
        let translator = Translator::new("en");
        let ctx = Context { global: &global, host: &host, translator: &translator };

        assert_eq!(resource_name(&ctx, "api/widgets"), "Widget");
        assert_eq!(resource_name(&ctx, "api/line_items"), "LineItem");
        assert_eq!(resource_name(&ctx, "api/categories"), "Category");
        assert_eq!(resource_name(&ctx, "api/admin/users"), "Admin::User");
        assert_eq!(resource_name(&ctx, "api/movies"), "Movie");
        assert_eq!(resource_name(&ctx, "api/buses"), "Bus");
        assert_eq!(resource_name(&ctx, "api/heroes"), "Hero");
        assert_eq!(resource_name(&ctx, "api/wolves"), "Wolf");
        assert_eq!(resource_name(&ctx, "api/user_quizzes"), "UserQuiz");
    }

    #[test]
    fn test_irregular_plural_path_resolves_model() {
        let host = FakeHost {
            models: vec![("Movie", vec![("title", "string")], None)],
            ..FakeHost::default()
        };
        let global = global();
        let translator = Translator::new("en");
        let ctx = Context { global: &global, host: &host, translator: &translator };

        let mut config = ControllerConfig::default();
        ControllerInterrogator.interrogate_controller(&ctx, "api/movies", &[], &mut config);

        assert_eq!(config.resource_name, "Movie");
        assert_eq!(config.resource_class, Some("Movie".to_string()));
    }

    #[test]
    fn test_interrogate_controller_fills_classes_and_params() {
        let host = FakeHost::widgets();
        let global = global();
        let translator = Translator::new("en");
        let ctx = Context { global: &global, host: &host, translator: &translator };

        let mut config = ControllerConfig::default();
        ControllerInterrogator.interrogate_controller(&ctx, "api/widgets", &[], &mut config);

        assert_eq!(config.path, "api/widgets");
        assert_eq!(config.resource_name, "Widget");
        assert_eq!(config.resource_class, Some("Widget".to_string()));
        assert_eq!(config.controller_class, Some("Api::WidgetsController".to_string()));

        let params = config.attributes_for_permitted_params.unwrap();
        let expected = "{\n  \"widget\": {\n    \"name\": String,\n    \"price\": \"Float\",\n    \"colour\": String,\n    \"parts\": {\n      \"id\": Integer\n    }\n  }\n}";
        assert_eq!(present(&params), expected);
    }

    #[test]
    fn test_unresolvable_model_degrades_to_string() {
        let host = FakeHost {
            permitted: vec![(
                "api/gadgets",
                vec![PermittedParam::Group {
                    name: "gadget".to_string(),
                    attributes: vec![PermittedParam::Attribute("size".to_string())],
                }],
            )],
            ..FakeHost::default()
        };
        let global = global();
        let translator = Translator::new("en");
        let ctx = Context { global: &global, host: &host, translator: &translator };

        let mut config = ControllerConfig::default();
        ControllerInterrogator.interrogate_controller(&ctx, "api/gadgets", &[], &mut config);

        assert_eq!(config.resource_class, None);
        assert_eq!(config.controller_class, None);
        assert_eq!(
            present(&config.attributes_for_permitted_params.unwrap()),
            "{\n  \"gadget\": {\n    \"size\": String\n  }\n}"
        );
    }

    #[test]
    fn test_no_permitted_params() {
        let host = FakeHost::default();
        let global = global();
        let translator = Translator::new("en");
        let ctx = Context { global: &global, host: &host, translator: &translator };

        let mut config = ControllerConfig::default();
        ControllerInterrogator.interrogate_controller(&ctx, "api/widgets", &[], &mut config);
        assert!(config.attributes_for_permitted_params.is_none());
    }
}
