use crate::configuration::{ControllerConfig, Resource, SerializerConfig};
use crate::host::Cardinality;
use crate::inflect::{camelize, humanize, pluralize, singularize, underscore};
use crate::interrogation::{Context, Interrogator};
use crate::presenter::{Shape, ShapeMap};
use crate::translator::Params;
use log::debug;

/// Enumerates serializer classes and derives their JSON attribute shapes.
pub struct SerializersInterrogator;

impl Interrogator for SerializersInterrogator {
    fn interrogate_resources(&self, ctx: &Context<'_>) -> Vec<Resource> {
        ctx.host
            .serializers()
            .into_iter()
            .filter(|descriptor| {
                let excluded = ctx.global.excluded_serializers.contains(&descriptor.name);
                if excluded {
                    debug!("Skipping excluded serializer {}", descriptor.name);
                }
                !excluded
            })
            .filter_map(|descriptor| {
                let resource_class = descriptor
                    .model
                    .as_deref()
                    .and_then(|model| ctx.host.resolve_model(model));
                match resource_class {
                    Some(resource_class) => Some(Resource {
                        configuration_name: configuration_name(&descriptor.name),
                        resource_class,
                        serializer: descriptor.name,
                    }),
                    None => {
                        debug!("Dropping serializer {}: model not resolvable", descriptor.name);
                        None
                    }
                }
            })
            .collect()
    }

    fn interrogate_serializer(
        &self,
        ctx: &Context<'_>,
        resource: &Resource,
        config: &mut SerializerConfig,
    ) {
        config.serializer = resource.serializer.clone();
        config.resource_class = resource.resource_class.clone();
        config.resource_name = humanize(&underscore(&resource.resource_class));
        config.configuration_name = resource.configuration_name.clone();

        let descriptor = ctx
            .host
            .serializers()
            .into_iter()
            .find(|d| d.name == resource.serializer);

        if let Some(descriptor) = descriptor {
            let mut attributes = ShapeMap::new();
            for (name, declared) in &descriptor.attributes {
                attributes.insert_text(name.clone(), declared);
            }
            for association in &descriptor.associations {
                let class_name = match association.class_name.as_deref() {
                    Some(class_name) => class_name.to_string(),
                    None => {
                        let derived = camelize(&singularize(&association.name));
                        debug!(
                            "Association {}.{} has no class name, using {}",
                            descriptor.name, association.name, derived
                        );
                        derived
                    }
                };
                let placeholder =
                    association_placeholder(ctx, association.cardinality, &class_name);
                attributes.insert(association.name.clone(), Shape::from_text(&placeholder));
            }
            config.attributes_for_json = Some(attributes);
        }
    }
}

/// Links a controller without a shape of its own to the serializer designated
/// for its resolved model class.
///
/// The link key is the serializer class the host designates for the model;
/// the controller then inherits that serializer record's final JSON shape.
pub struct SerializerLinkInterrogator;

impl Interrogator for SerializerLinkInterrogator {
    fn interrogate_controller(
        &self,
        ctx: &Context<'_>,
        _path: &str,
        serializers: &[SerializerConfig],
        config: &mut ControllerConfig,
    ) {
        if config.attributes_for_json.is_some() || config.serializer.is_some() {
            return;
        }
        let Some(resource_class) = config.resource_class.as_deref() else {
            return;
        };
        let Some(designated) = ctx.host.serializer_for(resource_class) else {
            debug!("Model {} has no designated serializer", resource_class);
            return;
        };

        match serializers.iter().find(|sc| sc.serializer == designated) {
            Some(linked) => {
                debug!("Linked {} to {}", config.path, linked.serializer);
                config.serializer = Some(linked.serializer.clone());
            }
            None => debug!(
                "Serializer {} for {} is not documented, no link",
                designated, config.path
            ),
        }
    }
}

/// `WidgetSerializer` -> `widget`, `Admin::LineItemSerializer` -> `admin/line_item`
fn configuration_name(serializer: &str) -> String {
    let underscored = underscore(serializer);
    underscored
        .strip_suffix("_serializer")
        .unwrap_or(&underscored)
        .to_string()
}

fn association_placeholder(ctx: &Context<'_>, cardinality: Cardinality, class_name: &str) -> String {
    let params = Params::new()
        .with("resource", class_name)
        .with("resources", pluralize(class_name));
    match cardinality {
        Cardinality::Many => ctx
            .translator
            .text("json.resource_array", &params, "[{ %{resource} }]"),
        Cardinality::One => ctx
            .translator
            .text("json.resource_object", &params, "{ %{resource} }"),
    }
}
