//! API Blueprint (format 1A) renderer.
//!
//! Controllers and serializers documenting the same model class are merged
//! into one resource group. Within a group every distinct URI becomes a
//! resource section; URIs carrying a path parameter are elements, the rest
//! are collections. Groups without a documented controller have no resource
//! to describe and are left out.

use crate::configuration::{ControllerConfig, SerializerConfig};
use crate::presenter::ShapeMap;
use crate::render::{title_line, DocumentModel, Renderer};
use crate::translator::Translator;

pub struct ApiBlueprintRenderer;

impl Renderer for ApiBlueprintRenderer {
    fn render(&self, model: &DocumentModel<'_>, _translator: &Translator) -> String {
        let mut md = vec!["FORMAT: 1A".to_string(), String::new()];
        md.push(title_line(model.title(), 1));
        md.push(String::new());
        if let Some(preamble) = model.preamble() {
            md.push(preamble.trim_end().to_string());
            md.push(String::new());
        }

        let rendered: Vec<String> = collect_groups(model)
            .iter()
            .filter(|group| !group.controllers.is_empty())
            .map(render_group)
            .collect();
        md.push(rendered.join("\n\n"));

        let mut out = md.join("\n");
        out.push('\n');
        out
    }
}

/// Controllers and serializer sharing one model class
struct Group<'a> {
    key: String,
    name: String,
    controllers: Vec<&'a ControllerConfig>,
    serializer: Option<&'a SerializerConfig>,
}

impl Group<'_> {
    fn attributes(&self) -> Option<&ShapeMap> {
        match self.serializer {
            Some(serializer) => serializer
                .json
                .as_ref()
                .or(serializer.attributes_for_json.as_ref()),
            None => self.controllers.iter().find_map(|c| c.json.as_ref()),
        }
    }
}

fn collect_groups<'a>(model: &DocumentModel<'a>) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();

    for controller in model.controllers {
        let key = controller
            .resource_class
            .clone()
            .unwrap_or_else(|| controller.resource_name.clone());
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.controllers.push(controller),
            None => groups.push(Group {
                key,
                name: controller.resource_name.clone(),
                controllers: vec![controller],
                serializer: None,
            }),
        }
    }

    for serializer in model.serializers {
        let key = if serializer.resource_class.is_empty() {
            serializer.resource_name.clone()
        } else {
            serializer.resource_class.clone()
        };
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => {
                if group.serializer.is_none() {
                    group.serializer = Some(serializer);
                }
            }
            None => groups.push(Group {
                key,
                name: serializer.resource_name.clone(),
                controllers: Vec::new(),
                serializer: Some(serializer),
            }),
        }
    }

    groups
}

fn render_group(group: &Group<'_>) -> String {
    let mut md = vec![format!("# Group {}", group.name)];

    let actions = group
        .controllers
        .iter()
        .flat_map(|controller| controller.actions.iter());

    // URI -> actions served at it, in first-seen order
    let mut resources: Vec<(String, Vec<_>)> = Vec::new();
    for action in actions {
        let uri = blueprint_uri(&action.pathspec);
        match resources.iter_mut().find(|(u, _)| *u == uri) {
            Some((_, list)) => list.push(action),
            None => resources.push((uri, vec![action])),
        }
    }

    for (uri, actions) in &resources {
        let scopes: Vec<&str> = actions
            .iter()
            .flat_map(|a| a.scopes.iter().map(|(name, _)| name.as_str()))
            .collect();
        let template = if scopes.is_empty() {
            uri.clone()
        } else {
            format!("{}{{?{}}}", uri, scopes.join(","))
        };

        md.push(String::new());
        if is_element(uri) {
            md.push(format!("## {} Element [{}]", group.name, template));
            md.push(String::new());
            md.extend(attribute_lines(group.attributes()));
        } else {
            md.push(format!("## {} Collection [{}]", group.name, template));
            md.push(String::new());
            md.push(format!("- Attributes (array[{} Element])", group.name));
        }

        for action in actions {
            let description = action.description.as_deref().unwrap_or(&action.action);
            md.push(String::new());
            md.push(format!("### {} [{}]", description, action.verb));
            if let Some(notes) = action.notes.as_deref().filter(|n| !n.is_empty()) {
                md.push(String::new());
                md.push(notes.to_string());
            }
        }
    }

    md.join("\n")
}

fn attribute_lines(attributes: Option<&ShapeMap>) -> Vec<String> {
    let mut lines = vec!["- Attributes".to_string()];
    if let Some(attributes) = attributes {
        lines.extend(
            attributes
                .normalized()
                .iter()
                .map(|(name, shape)| format!("  - {} ({}, required)", name, shape.label())),
        );
    }
    lines
}

fn is_element(uri: &str) -> bool {
    uri.contains('{')
}

/// Rewrite `:param` path segments to URI template `{param}` form, keeping
/// any suffix such as `.json`.
pub fn blueprint_uri(pathspec: &str) -> String {
    pathspec
        .split('/')
        .map(|part| match part.strip_prefix(':') {
            Some(rest) => {
                let end = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                format!("{{{}}}{}", &rest[..end], &rest[end..])
            }
            None => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
