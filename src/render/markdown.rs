//! Markdown renderer.
//!
//! Section bodies are rendered first; every section, resource and action
//! appends its table-of-contents entry while rendering, and the document is
//! assembled afterwards as title, table of contents, preamble, bodies.

use crate::configuration::{ActionConfig, ControllerConfig, SerializerConfig};
use crate::presenter::{present, ShapeMap};
use crate::render::{title_line, DocumentModel, Renderer};
use crate::toc::TocCollector;
use crate::translator::{Params, Translator};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, model: &DocumentModel<'_>, translator: &Translator) -> String {
        let mut toc = TocCollector::new();
        for seed in &model.global.toc {
            toc.push_entry(seed.clone());
        }

        let blocks = [
            render_serializers(model.serializers, translator, &mut toc),
            String::new(),
            render_controllers(model.controllers, translator, &mut toc),
        ];

        let mut md = vec![title_line(model.title(), 1), String::new()];
        md.extend(toc.lines());
        md.push(String::new());
        if let Some(preamble) = model.preamble() {
            md.push(preamble.trim_end().to_string());
            md.push(String::new());
        }
        md.extend(blocks);

        let mut out = md.join("\n");
        out.push('\n');
        out
    }
}

fn anchor_line(name: &str) -> String {
    format!("<a name=\"{}\" />", name)
}

fn text(translator: &Translator, key: &str, default: &str) -> String {
    translator.text(key, &Params::new(), default)
}

/// A titled, fenced JSON block
fn json_block(translator: &Translator, title: &str, shape: &ShapeMap, depth: usize) -> String {
    [
        title_line(title, depth),
        text(translator, "json.markdown.start", "````"),
        present(shape),
        text(translator, "json.markdown.end", "````"),
    ]
    .join("\n")
}

fn render_serializers(
    serializers: &[SerializerConfig],
    translator: &Translator,
    toc: &mut TocCollector,
) -> String {
    let title = text(translator, "serializers_toc", "Serializers");
    toc.push(&title, "serializers", 1);

    let mut results = vec![anchor_line("serializers"), title_line(&title, 2)];
    for serializer in serializers {
        results.push(render_serializer(serializer, translator, toc));
    }
    results.join("\n\n")
}

fn render_serializer(
    config: &SerializerConfig,
    translator: &Translator,
    toc: &mut TocCollector,
) -> String {
    toc.push(&config.resource_name, &config.serializer, 2);

    let mut md = vec![anchor_line(&config.serializer), title_line(&config.resource_name, 3)];
    if let Some(json) = &config.json {
        let title = text(translator, "json.title", "JSON");
        md.push(json_block(translator, &title, json, 4));
    }
    if let Some(notes) = config.notes.as_deref().filter(|n| !n.is_empty()) {
        md.push(notes.to_string());
    }
    md.join("\n")
}

fn render_controllers(
    controllers: &[ControllerConfig],
    translator: &Translator,
    toc: &mut TocCollector,
) -> String {
    let title = text(translator, "controllers_toc", "Controllers");
    toc.push(&title, "controllers", 1);

    let mut results = vec![anchor_line("controllers"), title_line(&title, 2)];
    for controller in controllers {
        results.push(render_controller(controller, translator, toc));
    }
    results.join("\n\n")
}

fn render_controller(
    config: &ControllerConfig,
    translator: &Translator,
    toc: &mut TocCollector,
) -> String {
    toc.push(&config.resource_name, &config.path, 2);

    let mut md = vec![anchor_line(&config.path), title_line(&config.resource_name, 3)];

    if let Some(json) = &config.json {
        let title = text(translator, "json.title", "JSON");
        md.push(json_block(translator, &title, json, 4));
    }

    if let Some(params) = &config.permitted_params {
        let title = text(
            translator,
            "controllers.permitted_parameters",
            "Permitted Parameters",
        );
        md.push(String::new());
        md.push(json_block(translator, &title, params, 4));
    }

    if let Some(notes) = config.notes.as_deref().filter(|n| !n.is_empty()) {
        md.push(String::new());
        md.push(notes.to_string());
    }

    for action in &config.actions {
        md.push(String::new());
        md.push(render_action(action, translator, toc));
    }

    md.join("\n")
}

fn render_action(config: &ActionConfig, translator: &Translator, toc: &mut TocCollector) -> String {
    let anchor = config.anchor();
    let description = config.description.as_deref().unwrap_or(&config.action);
    toc.push(description, &anchor, 3);

    let mut md = vec![
        anchor_line(&anchor),
        title_line(description, 4),
        format!("**{} {}**", config.verb, config.pathspec),
    ];

    if !config.scopes.is_empty() {
        md.push(String::new());
        md.push(title_line(
            &text(translator, "actions.get_params", "GET parameters supported"),
            5,
        ));
        for (name, description) in &config.scopes {
            match description.as_deref().filter(|d| !d.is_empty()) {
                Some(description) => md.push(format!("* `{}`: {}", name, description)),
                None => md.push(format!("* `{}`", name)),
            }
        }
    }

    if let Some(notes) = config.notes.as_deref().filter(|n| !n.is_empty()) {
        md.push(String::new());
        md.push(title_line(&text(translator, "actions.notes", "Notes"), 5));
        md.push(notes.to_string());
    }

    md.join("\n")
}
