//! Table-of-contents entries and their Markdown list lines.

use serde::Deserialize;

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TocEntry {
    pub title: String,
    /// Anchor name without `#`; entries without one render as plain text
    #[serde(default)]
    pub anchor: Option<String>,
    /// Nesting depth, 1 for top level
    #[serde(default = "default_depth")]
    pub depth: usize,
}

fn default_depth() -> usize {
    1
}

impl TocEntry {
    pub fn new(title: &str, anchor: Option<&str>, depth: usize) -> Self {
        Self {
            title: title.to_string(),
            anchor: anchor.map(str::to_string),
            depth,
        }
    }

    /// Render as a nested Markdown list item: `  - [Title](#anchor)`
    pub fn render_line(&self) -> String {
        let indent = "  ".repeat(self.depth.saturating_sub(1));
        match self.anchor.as_deref().filter(|a| !a.is_empty()) {
            Some(anchor) => format!("{}- [{}](#{})", indent, self.title, anchor),
            None => format!("{}- {}", indent, self.title),
        }
    }
}

/// Order-preserving collector filled while section bodies render.
#[derive(Debug, Default)]
pub struct TocCollector {
    entries: Vec<TocEntry>,
}

impl TocCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, title: &str, anchor: &str, depth: usize) {
        self.entries.push(TocEntry::new(title, Some(anchor), depth));
    }

    pub fn push_entry(&mut self, entry: TocEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(TocEntry::render_line).collect()
    }
}
