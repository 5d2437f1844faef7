//! API documentation generator driven by web-application metadata.
//!
//! The library reads what a host application knows about itself (routes,
//! models, serializers, controller parameters) and produces a reference
//! document for its JSON API, in Markdown or API Blueprint.
//!
//! # Architecture
//!
//! 1. [`host`] - adapter traits the pipeline asks for metadata; [`snapshot`]
//!    implements them from a YAML/JSON metadata file
//! 2. [`interrogation`] - interrogators turning host facts into documentation records
//! 3. [`registry`] / [`config`] - author override callbacks, in code or from a config file
//! 4. [`pipeline`] - interrogate, override, fallback-fill, nodoc filter
//! 5. [`presenter`] - JSON shape pretty-printing
//! 6. [`translator`] - localized display texts
//! 7. [`render`] - the output dialects
//!
//! # Example Usage
//!
//! ```no_run
//! use apidoc_from_metadata::{
//!     registry::Registry, snapshot::HostSnapshot, translator::Translator,
//! };
//! use std::path::Path;
//!
//! let host = HostSnapshot::from_path(Path::new("snapshot.yml")).unwrap();
//! let translator = Translator::with_defaults("en").unwrap();
//!
//! let mut registry = Registry::new();
//! registry.namespace("api", |ns| {
//!     ns.controller("characters", |c| c.notes = Some("Read only.".to_string()));
//! });
//!
//! let document = apidoc_from_metadata::generate(&host, &registry, &translator).unwrap();
//! println!("{}", document);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod config;
pub mod configuration;
pub mod error;
pub mod files;
pub mod host;
pub mod inflect;
pub mod interrogation;
pub mod pipeline;
pub mod presenter;
pub mod registry;
pub mod render;
pub mod scanner;
pub mod snapshot;
pub mod toc;
pub mod translator;

pub use pipeline::generate;
