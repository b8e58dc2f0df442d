//! Importgraph - infer a file dependency graph from shared import statements

pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod graph;
pub mod import_map;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod report;
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use config::{ErrorPolicy, ScanConfig};
pub use discovery::find_source_files;
pub use error::ScanError;
pub use extract::{extract_imports, extract_imports_from_str};
pub use graph::{DependencyGraph, ModuleIndex};
pub use import_map::{ImportMap, SkippedFile};
pub use layout::{LayoutOptions, Point, spring_layout};
pub use pipeline::{Analysis, analyze};
pub use render::{DotRenderer, RenderFormat, Renderer, SvgRenderer};
pub use report::{ColorMode, print_json, print_text};
