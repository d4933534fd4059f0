//! # rdm-yaml
//!
//! Builds RDM record trees from YAML event streams.
//!
//! The builder pulls structural events (document, mapping and sequence
//! boundaries, scalars, aliases) from an [`EventSource`] and turns each
//! nesting level into a [`List`] of records in a [`RecordArena`]. Mapping
//! entries become keyed records, sequence items keyless ones, block scalars
//! are tagged as multiline text. Aliases are reported but not resolved, and
//! no type inference is done on scalars: every leaf stays text.
//!
//! ## Example
//!
//! ```rust
//! use rdm_yaml::{parse, SerializeOptions};
//!
//! let content = "\
//! title: My Project
//! keywords:
//!   - yaml
//!   - records
//! ";
//!
//! let tree = parse(content).unwrap();
//! let keywords = tree.lookup(0, &["keywords"]).unwrap();
//! let items = tree.arena().child_list(keywords).unwrap();
//! assert_eq!(tree.arena().len(items.handle()), 2);
//!
//! assert_eq!(tree.to_yaml_string(&SerializeOptions::default()), content);
//! ```

mod builder;
mod diagnostic;
mod error;
mod event;
mod options;
mod parser;
mod position;
mod serializer;
mod tree;
mod yaml_source;

pub use builder::{FrameMode, TreeBuilder};
pub use diagnostic::{AnomalyKind, Diagnostic};
pub use error::{Error, Result};
pub use event::{Event, EventQueue, EventSource, ScalarStyle};
pub use options::{AnomalyPolicy, BuildOptions, SerializeOptions};
pub use parser::{parse, parse_events, parse_with_options};
pub use position::Position;
pub use rdm_records::{ByteString, List, RecordArena, RecordId, RecordKind, Value};
pub use serializer::{ListDisplay, write_list};
pub use tree::RecordTree;
pub use yaml_source::YamlEventSource;
