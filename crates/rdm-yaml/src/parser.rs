//! Entry points turning YAML text or an event source into a [`RecordTree`].

use crate::{BuildOptions, EventSource, RecordTree, Result, TreeBuilder, YamlEventSource};
use rdm_records::RecordArena;
use tracing::debug;

/// Parse every document of a YAML stream with default options.
///
/// # Example
///
/// ```rust
/// use rdm_yaml::parse;
///
/// let tree = parse("title: My Document").unwrap();
/// assert_eq!(tree.document_count(), 1);
/// assert!(tree.lookup(0, &["title"]).is_some());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid. No records survive a failed
/// parse.
pub fn parse(content: &str) -> Result<RecordTree> {
    parse_with_options(content, &BuildOptions::default())
}

/// Parse every document of a YAML stream.
///
/// # Errors
///
/// Returns an error if the YAML is invalid, if the nesting limit or record
/// limit is exceeded, or on a structural anomaly under
/// [`crate::AnomalyPolicy::Abort`].
pub fn parse_with_options(content: &str, options: &BuildOptions) -> Result<RecordTree> {
    parse_events(YamlEventSource::new(content), options)
}

/// Build a tree from any event source. The source must start at its
/// `StreamStart`.
///
/// # Errors
///
/// As [`parse_with_options`], plus whatever the source itself reports.
pub fn parse_events<S: EventSource>(source: S, options: &BuildOptions) -> Result<RecordTree> {
    let mut arena = match options.record_limit {
        Some(limit) => RecordArena::with_limit(limit),
        None => RecordArena::new(),
    };

    let mut builder = TreeBuilder::with_options(source, options.clone());
    let documents = builder.build_stream(&mut arena)?;
    let diagnostics = builder.into_diagnostics();

    debug!(
        records = arena.live_count(),
        diagnostics = diagnostics.len(),
        "Built record tree"
    );
    Ok(RecordTree::new(arena, documents, diagnostics))
}
