//! The result of parsing a whole stream.

use crate::serializer::write_list;
use crate::{Diagnostic, SerializeOptions};
use rdm_records::{List, RecordArena, RecordId};
use std::fmt;

/// An arena together with the documents built into it.
///
/// Each document is the child list of one keyless record in
/// [`RecordTree::documents`]. Dropping the tree releases every record.
#[derive(Debug)]
pub struct RecordTree {
    arena: RecordArena,
    documents: List,
    diagnostics: Vec<Diagnostic>,
}

impl RecordTree {
    pub(crate) fn new(arena: RecordArena, documents: List, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            arena,
            documents,
            diagnostics,
        }
    }

    pub fn arena(&self) -> &RecordArena {
        &self.arena
    }

    /// The top-level list, one record per non-empty document.
    pub fn documents(&self) -> &List {
        &self.documents
    }

    pub fn document_count(&self) -> usize {
        self.arena.len(self.documents.handle())
    }

    /// The body of the document at `index`.
    pub fn document(&self, index: usize) -> Option<&List> {
        let (id, _) = self.arena.iter(self.documents.handle()).nth(index)?;
        self.arena.child_list(id)
    }

    /// Follow a path of keys from the head of a document body.
    ///
    /// Every key but the last must name a record holding a child list.
    pub fn lookup(&self, document: usize, path: &[&str]) -> Option<RecordId> {
        let (last, parents) = path.split_last()?;
        let mut list = self.document(document)?;
        for key in parents {
            let id = self.arena.find_str(self.arena.first(list.handle()), key)?;
            list = self.arena.child_list(id)?;
        }
        self.arena.find_str(self.arena.first(list.handle()), last)
    }

    /// Anomalies and aliases met while building.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Give up the tree, keeping the arena and the document list.
    pub fn into_parts(self) -> (RecordArena, List, Vec<Diagnostic>) {
        (self.arena, self.documents, self.diagnostics)
    }

    /// Print every document, separated by `---` lines.
    pub fn write_yaml<W: fmt::Write>(&self, out: &mut W, options: &SerializeOptions) -> fmt::Result {
        for (index, (id, _)) in self.arena.iter(self.documents.handle()).enumerate() {
            if index > 0 {
                writeln!(out, "---")?;
            }
            if let Some(body) = self.arena.child_list(id) {
                write_list(out, &self.arena, body.handle(), 0, options)?;
            }
        }
        Ok(())
    }

    pub fn to_yaml_string(&self, options: &SerializeOptions) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_yaml(&mut out, options);
        out
    }
}

impl fmt::Display for RecordTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_yaml(f, &SerializeOptions::default())
    }
}
