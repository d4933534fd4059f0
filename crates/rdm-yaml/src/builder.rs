/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Recursive construction of record lists from structural events.
//!
//! Each nesting level of the document is built by one activation of
//! [`TreeBuilder::build_frame`]: it pulls events until its level closes and
//! returns the list for that level, recursing for every nested sequence or
//! mapping value. Keys and values are told apart by alternating scalars
//! while the frame is in a mapping scope.
//!
//! A frame owns its partial list and the record under construction through a
//! guard that releases both if the frame is left early, so an error at any
//! depth leaves no records behind in the arena.

use crate::{
    AnomalyKind, AnomalyPolicy, BuildOptions, Diagnostic, Error, Event, EventSource, Position,
    Result,
};
use rdm_records::{ByteString, List, RecordArena, RecordId, Value};
use tracing::{debug, trace, warn};

/// How a frame was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    /// The body of a document.
    TopLevel,
    /// The items of a sequence.
    SequenceBody,
    /// The entries of a mapping that is the value of a key in the parent
    /// frame. Ends at the matching `MappingEnd`.
    MappingBody,
}

/// Role of the next scalar inside a mapping scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pairing {
    AwaitingKey,
    AwaitingValue,
}

impl Pairing {
    fn toggle(self) -> Self {
        match self {
            Pairing::AwaitingKey => Pairing::AwaitingValue,
            Pairing::AwaitingValue => Pairing::AwaitingKey,
        }
    }
}

/// State of one nesting level.
///
/// Dropping a frame releases the accumulated list and the pending record.
struct Frame<'a> {
    arena: &'a mut RecordArena,
    list: List,
    pending_record: Option<RecordId>,
    pending_content: Option<ByteString>,
    is_mapping: bool,
    pairing: Pairing,
}

impl<'a> Frame<'a> {
    fn new(arena: &'a mut RecordArena, mode: FrameMode) -> Self {
        Frame {
            arena,
            list: List::new(),
            pending_record: None,
            pending_content: None,
            is_mapping: mode == FrameMode::MappingBody,
            pairing: Pairing::AwaitingKey,
        }
    }

    /// The record under construction, allocated on first use.
    fn pending_record(&mut self) -> Result<RecordId> {
        match self.pending_record {
            Some(id) => Ok(id),
            None => {
                let id = self.arena.new_record()?;
                self.pending_record = Some(id);
                Ok(id)
            }
        }
    }

    /// Give the pending record its value and append it to the list.
    fn attach(&mut self, id: RecordId, value: Value) -> Result<()> {
        self.arena.set_value(id, value)?;
        self.arena.push(&mut self.list, id)?;
        self.pending_record = None;
        Ok(())
    }

    fn finish(mut self) -> List {
        std::mem::take(&mut self.list)
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.pending_record.take() {
            let _ = self.arena.destroy(id);
        }
        let list = std::mem::take(&mut self.list);
        if !list.is_empty() {
            debug!("Releasing partial list");
        }
        self.arena.destroy_list(list);
    }
}

/// Builds record lists from an [`EventSource`].
pub struct TreeBuilder<S> {
    source: S,
    options: BuildOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<S: EventSource> TreeBuilder<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, BuildOptions::default())
    }

    pub fn with_options(source: S, options: BuildOptions) -> Self {
        Self {
            source,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Anomalies and aliases seen so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Build every document of a stream.
    ///
    /// Expects the stream from its `StreamStart` and reads up to its
    /// `StreamEnd`. Each non-empty document becomes one keyless record whose
    /// value is the document body; empty documents are skipped.
    ///
    /// # Errors
    ///
    /// On failure nothing built so far stays allocated in `arena`.
    pub fn build_stream(&mut self, arena: &mut RecordArena) -> Result<List> {
        let mut documents = Frame::new(arena, FrameMode::TopLevel);

        loop {
            let (event, position) = self.source.next_event()?;
            match event {
                Event::StreamStart | Event::DocumentEnd | Event::Nothing => {}
                Event::StreamEnd => break,
                Event::DocumentStart => {
                    debug!(%position, "Document started");
                    let id = documents.pending_record()?;
                    let body = self.frame(&mut *documents.arena, FrameMode::TopLevel, 0)?;
                    if body.is_empty() {
                        debug!(%position, "Skipping empty document");
                    } else {
                        documents.attach(id, Value::ChildList(body))?;
                    }
                }
                Event::SequenceStart => {
                    // A sequence with no document around it: build it anyway.
                    self.anomaly(
                        AnomalyKind::UnexpectedEvent {
                            event: "SequenceStart",
                        },
                        position,
                    )?;
                    let id = documents.pending_record()?;
                    let body = self.frame(&mut *documents.arena, FrameMode::SequenceBody, 0)?;
                    documents.attach(id, Value::ChildList(body))?;
                }
                other => {
                    self.anomaly(
                        AnomalyKind::UnexpectedEvent {
                            event: other.name(),
                        },
                        position,
                    )?;
                }
            }
        }

        Ok(documents.finish())
    }

    /// Build one nesting level, from just after its opening event up to and
    /// including its closing event.
    ///
    /// # Errors
    ///
    /// On failure the partial list of this level, and of every level nested
    /// in it, is released from `arena`.
    pub fn build_frame(&mut self, arena: &mut RecordArena, mode: FrameMode) -> Result<List> {
        self.frame(arena, mode, 0)
    }

    fn frame(&mut self, arena: &mut RecordArena, mode: FrameMode, depth: usize) -> Result<List> {
        if depth > self.options.max_depth {
            warn!(depth, "Document nested too deeply");
            return Err(Error::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }

        let mut frame = Frame::new(arena, mode);

        let end = loop {
            let (event, position) = self.source.next_event()?;
            trace!(?event, ?mode, depth, "Builder event");

            match event {
                Event::DocumentEnd | Event::SequenceEnd => break position,

                Event::SequenceStart => {
                    let id = frame.pending_record()?;
                    if let Some(key) = frame.pending_content.take() {
                        // The last scalar was the key of this sequence.
                        frame.arena.set_key(id, Some(key))?;
                    }
                    let child = self.frame(&mut *frame.arena, FrameMode::SequenceBody, depth + 1)?;
                    frame.attach(id, Value::ChildList(child))?;
                    frame.pairing = Pairing::AwaitingKey;
                }

                Event::MappingStart => {
                    if frame.is_mapping {
                        // A mapping in value position: it belongs to the
                        // key captured last.
                        let id = frame.pending_record()?;
                        match frame.pending_content.take() {
                            Some(key) => frame.arena.set_key(id, Some(key))?,
                            None => self.anomaly(AnomalyKind::MissingMappingKey, position)?,
                        }
                        let child =
                            self.frame(&mut *frame.arena, FrameMode::MappingBody, depth + 1)?;
                        frame.attach(id, Value::ChildList(child))?;
                    } else {
                        frame.is_mapping = true;
                    }
                    frame.pairing = Pairing::AwaitingKey;
                }

                Event::MappingEnd => {
                    self.drop_unpaired_key(&mut frame.pending_content, position)?;
                    if mode == FrameMode::MappingBody {
                        break position;
                    }
                    frame.is_mapping = false;
                }

                Event::Scalar { text, style } => {
                    let text = ByteString::from_bytes(text.as_bytes())?;
                    let id = frame.pending_record()?;

                    if !frame.is_mapping {
                        frame.attach(id, Value::text(text, style.is_block()))?;
                    } else {
                        match frame.pairing {
                            Pairing::AwaitingValue => {
                                let key = frame.pending_content.take();
                                frame.arena.set_key(id, key)?;
                                frame.attach(id, Value::text(text, style.is_block()))?;
                            }
                            Pairing::AwaitingKey => frame.pending_content = Some(text),
                        }
                        frame.pairing = frame.pairing.toggle();
                    }
                }

                Event::Alias { anchor } => {
                    warn!(anchor, %position, "Alias is not resolved, no record emitted");
                    self.diagnostics.push(Diagnostic {
                        kind: AnomalyKind::UnsupportedAlias { anchor },
                        position,
                    });
                }

                Event::StreamEnd => {
                    // Nothing can follow; close every open level.
                    self.anomaly(AnomalyKind::UnexpectedEvent { event: "StreamEnd" }, position)?;
                    break position;
                }

                other @ (Event::StreamStart | Event::DocumentStart | Event::Nothing) => {
                    self.anomaly(
                        AnomalyKind::UnexpectedEvent {
                            event: other.name(),
                        },
                        position,
                    )?;
                }
            }
        };

        self.drop_unpaired_key(&mut frame.pending_content, end)?;
        Ok(frame.finish())
    }

    /// Report a captured key whose mapping closed before its value came.
    fn drop_unpaired_key(
        &mut self,
        pending: &mut Option<ByteString>,
        position: Position,
    ) -> Result<()> {
        match pending.take() {
            Some(key) => self.anomaly(
                AnomalyKind::UnpairedKey {
                    key: key.to_string_lossy(),
                },
                position,
            ),
            None => Ok(()),
        }
    }

    fn anomaly(&mut self, kind: AnomalyKind, position: Position) -> Result<()> {
        warn!(%kind, %position, "Structural anomaly");
        self.diagnostics.push(Diagnostic {
            kind: kind.clone(),
            position,
        });
        match self.options.anomaly_policy {
            AnomalyPolicy::Degrade => Ok(()),
            AnomalyPolicy::Abort => Err(Error::StructuralAnomaly { kind, position }),
        }
    }
}
