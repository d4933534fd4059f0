//! The structural events a tree is built from, and where they come from.

use crate::{Error, Position, Result};
use std::collections::VecDeque;

/// Presentation style of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    #[default]
    Plain,
    /// Single- or double-quoted.
    Quoted,
    /// `|` block.
    Literal,
    /// `>` block.
    Folded,
}

impl ScalarStyle {
    /// Block styles carry multiline text.
    pub fn is_block(self) -> bool {
        matches!(self, ScalarStyle::Literal | ScalarStyle::Folded)
    }
}

/// One structural event of a YAML stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Nothing,
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
    Scalar { text: String, style: ScalarStyle },
    /// Reference to an anchored node, by the parser's anchor id.
    Alias { anchor: usize },
}

impl Event {
    /// A plain scalar.
    pub fn scalar(text: impl Into<String>) -> Self {
        Event::Scalar {
            text: text.into(),
            style: ScalarStyle::Plain,
        }
    }

    pub fn styled_scalar(text: impl Into<String>, style: ScalarStyle) -> Self {
        Event::Scalar {
            text: text.into(),
            style,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Nothing => "Nothing",
            Event::StreamStart => "StreamStart",
            Event::StreamEnd => "StreamEnd",
            Event::DocumentStart => "DocumentStart",
            Event::DocumentEnd => "DocumentEnd",
            Event::SequenceStart => "SequenceStart",
            Event::SequenceEnd => "SequenceEnd",
            Event::MappingStart => "MappingStart",
            Event::MappingEnd => "MappingEnd",
            Event::Scalar { .. } => "Scalar",
            Event::Alias { .. } => "Alias",
        }
    }
}

/// A blocking, pull-style supplier of events.
pub trait EventSource {
    /// The next event and its position.
    ///
    /// # Errors
    ///
    /// Fails when the underlying input is malformed; the stream cannot be
    /// continued after that.
    fn next_event(&mut self) -> Result<(Event, Position)>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Result<(Event, Position)> {
        (**self).next_event()
    }
}

/// An event source replaying a prepared list of events and errors.
///
/// Once the queue is empty every further pull fails with
/// [`Error::UnexpectedEof`].
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<Result<(Event, Position)>>,
    queued: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete single-document stream around `body`.
    pub fn document(body: impl IntoIterator<Item = Event>) -> Self {
        let mut queue = Self::new();
        queue.push(Event::StreamStart).push(Event::DocumentStart);
        queue.extend(body);
        queue.push(Event::DocumentEnd).push(Event::StreamEnd);
        queue
    }

    pub fn push(&mut self, event: Event) -> &mut Self {
        let position = Position::new(self.queued, 1, 1);
        self.queued += 1;
        self.pending.push_back(Ok((event, position)));
        self
    }

    /// Queue a parse failure at the current point of the stream.
    pub fn push_error(&mut self, message: impl Into<String>) -> &mut Self {
        let position = Position::new(self.queued, 1, 1);
        self.queued += 1;
        self.pending.push_back(Err(Error::Parse {
            message: message.into(),
            position: Some(position),
        }));
        self
    }

    /// Number of events and errors not pulled yet.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, events: I) {
        for event in events {
            self.push(event);
        }
    }
}

impl FromIterator<Event> for EventQueue {
    fn from_iter<I: IntoIterator<Item = Event>>(events: I) -> Self {
        let mut queue = Self::new();
        queue.extend(events);
        queue
    }
}

impl EventSource for EventQueue {
    fn next_event(&mut self) -> Result<(Event, Position)> {
        self.pending.pop_front().unwrap_or(Err(Error::UnexpectedEof))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_styles() {
        assert!(ScalarStyle::Literal.is_block());
        assert!(ScalarStyle::Folded.is_block());
        assert!(!ScalarStyle::Plain.is_block());
        assert!(!ScalarStyle::Quoted.is_block());
    }

    #[test]
    fn test_queue_replays_in_order() {
        let mut queue: EventQueue = [Event::scalar("a"), Event::MappingEnd].into_iter().collect();
        assert_eq!(queue.remaining(), 2);

        let (event, position) = queue.next_event().unwrap();
        assert_eq!(event, Event::scalar("a"));
        assert_eq!(position.offset, 0);

        let (event, position) = queue.next_event().unwrap();
        assert_eq!(event, Event::MappingEnd);
        assert_eq!(position.offset, 1);

        assert_eq!(queue.next_event().unwrap_err(), Error::UnexpectedEof);
    }

    #[test]
    fn test_queue_error() {
        let mut queue = EventQueue::new();
        queue.push(Event::StreamStart).push_error("bad indentation");

        assert!(queue.next_event().is_ok());
        match queue.next_event() {
            Err(Error::Parse { message, position }) => {
                assert_eq!(message, "bad indentation");
                assert_eq!(position.unwrap().offset, 1);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_document_wrapper() {
        let queue = EventQueue::document([Event::scalar("x")]);
        assert_eq!(queue.remaining(), 5);
    }
}
