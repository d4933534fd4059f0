//! Event source backed by the yaml-rust2 pull parser.

use crate::{Event, EventSource, Position, Result, ScalarStyle};
use yaml_rust2::parser::{Event as YamlEvent, Parser};
use yaml_rust2::scanner::TScalarStyle;

/// Pulls events from YAML text.
///
/// Anchors and tags are dropped; aliases keep the parser's numeric anchor id.
pub struct YamlEventSource<'a> {
    parser: Parser<std::str::Chars<'a>>,
}

impl<'a> YamlEventSource<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            parser: Parser::new_from_str(content),
        }
    }
}

impl EventSource for YamlEventSource<'_> {
    fn next_event(&mut self) -> Result<(Event, Position)> {
        let (event, marker) = self.parser.next_token()?;
        Ok((convert_event(event), Position::from_marker(&marker)))
    }
}

fn convert_event(event: YamlEvent) -> Event {
    match event {
        YamlEvent::Nothing => Event::Nothing,
        YamlEvent::StreamStart => Event::StreamStart,
        YamlEvent::StreamEnd => Event::StreamEnd,
        YamlEvent::DocumentStart => Event::DocumentStart,
        YamlEvent::DocumentEnd => Event::DocumentEnd,
        YamlEvent::SequenceStart(..) => Event::SequenceStart,
        YamlEvent::SequenceEnd => Event::SequenceEnd,
        YamlEvent::MappingStart(..) => Event::MappingStart,
        YamlEvent::MappingEnd => Event::MappingEnd,
        YamlEvent::Scalar(text, style, _anchor_id, _tag) => Event::Scalar {
            text,
            style: convert_style(style),
        },
        YamlEvent::Alias(anchor) => Event::Alias { anchor },
    }
}

fn convert_style(style: TScalarStyle) -> ScalarStyle {
    match style {
        TScalarStyle::Literal => ScalarStyle::Literal,
        TScalarStyle::Folded => ScalarStyle::Folded,
        TScalarStyle::SingleQuoted | TScalarStyle::DoubleQuoted => ScalarStyle::Quoted,
        _ => ScalarStyle::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(content: &str) -> Vec<Event> {
        let mut source = YamlEventSource::new(content);
        let mut events = Vec::new();
        loop {
            let (event, _) = source.next_event().unwrap();
            let done = event == Event::StreamEnd;
            events.push(event);
            if done {
                return events;
            }
        }
    }

    #[test]
    fn test_mapping_events() {
        let events = collect("title: My Document\n");
        assert_eq!(
            events,
            vec![
                Event::StreamStart,
                Event::DocumentStart,
                Event::MappingStart,
                Event::scalar("title"),
                Event::scalar("My Document"),
                Event::MappingEnd,
                Event::DocumentEnd,
                Event::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_scalar_styles() {
        let events = collect("a: 'quoted'\nb: |\n  block\nc: >\n  folded\n");
        let styles: Vec<ScalarStyle> = events
            .iter()
            .filter_map(|event| match event {
                Event::Scalar { style, .. } => Some(*style),
                _ => None,
            })
            .collect();
        assert_eq!(
            styles,
            vec![
                ScalarStyle::Plain,
                ScalarStyle::Quoted,
                ScalarStyle::Plain,
                ScalarStyle::Literal,
                ScalarStyle::Plain,
                ScalarStyle::Folded,
            ]
        );
    }

    #[test]
    fn test_alias_keeps_anchor_id() {
        let events = collect("a: &x 1\nb: *x\n");
        assert!(events.iter().any(|e| matches!(e, Event::Alias { .. })));
    }

    #[test]
    fn test_scan_error() {
        let mut source = YamlEventSource::new("key: [unclosed\n");
        let mut result = source.next_event();
        while let Ok((event, _)) = &result {
            if *event == Event::StreamEnd {
                break;
            }
            result = source.next_event();
        }
        assert!(matches!(result, Err(crate::Error::Parse { .. })));
    }
}
