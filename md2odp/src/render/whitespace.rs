//! Significant whitespace for code text.
//!
//! Presentation text collapses runs of spaces, so code keeps its layout only when every run of
//! two or more spaces becomes an explicit space-count element, every tab a tab element and
//! every newline a line break. A single space stays part of the surrounding literal.

use crate::odf::{Node, Span};

/// One unit of split text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitespaceUnit<'a> {
    /// Text without tabs and without runs of two or more spaces
    Literal(&'a str),
    Spaces(usize),
    Tab,
    LineBreak,
}

impl WhitespaceUnit<'_> {
    /// Element for this unit; literals are turned into nodes by `literal`.
    pub fn into_node(self, literal: impl FnOnce(&str) -> Node) -> Node {
        match self {
            WhitespaceUnit::Literal(text) => literal(text),
            WhitespaceUnit::Spaces(count) => Node::Spaces(count),
            WhitespaceUnit::Tab => Node::Tab,
            WhitespaceUnit::LineBreak => Node::LineBreak,
        }
    }
}

/// Split `text` into literals and whitespace markers.
///
/// A line break is emitted between adjacent lines, never after the last one. Empty literals
/// are not emitted, so empty input yields no units.
pub fn split_whitespace(text: &str) -> Vec<WhitespaceUnit<'_>> {
    let mut units = Vec::new();
    if text.is_empty() {
        return units;
    }
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            units.push(WhitespaceUnit::LineBreak);
        }
        split_line(line, &mut units);
    }
    units
}

fn split_line<'a>(line: &'a str, units: &mut Vec<WhitespaceUnit<'a>>) {
    let bytes = line.as_bytes();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\t' => {
                push_literal(&line[literal_start..pos], units);
                units.push(WhitespaceUnit::Tab);
                pos += 1;
                literal_start = pos;
            }
            b' ' => {
                let run = bytes[pos..].iter().take_while(|&&b| b == b' ').count();
                if run >= 2 {
                    push_literal(&line[literal_start..pos], units);
                    units.push(WhitespaceUnit::Spaces(run));
                    literal_start = pos + run;
                }
                pos += run;
            }
            _ => pos += 1,
        }
    }
    push_literal(&line[literal_start..], units);
}

fn push_literal<'a>(literal: &'a str, units: &mut Vec<WhitespaceUnit<'a>>) {
    if !literal.is_empty() {
        units.push(WhitespaceUnit::Literal(literal));
    }
}

/// Plain code text as unstyled spans and whitespace markers.
pub fn plain_code_nodes(text: &str) -> Vec<Node> {
    split_whitespace(text)
        .into_iter()
        .map(|unit| unit.into_node(|literal| Node::Span(Span::text(literal))))
        .collect()
}
