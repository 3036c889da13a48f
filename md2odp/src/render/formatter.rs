//! Token runs to styled spans.
//!
//! Consecutive tokens that resolve to the same style category are coalesced into one run. Each
//! run is split into literals and whitespace markers; literals of a plain category become
//! unstyled spans, literals of a styled category become a fresh chain of nested spans
//! (colour, bold, italic, underline from the outside in) with the text in the innermost one.

use crate::odf::{Node, Span};
use crate::render::highlight::{RunStyle, StyleTable, Token};
use crate::render::whitespace::split_whitespace;

/// Format a token stream against `table`.
pub fn format_tokens<I>(tokens: I, table: &StyleTable) -> Vec<Node>
where
    I: IntoIterator<Item = Token>,
{
    let mut out = Vec::new();
    let mut run: Option<(&str, &RunStyle)> = None;
    let mut buffer = String::new();

    for token in tokens {
        let (category, style) = table.resolve(&token.category);
        match run {
            Some((current, _)) if current == category => buffer.push_str(&token.text),
            _ => {
                if let Some((_, current_style)) = run {
                    flush(&buffer, current_style, &mut out);
                }
                buffer.clear();
                buffer.push_str(&token.text);
                run = Some((category, style));
            }
        }
    }
    if let Some((_, style)) = run {
        flush(&buffer, style, &mut out);
    }
    out
}

fn flush(text: &str, style: &RunStyle, out: &mut Vec<Node>) {
    if text.is_empty() {
        return;
    }
    let names = style.style_names();
    out.extend(
        split_whitespace(text)
            .into_iter()
            .map(|unit| unit.into_node(|literal| styled_run(literal, &names))),
    );
}

/// Nested spans for `names`, outermost first, with `text` innermost.
fn styled_run(text: &str, names: &[String]) -> Node {
    let mut node = Node::Span(Span::text(text));
    let Some((innermost, outer)) = names.split_last() else {
        return node;
    };
    if let Node::Span(span) = &mut node {
        span.style = Some(innermost.clone());
    }
    for name in outer.iter().rev() {
        node = Node::Span(Span::styled(name.clone(), vec![node]));
    }
    node
}
