//! Syntax highlighting of code blocks.
//!
//! Code is tokenized with `syntect`'s bundled grammars into a flat stream of
//! (category, text) pairs, where the category is the innermost scope of the token
//! (`keyword.control.rust`). Categories form a hierarchy by dropping the last dotted atom,
//! ending at the root category `""`.
//!
//! Colours come from a bundled theme. Only plain single-scope selectors of the theme are used;
//! each one becomes a [`RunStyle`] in a [`StyleTable`], merged with the entries of its parent
//! categories.

use crate::error::{RenderError, RenderResult};
use crate::odf::{PropertyArea, StyleDef, StyleFamily, StyleRegistry};
use log::warn;
use std::collections::{BTreeMap, HashMap};
use syntect::highlighting::{Color, FontStyle, Theme, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

pub const DEFAULT_HIGHLIGHT_STYLE: &str = "colorful";

pub const BOLD_STYLE: &str = "md2odp-TBold";
pub const ITALIC_STYLE: &str = "md2odp-TItalic";
pub const UNDERLINE_STYLE: &str = "md2odp-TUnderline";

/// Classic highlight style names mapped to bundled themes.
const STYLE_ALIASES: &[(&str, &str)] = &[
    ("colorful", "InspiredGitHub"),
    ("default", "base16-ocean.light"),
    ("friendly", "Solarized (light)"),
    ("emacs", "base16-eighties.dark"),
];

/// A lexical token of highlighted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub category: String,
    pub text: String,
}

impl Token {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Parent of a category; the root category has none.
pub fn parent_category(category: &str) -> Option<&str> {
    if category.is_empty() {
        return None;
    }
    Some(category.rsplit_once('.').map(|(parent, _)| parent).unwrap_or(""))
}

/// Text attributes of a run of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RunStyle {
    /// Foreground colour as `RRGGBB`
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl RunStyle {
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && !self.bold && !self.italic && !self.underline
    }

    /// Style names wrapping a run, outermost first: colour, bold, italic, underline.
    pub fn style_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(color) = &self.color {
            names.push(color_style_name(color));
        }
        if self.bold {
            names.push(BOLD_STYLE.to_string());
        }
        if self.italic {
            names.push(ITALIC_STYLE.to_string());
        }
        if self.underline {
            names.push(UNDERLINE_STYLE.to_string());
        }
        names
    }
}

pub fn color_style_name(color: &str) -> String {
    format!("md2odp-TColor{color}")
}

/// Category to run style mapping. The root category is always present and plain.
#[derive(Debug, Clone)]
pub struct StyleTable {
    styles: HashMap<String, RunStyle>,
}

#[derive(Debug, Clone, Default)]
struct PartialStyle {
    color: Option<String>,
    font_style: Option<FontStyle>,
}

impl StyleTable {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, RunStyle)>) -> Self {
        let mut styles: HashMap<String, RunStyle> = entries.into_iter().collect();
        styles.insert(String::new(), RunStyle::default());
        Self { styles }
    }

    pub fn from_theme(theme: &Theme) -> Self {
        let mut partials: BTreeMap<String, PartialStyle> = BTreeMap::new();
        for item in &theme.scopes {
            for selector in &item.scope.selectors {
                let path = selector.path.as_slice();
                if path.len() != 1 || !selector.excludes.is_empty() {
                    continue;
                }
                let entry = partials.entry(path[0].build_string()).or_default();
                if let Some(color) = item.style.foreground {
                    entry.color = Some(hex(color));
                }
                if let Some(font_style) = item.style.font_style {
                    entry.font_style = Some(font_style);
                }
            }
        }

        let mut styles = HashMap::new();
        for category in partials.keys() {
            let mut color = None;
            let mut font_style = None;
            let mut current = Some(category.as_str());
            while let Some(name) = current {
                if let Some(partial) = partials.get(name) {
                    color = color.or_else(|| partial.color.clone());
                    font_style = font_style.or(partial.font_style);
                }
                current = parent_category(name);
            }
            let font_style = font_style.unwrap_or_else(FontStyle::empty);
            styles.insert(
                category.clone(),
                RunStyle {
                    color,
                    bold: font_style.contains(FontStyle::BOLD),
                    italic: font_style.contains(FontStyle::ITALIC),
                    underline: font_style.contains(FontStyle::UNDERLINE),
                },
            );
        }
        Self::from_entries(styles)
    }

    /// Nearest category with an entry, walking up from `category`, and its style.
    pub fn resolve(&self, category: &str) -> (&str, &RunStyle) {
        let mut current = category;
        loop {
            if let Some((key, style)) = self.styles.get_key_value(current) {
                return (key.as_str(), style);
            }
            match parent_category(current) {
                Some(parent) => current = parent,
                None => return ("", &ROOT_STYLE),
            }
        }
    }

    /// Text styles for every attribute used by the table.
    pub fn register_styles(&self, registry: &mut StyleRegistry) {
        let mut colors: Vec<&str> = self
            .styles
            .values()
            .filter_map(|style| style.color.as_deref())
            .collect();
        colors.sort_unstable();
        colors.dedup();
        for color in colors {
            let value = format!("#{color}");
            registry.add(
                StyleDef::new(StyleFamily::Text, color_style_name(color))
                    .with_properties(PropertyArea::Text, &[("fo:color", value.as_str())]),
            );
        }
        if self.styles.values().any(|style| style.bold) {
            registry.add(
                StyleDef::new(StyleFamily::Text, BOLD_STYLE)
                    .with_properties(PropertyArea::Text, &[("fo:font-weight", "bold")]),
            );
        }
        if self.styles.values().any(|style| style.italic) {
            registry.add(
                StyleDef::new(StyleFamily::Text, ITALIC_STYLE)
                    .with_properties(PropertyArea::Text, &[("fo:font-style", "italic")]),
            );
        }
        if self.styles.values().any(|style| style.underline) {
            registry.add(StyleDef::new(StyleFamily::Text, UNDERLINE_STYLE).with_properties(
                PropertyArea::Text,
                &[
                    ("style:text-underline-style", "solid"),
                    ("style:text-underline-width", "auto"),
                    ("style:text-underline-color", "font-color"),
                ],
            ));
        }
    }
}

static ROOT_STYLE: RunStyle = RunStyle {
    color: None,
    bold: false,
    italic: false,
    underline: false,
};

fn hex(color: Color) -> String {
    format!("{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Tokenizer plus the style table of the selected theme.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    table: StyleTable,
}

impl Highlighter {
    /// Highlighter for a theme name or one of the classic aliases.
    pub fn new(style: &str) -> RenderResult<Self> {
        let mut themes = ThemeSet::load_defaults();
        let theme_name = STYLE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == style)
            .map(|(_, theme)| *theme)
            .unwrap_or(style);

        let theme = themes.themes.remove(theme_name).ok_or_else(|| {
            let mut available: Vec<&str> = STYLE_ALIASES.iter().map(|(alias, _)| *alias).collect();
            available.extend(themes.themes.keys().map(String::as_str));
            RenderError::UnknownHighlightStyle {
                name: style.to_string(),
                available: available.join(", "),
            }
        })?;

        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            table: StyleTable::from_theme(&theme),
        })
    }

    pub fn style_table(&self) -> &StyleTable {
        &self.table
    }

    fn syntax(&self, language: &str) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_token(language)
            .unwrap_or_else(|| {
                warn!("No syntax for language '{language}', highlighting as plain text");
                self.syntaxes.find_syntax_plain_text()
            })
    }

    /// Token stream of `code` in `language`.
    pub fn tokenize(&self, code: &str, language: &str) -> RenderResult<Vec<Token>> {
        let mut state = ParseState::new(self.syntax(language));
        let mut stack = ScopeStack::new();
        let mut tokens = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ops = state
                .parse_line(line, &self.syntaxes)
                .map_err(|e| RenderError::Highlight(e.to_string()))?;
            let mut start = 0;
            for (offset, op) in ops {
                if offset > start {
                    tokens.push(Token::new(innermost(&stack), &line[start..offset]));
                    start = offset;
                }
                stack
                    .apply(&op)
                    .map_err(|e| RenderError::Highlight(format!("{e:?}")))?;
            }
            if start < line.len() {
                tokens.push(Token::new(innermost(&stack), &line[start..]));
            }
        }
        Ok(tokens)
    }
}

fn innermost(stack: &ScopeStack) -> String {
    stack
        .as_slice()
        .last()
        .map(|scope| scope.build_string())
        .unwrap_or_default()
}
