//! Rendering engine for email templates
//!
//! Templates support two constructs:
//!
//! - `{{key}}` placeholders, replaced with the value of `key` (or nothing)
//! - `{{#if key}} ... {{/if}}` blocks, kept only when `key` is truthy
//!
//! Rendering is a two-pass transform. Conditionals are decided first, directly
//! against the data, into kept or removed blocks. Placeholders inside the kept
//! blocks are then substituted in a single pass: replacement values are never
//! scanned again, so data cannot inject further placeholders.
//!
//! A conditional marker is `{{#if` followed by whitespace; `{{#iffy}}` and
//! similar text is left as it is.
//!
//! Conditional blocks do not nest. A template containing a nested `{{#if}}` is
//! rejected at compile time with [`TemplateError::NestedConditional`].

use serde_json::Value;

use super::types::{RenderedTemplate, TemplateData, TemplateError, TemplateRecord, TemplateResult};

const OPEN_IF: &str = "{{#if";
const CLOSE_IF: &str = "{{/if}}";
const OPEN_TAG: &str = "{{";
const CLOSE_TAG: &str = "}}";

/// A literal run of text or a placeholder reference
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Placeholder(String),
}

/// Top-level unit of a parsed template string
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Always(Vec<Piece>),
    Conditional { key: String, body: Vec<Piece> },
}

/// Outcome of evaluating a segment against the data
enum Block<'a> {
    Kept(&'a [Piece]),
    Removed,
}

/// A single template string parsed into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledText {
    segments: Vec<Segment>,
}

impl CompiledText {
    /// Parse a template string.
    pub fn parse(source: &str) -> TemplateResult<Self> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];
            let open = find_open_if(rest);
            let close = rest.find(CLOSE_IF);

            let open = match (open, close) {
                (None, None) => {
                    segments.push(Segment::Always(tokenize(rest)));
                    break;
                }
                (None, Some(c)) => return Err(TemplateError::UnexpectedEndIf(pos + c)),
                (Some(o), Some(c)) if c < o => return Err(TemplateError::UnexpectedEndIf(pos + c)),
                (Some(o), _) => o,
            };

            if open > 0 {
                segments.push(Segment::Always(tokenize(&rest[..open])));
            }

            let marker_start = pos + open;
            let after_open = &rest[open + OPEN_IF.len()..];
            let marker_end = after_open
                .find(CLOSE_TAG)
                .ok_or(TemplateError::MalformedConditional(marker_start))?;
            let raw_key = &after_open[..marker_end];
            let key = raw_key.trim();
            if !raw_key.starts_with(char::is_whitespace) || !is_valid_key(key) {
                return Err(TemplateError::MalformedConditional(marker_start));
            }

            let body_and_rest = &after_open[marker_end + CLOSE_TAG.len()..];
            let body_len = body_and_rest
                .find(CLOSE_IF)
                .ok_or_else(|| TemplateError::UnclosedConditional(key.to_string()))?;
            let body = &body_and_rest[..body_len];

            if let Some(inner) = find_open_if(body) {
                return Err(TemplateError::NestedConditional {
                    outer: key.to_string(),
                    inner: conditional_key(&body[inner + OPEN_IF.len()..]),
                });
            }

            segments.push(Segment::Conditional {
                key: key.to_string(),
                body: tokenize(body),
            });

            let body_start = marker_start + OPEN_IF.len() + marker_end + CLOSE_TAG.len();
            pos = body_start + body_len + CLOSE_IF.len();
        }

        Ok(Self { segments })
    }

    /// Render against `data`.
    pub fn render(&self, data: &TemplateData) -> String {
        let mut output = String::new();

        for block in self.segments.iter().map(|segment| evaluate(segment, data)) {
            if let Block::Kept(pieces) = block {
                substitute(pieces, data, &mut output);
            }
        }

        output
    }
}

/// A template record with all three parts parsed.
///
/// Parsing happens once; rendering a compiled template cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    name: String,
    subject: CompiledText,
    text: CompiledText,
    html: CompiledText,
}

impl CompiledTemplate {
    pub fn compile(record: &TemplateRecord) -> TemplateResult<Self> {
        Ok(Self {
            name: record.name.clone(),
            subject: CompiledText::parse(&record.subject)?,
            text: CompiledText::parse(&record.text)?,
            html: CompiledText::parse(&record.html)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, data: &TemplateData) -> RenderedTemplate {
        RenderedTemplate {
            subject: self.subject.render(data),
            text: self.text.render(data),
            html: self.html.render(data),
        }
    }
}

/// Render a template record with the given data.
pub fn render(template: &TemplateRecord, data: &TemplateData) -> TemplateResult<RenderedTemplate> {
    Ok(CompiledTemplate::compile(template)?.render(data))
}

/// Render a single template string with the given data.
pub fn render_str(source: &str, data: &TemplateData) -> TemplateResult<String> {
    Ok(CompiledText::parse(source)?.render(data))
}

/// Whether a value enables a conditional block.
///
/// Missing, `null`, `""`, `false` and zero are falsy. Everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// String form of a placeholder value
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // For arrays and objects, use JSON representation
        Some(other) => other.to_string(),
    }
}

fn evaluate<'a>(segment: &'a Segment, data: &TemplateData) -> Block<'a> {
    match segment {
        Segment::Always(pieces) => Block::Kept(pieces),
        Segment::Conditional { key, body } => {
            if is_truthy(data.get(key)) {
                Block::Kept(body)
            } else {
                Block::Removed
            }
        }
    }
}

fn substitute(pieces: &[Piece], data: &TemplateData, output: &mut String) {
    for piece in pieces {
        match piece {
            Piece::Literal(text) => output.push_str(text),
            Piece::Placeholder(key) => output.push_str(&display_value(data.get(key))),
        }
    }
}

/// Split text into literals and `{{key}}` placeholders.
///
/// Brace pairs that do not enclose a valid key stay literal.
fn tokenize(source: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(start) = rest.find(OPEN_TAG) {
        literal.push_str(&rest[..start]);
        let after = &rest[start + OPEN_TAG.len()..];

        match after.find(CLOSE_TAG) {
            Some(end) if is_valid_key(after[..end].trim()) => {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Placeholder(after[..end].trim().to_string()));
                rest = &after[end + CLOSE_TAG.len()..];
            }
            // Advance one brace so `{{{key}}}` still finds `{{key}}`
            _ => {
                literal.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }

    pieces
}

/// Position of the next `{{#if` followed by whitespace.
///
/// Text such as `{{#iffy}}` is not a marker and stays literal.
fn find_open_if(source: &str) -> Option<usize> {
    let mut offset = 0;

    while let Some(found) = source[offset..].find(OPEN_IF) {
        let start = offset + found;
        let next = source[start + OPEN_IF.len()..].chars().next();
        if next.is_some_and(char::is_whitespace) {
            return Some(start);
        }
        offset = start + OPEN_IF.len();
    }

    None
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Best-effort key of a conditional marker, for error messages
fn conditional_key(after_open: &str) -> String {
    after_open
        .split(CLOSE_TAG)
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}
