use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TemplateError;
use crate::process::raw::RawTable;

/// `{{`, `}}`, or a `{Field}` placeholder.
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}").expect("static regex"));

#[derive(Debug, Clone, PartialEq)]
enum Segment<'a> {
    Literal(String),
    Field(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Literal(String),
    /// Index into the raw row.
    Field(usize),
    /// 1-based position of the row in its source file.
    RowNumber,
}

/// Placeholder that expands to the row's 1-based position when the table has
/// no column of that name.
pub const INDEX_PLACEHOLDER: &str = "Index";

fn malformed(template: &str, reason: &str) -> TemplateError {
    TemplateError::Malformed {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}

fn append(out: &mut Vec<Segment<'_>>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Segment::Literal(prev)) => prev.push_str(text),
        _ => out.push(Segment::Literal(text.to_string())),
    }
}

fn push_literal(template: &str, text: &str, out: &mut Vec<Segment<'_>>) -> Result<(), TemplateError> {
    if text.contains('{') || text.contains('}') {
        return Err(malformed(template, "unmatched brace"));
    }
    append(out, text);
    Ok(())
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in TOKEN.captures_iter(template) {
        let whole = caps.get(0).expect("group 0 always present");
        push_literal(template, &template[last..whole.start()], &mut out)?;
        last = whole.end();

        match whole.as_str() {
            "{{" => append(&mut out, "{"),
            "}}" => append(&mut out, "}"),
            _ => {
                let field = caps.get(1).map_or("", |m| m.as_str());
                if field.is_empty() {
                    return Err(malformed(template, "empty placeholder"));
                }
                if field.contains(':') || field.contains('!') {
                    return Err(malformed(template, "format specs are not supported"));
                }
                out.push(Segment::Field(field));
            }
        }
    }
    push_literal(template, &template[last..], &mut out)?;
    Ok(out)
}

/// Field names a template refers to, in order of appearance.
pub fn placeholders(template: &str) -> Result<Vec<String>, TemplateError> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|s| match s {
            Segment::Field(f) => Some(f.to_string()),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// A `name_format` template bound to one table's header row.
///
/// Substitution is plain text insertion: cell contents are never parsed as
/// template syntax, and every placeholder must name an existing column or
/// `{Index}`, the row's 1-based position (a real `Index` column wins).
#[derive(Debug, Clone, PartialEq)]
pub struct NameTemplate {
    parts: Vec<Part>,
}

impl NameTemplate {
    pub fn compile(template: &str, table: &RawTable) -> Result<Self, TemplateError> {
        let parts = parse(template)?
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => Ok(Part::Literal(text)),
                Segment::Field(field) => match table.column(field) {
                    Some(idx) => Ok(Part::Field(idx)),
                    None if field == INDEX_PLACEHOLDER => Ok(Part::RowNumber),
                    None => Err(TemplateError::UnknownField(field.to_string())),
                },
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }

    /// Expand against `row`, which sits at 1-based position `index` in its table.
    pub fn render(&self, row: &[String], index: usize) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field(idx) => out.push_str(RawTable::cell(row, *idx)),
                Part::RowNumber => out.push_str(&index.to_string()),
            }
        }
        out
    }
}
