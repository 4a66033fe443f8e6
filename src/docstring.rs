//! Google-style docstring parsing: summary extraction and `Args:` section
//! scanning into [`ParsedArgument`] records.
//!
//! Parsing never fails. Malformed or unexpected lines fold into the nearest
//! argument's description instead of being rejected, because the input is
//! informal human-written prose rather than a formal grammar.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::typemap::is_optional_type_string;

/// Section headings recognized when splitting a docstring, matched
/// case-insensitively against the trimmed line.
const SECTION_HEADINGS: &[&str] = &[
    "args:",
    "arguments:",
    "parameters:",
    "attributes:",
    "returns:",
    "return:",
    "raises:",
    "exceptions:",
    "yields:",
    "yield:",
    "examples:",
    "example:",
    "methods:",
    "note:",
    "notes:",
    "warns:",
    "warnings:",
    "see also:",
];

/// The headings that open an argument section.
const ARG_HEADINGS: &[&str] = &["args:", "arguments:", "parameters:"];

/// `name (type): description`, applied to a line with its indentation
/// stripped. The type capture may be empty (`field ():`).
static ARG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w[\w.]*)\s*\(([^)]*)\)\s*:\s*(.*)$").expect("argument line pattern")
});

/// One argument pulled out of the `Args:` section. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgument {
    pub name: String,
    pub raw_type: String,
    /// Inline description plus any folded continuation lines, dedented so
    /// nested bullet indentation stays relative.
    pub description: String,
    /// False iff the raw type string marks the argument optional.
    pub required: bool,
}

/// The two halves of a parsed docstring.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocstring {
    /// Everything before the first recognized section heading, trimmed.
    pub summary: String,
    pub arguments: Vec<ParsedArgument>,
}

/// Splits a docstring into its summary and argument list.
///
/// The argument block runs from the first `Args:`/`Arguments:`/`Parameters:`
/// heading to the next recognized heading. Without such a heading the
/// argument list is empty, as it is for an `Args:` block holding only the
/// literal `None`.
pub fn parse(docstring: &str) -> ParsedDocstring {
    let lines: Vec<&str> = docstring.lines().collect();

    let summary_end = lines
        .iter()
        .position(|line| is_section_heading(line))
        .unwrap_or(lines.len());
    let summary = lines[..summary_end].join("\n").trim().to_string();

    let mut arguments = Vec::new();
    if let Some(start) = lines.iter().position(|line| is_args_heading(line)) {
        let end = lines[start + 1..]
            .iter()
            .position(|line| is_section_heading(line))
            .map(|offset| start + 1 + offset)
            .unwrap_or(lines.len());
        arguments = parse_args_block(&lines[start + 1..end]);
    }

    trace!(arguments = arguments.len(), "parsed docstring");
    ParsedDocstring { summary, arguments }
}

fn is_section_heading(line: &str) -> bool {
    SECTION_HEADINGS.contains(&line.trim().to_ascii_lowercase().as_str())
}

fn is_args_heading(line: &str) -> bool {
    ARG_HEADINGS.contains(&line.trim().to_ascii_lowercase().as_str())
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Scans the argument block. The indentation column of the first matching
/// line fixes the argument baseline; a matching line at or left of that
/// column starts a new argument, and every other line folds into the
/// current argument's description.
fn parse_args_block(lines: &[&str]) -> Vec<ParsedArgument> {
    let mut baseline: Option<usize> = None;
    let mut current: Option<ArgBuilder> = None;
    let mut arguments: Vec<ParsedArgument> = Vec::new();
    let mut leading: Vec<String> = Vec::new();

    for line in lines {
        let indent = indent_width(line);
        let content = line.trim_start();
        let captures = if content.is_empty() {
            None
        } else {
            ARG_LINE.captures(content)
        };

        let at_argument_level = baseline.is_none_or(|column| indent <= column);
        match captures {
            Some(caps) if at_argument_level => {
                baseline.get_or_insert(indent);
                if let Some(done) = current.take() {
                    store_argument(&mut arguments, done);
                }
                current = Some(ArgBuilder {
                    name: caps[1].to_string(),
                    raw_type: caps[2].to_string(),
                    inline: caps[3].to_string(),
                    extra: std::mem::take(&mut leading),
                });
            }
            _ => {
                if let Some(arg) = current.as_mut() {
                    arg.extra.push((*line).to_string());
                } else if !content.is_empty() {
                    // Prose ahead of the first argument folds forward into
                    // it. With no argument at all (e.g. a bare "None" under
                    // the heading) there is nowhere to fold and it drops.
                    leading.push((*line).to_string());
                }
            }
        }
    }

    if let Some(done) = current.take() {
        store_argument(&mut arguments, done);
    }
    arguments
}

/// Appends a finished argument, overwriting an earlier one with the same
/// name in place.
fn store_argument(arguments: &mut Vec<ParsedArgument>, builder: ArgBuilder) {
    let arg = builder.finish();
    if let Some(slot) = arguments.iter_mut().find(|a| a.name == arg.name) {
        *slot = arg;
    } else {
        arguments.push(arg);
    }
}

struct ArgBuilder {
    name: String,
    raw_type: String,
    inline: String,
    extra: Vec<String>,
}

impl ArgBuilder {
    fn finish(self) -> ParsedArgument {
        let required = !is_optional_type_string(&self.raw_type);
        ParsedArgument {
            name: self.name,
            raw_type: self.raw_type,
            description: assemble_description(&self.inline, &self.extra),
            required,
        }
    }
}

/// Joins the inline description with the folded continuation lines,
/// dedenting the block by the minimum indentation of its non-empty lines so
/// nested bullets keep their relative depth.
fn assemble_description(inline: &str, extra: &[String]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let inline = inline.trim();
    if !inline.is_empty() {
        parts.push(inline.to_string());
    }

    let dedent = extra
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);
    let mut block: Vec<String> = extra
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.chars().skip(dedent).collect()
            }
        })
        .collect();
    while block.last().is_some_and(|line| line.is_empty()) {
        block.pop();
    }
    while block.first().is_some_and(|line| line.is_empty()) {
        block.remove(0);
    }
    if !block.is_empty() {
        parts.push(block.join("\n"));
    }

    parts.join("\n")
}
