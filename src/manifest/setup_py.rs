//! `setup.py` support.
//!
//! Uses tree-sitter-python to find the version in the syntax tree:
//! - a top-level `version = '<literal>'` assignment
//! - a `version=` keyword argument to a `setup(...)` call, which wins over
//!   the assignment; `version=version` resolves to the assignment's literal
//!
//! Rewrites only ever touch the line of the top-level assignment.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};
use semver::Version;
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::error::ManifestError;

use super::lines::{line_body, replace_line, split_lines};

static ASSIGNMENT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(version\s*=\s*)["']\d+\.\d+\.\d+["']"#).expect("Invalid regex")
});

/// A top-level assignment to the name `version`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct VersionAssignment {
    /// 0-based line of the statement.
    row: usize,
    /// The assigned value when it is a plain string literal.
    literal: Option<String>,
}

/// The value passed as `setup(version=...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeywordVersion {
    Literal(String),
    /// `version=version`
    VersionName,
}

/// Read the version declared by a setup.py source.
pub fn read_setup_version(path: &Path, content: &str) -> Result<Option<String>, ManifestError> {
    let tree = parse_python(path, content)?;
    let root = tree.root_node();

    let assigned = version_assignments(root, content)
        .into_iter()
        .rev()
        .find_map(|a| a.literal);

    let declared = match setup_keyword_version(root, content) {
        Some(KeywordVersion::Literal(value)) => Some(value),
        Some(KeywordVersion::VersionName) | None => assigned,
    };

    Ok(declared.filter(|v| !v.is_empty()))
}

/// Rewrite the literal on the line of the last top-level `version = ...`.
///
/// The new literal always uses single quotes. Returns `Ok(None)` when there
/// is no such assignment or its line holds no `x.y.z` literal.
pub fn rewrite_version_assignment(
    path: &Path,
    content: &str,
    new_version: &Version,
) -> Result<Option<String>, ManifestError> {
    let tree = parse_python(path, content)?;

    let Some(assignment) = version_assignments(tree.root_node(), content).pop() else {
        debug!("{}: no top-level version assignment", path.display());
        return Ok(None);
    };

    let lines = split_lines(content);
    let Some(line) = lines.get(assignment.row) else {
        return Ok(None);
    };

    let body = line_body(line);
    if !ASSIGNMENT_LITERAL.is_match(body) {
        debug!(
            "{}: line {} has no x.y.z literal to replace",
            path.display(),
            assignment.row + 1
        );
        return Ok(None);
    }

    let replaced = ASSIGNMENT_LITERAL.replace(body, |caps: &Captures<'_>| {
        format!("{}'{}'", &caps[1], new_version)
    });

    Ok(Some(replace_line(&lines, assignment.row, &replaced)))
}

fn parse_python(path: &Path, content: &str) -> Result<Tree, ManifestError> {
    let parse_err = |reason: String| ManifestError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| parse_err(format!("Failed to load Python grammar: {}", e)))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| parse_err("Parser produced no syntax tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        let line = first_error(root).map(|n| n.start_position().row + 1).unwrap_or(1);
        return Err(parse_err(format!("invalid syntax (line {})", line)));
    }

    Ok(tree)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().filter(|c| c.has_error()).find_map(first_error)
}

/// All top-level assignments whose targets include the bare name `version`.
fn version_assignments(root: Node<'_>, source: &str) -> Vec<VersionAssignment> {
    let mut found = Vec::new();
    let mut cursor = root.walk();

    for statement in root.named_children(&mut cursor) {
        if statement.kind() != "expression_statement" {
            continue;
        }

        let mut inner = statement.walk();
        for expr in statement.named_children(&mut inner) {
            if expr.kind() != "assignment" {
                continue;
            }
            if let Some(literal) = assigned_to_version(expr, source) {
                found.push(VersionAssignment {
                    row: statement.start_position().row,
                    literal,
                });
            }
        }
    }

    found
}

/// For `a = version = '1.0.0'` style chains, returns `Some(literal)` when
/// one of the targets is `version`.
///
/// Annotated (`version: str = ...`) and tuple targets are not matched.
fn assigned_to_version(assignment: Node<'_>, source: &str) -> Option<Option<String>> {
    if assignment.child_by_field_name("type").is_some() {
        return None;
    }

    let mut targets_version = false;
    let mut current = assignment;

    loop {
        if let Some(left) = current.child_by_field_name("left") {
            if left.kind() == "identifier" && node_text(left, source) == "version" {
                targets_version = true;
            }
        }

        let right = current.child_by_field_name("right")?;
        if right.kind() == "assignment" {
            current = right;
            continue;
        }

        return targets_version.then(|| string_literal(right, source));
    }
}

/// First `setup(version=...)` keyword with a usable value, in breadth-first
/// order over the whole tree.
fn setup_keyword_version(root: Node<'_>, source: &str) -> Option<KeywordVersion> {
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        if node.kind() == "call" && is_setup_callee(node, source) {
            if let Some(version) = keyword_version(node, source) {
                return Some(version);
            }
        }

        let mut cursor = node.walk();
        queue.extend(node.named_children(&mut cursor));
    }

    None
}

fn is_setup_callee(call: Node<'_>, source: &str) -> bool {
    call.child_by_field_name("function")
        .is_some_and(|f| f.kind() == "identifier" && node_text(f, source) == "setup")
}

fn keyword_version(call: Node<'_>, source: &str) -> Option<KeywordVersion> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();

    let keywords: Vec<Node<'_>> = arguments
        .named_children(&mut cursor)
        .filter(|arg| arg.kind() == "keyword_argument")
        .collect();

    for keyword in keywords {
        let is_version = keyword
            .child_by_field_name("name")
            .is_some_and(|name| node_text(name, source) == "version");
        if !is_version {
            continue;
        }

        let Some(value) = keyword.child_by_field_name("value") else {
            continue;
        };

        if let Some(literal) = string_literal(value, source) {
            return Some(KeywordVersion::Literal(literal));
        }
        if value.kind() == "identifier" && node_text(value, source) == "version" {
            return Some(KeywordVersion::VersionName);
        }
    }

    None
}

/// The contents of a plain (non-byte, non-f) string literal.
fn string_literal(node: Node<'_>, source: &str) -> Option<String> {
    // `version = ('1.0.0')`
    let mut node = node;
    while node.kind() == "parenthesized_expression" {
        node = node.named_child(0)?;
    }

    if node.kind() != "string" {
        return None;
    }

    let text = node_text(node, source);
    let body = text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let prefix = &text[..text.len() - body.len()];
    if prefix.chars().any(|c| matches!(c, 'b' | 'B' | 'f' | 'F')) {
        return None;
    }

    ["\"\"\"", "'''", "\"", "'"].iter().find_map(|quote| {
        body.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
            .map(str::to_string)
    })
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}
