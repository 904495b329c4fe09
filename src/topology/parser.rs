//! Record parsing for the three plain-text inputs.
//!
//! * topology: first non-blank line is the node count, then one
//!   `src dst cost` triple per line
//! * messages: `src dst payload...`, payload is the rest of the line
//! * changes: `src dst cost` triples, applied in order
//!
//! Blank lines are skipped everywhere. Any other malformed line is an error
//! carrying the input name and the 1-based line number.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use log::{debug, warn};

use super::types::{EdgeCost, EdgeUpdate, MessageRecord, NodeId, MAX_NODES};

/// Errors raised while turning input text into records.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{input}: missing node count")]
    MissingNodeCount { input: String },
    #[error("{input}:{line}: invalid node count '{value}'")]
    InvalidNodeCount { input: String, line: usize, value: String },
    #[error("{input}:{line}: expected {expected}, found '{content}'")]
    Malformed {
        input: String,
        line: usize,
        expected: &'static str,
        content: String,
    },
    #[error("{input}:{line}: invalid {field} '{value}'")]
    InvalidNumber {
        input: String,
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("{input}:{line}: node {node} out of range for {node_count} nodes")]
    NodeOutOfRange {
        input: String,
        line: usize,
        node: NodeId,
        node_count: usize,
    },
}

/// Parsed topology input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyInput {
    pub node_count: usize,
    pub edges: Vec<EdgeUpdate>,
}

/// Non-blank lines with their 1-based line numbers.
fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_node(input: &str, line: usize, field: &'static str, value: &str) -> Result<NodeId, ParseError> {
    value.parse::<NodeId>().map_err(|_| ParseError::InvalidNumber {
        input: input.to_string(),
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_edge_line(input: &str, line: usize, text: &str) -> Result<EdgeUpdate, ParseError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(ParseError::Malformed {
            input: input.to_string(),
            line,
            expected: "'src dst cost'",
            content: text.trim().to_string(),
        });
    }

    let source = parse_node(input, line, "source node", fields[0])?;
    let target = parse_node(input, line, "destination node", fields[1])?;
    let cost = fields[2]
        .parse::<i64>()
        .ok()
        .and_then(EdgeCost::from_raw)
        .ok_or_else(|| ParseError::InvalidNumber {
            input: input.to_string(),
            line,
            field: "cost",
            value: fields[2].to_string(),
        })?;

    Ok(EdgeUpdate { source, target, cost })
}

/// Parse the topology input.
pub fn parse_topology(input: &str, content: &str) -> Result<TopologyInput, ParseError> {
    let mut lines = content_lines(content);

    let (line, header) = lines.next().ok_or_else(|| ParseError::MissingNodeCount {
        input: input.to_string(),
    })?;
    let node_count = header
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_NODES).contains(n))
        .ok_or_else(|| ParseError::InvalidNodeCount {
            input: input.to_string(),
            line,
            value: header.trim().to_string(),
        })?;

    let mut edges = Vec::new();
    for (line, text) in lines {
        let edge = parse_edge_line(input, line, text)?;
        for node in [edge.source, edge.target] {
            if node >= node_count {
                return Err(ParseError::NodeOutOfRange {
                    input: input.to_string(),
                    line,
                    node,
                    node_count,
                });
            }
        }
        if edges.iter().any(|e: &EdgeUpdate| {
            (e.source, e.target) == (edge.source, edge.target)
                || (e.source, e.target) == (edge.target, edge.source)
        }) {
            warn!(
                "{}:{}: edge {}-{} listed more than once, last value wins",
                input, line, edge.source, edge.target
            );
        }
        edges.push(edge);
    }

    debug!("{}: {} nodes, {} edge records", input, node_count, edges.len());
    Ok(TopologyInput { node_count, edges })
}

/// Parse the messages input.
pub fn parse_messages(input: &str, content: &str) -> Result<Vec<MessageRecord>, ParseError> {
    let mut messages = Vec::new();

    for (line, text) in content_lines(content) {
        let rest = text.trim_start();
        let (source_field, rest) = split_field(rest);
        let (destination_field, rest) = split_field(rest);

        if source_field.is_empty() || destination_field.is_empty() {
            return Err(ParseError::Malformed {
                input: input.to_string(),
                line,
                expected: "'src dst message'",
                content: text.trim().to_string(),
            });
        }

        messages.push(MessageRecord {
            source: parse_node(input, line, "source node", source_field)?,
            destination: parse_node(input, line, "destination node", destination_field)?,
            payload: rest.to_string(),
        });
    }

    Ok(messages)
}

/// Parse the changes input.
pub fn parse_changes(input: &str, content: &str) -> Result<Vec<EdgeUpdate>, ParseError> {
    content_lines(content)
        .map(|(line, text)| parse_edge_line(input, line, text))
        .collect()
}

/// Split off the first whitespace-delimited field; the remainder has its
/// leading whitespace removed.
fn split_field(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("Error: open file failed: '{}'", path.display()))
}

/// Read and parse a topology file.
pub fn parse_topology_file(path: &Path) -> Result<TopologyInput> {
    let content = read_input(path)?;
    Ok(parse_topology(&path.display().to_string(), &content)?)
}

/// Read and parse a messages file.
pub fn parse_messages_file(path: &Path) -> Result<Vec<MessageRecord>> {
    let content = read_input(path)?;
    Ok(parse_messages(&path.display().to_string(), &content)?)
}

/// Read and parse a changes file.
pub fn parse_changes_file(path: &Path) -> Result<Vec<EdgeUpdate>> {
    let content = read_input(path)?;
    Ok(parse_changes(&path.display().to_string(), &content)?)
}
