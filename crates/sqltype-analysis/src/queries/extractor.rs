//! Depth-first search for `<identifier>.<method>(sql, ...)` call sites.
//!
//! The receiver is matched by shape only: any plain identifier whose member
//! name equals the configured method counts, whatever its type.

use std::path::Path;

use sqltype_core::diagnostics::{Diagnostic, UnresolvedReason};
use tree_sitter::{Node, Tree};

use super::literal::{literal_text, peel};
use super::scope::{self, Binding};
use super::types::{FileScan, QueryCall};

/// Finds query call sites in one syntax tree.
#[derive(Debug, Clone)]
pub struct QueryCallExtractor {
    method_name: String,
}

impl QueryCallExtractor {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
        }
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Scan the whole tree in pre-order. Call sites whose SQL text cannot be
    /// resolved are skipped with one diagnostic each.
    pub fn extract(&self, tree: &Tree, source: &str, path: &Path) -> FileScan {
        let bytes = source.as_bytes();
        let mut scan = FileScan::default();
        let mut cursor = tree.walk();

        loop {
            let node = cursor.node();
            if node.kind() == "call_expression" && self.is_marker_call(node, bytes) {
                match self.resolve_call(node, bytes) {
                    Ok(call) => scan.query_calls.push(call),
                    Err(reason) => {
                        let (line, column) = position(node);
                        scan.diagnostics.push(Diagnostic::UnresolvedLiteral {
                            file: path.to_path_buf(),
                            line,
                            column,
                            reason,
                        });
                    }
                }
            }

            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return scan;
                }
            }
        }
    }

    fn is_marker_call(&self, call: Node, source: &[u8]) -> bool {
        let Some(callee) = call.child_by_field_name("function") else {
            return false;
        };
        if callee.kind() != "member_expression" {
            return false;
        }
        let object_is_ident = callee
            .child_by_field_name("object")
            .is_some_and(|o| o.kind() == "identifier");
        let property_matches = callee
            .child_by_field_name("property")
            .and_then(|p| p.utf8_text(source).ok())
            .is_some_and(|p| p == self.method_name);
        object_is_ident && property_matches
    }

    fn resolve_call(&self, call: Node, source: &[u8]) -> Result<QueryCall, UnresolvedReason> {
        let arguments = call
            .child_by_field_name("arguments")
            .filter(|a| a.kind() == "arguments")
            .ok_or(UnresolvedReason::NoArguments)?;

        let mut cursor = arguments.walk();
        let args: Vec<Node> = arguments
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .collect();
        let (first, rest) = args.split_first().ok_or(UnresolvedReason::NoArguments)?;

        let sql = resolve_sql(*first, source)?;
        let (line, column) = position(call);
        Ok(QueryCall {
            sql,
            args: rest
                .iter()
                .map(|n| n.utf8_text(source).unwrap_or_default().to_string())
                .collect(),
            line,
            column,
        })
    }
}

/// Literal first, then exactly one hop through a same-file declaration.
fn resolve_sql(arg: Node, source: &[u8]) -> Result<String, UnresolvedReason> {
    if let Some(text) = literal_text(arg, source) {
        return Ok(text.into_string());
    }

    let arg = peel(arg);
    if arg.kind() != "identifier" {
        return Err(UnresolvedReason::NotALiteral {
            kind: arg.kind().to_string(),
        });
    }
    let name = arg.utf8_text(source).unwrap_or_default().to_string();

    match scope::lookup(arg, &name, source) {
        None => Err(UnresolvedReason::IdentifierNotFound { name }),
        Some(Binding::Other) => Err(UnresolvedReason::NotAVariable { name }),
        Some(Binding::Initialized(init)) => {
            if let Some(text) = literal_text(init, source) {
                return Ok(text.into_string());
            }
            let init = peel(init);
            if init.kind() == "identifier" {
                Err(UnresolvedReason::ChainedIdentifier {
                    name,
                    target: init.utf8_text(source).unwrap_or_default().to_string(),
                })
            } else {
                Err(UnresolvedReason::InitializerNotALiteral {
                    name,
                    kind: init.kind().to_string(),
                })
            }
        }
    }
}

fn position(node: Node) -> (u32, u32) {
    let start = node.start_position();
    (start.row as u32 + 1, start.column as u32 + 1)
}
