//! One-hop identifier resolution against declarations in the current file.
//!
//! From the identifier, enclosing scopes are searched innermost first. The
//! first scope that binds the name decides the outcome. Only a variable
//! declarator with an initializer yields a value; every other binding kind
//! (parameter, import, function, class, catch or loop variable) stops the
//! search as unresolved. Nothing outside the file is consulted.
//!
//! `let`, `const` and declarations bind in their block; a `switch` body is a
//! single block across all its cases. `var` binds in the nearest enclosing
//! function or the program, wherever its nested block sits.

use tree_sitter::Node;

/// What the nearest binding of a name turned out to be.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'tree> {
    /// `const name = <init>` / `let` / `var`.
    Initialized(Node<'tree>),
    /// Declared, but not as an initialized simple variable.
    Other,
}

/// Find the nearest binding of `name` visible from `at`.
pub fn lookup<'tree>(at: Node<'tree>, name: &str, source: &[u8]) -> Option<Binding<'tree>> {
    let mut current = at.parent();
    while let Some(scope) = current {
        if let Some(binding) = binding_in_scope(scope, name, source) {
            return Some(binding);
        }
        current = scope.parent();
    }
    None
}

fn binding_in_scope<'tree>(scope: Node<'tree>, name: &str, source: &[u8]) -> Option<Binding<'tree>> {
    match scope.kind() {
        "program" => block_binding(scope, name, source)
            .or_else(|| hoisted_var(scope, name, source)),
        "statement_block" | "class_static_block" => block_binding(scope, name, source),
        "switch_body" => {
            let mut cursor = scope.walk();
            let cases: Vec<Node<'tree>> = scope.named_children(&mut cursor).collect();
            cases
                .into_iter()
                .find_map(|case| block_binding(case, name, source))
        }
        kind if is_function(kind) => {
            let params = scope
                .child_by_field_name("parameters")
                .or_else(|| scope.child_by_field_name("parameter"));
            if params.is_some_and(|p| pattern_binds(p, name, source)) {
                return Some(Binding::Other);
            }
            let body = scope.child_by_field_name("body")?;
            hoisted_var(body, name, source)
        }
        "for_statement" => {
            let init = scope.child_by_field_name("initializer")?;
            binding_in_statement(init, name, source)
        }
        "for_in_statement" => {
            let left = scope.child_by_field_name("left")?;
            pattern_binds(left, name, source).then_some(Binding::Other)
        }
        "catch_clause" => {
            let param = scope.child_by_field_name("parameter")?;
            pattern_binds(param, name, source).then_some(Binding::Other)
        }
        _ => None,
    }
}

fn is_function(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "generator_function"
            | "arrow_function"
            | "method_definition"
    )
}

/// Bindings made directly by the statements of one block.
fn block_binding<'tree>(block: Node<'tree>, name: &str, source: &[u8]) -> Option<Binding<'tree>> {
    let mut cursor = block.walk();
    let statements: Vec<Node<'tree>> = block.named_children(&mut cursor).collect();
    statements
        .into_iter()
        .find_map(|stmt| binding_in_statement(stmt, name, source))
}

/// A `var` anywhere under `root`, not looking inside nested functions.
fn hoisted_var<'tree>(root: Node<'tree>, name: &str, source: &[u8]) -> Option<Binding<'tree>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind() == "variable_declaration" {
            if let Some(binding) = binding_in_statement(node, name, source) {
                return Some(binding);
            }
            continue;
        }
        if node != root && (is_function(node.kind()) || node.kind() == "class_body") {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'tree>> = node.named_children(&mut cursor).collect();
        // Reversed so declarations are visited in source order.
        stack.extend(children.into_iter().rev());
    }
    None
}

fn binding_in_statement<'tree>(stmt: Node<'tree>, name: &str, source: &[u8]) -> Option<Binding<'tree>> {
    match stmt.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = stmt.walk();
            let declarators: Vec<Node<'tree>> = stmt
                .named_children(&mut cursor)
                .filter(|n| n.kind() == "variable_declarator")
                .collect();
            declarators.into_iter().find_map(|decl| {
                let target = decl.child_by_field_name("name")?;
                if target.kind() == "identifier" {
                    if text(target, source) != Some(name) {
                        return None;
                    }
                    Some(match decl.child_by_field_name("value") {
                        Some(value) => Binding::Initialized(value),
                        None => Binding::Other,
                    })
                } else {
                    pattern_binds(target, name, source).then_some(Binding::Other)
                }
            })
        }
        "export_statement" => {
            let decl = stmt.child_by_field_name("declaration")?;
            binding_in_statement(decl, name, source)
        }
        "function_declaration"
        | "generator_function_declaration"
        | "class_declaration"
        | "abstract_class_declaration"
        | "enum_declaration" => {
            let decl_name = stmt.child_by_field_name("name")?;
            (text(decl_name, source) == Some(name)).then_some(Binding::Other)
        }
        "import_statement" => import_binds(stmt, name, source).then_some(Binding::Other),
        _ => None,
    }
}

/// True if the binding pattern (or parameter list) introduces `name`.
fn pattern_binds(node: Node, name: &str, source: &[u8]) -> bool {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => text(node, source) == Some(name),
        "pair_pattern" => node
            .child_by_field_name("value")
            .is_some_and(|v| pattern_binds(v, name, source)),
        "assignment_pattern" | "object_assignment_pattern" => node
            .child_by_field_name("left")
            .is_some_and(|l| pattern_binds(l, name, source)),
        "required_parameter" | "optional_parameter" => node
            .child_by_field_name("pattern")
            .is_some_and(|p| pattern_binds(p, name, source)),
        "formal_parameters" | "object_pattern" | "array_pattern" | "rest_pattern" => {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            children.into_iter().any(|c| pattern_binds(c, name, source))
        }
        _ => false,
    }
}

fn import_binds(stmt: Node, name: &str, source: &[u8]) -> bool {
    let mut stack = vec![stmt];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "import_specifier" => {
                let local = node
                    .child_by_field_name("alias")
                    .or_else(|| node.child_by_field_name("name"));
                if local.and_then(|l| text(l, source)) == Some(name) {
                    return true;
                }
            }
            "identifier" => {
                if text(node, source) == Some(name) {
                    return true;
                }
            }
            "string" => {}
            _ => {
                let mut cursor = node.walk();
                stack.extend(node.named_children(&mut cursor));
            }
        }
    }
    false
}

fn text<'a>(node: Node, source: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(source).ok()
}
