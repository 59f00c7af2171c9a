//! Renders the generated module.
//!
//! Layout, per distinct query `i` in description order:
//!
//! ```text
//! type Query{i} = "<sql>";
//! type Params{i} = [<param types>];      // `[] | undefined` with no params
//! type Result{i} = { <column>: <type>; ... };
//! ```
//!
//! followed by the `Params<Q>` / `Result<Q, T>` dispatch types and the
//! narrowed client type. Output depends only on the descriptions and options,
//! so equal inputs always give byte-identical text.

use std::collections::HashSet;
use std::fmt::Write;

use sqltype_core::config::OutputConfig;
use sqltype_core::diagnostics::{Diagnostic, TypeSlot};

use super::dispatch::Dispatch;
use super::ts_emit::{property_key, string_literal};
use crate::probe::{QueryDescription, QueryDescriptions};
use crate::type_table::{SchemaTypeTable, UNKNOWN_TYPE};

const HEADER: &str = "// Generated by sqltype. Do not edit: this file is rewritten on every run.\n";

const IS_HELPER: &str =
    "type Is<A, B> = [A] extends [B] ? ([B] extends [A] ? true : false) : false;";

/// Names used in the import line and the narrowed client type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOptions {
    pub client_module: String,
    pub client_type: String,
    pub result_wrapper: String,
}

impl ModuleOptions {
    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            client_module: config.effective_client_module().to_string(),
            client_type: config.effective_client_type().to_string(),
            result_wrapper: config.effective_result_wrapper().to_string(),
        }
    }
}

impl Default for ModuleOptions {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default())
    }
}

/// The module text and the diagnostics raised while building it.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub module: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn synthesize(
    descriptions: &QueryDescriptions,
    table: &SchemaTypeTable,
    options: &ModuleOptions,
) -> Synthesis {
    let mut diagnostics = Vec::new();
    let mut out = String::new();

    out.push_str(HEADER);
    out.push('\n');
    let _ = writeln!(
        out,
        "import type {{ {}, {} }} from {};",
        options.client_type,
        options.result_wrapper,
        string_literal(&options.client_module)
    );

    let mut params = Dispatch::new("any[]");
    let mut results = Dispatch::new("T");

    for (index, (sql, description)) in descriptions.iter().enumerate() {
        let query = format!("Query{index}");
        let param = format!("Params{index}");
        let result = format!("Result{index}");

        out.push('\n');
        let _ = writeln!(out, "type {query} = {};", string_literal(sql));
        let _ = writeln!(
            out,
            "type {param} = {};",
            params_tuple(sql, description, table, &mut diagnostics)
        );
        let _ = writeln!(
            out,
            "type {result} = {};",
            result_object(sql, description, table, &mut diagnostics)
        );

        params.arm(query.clone(), param);
        results.arm(query, result);
    }

    out.push('\n');
    out.push_str(IS_HELPER);
    out.push_str("\n\n");

    let _ = writeln!(
        out,
        "export type Params<Q extends string> =\n{};\n",
        params.render("Q")
    );
    let _ = writeln!(
        out,
        "export type Result<Q extends string, T = any> =\n{};\n",
        results.render("Q")
    );

    // The params argument may be omitted where `undefined` or any array is accepted.
    out.push_str(
        "type ParamArgs<Q extends string> =\n  \
         undefined extends Params<Q> ? [params?: Params<Q>] :\n  \
         any[] extends Params<Q> ? [params?: Params<Q>] :\n  \
         [params: Params<Q>];\n\n",
    );

    let _ = writeln!(
        out,
        "export type TypedClient = Omit<{client}, \"query\"> & {{\n  \
         query<Q extends string, T = any>(\n    query: Q,\n    ...params: ParamArgs<Q>\n  \
         ): Promise<{wrapper}<Result<Q, T>>>;\n}};",
        client = options.client_type,
        wrapper = options.result_wrapper,
    );

    Synthesis {
        module: out,
        diagnostics,
    }
}

fn params_tuple(
    sql: &str,
    description: &QueryDescription,
    table: &SchemaTypeTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    if description.param_types.is_empty() {
        return "[] | undefined".to_string();
    }
    let elements: Vec<&str> = description
        .param_types
        .iter()
        .enumerate()
        .map(|(i, &type_id)| map_type(sql, type_id, TypeSlot::Parameter(i), table, diagnostics))
        .collect();
    format!("[{}]", elements.join(", "))
}

fn result_object(
    sql: &str,
    description: &QueryDescription,
    table: &SchemaTypeTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let mut seen = HashSet::new();
    let mut fields = Vec::new();
    for column in &description.result_columns {
        if !seen.insert(column.name.as_str()) {
            diagnostics.push(Diagnostic::DuplicateColumn {
                sql: sql.to_string(),
                column: column.name.clone(),
            });
            continue;
        }
        let ty = map_type(
            sql,
            column.type_id,
            TypeSlot::Column(column.name.clone()),
            table,
            diagnostics,
        );
        fields.push(format!("  {}: {ty};", property_key(&column.name)));
    }

    if fields.is_empty() {
        "Record<string, never>".to_string()
    } else {
        format!("{{\n{}\n}}", fields.join("\n"))
    }
}

fn map_type<'t>(
    sql: &str,
    type_id: u32,
    slot: TypeSlot,
    table: &'t SchemaTypeTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> &'t str {
    match table.lookup(type_id) {
        Some(name) => name,
        None => {
            diagnostics.push(Diagnostic::UnmappedType {
                sql: sql.to_string(),
                type_id,
                slot,
            });
            UNKNOWN_TYPE
        }
    }
}
