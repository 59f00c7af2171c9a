//! Postgres type OID to TypeScript type name.
//!
//! The table mirrors the JavaScript values the PGlite/node-postgres result
//! parsers produce for each built-in type. Ids absent from the table are not
//! guessed: the caller reports them and emits [`UNKNOWN_TYPE`].

use std::collections::BTreeMap;

/// Marker emitted for an unmapped type-id.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Built-in scalar types.
const SCALARS: &[(u32, &str)] = &[
    (16, "boolean"),     // bool
    (17, "Uint8Array"),  // bytea
    (18, "string"),      // "char"
    (19, "string"),      // name
    (20, "bigint"),      // int8
    (21, "number"),      // int2
    (23, "number"),      // int4
    (25, "string"),      // text
    (26, "number"),      // oid
    (114, "unknown"),    // json
    (142, "string"),     // xml
    (650, "string"),     // cidr
    (700, "number"),     // float4
    (701, "number"),     // float8
    (790, "string"),     // money
    (829, "string"),     // macaddr
    (869, "string"),     // inet
    (1042, "string"),    // bpchar
    (1043, "string"),    // varchar
    (1082, "Date"),      // date
    (1083, "string"),    // time
    (1114, "Date"),      // timestamp
    (1184, "Date"),      // timestamptz
    (1186, "string"),    // interval
    (1266, "string"),    // timetz
    (1560, "string"),    // bit
    (1562, "string"),    // varbit
    (1700, "string"),    // numeric
    (2950, "string"),    // uuid
    (3614, "string"),    // tsvector
    (3802, "unknown"),   // jsonb
];

/// Array type OID to element type OID.
const ARRAYS: &[(u32, u32)] = &[
    (143, 142),
    (199, 114),
    (651, 650),
    (791, 790),
    (1000, 16),
    (1001, 17),
    (1002, 18),
    (1003, 19),
    (1005, 21),
    (1007, 23),
    (1009, 25),
    (1014, 1042),
    (1015, 1043),
    (1016, 20),
    (1021, 700),
    (1022, 701),
    (1028, 26),
    (1040, 829),
    (1041, 869),
    (1115, 1114),
    (1182, 1082),
    (1183, 1083),
    (1185, 1184),
    (1187, 1186),
    (1231, 1700),
    (1270, 1266),
    (1561, 1560),
    (1563, 1562),
    (2951, 2950),
    (3643, 3614),
    (3807, 3802),
];

/// Immutable type-id to type-name mapping, built once per run.
#[derive(Debug, Clone)]
pub struct SchemaTypeTable {
    names: BTreeMap<u32, String>,
}

impl SchemaTypeTable {
    /// The built-in Postgres mapping, scalars and their one-dimensional arrays.
    pub fn postgres() -> Self {
        let mut names: BTreeMap<u32, String> = SCALARS
            .iter()
            .map(|&(oid, name)| (oid, name.to_string()))
            .collect();
        for &(array_oid, element_oid) in ARRAYS {
            if let Some(element) = names.get(&element_oid) {
                let array = format!("{element}[]");
                names.insert(array_oid, array);
            }
        }
        Self { names }
    }

    /// A table with exactly the given entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Self {
            names: entries.into_iter().map(|(oid, n)| (oid, n.into())).collect(),
        }
    }

    /// The type name for `type_id`, or `None` when unmapped.
    pub fn lookup(&self, type_id: u32) -> Option<&str> {
        self.names.get(&type_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for SchemaTypeTable {
    fn default() -> Self {
        Self::postgres()
    }
}
