//! Identifier normalization
//!
//! Every definition gets a CamelCase form (type names, Java/C factories)
//! and a snake form (Rust factories). Both must be unique across the graph
//! under case-insensitive comparison, so generated files can live side by
//! side on case-insensitive file systems.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::error::SemanticError;
use super::registry::DefId;
use super::validator::ValidatedGraph;

/// Words reserved in at least one emission target (Rust, Java, C)
const RESERVED: &[&str] = &[
    "_", "abstract", "as", "assert", "async", "auto", "await", "become", "boolean", "box", "break",
    "byte", "case", "catch", "char", "class", "const", "continue", "crate", "default", "do",
    "double", "dyn", "else", "enum", "extends", "extern", "false", "final", "finally", "float",
    "fn", "for", "goto", "if", "impl", "implements", "import", "in", "inline", "instanceof",
    "int", "interface", "let", "long", "loop", "macro", "match", "mod", "move", "mut", "native",
    "new", "null", "override", "package", "priv", "private", "protected", "pub", "public", "ref",
    "register", "restrict", "return", "self", "short", "signed", "sizeof", "static", "strictfp",
    "struct", "super", "switch", "synchronized", "this", "throw", "throws", "trait", "transient",
    "true", "try", "type", "typedef", "typeof", "union", "unsafe", "unsigned", "unsized", "use",
    "var", "virtual", "void", "volatile", "where", "while", "yield",
];

/// Type names the emitted code refers to (runtime items, prelude and
/// `java.lang` types, the Java base class)
const RESERVED_TYPES: &[&str] = &[
    "Arg", "Arguments", "ArrayList", "Catalog", "Cursor", "Document", "EolPolicy", "Handle",
    "IllegalStateException", "Into", "Kind", "List", "Macro", "None", "Object", "OnceLock",
    "Option", "Override", "Self", "SlotOptions", "SlotSpec", "Some", "StaticSpec", "String",
    "StringBuilder", "Template", "TemplateId", "Vec",
];

/// Identifiers assigned to one definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedName {
    pub declared: String,
    /// `MacroInMacro` for `macro_in_macro`, `_teXTRIChid` for `teXTRIChid`
    pub camel: String,
    /// `macro_in_macro` for `macro_in_macro`, `_textrichid` for `teXTRIChid`
    pub snake: String,
}

impl AssignedName {
    /// Prefixed type name, with `_` appended when it names a type the
    /// emitted code relies on
    ///
    /// Assigned CamelCase names never end with `_`, so the escaped form
    /// cannot collide with another definition.
    pub fn type_name(&self, prefix: &str) -> String {
        let name = format!("{}{}", prefix, self.camel);
        if RESERVED_TYPES.contains(&name.as_str()) {
            name + "_"
        } else {
            name
        }
    }

    /// Factory method name in CamelCase targets
    pub fn factory(&self) -> String {
        format!("new{}", self.camel)
    }

    /// Factory method name in snake case targets
    pub fn snake_factory(&self) -> String {
        format!("new_{}", self.snake)
    }
}

/// Every identifier used by the emitters
#[derive(Debug, Clone)]
pub struct NameTable {
    definitions: Vec<AssignedName>,
    params: Vec<Vec<String>>,
    inserts: Vec<Vec<String>>,
}

impl NameTable {
    pub fn assign(graph: &ValidatedGraph) -> Result<Self, Vec<SemanticError>> {
        let declared: Vec<&str> = graph
            .graph()
            .iter()
            .map(|(_, def)| def.name.as_str())
            .collect();

        let camel = resolve_collisions(
            &declared
                .iter()
                .map(|name| (*name, camel_candidate(name)))
                .collect::<Vec<_>>(),
        );
        let snake = resolve_collisions(
            &declared
                .iter()
                .map(|name| (*name, snake_candidate(name)))
                .collect::<Vec<_>>(),
        );
        let (camel, snake) = match (camel, snake) {
            (Ok(camel), Ok(snake)) => (camel, snake),
            (Err(err), _) | (_, Err(err)) => return Err(vec![err]),
        };

        let definitions = declared
            .iter()
            .zip(camel.into_iter().zip(snake))
            .map(|(declared, (camel, snake))| AssignedName {
                declared: declared.to_string(),
                camel,
                snake,
            })
            .collect();

        let mut params = Vec::with_capacity(graph.graph().len());
        let mut inserts = Vec::with_capacity(graph.graph().len());
        for (_, def) in graph.graph().iter() {
            // Declared spellings that need no escaping are never displaced
            let mut taken: HashSet<String> = def
                .params
                .iter()
                .map(|p| p.name.as_str())
                .chain(def.insertion_points().map(|p| p.name.as_str()))
                .filter(|name| !RESERVED.contains(name))
                .map(str::to_string)
                .collect();
            params.push(
                def.params
                    .iter()
                    .map(|p| local_identifier(&p.name, &mut taken))
                    .collect(),
            );
            inserts.push(
                def.insertion_points()
                    .map(|p| local_identifier(&p.name, &mut taken))
                    .collect(),
            );
        }

        debug!(definitions = graph.graph().len(), "identifiers assigned");
        Ok(Self {
            definitions,
            params,
            inserts,
        })
    }

    pub fn definition(&self, id: DefId) -> &AssignedName {
        &self.definitions[id.index()]
    }

    /// Identifiers of every parameter, inherited ones included, in declared order
    pub fn params(&self, id: DefId) -> &[String] {
        &self.params[id.index()]
    }

    pub fn inserts(&self, id: DefId) -> &[String] {
        &self.inserts[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssignedName> {
        self.definitions.iter()
    }
}

/// Lower snake case names are plain, everything else is rich
pub fn is_plain(name: &str) -> bool {
    let mut words = name.split('_');
    let Some(first) = words.next() else {
        return false;
    };
    let starts_with_letter = first.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let word_ok =
        |w: &str| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    starts_with_letter && word_ok(first) && words.all(word_ok)
}

/// Preferred CamelCase identifier for a declared name
pub fn camel_candidate(name: &str) -> String {
    if !is_plain(name) {
        return format!("_{}", name);
    }
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Preferred snake case identifier for a declared name
pub fn snake_candidate(name: &str) -> String {
    if is_plain(name) {
        name.to_string()
    } else {
        format!("_{}", name.to_ascii_lowercase())
    }
}

/// Names equal under this key differ only by case or underscores
pub fn equivalence_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Assign one identifier per `(declared, candidate)` pair
///
/// Identifiers are unique ignoring case. Pairs are processed in
/// `(equivalence key, declared)` order, so the result does not depend on
/// input order: the first keeps its candidate, later conflicting ones get
/// a hash of their declared spelling appended.
pub fn resolve_collisions(entries: &[(&str, String)]) -> Result<Vec<String>, SemanticError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, (declared, _)) in entries.iter().enumerate() {
        if seen.insert(*declared, index).is_some() {
            return Err(SemanticError::UnresolvableCollision {
                first: declared.to_string(),
                second: declared.to_string(),
            });
        }
    }

    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_cached_key(|i| (equivalence_key(entries[*i].0), entries[*i].0));

    let mut taken: HashSet<String> = HashSet::new();
    let mut assigned = vec![String::new(); entries.len()];
    for index in order {
        let (declared, candidate) = &entries[index];
        let mut ident = candidate.clone();
        if taken.contains(&ident.to_ascii_lowercase()) {
            let hashed = format!("{}_{:06x}", candidate, fnv1a(declared) & 0xff_ffff);
            ident = hashed.clone();
            let mut counter = 2;
            while taken.contains(&ident.to_ascii_lowercase()) {
                ident = format!("{}_{}", hashed, counter);
                counter += 1;
            }
        }
        taken.insert(ident.to_ascii_lowercase());
        assigned[index] = ident;
    }
    Ok(assigned)
}

/// Parameter or insertion identifier, unique within one definition
fn local_identifier(name: &str, taken: &mut HashSet<String>) -> String {
    if !RESERVED.contains(&name) {
        return name.to_string();
    }
    let mut ident = name.to_string();
    while RESERVED.contains(&ident.as_str()) || taken.contains(&ident) {
        ident.push('_');
    }
    taken.insert(ident.clone());
    ident
}

fn fnv1a(text: &str) -> u32 {
    text.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}
