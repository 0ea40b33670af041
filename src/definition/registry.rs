//! Definition graph storage and conversion from parsed sources

use std::collections::HashMap;

use tracing::debug;

use crate::parser::ast::{
    ArgumentExpr, BodyItem, DeclKind, DefinitionDecl, Document, Spanned, SlotOption,
};
use crate::runtime::SlotOptions;

use super::error::SemanticError;
use super::model::{
    Argument, BodyPart, Definition, DefinitionKind, InsertionPoint, Parameter, Reference, Slot,
};

/// Index of a definition in its graph, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(usize);

impl DefId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Definitions in declaration order
///
/// Names are looked up by their first declaration; later duplicates stay
/// in the graph so the validator can report them.
#[derive(Debug, Clone, Default)]
pub struct DefinitionGraph {
    definitions: Vec<Definition>,
    index: HashMap<String, DefId>,
}

impl DefinitionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a parsed document
    pub fn from_document(doc: &Document) -> Result<Self, Vec<SemanticError>> {
        let (graph, errors) = Self::convert(doc);
        if errors.is_empty() {
            Ok(graph)
        } else {
            Err(errors)
        }
    }

    /// Build a graph along with the errors found while converting
    ///
    /// Slots with rejected options keep the options that were accepted, so
    /// the graph can still be validated and every error reported together.
    pub fn convert(doc: &Document) -> (Self, Vec<SemanticError>) {
        let mut graph = Self::new();
        let mut errors = Vec::new();
        for decl in &doc.definitions {
            graph.add(convert_definition(decl, &mut errors));
        }
        debug!(
            definitions = graph.len(),
            errors = errors.len(),
            "definition graph built"
        );
        (graph, errors)
    }

    pub fn add(&mut self, definition: Definition) -> DefId {
        let id = DefId(self.definitions.len());
        self.index.entry(definition.name.clone()).or_insert(id);
        self.definitions.push(definition);
        id
    }

    pub fn with(mut self, definition: Definition) -> Self {
        self.add(definition);
        self
    }

    pub fn get(&self, id: DefId) -> &Definition {
        &self.definitions[id.0]
    }

    pub fn lookup(&self, name: &str) -> Option<DefId> {
        self.index.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DefId, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (DefId(i), d))
    }

    pub fn ids(&self) -> impl Iterator<Item = DefId> {
        (0..self.definitions.len()).map(DefId)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn reference(id: &Spanned<crate::parser::ast::Identifier>) -> Reference {
    Reference::new(id.node.as_str(), id.span.clone())
}

fn convert_definition(decl: &Spanned<DefinitionDecl>, errors: &mut Vec<SemanticError>) -> Definition {
    let node = &decl.node;
    let kind = match node.kind {
        DeclKind::Text => DefinitionKind::Text,
        DeclKind::Macro => DefinitionKind::Macro,
    };
    let mut def = Definition::new(node.name.node.as_str(), kind).with_span(decl.span.clone());
    if node.no_eol {
        def = def.no_eol();
    }

    def.params = node
        .params
        .iter()
        .map(|p| Parameter {
            name: p.node.name.node.as_str().to_string(),
            inherit: p.node.source.as_ref().map(reference),
            span: p.span.clone(),
        })
        .collect();

    convert_body(&node.body, &mut def, errors);
    def
}

fn convert_body(items: &[Spanned<BodyItem>], def: &mut Definition, errors: &mut Vec<SemanticError>) {
    for item in items {
        match &item.node {
            BodyItem::Text(text) => def.push_literal(text),
            BodyItem::Eol => def.push_literal("\n"),
            BodyItem::Var(name) => def.body.push(BodyPart::ParamRef(reference(name))),
            BodyItem::Insert { name, optional } => {
                def.body.push(BodyPart::InsertionPoint(InsertionPoint {
                    name: name.node.as_str().to_string(),
                    optional: *optional,
                    span: name.span.clone(),
                }))
            }
            BodyItem::Expand { target, args } => def.body.push(BodyPart::StaticChild {
                target: reference(target),
                args: args
                    .iter()
                    .map(|arg| match arg {
                        ArgumentExpr::Literal(text) => Argument::Literal(text.clone()),
                        ArgumentExpr::Param(name) => Argument::Param(reference(name)),
                    })
                    .collect(),
                span: item.span.clone(),
            }),
            BodyItem::Slot { targets, options } => def.body.push(BodyPart::DynamicSlot(Slot {
                targets: targets.iter().map(reference).collect(),
                options: convert_options(options, errors),
                span: item.span.clone(),
            })),
            BodyItem::Indent { prefix, body } => {
                def.body.push(BodyPart::IndentStart {
                    prefix: prefix.node.clone(),
                    span: prefix.span.clone(),
                });
                convert_body(body, def, errors);
                def.body.push(BodyPart::IndentEnd);
            }
        }
    }
}

fn convert_options(options: &[Spanned<SlotOption>], errors: &mut Vec<SemanticError>) -> SlotOptions {
    let mut result = SlotOptions::default();
    for option in options {
        let key = option.node.key.node.as_str();
        let slot = match key {
            "none" => &mut result.none,
            "separator" => &mut result.separator,
            "before_first" => &mut result.before_first,
            "after_last" => &mut result.after_last,
            _ => {
                errors.push(SemanticError::UnknownOption {
                    name: key.to_string(),
                    span: option.node.key.span.clone(),
                });
                continue;
            }
        };
        if slot.is_some() {
            errors.push(SemanticError::DuplicateOption {
                name: key.to_string(),
                span: option.node.key.span.clone(),
            });
            continue;
        }
        *slot = Some(option.node.value.node.clone());
    }
    result
}
