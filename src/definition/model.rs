//! Definition model: the segments a template body is composed of

use crate::parser::ast::Span;
use crate::runtime::{EolPolicy, SlotOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    /// Literals and parameter references only
    Text,
    Macro,
}

/// A parameter declared on a definition
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// Ancestor parameter this one is inherited from
    pub inherit: Option<Reference>,
    pub span: Span,
}

impl Parameter {
    pub fn is_explicit(&self) -> bool {
        self.inherit.is_none()
    }
}

/// A name used at some position in a body
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: String,
    pub span: Span,
}

impl Reference {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Argument bound to a static child
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Param(Reference),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertionPoint {
    pub name: String,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub targets: Vec<Reference>,
    pub options: SlotOptions,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyPart {
    Literal(String),
    ParamRef(Reference),
    StaticChild {
        target: Reference,
        args: Vec<Argument>,
        span: Span,
    },
    DynamicSlot(Slot),
    InsertionPoint(InsertionPoint),
    /// Opens a region whose rendered lines are prefixed with `prefix`
    IndentStart {
        prefix: String,
        span: Span,
    },
    IndentEnd,
}

/// A named template
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    pub params: Vec<Parameter>,
    pub body: Vec<BodyPart>,
    pub eol: EolPolicy,
    pub span: Span,
}

impl Definition {
    pub fn new(name: impl Into<String>, kind: DefinitionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            params: Vec::new(),
            body: Vec::new(),
            eol: EolPolicy::Preserve,
            span: 0..0,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, DefinitionKind::Text)
    }

    pub fn macro_def(name: impl Into<String>) -> Self {
        Self::new(name, DefinitionKind::Macro)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(Parameter {
            name: name.into(),
            inherit: None,
            span: 0..0,
        });
        self
    }

    pub fn inherited(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.params.push(Parameter {
            name: name.into(),
            inherit: Some(Reference::new(source, 0..0)),
            span: 0..0,
        });
        self
    }

    /// Append literal text, merging with a preceding literal
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        let text: String = text.into();
        self.push_literal(&text);
        self
    }

    pub fn var(mut self, name: impl Into<String>) -> Self {
        self.body.push(BodyPart::ParamRef(Reference::new(name, 0..0)));
        self
    }

    pub fn expand(mut self, target: impl Into<String>, args: Vec<Argument>) -> Self {
        self.body.push(BodyPart::StaticChild {
            target: Reference::new(target, 0..0),
            args,
            span: 0..0,
        });
        self
    }

    pub fn slot(mut self, targets: &[&str], options: SlotOptions) -> Self {
        self.body.push(BodyPart::DynamicSlot(Slot {
            targets: targets.iter().map(|t| Reference::new(*t, 0..0)).collect(),
            options,
            span: 0..0,
        }));
        self
    }

    pub fn insert(mut self, name: impl Into<String>) -> Self {
        self.body.push(BodyPart::InsertionPoint(InsertionPoint {
            name: name.into(),
            optional: false,
            span: 0..0,
        }));
        self
    }

    pub fn optional_insert(mut self, name: impl Into<String>) -> Self {
        self.body.push(BodyPart::InsertionPoint(InsertionPoint {
            name: name.into(),
            optional: true,
            span: 0..0,
        }));
        self
    }

    pub fn indent(mut self, prefix: impl Into<String>) -> Self {
        self.body.push(BodyPart::IndentStart {
            prefix: prefix.into(),
            span: 0..0,
        });
        self
    }

    pub fn end_indent(mut self) -> Self {
        self.body.push(BodyPart::IndentEnd);
        self
    }

    pub fn no_eol(mut self) -> Self {
        self.eol = EolPolicy::SuppressTrailing;
        self
    }

    pub(crate) fn push_literal(&mut self, text: &str) {
        if let Some(BodyPart::Literal(last)) = self.body.last_mut() {
            last.push_str(text);
        } else {
            self.body.push(BodyPart::Literal(text.to_string()));
        }
    }

    pub fn param_named(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.param_named(name).is_some()
    }

    pub fn explicit_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.is_explicit())
    }

    pub fn insertion_points(&self) -> impl Iterator<Item = &InsertionPoint> {
        self.body.iter().filter_map(|part| match part {
            BodyPart::InsertionPoint(point) => Some(point),
            _ => None,
        })
    }

    /// Arguments a creator supplies: explicit parameters, then insertion points
    pub fn arity(&self) -> usize {
        self.explicit_params().count() + self.insertion_points().count()
    }

    pub fn static_children(&self) -> impl Iterator<Item = (&Reference, &[Argument])> {
        self.body.iter().filter_map(|part| match part {
            BodyPart::StaticChild { target, args, .. } => Some((target, args.as_slice())),
            _ => None,
        })
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.body.iter().filter_map(|part| match part {
            BodyPart::DynamicSlot(slot) => Some(slot),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_merge() {
        let def = Definition::text("t").literal("a").literal("\n").var("x").literal("b");
        assert_eq!(
            def.body,
            vec![
                BodyPart::Literal("a\n".to_string()),
                BodyPart::ParamRef(Reference::new("x", 0..0)),
                BodyPart::Literal("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_indent_region_stops_literal_merge() {
        let def = Definition::text("t").literal("a").indent("  ").literal("b").end_indent().literal("c");
        assert_eq!(def.body.len(), 5);
        assert_eq!(def.body[4], BodyPart::Literal("c".to_string()));
    }

    #[test]
    fn test_arity_counts_explicit_params_and_inserts() {
        let def = Definition::macro_def("m")
            .inherited("school", "school")
            .param("person")
            .insert("answer")
            .optional_insert("remark");
        assert_eq!(def.arity(), 3);
        assert!(def.declares("school"));
        assert_eq!(def.insertion_points().count(), 2);
    }

    #[test]
    fn test_children_accessors() {
        let def = Definition::macro_def("m")
            .expand("a", vec![Argument::Literal("x".into())])
            .slot(&["b", "c"], SlotOptions::default());
        assert_eq!(def.static_children().count(), 1);
        assert_eq!(def.slots().next().unwrap().targets.len(), 2);
    }
}
