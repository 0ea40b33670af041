//! Lowered template tables executed by [`Tree`](super::Tree)
//!
//! A [`Catalog`] is the flat, index-based form of a validated definition
//! graph. Generated Rust code rebuilds its catalog from builder calls, so
//! every type here has a small builder API.

/// Index of a template inside its [`Catalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(usize);

impl TemplateId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// What happens to the trailing line terminator of a rendered instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EolPolicy {
    #[default]
    Preserve,
    /// Remove exactly one trailing `\r\n`, `\n` or `\r`
    SuppressTrailing,
}

/// A declared parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    /// Name of the ancestor parameter this value is inherited from
    pub inherit: Option<String>,
}

impl ParamSpec {
    pub fn is_explicit(&self) -> bool {
        self.inherit.is_none()
    }
}

/// A declared insertion point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertSpec {
    pub name: String,
    pub optional: bool,
}

/// Argument handed to a static child at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Value of the parent's parameter at this index
    Param(usize),
    Text(String),
}

impl Arg {
    pub fn text(text: impl Into<String>) -> Self {
        Arg::Text(text.into())
    }
}

/// A child created unconditionally when its parent is constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSpec {
    pub target: TemplateId,
    /// Explicit parameters of the target, then its insertion points
    pub args: Vec<Arg>,
}

impl StaticSpec {
    pub fn new(target: TemplateId) -> Self {
        Self {
            target,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }
}

/// Literals rendered around the children of a slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotOptions {
    /// Rendered instead of the slot when it has no children
    pub none: Option<String>,
    pub separator: Option<String>,
    pub before_first: Option<String>,
    pub after_last: Option<String>,
}

impl SlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_none(mut self, text: impl Into<String>) -> Self {
        self.none = Some(text.into());
        self
    }

    pub fn with_separator(mut self, text: impl Into<String>) -> Self {
        self.separator = Some(text.into());
        self
    }

    pub fn with_before_first(mut self, text: impl Into<String>) -> Self {
        self.before_first = Some(text.into());
        self
    }

    pub fn with_after_last(mut self, text: impl Into<String>) -> Self {
        self.after_last = Some(text.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.none.is_none()
            && self.separator.is_none()
            && self.before_first.is_none()
            && self.after_last.is_none()
    }
}

/// A dynamic slot: one factory per target, all appending to the same sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    pub targets: Vec<TemplateId>,
    pub options: SlotOptions,
}

impl SlotSpec {
    pub fn new(targets: Vec<TemplateId>) -> Self {
        Self {
            targets,
            options: SlotOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SlotOptions) -> Self {
        self.options = options;
        self
    }
}

/// One element of a template body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Param(usize),
    Insert(usize),
    Static(usize),
    Slot(usize),
    /// Start of a region whose lines are prefixed with this text
    Indent(String),
    EndIndent,
}

/// A lowered definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub inserts: Vec<InsertSpec>,
    pub parts: Vec<Part>,
    pub statics: Vec<StaticSpec>,
    pub slots: Vec<SlotSpec>,
    pub eol: EolPolicy,
    /// Whether an instance may be created without a parent
    pub top_level: bool,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            inserts: Vec::new(),
            parts: Vec::new(),
            statics: Vec::new(),
            slots: Vec::new(),
            eol: EolPolicy::Preserve,
            top_level: true,
        }
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            inherit: None,
        });
        self
    }

    pub fn inherited_param(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            inherit: Some(source.into()),
        });
        self
    }

    pub fn insertion_point(mut self, name: impl Into<String>) -> Self {
        self.inserts.push(InsertSpec {
            name: name.into(),
            optional: false,
        });
        self
    }

    pub fn optional_insertion_point(mut self, name: impl Into<String>) -> Self {
        self.inserts.push(InsertSpec {
            name: name.into(),
            optional: true,
        });
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text(text.into()));
        self
    }

    pub fn param_ref(mut self, index: usize) -> Self {
        self.parts.push(Part::Param(index));
        self
    }

    pub fn insert_ref(mut self, index: usize) -> Self {
        self.parts.push(Part::Insert(index));
        self
    }

    pub fn static_child(mut self, spec: StaticSpec) -> Self {
        self.parts.push(Part::Static(self.statics.len()));
        self.statics.push(spec);
        self
    }

    pub fn slot(mut self, spec: SlotSpec) -> Self {
        self.parts.push(Part::Slot(self.slots.len()));
        self.slots.push(spec);
        self
    }

    pub fn indent(mut self, prefix: impl Into<String>) -> Self {
        self.parts.push(Part::Indent(prefix.into()));
        self
    }

    pub fn end_indent(mut self) -> Self {
        self.parts.push(Part::EndIndent);
        self
    }

    pub fn eol(mut self, eol: EolPolicy) -> Self {
        self.eol = eol;
        self
    }

    pub fn top_level(mut self, top_level: bool) -> Self {
        self.top_level = top_level;
        self
    }

    /// Number of parameters the caller supplies
    pub fn explicit_param_count(&self) -> usize {
        self.params.iter().filter(|p| p.is_explicit()).count()
    }

    /// Index of the parameter declared with `name`
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// Slot whose factories create `target`
    pub fn slot_for(&self, target: TemplateId) -> Option<usize> {
        self.slots.iter().position(|s| s.targets.contains(&target))
    }
}

/// All templates of one compilation, indexed by [`TemplateId`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    templates: Vec<Template>,
}

impl Catalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<TemplateId> {
        self.templates
            .iter()
            .position(|t| t.name == name)
            .map(TemplateId)
    }

    pub fn templates(&self) -> impl Iterator<Item = (TemplateId, &Template)> {
        self.templates
            .iter()
            .enumerate()
            .map(|(i, t)| (TemplateId(i), t))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
