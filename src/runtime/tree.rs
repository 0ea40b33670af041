//! Instance trees and the render engine
//!
//! A [`Tree`] owns every instance created from one top-level construction.
//! Instances live in an arena and refer to their parent and children by
//! index, so a tree has exactly one owner and releasing it releases every
//! instance at once.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use super::catalog::{Arg, Catalog, EolPolicy, Part, SlotOptions, Template, TemplateId};
use super::error::RuntimeError;

/// Index of an instance inside its [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

impl InstanceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Values bound when an instance is created
///
/// Explicit parameters in declared order, then one entry per insertion
/// point. Inherited parameters are never supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    params: Vec<String>,
    inserts: Vec<Option<String>>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn insert(mut self, literal: impl Into<String>) -> Self {
        self.inserts.push(Some(literal.into()));
        self
    }

    pub fn optional_insert(mut self, literal: Option<String>) -> Self {
        self.inserts.push(literal);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Root,
    Static,
    Slot(usize),
}

#[derive(Debug)]
struct Instance {
    template: TemplateId,
    parent: Option<InstanceId>,
    params: Vec<String>,
    inserts: Vec<Option<String>>,
    /// Static children, by position in the template
    statics: Vec<InstanceId>,
    /// Members of each slot, in creation order
    slots: Vec<Vec<InstanceId>>,
    /// Every child, in creation order
    children: Vec<InstanceId>,
}

/// Pending work of the render loop
enum Step<'t> {
    Instance(InstanceId),
    Text(&'t str),
    Indent(&'t str),
    EndIndent,
    /// End of an instance whose output starts at `start`
    Close { start: usize, eol: EolPolicy },
}

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(0);

/// An ordered instance tree built against a [`Catalog`]
#[derive(Debug)]
pub struct Tree<'c> {
    catalog: &'c Catalog,
    serial: u64,
    instances: Vec<Instance>,
}

impl<'c> Tree<'c> {
    /// Construct a top-level instance and its static children
    pub fn new(
        catalog: &'c Catalog,
        template: TemplateId,
        args: Arguments,
    ) -> Result<Self, RuntimeError> {
        let spec = lookup(catalog, template)?;
        if !spec.top_level {
            return Err(RuntimeError::NotTopLevel {
                template: spec.name.clone(),
            });
        }
        let mut tree = Self {
            catalog,
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            instances: Vec::new(),
        };
        tree.instantiate(None, Origin::Root, template, args)?;
        trace!(template = %spec.name, instances = tree.instances.len(), "tree created");
        Ok(tree)
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Identifies this tree among every tree of the process
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn root(&self) -> InstanceId {
        InstanceId(0)
    }

    /// Whether `id` names an instance of this tree
    pub fn contains(&self, id: InstanceId) -> bool {
        id.0 < self.instances.len()
    }

    /// Create a child of `parent` through the slot that accepts `target`
    ///
    /// The child is appended after every child previously created in that
    /// slot. On error the tree is left unchanged.
    pub fn create(
        &mut self,
        parent: InstanceId,
        target: TemplateId,
        args: Arguments,
    ) -> Result<InstanceId, RuntimeError> {
        let catalog = self.catalog;
        let owner = self
            .instances
            .get(parent.0)
            .ok_or(RuntimeError::UnknownInstance { index: parent.0 })?;
        let parent_spec = lookup(catalog, owner.template)?;
        let target_spec = lookup(catalog, target)?;
        let slot = parent_spec
            .slot_for(target)
            .ok_or_else(|| RuntimeError::NoSuchFactory {
                parent: parent_spec.name.clone(),
                target: target_spec.name.clone(),
            })?;

        // Instances are linked to their parent only once fully built
        let mark = self.instances.len();
        match self.instantiate(Some(parent), Origin::Slot(slot), target, args) {
            Ok(id) => Ok(id),
            Err(err) => {
                self.instances.truncate(mark);
                Err(err)
            }
        }
    }

    pub fn template_of(&self, id: InstanceId) -> TemplateId {
        self.instance(id).template
    }

    pub fn parent(&self, id: InstanceId) -> Option<InstanceId> {
        self.instance(id).parent
    }

    /// Children of `id` in creation order, static children first
    pub fn children(&self, id: InstanceId) -> &[InstanceId] {
        &self.instance(id).children
    }

    /// Bound value of the parameter `name`, inherited values included
    pub fn param(&self, id: InstanceId, name: &str) -> Option<&str> {
        let instance = self.instance(id);
        let spec = self.catalog.get(instance.template)?;
        spec.param_index(name)
            .map(|index| instance.params[index].as_str())
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn render(&self) -> String {
        self.render_instance(self.root())
    }

    /// Render the subtree rooted at `id`
    ///
    /// Rendering keeps its own work stack, so nesting depth is bounded by
    /// memory rather than by the thread stack.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn render_instance(&self, id: InstanceId) -> String {
        let mut out = String::new();
        self.write_instance(id, &mut out);
        out
    }

    /// Release every instance of the tree
    pub fn release(self) {
        trace!(instances = self.instances.len(), "tree released");
    }

    fn instance(&self, id: InstanceId) -> &Instance {
        &self.instances[id.0]
    }

    fn instantiate(
        &mut self,
        parent: Option<InstanceId>,
        origin: Origin,
        template: TemplateId,
        args: Arguments,
    ) -> Result<InstanceId, RuntimeError> {
        let catalog = self.catalog;
        let spec = lookup(catalog, template)?;
        let Arguments {
            params: explicit,
            inserts,
        } = args;

        let expected = spec.explicit_param_count();
        if explicit.len() != expected {
            return Err(RuntimeError::argument_count(
                &spec.name,
                "parameter",
                expected,
                explicit.len(),
            ));
        }
        if inserts.len() != spec.inserts.len() {
            return Err(RuntimeError::argument_count(
                &spec.name,
                "insertion",
                spec.inserts.len(),
                inserts.len(),
            ));
        }
        if let Some(missing) = spec
            .inserts
            .iter()
            .zip(&inserts)
            .find(|(decl, value)| !decl.optional && value.is_none())
        {
            return Err(RuntimeError::MissingInsertion {
                template: spec.name.clone(),
                name: missing.0.name.clone(),
            });
        }

        let mut explicit = explicit.into_iter();
        let mut params = Vec::with_capacity(spec.params.len());
        for param in &spec.params {
            let value = match &param.inherit {
                Some(source) => self.inherited(parent, source).ok_or_else(|| {
                    RuntimeError::UnresolvedHeritage {
                        template: spec.name.clone(),
                        source_name: source.clone(),
                    }
                })?,
                None => explicit.next().unwrap_or_default(),
            };
            params.push(value);
        }

        let id = InstanceId(self.instances.len());
        self.instances.push(Instance {
            template,
            parent,
            params,
            inserts,
            statics: Vec::with_capacity(spec.statics.len()),
            slots: vec![Vec::new(); spec.slots.len()],
            children: Vec::new(),
        });

        for child in &spec.statics {
            let target = lookup(catalog, child.target)?;
            let args = self.static_arguments(id, &child.args, target);
            self.instantiate(Some(id), Origin::Static, child.target, args)?;
        }

        if let Some(parent) = parent {
            let owner = &mut self.instances[parent.0];
            match origin {
                Origin::Static => owner.statics.push(id),
                Origin::Slot(slot) => owner.slots[slot].push(id),
                Origin::Root => {}
            }
            owner.children.push(id);
        }
        Ok(id)
    }

    fn static_arguments(&self, owner: InstanceId, args: &[Arg], target: &Template) -> Arguments {
        let owner = self.instance(owner);
        let explicit = target.explicit_param_count();
        let mut arguments = Arguments::new();
        for (position, arg) in args.iter().enumerate() {
            let value = match arg {
                Arg::Param(index) => owner.params.get(*index).cloned().unwrap_or_default(),
                Arg::Text(text) => text.clone(),
            };
            arguments = if position < explicit {
                arguments.param(value)
            } else {
                arguments.insert(value)
            };
        }
        arguments
    }

    /// Value of `source` on the nearest ancestor declaring it, starting at `from`
    fn inherited(&self, from: Option<InstanceId>, source: &str) -> Option<String> {
        let mut current = from;
        while let Some(id) = current {
            let instance = self.instance(id);
            let spec = self.catalog.get(instance.template)?;
            if let Some(index) = spec.param_index(source) {
                return Some(instance.params[index].clone());
            }
            current = instance.parent;
        }
        None
    }

    fn write_instance(&self, root: InstanceId, out: &mut String) {
        let mut stack = vec![Step::Instance(root)];
        // Open indentation regions: output offset and prefix
        let mut regions: Vec<(usize, &str)> = Vec::new();

        while let Some(step) = stack.pop() {
            match step {
                Step::Text(text) => out.push_str(text),
                Step::Instance(id) => self.expand(id, out.len(), &mut stack),
                Step::Indent(prefix) => regions.push((out.len(), prefix)),
                Step::EndIndent => {
                    if let Some((start, prefix)) = regions.pop() {
                        indent_lines(out, start, prefix);
                    }
                }
                Step::Close { start, eol } => {
                    if eol == EolPolicy::SuppressTrailing {
                        strip_line_terminator(out, start);
                    }
                }
            }
        }
    }

    /// Push the steps rendering `id`, last part first
    fn expand<'t>(&'t self, id: InstanceId, start: usize, stack: &mut Vec<Step<'t>>) {
        let instance = self.instance(id);
        let Some(spec) = self.catalog.get(instance.template) else {
            return;
        };
        stack.push(Step::Close {
            start,
            eol: spec.eol,
        });

        for part in spec.parts.iter().rev() {
            match part {
                Part::Text(text) => stack.push(Step::Text(text)),
                Part::Param(index) => stack.push(Step::Text(&instance.params[*index])),
                Part::Insert(index) => {
                    if let Some(Some(literal)) = instance.inserts.get(*index) {
                        stack.push(Step::Text(literal));
                    }
                }
                Part::Static(index) => {
                    if let Some(child) = instance.statics.get(*index) {
                        stack.push(Step::Instance(*child));
                    }
                }
                Part::Slot(index) => {
                    let members = &instance.slots[*index];
                    push_slot(members, &spec.slots[*index].options, stack);
                }
                Part::Indent(prefix) => stack.push(Step::Indent(prefix)),
                Part::EndIndent => stack.push(Step::EndIndent),
            }
        }
    }
}

/// Push the steps rendering one slot, last member first
fn push_slot<'t>(members: &[InstanceId], options: &'t SlotOptions, stack: &mut Vec<Step<'t>>) {
    if members.is_empty() {
        if let Some(none) = &options.none {
            stack.push(Step::Text(none));
        }
        return;
    }

    if let Some(after) = &options.after_last {
        stack.push(Step::Text(after));
    }
    for (position, child) in members.iter().enumerate().rev() {
        stack.push(Step::Instance(*child));
        if position > 0 {
            if let Some(separator) = &options.separator {
                stack.push(Step::Text(separator));
            }
        }
    }
    if let Some(before) = &options.before_first {
        stack.push(Step::Text(before));
    }
}

fn lookup(catalog: &Catalog, id: TemplateId) -> Result<&Template, RuntimeError> {
    catalog
        .get(id)
        .ok_or(RuntimeError::UnknownTemplate { index: id.index() })
}

/// Remove one trailing line terminator written at or after `start`
fn strip_line_terminator(out: &mut String, start: usize) {
    let rendered = &out[start..];
    let cut = if rendered.ends_with("\r\n") {
        2
    } else if rendered.ends_with('\n') || rendered.ends_with('\r') {
        1
    } else {
        0
    };
    out.truncate(out.len() - cut);
}

/// Prefix every line written at or after `start`
///
/// Lines end after `\n`. The region's first line gets the prefix even when
/// it starts mid-line; nothing is added after a final terminator.
fn indent_lines(out: &mut String, start: usize, prefix: &str) {
    if start >= out.len() {
        return;
    }
    let region = out.split_off(start);
    out.reserve(region.len() + prefix.len());
    let mut rest = region.as_str();
    while !rest.is_empty() {
        let end = rest.find('\n').map_or(rest.len(), |i| i + 1);
        out.push_str(prefix);
        out.push_str(&rest[..end]);
        rest = &rest[end..];
    }
}
