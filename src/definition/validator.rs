//! Graph validation
//!
//! Resolves every child reference, rejects cyclic static composition and
//! checks that inherited parameters can be satisfied on every construction
//! path. All errors are collected before returning.

use std::collections::{BTreeSet, HashSet, VecDeque};

use tracing::debug;

use super::error::SemanticError;
use super::find_similar;
use super::model::{Argument, BodyPart, Definition, DefinitionKind};
use super::registry::{DefId, DefinitionGraph};

/// Resolved child references of one definition, in body order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edges {
    pub statics: Vec<DefId>,
    pub slots: Vec<Vec<DefId>>,
}

impl Edges {
    /// Every definition this one can create, static or dynamic
    pub fn creates(&self) -> impl Iterator<Item = DefId> + '_ {
        self.statics
            .iter()
            .chain(self.slots.iter().flatten())
            .copied()
    }
}

/// A graph that passed validation, annotated for emission
#[derive(Debug, Clone)]
pub struct ValidatedGraph {
    graph: DefinitionGraph,
    edges: Vec<Edges>,
    ranks: Vec<usize>,
    top_level: Vec<bool>,
    order: Vec<DefId>,
}

impl ValidatedGraph {
    pub fn graph(&self) -> &DefinitionGraph {
        &self.graph
    }

    pub fn definition(&self, id: DefId) -> &Definition {
        self.graph.get(id)
    }

    pub fn edges(&self, id: DefId) -> &Edges {
        &self.edges[id.index()]
    }

    /// Static depth: 0 without static children, else one more than the deepest
    pub fn rank(&self, id: DefId) -> usize {
        self.ranks[id.index()]
    }

    /// Whether the definition needs no value inherited from an ancestor
    pub fn is_top_level(&self, id: DefId) -> bool {
        self.top_level[id.index()]
    }

    /// Deterministic emission order: by rank, then declaration order
    pub fn emission_order(&self) -> &[DefId] {
        &self.order
    }
}

/// Validate a definition graph, reporting every error found
pub fn validate(graph: DefinitionGraph) -> Result<ValidatedGraph, Vec<SemanticError>> {
    let mut errors = Vec::new();

    check_duplicate_definitions(&graph, &mut errors);

    let mut partial = Vec::with_capacity(graph.len());
    for (_, def) in graph.iter() {
        check_local_names(def, &mut errors);
        check_body(def, &mut errors);
        partial.push(resolve_edges(&graph, def, &mut errors));
    }

    check_argument_counts(&graph, &partial, &mut errors);

    let ranks = static_ranks(&graph, &partial, &mut errors);
    let requirements = heritage_requirements(&graph, &partial);
    let top_level: Vec<bool> = requirements.iter().map(|r| r.is_empty()).collect();
    check_heritage(&graph, &partial, &requirements, &top_level, &mut errors);

    if !errors.is_empty() {
        debug!(errors = errors.len(), "definition graph rejected");
        return Err(errors);
    }

    let edges = partial
        .into_iter()
        .map(|p| Edges {
            statics: p.statics.into_iter().flatten().collect(),
            slots: p
                .slots
                .into_iter()
                .map(|s| s.into_iter().flatten().collect())
                .collect(),
        })
        .collect();

    let mut order: Vec<DefId> = graph.ids().collect();
    order.sort_by_key(|id| (ranks[id.index()], id.index()));

    debug!(definitions = graph.len(), "definition graph validated");
    Ok(ValidatedGraph {
        graph,
        edges,
        ranks,
        top_level,
        order,
    })
}

/// Child references with unresolved names left as `None`
#[derive(Debug, Default)]
struct PartialEdges {
    statics: Vec<Option<DefId>>,
    slots: Vec<Vec<Option<DefId>>>,
}

impl PartialEdges {
    fn creates(&self) -> impl Iterator<Item = DefId> + '_ {
        self.statics
            .iter()
            .chain(self.slots.iter().flatten())
            .filter_map(|id| *id)
    }
}

fn check_duplicate_definitions(graph: &DefinitionGraph, errors: &mut Vec<SemanticError>) {
    for (id, def) in graph.iter() {
        if let Some(first) = graph.lookup(&def.name) {
            if first != id {
                errors.push(SemanticError::DuplicateDefinition {
                    name: def.name.clone(),
                    span: def.span.clone(),
                    first: graph.get(first).span.clone(),
                });
            }
        }
    }
}

/// Parameters and insertion points share one constructor namespace
fn check_local_names(def: &Definition, errors: &mut Vec<SemanticError>) {
    let mut seen = HashSet::new();
    for param in &def.params {
        if !seen.insert(param.name.as_str()) {
            errors.push(SemanticError::DuplicateParameter {
                definition: def.name.clone(),
                name: param.name.clone(),
                span: param.span.clone(),
            });
        }
    }
    for point in def.insertion_points() {
        if !seen.insert(point.name.as_str()) {
            errors.push(SemanticError::DuplicateInsertionPoint {
                definition: def.name.clone(),
                name: point.name.clone(),
                span: point.span.clone(),
            });
        }
    }
}

fn check_body(def: &Definition, errors: &mut Vec<SemanticError>) {
    let declared: HashSet<String> = def.params.iter().map(|p| p.name.clone()).collect();
    let check_param = |errors: &mut Vec<SemanticError>, name: &str, span: &std::ops::Range<usize>| {
        if !declared.contains(name) {
            errors.push(SemanticError::undefined_parameter(
                &def.name,
                name,
                span.clone(),
                find_similar(&declared, name, 2),
            ));
        }
    };

    let mut text_violation = None;
    let mut open_regions = 0usize;
    for part in &def.body {
        match part {
            BodyPart::Literal(_) => {}
            BodyPart::IndentStart { prefix, span } => {
                open_regions += 1;
                let reason = if prefix.is_empty() {
                    Some("the prefix is empty")
                } else if prefix.contains(['\n', '\r']) {
                    Some("the prefix contains a line terminator")
                } else {
                    None
                };
                if let Some(reason) = reason {
                    errors.push(SemanticError::InvalidIndent {
                        definition: def.name.clone(),
                        reason: reason.to_string(),
                        span: span.clone(),
                    });
                }
            }
            BodyPart::IndentEnd => {
                if open_regions == 0 {
                    errors.push(SemanticError::InvalidIndent {
                        definition: def.name.clone(),
                        reason: "region closed without being opened".to_string(),
                        span: def.span.clone(),
                    });
                } else {
                    open_regions -= 1;
                }
            }
            BodyPart::ParamRef(reference) => check_param(errors, &reference.name, &reference.span),
            BodyPart::StaticChild { args, span, .. } => {
                for arg in args {
                    if let Argument::Param(reference) = arg {
                        check_param(errors, &reference.name, &reference.span);
                    }
                }
                text_violation.get_or_insert(span.clone());
            }
            BodyPart::DynamicSlot(slot) => {
                text_violation.get_or_insert(slot.span.clone());
            }
            BodyPart::InsertionPoint(point) => {
                text_violation.get_or_insert(point.span.clone());
            }
        }
    }

    if open_regions > 0 {
        errors.push(SemanticError::InvalidIndent {
            definition: def.name.clone(),
            reason: "region opened without being closed".to_string(),
            span: def.span.clone(),
        });
    }

    if def.kind == DefinitionKind::Text {
        if let Some(span) = text_violation {
            errors.push(SemanticError::TextBodyViolation {
                definition: def.name.clone(),
                span,
            });
        }
    }
}

fn resolve_edges(
    graph: &DefinitionGraph,
    def: &Definition,
    errors: &mut Vec<SemanticError>,
) -> PartialEdges {
    let known: HashSet<String> = graph.names().map(str::to_string).collect();
    let mut resolve = |name: &str, span: &std::ops::Range<usize>| {
        let id = graph.lookup(name);
        if id.is_none() {
            errors.push(SemanticError::undefined_reference(
                &def.name,
                name,
                span.clone(),
                find_similar(&known, name, 2),
            ));
        }
        id
    };

    let mut edges = PartialEdges::default();
    let mut slot_targets: Vec<(DefId, &str)> = Vec::new();
    let mut duplicates = Vec::new();
    for part in &def.body {
        match part {
            BodyPart::StaticChild { target, .. } => {
                edges.statics.push(resolve(&target.name, &target.span));
            }
            BodyPart::DynamicSlot(slot) => {
                let mut resolved = Vec::with_capacity(slot.targets.len());
                for target in &slot.targets {
                    let id = resolve(&target.name, &target.span);
                    if let Some(id) = id {
                        if slot_targets.iter().any(|(seen, _)| *seen == id) {
                            duplicates.push(target);
                        } else {
                            slot_targets.push((id, target.name.as_str()));
                        }
                    }
                    resolved.push(id);
                }
                edges.slots.push(resolved);
            }
            _ => {}
        }
    }

    for target in duplicates {
        errors.push(SemanticError::DuplicateSlotTarget {
            definition: def.name.clone(),
            target: target.name.clone(),
            span: target.span.clone(),
        });
    }
    edges
}

fn check_argument_counts(
    graph: &DefinitionGraph,
    partial: &[PartialEdges],
    errors: &mut Vec<SemanticError>,
) {
    for (id, def) in graph.iter() {
        let statics = def.body.iter().filter_map(|part| match part {
            BodyPart::StaticChild { target, args, span } => Some((target, args, span)),
            _ => None,
        });
        for ((target, args, span), resolved) in statics.zip(&partial[id.index()].statics) {
            let Some(child) = resolved else { continue };
            let expected = graph.get(*child).arity();
            if args.len() != expected {
                errors.push(SemanticError::ArgumentCount {
                    definition: def.name.clone(),
                    target: target.name.clone(),
                    expected,
                    found: args.len(),
                    span: span.clone(),
                });
            }
        }
    }
}

/// Detect static cycles and compute static depth of every definition
fn static_ranks(
    graph: &DefinitionGraph,
    partial: &[PartialEdges],
    errors: &mut Vec<SemanticError>,
) -> Vec<usize> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    struct Walk<'g> {
        graph: &'g DefinitionGraph,
        partial: &'g [PartialEdges],
        marks: Vec<Mark>,
        ranks: Vec<usize>,
        path: Vec<DefId>,
        cycles: Vec<SemanticError>,
    }

    impl Walk<'_> {
        fn visit(&mut self, id: DefId) {
            self.marks[id.index()] = Mark::Active;
            self.path.push(id);

            let graph = self.graph;
            let partial = self.partial;
            let mut rank = 0;
            let targets = graph.get(id).static_children().map(|(target, _)| target);
            for (target, child) in targets.zip(&partial[id.index()].statics) {
                let Some(child) = *child else { continue };
                match self.marks[child.index()] {
                    Mark::New => self.visit(child),
                    Mark::Active => {
                        let start = self.path.iter().position(|p| *p == child).unwrap_or(0);
                        let mut cycle: Vec<String> = self.path[start..]
                            .iter()
                            .map(|p| graph.get(*p).name.clone())
                            .collect();
                        cycle.push(graph.get(child).name.clone());
                        self.cycles.push(SemanticError::CyclicComposition {
                            cycle,
                            span: target.span.clone(),
                        });
                        continue;
                    }
                    Mark::Done => {}
                }
                rank = rank.max(self.ranks[child.index()] + 1);
            }

            self.ranks[id.index()] = rank;
            self.path.pop();
            self.marks[id.index()] = Mark::Done;
        }
    }

    let mut walk = Walk {
        graph,
        partial,
        marks: vec![Mark::New; graph.len()],
        ranks: vec![0; graph.len()],
        path: Vec::new(),
        cycles: Vec::new(),
    };
    for id in graph.ids() {
        if walk.marks[id.index()] == Mark::New {
            walk.visit(id);
        }
    }
    errors.extend(walk.cycles);
    walk.ranks
}

/// Names each definition needs from its ancestors (least fixpoint)
///
/// `requires(d)` is the heritage sources of `d` plus whatever its children
/// require that `d` does not declare itself.
fn heritage_requirements(graph: &DefinitionGraph, partial: &[PartialEdges]) -> Vec<BTreeSet<String>> {
    let mut requires: Vec<BTreeSet<String>> = graph
        .iter()
        .map(|(_, def)| {
            def.params
                .iter()
                .filter_map(|p| p.inherit.as_ref().map(|r| r.name.clone()))
                .collect()
        })
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for (id, def) in graph.iter() {
            let inherited: Vec<String> = partial[id.index()]
                .creates()
                .flat_map(|child| requires[child.index()].iter().cloned())
                .filter(|name| !def.declares(name))
                .collect();
            for name in inherited {
                changed |= requires[id.index()].insert(name);
            }
        }
    }
    requires
}

fn check_heritage(
    graph: &DefinitionGraph,
    partial: &[PartialEdges],
    requirements: &[BTreeSet<String>],
    top_level: &[bool],
    errors: &mut Vec<SemanticError>,
) {
    let declared_anywhere: HashSet<&str> = graph
        .iter()
        .flat_map(|(_, def)| def.params.iter().map(|p| p.name.as_str()))
        .collect();

    for (_, def) in graph.iter() {
        for (index, param) in def.params.iter().enumerate() {
            let Some(source) = &param.inherit else { continue };
            let conflicting = def
                .params
                .iter()
                .enumerate()
                .any(|(other, p)| other != index && p.name == source.name);
            if conflicting {
                errors.push(SemanticError::heritage(
                    &def.name,
                    &param.name,
                    format!(
                        "'{}' is also declared by '{}' itself, so the binding is ambiguous",
                        source.name, def.name
                    ),
                    source.span.clone(),
                ));
            } else if !declared_anywhere.contains(source.name.as_str()) {
                errors.push(SemanticError::heritage(
                    &def.name,
                    &param.name,
                    format!("no definition declares a parameter named '{}'", source.name),
                    source.span.clone(),
                ));
            }
        }
    }

    // Everything creatable starting from a top-level definition
    let mut reachable = vec![false; graph.len()];
    let mut queue: VecDeque<DefId> = graph.ids().filter(|id| top_level[id.index()]).collect();
    for id in &queue {
        reachable[id.index()] = true;
    }
    while let Some(id) = queue.pop_front() {
        for child in partial[id.index()].creates() {
            if !reachable[child.index()] {
                reachable[child.index()] = true;
                queue.push_back(child);
            }
        }
    }

    for (id, def) in graph.iter() {
        if reachable[id.index()] {
            continue;
        }
        let missing: Vec<&str> = requirements[id.index()]
            .iter()
            .map(String::as_str)
            .filter(|name| declared_anywhere.contains(name))
            .collect();
        if missing.is_empty() {
            continue;
        }
        errors.push(SemanticError::heritage(
            &def.name,
            missing.join(", "),
            "no construction path provides an ancestor declaring it",
            def.span.clone(),
        ));
    }
}
