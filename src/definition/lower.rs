//! Lowering of a validated graph into the runtime [`Catalog`]

use crate::runtime::{Arg, Catalog, SlotSpec, StaticSpec, Template, TemplateId};

use super::model::{Argument, BodyPart};
use super::registry::DefId;
use super::validator::ValidatedGraph;

fn template_id(id: DefId) -> TemplateId {
    TemplateId::new(id.index())
}

/// Build the catalog; template ids equal definition ids
pub fn lower(graph: &ValidatedGraph) -> Catalog {
    let templates = graph
        .graph()
        .iter()
        .map(|(id, def)| {
            let edges = graph.edges(id);
            let mut template = Template::new(&def.name)
                .eol(def.eol)
                .top_level(graph.is_top_level(id));

            for param in &def.params {
                template = match &param.inherit {
                    Some(source) => template.inherited_param(&param.name, &source.name),
                    None => template.param(&param.name),
                };
            }
            for point in def.insertion_points() {
                template = if point.optional {
                    template.optional_insertion_point(&point.name)
                } else {
                    template.insertion_point(&point.name)
                };
            }

            let param_index = |name: &str| def.params.iter().position(|p| p.name == name);
            let (mut statics, mut slots, mut inserts) = (0, 0, 0);
            for part in &def.body {
                template = match part {
                    BodyPart::Literal(text) => template.text(text),
                    BodyPart::ParamRef(reference) => {
                        template.param_ref(param_index(&reference.name).unwrap_or_default())
                    }
                    BodyPart::InsertionPoint(_) => {
                        inserts += 1;
                        template.insert_ref(inserts - 1)
                    }
                    BodyPart::StaticChild { args, .. } => {
                        let mut spec = StaticSpec::new(template_id(edges.statics[statics]));
                        statics += 1;
                        for arg in args {
                            spec = spec.arg(match arg {
                                Argument::Literal(text) => Arg::text(text),
                                Argument::Param(reference) => {
                                    Arg::Param(param_index(&reference.name).unwrap_or_default())
                                }
                            });
                        }
                        template.static_child(spec)
                    }
                    BodyPart::DynamicSlot(slot) => {
                        let targets = edges.slots[slots].iter().copied().map(template_id).collect();
                        slots += 1;
                        template.slot(SlotSpec::new(targets).with_options(slot.options.clone()))
                    }
                    BodyPart::IndentStart { prefix, .. } => template.indent(prefix),
                    BodyPart::IndentEnd => template.end_indent(),
                };
            }
            template
        })
        .collect();
    Catalog::new(templates)
}
