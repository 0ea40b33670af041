//! Rust back end
//!
//! Emits a single module that links against [`crate::runtime`]: the catalog
//! as literal builder calls, one marker type per definition, constructors on
//! top-level markers and one factory trait per definition with slots.

use std::path::PathBuf;

use crate::config::{GeneratorConfig, Target};
use crate::definition::DefId;
use crate::runtime::{Arg, EolPolicy, Part, SlotOptions, Template};
use crate::CompilationUnit;

use super::{Backend, CodeWriter, GeneratedFile};

const INDENT: &str = "    ";

pub struct RustBackend {
    type_prefix: String,
    module: String,
    runtime_path: String,
}

impl RustBackend {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            type_prefix: config.type_prefix.clone(),
            module: config.rust.module.clone(),
            runtime_path: config.rust.runtime_path.clone(),
        }
    }

    fn type_name(&self, unit: &CompilationUnit, id: DefId) -> String {
        unit.names.definition(id).type_name(&self.type_prefix)
    }

    fn write_header(&self, w: &mut CodeWriter) {
        w.line("//! Generated by macrogen. Do not edit.");
        w.blank();
        w.line("#![allow(dead_code, unused_imports, non_snake_case, non_camel_case_types)]");
        w.blank();
        w.line("use std::sync::OnceLock;");
        w.blank();
        w.line(format!(
            "use {}::{{Arg, Arguments, Catalog, Cursor, Document, EolPolicy, Handle, Kind, SlotOptions, SlotSpec, StaticSpec, Template, TemplateId}};",
            self.runtime_path
        ));
        w.blank();
    }

    fn write_catalog(&self, w: &mut CodeWriter, unit: &CompilationUnit) {
        w.open("fn catalog() -> &'static Catalog {");
        w.line("static CATALOG: OnceLock<Catalog> = OnceLock::new();");
        w.open("CATALOG.get_or_init(|| {");
        w.open("Catalog::new(vec![");
        for (_, template) in unit.catalog.templates() {
            write_template(w, template);
        }
        w.close("])");
        w.close("})");
        w.close("}");
        w.blank();
    }

    fn write_definition(&self, w: &mut CodeWriter, unit: &CompilationUnit, id: DefId) {
        let def = unit.graph.definition(id);
        let ty = self.type_name(unit, id);

        w.line(format!("/// `{}`", def.name));
        w.line(format!("pub struct {};", ty));
        w.blank();
        w.open(format!("impl Kind for {} {{", ty));
        w.line(format!(
            "const TEMPLATE: TemplateId = TemplateId::new({});",
            id.index()
        ));
        w.blank();
        w.open("fn catalog() -> &'static Catalog {");
        w.line("catalog()");
        w.close("}");
        w.close("}");
        w.blank();

        if unit.graph.is_top_level(id) {
            let (params, args) = signature(unit, id);
            w.open(format!("impl {} {{", ty));
            w.open(format!("pub fn new({}) -> Document<Self> {{", params));
            w.line(format!("Document::new({})", args));
            w.close("}");
            w.close("}");
            w.blank();
        }

        let targets: Vec<DefId> = unit.graph.edges(id).slots.iter().flatten().copied().collect();
        if targets.is_empty() {
            return;
        }
        let factories: Vec<(String, String, String, String)> = targets
            .iter()
            .map(|target| {
                let (params, args) = signature(unit, *target);
                let name = unit.names.definition(*target).snake_factory();
                (name, params, args, self.type_name(unit, *target))
            })
            .collect();

        w.open(format!("pub trait {}Slots {{", ty));
        for (name, params, _, child) in &factories {
            w.line(format!(
                "fn {}(&mut self{}) -> Handle<{}>;",
                name,
                leading_comma(params),
                child
            ));
        }
        w.close("}");
        w.blank();
        w.open(format!("impl {}Slots for Cursor<'_, {}> {{", ty, ty));
        for (index, (name, params, args, child)) in factories.iter().enumerate() {
            if index > 0 {
                w.blank();
            }
            w.open(format!(
                "fn {}(&mut self{}) -> Handle<{}> {{",
                name,
                leading_comma(params),
                child
            ));
            w.line(format!("self.create({})", args));
            w.close("}");
        }
        w.close("}");
        w.blank();
    }
}

impl Backend for RustBackend {
    fn target(&self) -> Target {
        Target::Rust
    }

    fn emit(&self, unit: &CompilationUnit) -> Vec<GeneratedFile> {
        let mut w = CodeWriter::new(INDENT);
        self.write_header(&mut w);
        self.write_catalog(&mut w, unit);
        for id in unit.graph.emission_order() {
            self.write_definition(&mut w, unit, *id);
        }
        vec![GeneratedFile {
            path: PathBuf::from(format!("{}.rs", self.module)),
            contents: w.finish(),
        }]
    }
}

fn leading_comma(params: &str) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!(", {}", params)
    }
}

/// Parameter list and `Arguments` expression for constructing `id`
fn signature(unit: &CompilationUnit, id: DefId) -> (String, String) {
    let def = unit.graph.definition(id);
    let mut params = Vec::new();
    let mut args = String::from("Arguments::new()");

    for (param, ident) in def.params.iter().zip(unit.names.params(id)) {
        if param.is_explicit() {
            params.push(format!("{}: impl Into<String>", ident));
            args.push_str(&format!(".param({})", ident));
        }
    }
    for (point, ident) in def.insertion_points().zip(unit.names.inserts(id)) {
        if point.optional {
            params.push(format!("{}: Option<String>", ident));
            args.push_str(&format!(".optional_insert({})", ident));
        } else {
            params.push(format!("{}: impl Into<String>", ident));
            args.push_str(&format!(".insert({})", ident));
        }
    }
    (params.join(", "), args)
}

fn write_template(w: &mut CodeWriter, template: &Template) {
    w.open(format!("Template::new({:?})", template.name));
    for param in &template.params {
        match &param.inherit {
            Some(source) => w.line(format!(".inherited_param({:?}, {:?})", param.name, source)),
            None => w.line(format!(".param({:?})", param.name)),
        }
    }
    for insert in &template.inserts {
        if insert.optional {
            w.line(format!(".optional_insertion_point({:?})", insert.name));
        } else {
            w.line(format!(".insertion_point({:?})", insert.name));
        }
    }
    for part in &template.parts {
        match part {
            Part::Text(text) => w.line(format!(".text({:?})", text)),
            Part::Param(index) => w.line(format!(".param_ref({})", index)),
            Part::Insert(index) => w.line(format!(".insert_ref({})", index)),
            Part::Static(index) => {
                let spec = &template.statics[*index];
                let args: String = spec
                    .args
                    .iter()
                    .map(|arg| match arg {
                        Arg::Param(index) => format!(".arg(Arg::Param({}))", index),
                        Arg::Text(text) => format!(".arg(Arg::text({:?}))", text),
                    })
                    .collect();
                w.line(format!(
                    ".static_child(StaticSpec::new(TemplateId::new({})){})",
                    spec.target.index(),
                    args
                ));
            }
            Part::Slot(index) => {
                let spec = &template.slots[*index];
                let targets = spec
                    .targets
                    .iter()
                    .map(|t| format!("TemplateId::new({})", t.index()))
                    .collect::<Vec<_>>()
                    .join(", ");
                let options = slot_options(&spec.options);
                w.line(format!(
                    ".slot(SlotSpec::new(vec![{}]){})",
                    targets, options
                ));
            }
            Part::Indent(prefix) => w.line(format!(".indent({:?})", prefix)),
            Part::EndIndent => w.line(".end_indent()"),
        }
    }
    if template.eol == EolPolicy::SuppressTrailing {
        w.line(".eol(EolPolicy::SuppressTrailing)");
    }
    if !template.top_level {
        w.line(".top_level(false)");
    }
    w.append(",");
    w.dedent();
}

fn slot_options(options: &SlotOptions) -> String {
    if options.is_empty() {
        return String::new();
    }
    let mut out = String::from(".with_options(SlotOptions::new()");
    let entries = [
        ("with_none", &options.none),
        ("with_before_first", &options.before_first),
        ("with_separator", &options.separator),
        ("with_after_last", &options.after_last),
    ];
    for (method, value) in entries {
        if let Some(text) = value {
            out.push_str(&format!(".{}({:?})", method, text));
        }
    }
    out.push(')');
    out
}
