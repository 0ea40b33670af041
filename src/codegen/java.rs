//! Java back end
//!
//! Emits a `Macro` base class plus one class per definition. Generated
//! classes carry their own render logic, so they need no runtime library.

use std::path::PathBuf;

use crate::config::{GeneratorConfig, Target};
use crate::definition::DefId;
use crate::runtime::{Arg, EolPolicy, Part, SlotOptions, TemplateId};
use crate::CompilationUnit;

use super::{Backend, CodeWriter, GeneratedFile};

const INDENT: &str = "    ";
const BASE_CLASS: &str = "Macro";

pub struct JavaBackend {
    type_prefix: String,
    package: Option<String>,
}

impl JavaBackend {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            type_prefix: config.type_prefix.clone(),
            package: config.java.package.clone(),
        }
    }

    fn path(&self, class: &str) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(package) = &self.package {
            path.extend(package.split('.'));
        }
        path.push(format!("{}.java", class));
        path
    }

    fn write_preamble(&self, w: &mut CodeWriter, imports: &[&str]) {
        w.line("// Generated by macrogen. Do not edit.");
        if let Some(package) = &self.package {
            w.line(format!("package {};", package));
        }
        w.blank();
        for import in imports {
            w.line(format!("import {};", import));
        }
        w.blank();
    }

    fn base_class(&self) -> GeneratedFile {
        let mut w = CodeWriter::new(INDENT);
        self.write_preamble(&mut w, &["java.util.List"]);

        w.open(format!("public abstract class {} {{", BASE_CLASS));
        w.line(format!("private final {} parent;", BASE_CLASS));
        w.blank();
        w.open(format!("protected {}({} parent) {{", BASE_CLASS, BASE_CLASS));
        w.line("this.parent = parent;");
        w.close("}");
        w.blank();
        w.line("/** Value of the nearest parameter named {@code name}, starting at this instance. */");
        w.open("protected String lookup(String name) {");
        w.line("return parent == null ? null : parent.lookup(name);");
        w.close("}");
        w.blank();
        w.line("/** Value of {@code name} on the nearest ancestor declaring it. */");
        w.open("protected final String inherit(String name) {");
        w.line("String value = parent == null ? null : parent.lookup(name);");
        w.open("if (value == null) {");
        w.line("throw new IllegalStateException(\"no ancestor declares \" + name);");
        w.close("}");
        w.line("return value;");
        w.close("}");
        w.blank();
        w.line("public abstract String render();");
        w.blank();
        w.line("/** Release every owned child, then this instance. */");
        w.open("public void release() {");
        w.close("}");
        w.blank();
        w.line("@Override");
        w.open("public String toString() {");
        w.line("return render();");
        w.close("}");
        w.blank();
        w.open(format!(
            "protected static String renderSlot(List<{}> children, String none, String beforeFirst, String separator, String afterLast) {{",
            BASE_CLASS
        ));
        w.open("if (children.isEmpty()) {");
        w.line("return none == null ? \"\" : none;");
        w.close("}");
        w.line("StringBuilder out = new StringBuilder();");
        w.open("if (beforeFirst != null) {");
        w.line("out.append(beforeFirst);");
        w.close("}");
        w.open("for (int i = 0; i < children.size(); i++) {");
        w.open("if (i > 0 && separator != null) {");
        w.line("out.append(separator);");
        w.close("}");
        w.line("out.append(children.get(i).render());");
        w.close("}");
        w.open("if (afterLast != null) {");
        w.line("out.append(afterLast);");
        w.close("}");
        w.line("return out.toString();");
        w.close("}");
        w.blank();
        w.line("/** Prefix every line written to {@code out} from {@code start} on. */");
        w.open("protected static void indent(StringBuilder out, int start, String prefix) {");
        w.line("String region = out.substring(start);");
        w.line("out.setLength(start);");
        w.line("int line = 0;");
        w.open("while (line < region.length()) {");
        w.line("int end = region.indexOf('\\n', line);");
        w.line("int next = end < 0 ? region.length() : end + 1;");
        w.line("out.append(prefix).append(region, line, next);");
        w.line("line = next;");
        w.close("}");
        w.close("}");
        w.blank();
        w.line("/** Remove one trailing line terminator. */");
        w.open("protected static String suppressEol(String text) {");
        w.open("if (text.endsWith(\"\\r\\n\")) {");
        w.line("return text.substring(0, text.length() - 2);");
        w.close("}");
        w.open("if (text.endsWith(\"\\n\") || text.endsWith(\"\\r\")) {");
        w.line("return text.substring(0, text.length() - 1);");
        w.close("}");
        w.line("return text;");
        w.close("}");
        w.close("}");

        GeneratedFile {
            path: self.path(BASE_CLASS),
            contents: w.finish(),
        }
    }

    fn definition_class(&self, unit: &CompilationUnit, id: DefId) -> Option<GeneratedFile> {
        let def = unit.graph.definition(id);
        let template = unit.catalog.get(TemplateId::new(id.index()))?;
        let edges = unit.graph.edges(id);
        let class = unit.names.definition(id).type_name(&self.type_prefix);
        let params: Vec<String> = unit
            .names
            .params(id)
            .iter()
            .map(|ident| format!("param_{}", ident))
            .collect();
        let inserts: Vec<String> = unit
            .names
            .inserts(id)
            .iter()
            .map(|ident| format!("insert_{}", ident))
            .collect();

        let mut w = CodeWriter::new(INDENT);
        let imports: &[&str] = if edges.slots.is_empty() {
            &[]
        } else {
            &["java.util.ArrayList", "java.util.List"]
        };
        self.write_preamble(&mut w, imports);

        w.line(format!("/** Definition {{@code {}}}. */", def.name));
        w.open(format!("public final class {} extends {} {{", class, BASE_CLASS));
        for field in params.iter().chain(&inserts) {
            w.line(format!("private final String {};", field));
        }
        for (index, target) in edges.statics.iter().enumerate() {
            let child = unit.names.definition(*target).type_name(&self.type_prefix);
            w.line(format!("private final {} _static{};", child, index));
        }
        for index in 0..edges.slots.len() {
            w.line(format!(
                "private final List<{}> _slot{} = new ArrayList<>();",
                BASE_CLASS, index
            ));
        }
        w.blank();

        // Constructor arguments: explicit parameters, then insertion points
        let explicit: Vec<&String> = template
            .params
            .iter()
            .zip(&params)
            .filter(|(spec, _)| spec.is_explicit())
            .map(|(_, field)| field)
            .collect();
        let ctor_args: Vec<&String> = explicit.iter().copied().chain(&inserts).collect();
        let declared = ctor_args
            .iter()
            .map(|name| format!("String {}", name))
            .collect::<Vec<_>>();

        if unit.graph.is_top_level(id) {
            w.open(format!("public {}({}) {{", class, declared.join(", ")));
            let forwarded: Vec<&str> = std::iter::once("null")
                .chain(ctor_args.iter().map(|s| s.as_str()))
                .collect();
            w.line(format!("this({});", forwarded.join(", ")));
            w.close("}");
            w.blank();
        }

        let full: Vec<String> = std::iter::once(format!("{} parent", BASE_CLASS))
            .chain(declared.iter().cloned())
            .collect();
        w.open(format!("{}({}) {{", class, full.join(", ")));
        w.line("super(parent);");
        for (spec, field) in template.params.iter().zip(&params) {
            match &spec.inherit {
                Some(source) => w.line(format!("this.{} = inherit({});", field, java_string(source))),
                None => w.line(format!("this.{} = {};", field, field)),
            }
        }
        for field in &inserts {
            w.line(format!("this.{} = {};", field, field));
        }
        for (index, (spec, target)) in template.statics.iter().zip(&edges.statics).enumerate() {
            let child = unit.names.definition(*target).type_name(&self.type_prefix);
            let args: Vec<String> = std::iter::once("this".to_string())
                .chain(spec.args.iter().map(|arg| match arg {
                    Arg::Param(index) => format!("this.{}", params[*index]),
                    Arg::Text(text) => java_string(text),
                }))
                .collect();
            w.line(format!(
                "this._static{} = new {}({});",
                index,
                child,
                args.join(", ")
            ));
        }
        w.close("}");

        for (slot, targets) in edges.slots.iter().enumerate() {
            for target in targets {
                self.write_factory(&mut w, unit, *target, slot);
            }
        }

        w.blank();
        w.line("@Override");
        w.open("protected String lookup(String name) {");
        for (spec, field) in template.params.iter().zip(&params) {
            w.open(format!("if ({}.equals(name)) {{", java_string(&spec.name)));
            w.line(format!("return {};", field));
            w.close("}");
        }
        w.line("return super.lookup(name);");
        w.close("}");

        w.blank();
        w.line("@Override");
        w.open("public String render() {");
        w.line("StringBuilder out = new StringBuilder();");
        let mut regions: Vec<(usize, &str)> = Vec::new();
        let mut opened = 0;
        for part in &template.parts {
            match part {
                Part::Text(text) => w.line(format!("out.append({});", java_string(text))),
                Part::Param(index) => w.line(format!("out.append({});", params[*index])),
                Part::Insert(index) => {
                    let field = &inserts[*index];
                    if template.inserts[*index].optional {
                        w.line(format!(
                            "out.append({} == null ? \"\" : {});",
                            field, field
                        ));
                    } else {
                        w.line(format!("out.append({});", field));
                    }
                }
                Part::Static(index) => {
                    w.line(format!("out.append(_static{}.render());", index))
                }
                Part::Slot(index) => w.line(format!(
                    "out.append(renderSlot(_slot{}, {}));",
                    index,
                    slot_arguments(&template.slots[*index].options)
                )),
                Part::Indent(prefix) => {
                    w.line(format!("int indent{} = out.length();", opened));
                    regions.push((opened, prefix));
                    opened += 1;
                }
                Part::EndIndent => {
                    if let Some((region, prefix)) = regions.pop() {
                        w.line(format!(
                            "indent(out, indent{}, {});",
                            region,
                            java_string(prefix)
                        ));
                    }
                }
            }
        }
        if template.eol == EolPolicy::SuppressTrailing {
            w.line("return suppressEol(out.toString());");
        } else {
            w.line("return out.toString();");
        }
        w.close("}");

        if !edges.statics.is_empty() || !edges.slots.is_empty() {
            w.blank();
            w.line("@Override");
            w.open("public void release() {");
            for index in 0..edges.statics.len() {
                w.line(format!("_static{}.release();", index));
            }
            for index in 0..edges.slots.len() {
                w.open(format!("for ({} child : _slot{}) {{", BASE_CLASS, index));
                w.line("child.release();");
                w.close("}");
                w.line(format!("_slot{}.clear();", index));
            }
            w.close("}");
        }
        w.close("}");

        Some(GeneratedFile {
            path: self.path(&class),
            contents: w.finish(),
        })
    }

    fn write_factory(&self, w: &mut CodeWriter, unit: &CompilationUnit, target: DefId, slot: usize) {
        let def = unit.graph.definition(target);
        let names = unit.names.definition(target);
        let child = names.type_name(&self.type_prefix);

        let mut args: Vec<String> = def
            .params
            .iter()
            .zip(unit.names.params(target))
            .filter(|(param, _)| param.is_explicit())
            .map(|(_, ident)| format!("param_{}", ident))
            .collect();
        args.extend(
            unit.names
                .inserts(target)
                .iter()
                .map(|ident| format!("insert_{}", ident)),
        );
        let declared: Vec<String> = args.iter().map(|a| format!("String {}", a)).collect();
        let forwarded: Vec<&str> = std::iter::once("this")
            .chain(args.iter().map(String::as_str))
            .collect();

        w.blank();
        w.open(format!(
            "public {} {}({}) {{",
            child,
            names.factory(),
            declared.join(", ")
        ));
        w.line(format!("{} child = new {}({});", child, child, forwarded.join(", ")));
        w.line(format!("_slot{}.add(child);", slot));
        w.line("return child;");
        w.close("}");
    }
}

impl Backend for JavaBackend {
    fn target(&self) -> Target {
        Target::Java
    }

    fn emit(&self, unit: &CompilationUnit) -> Vec<GeneratedFile> {
        std::iter::once(self.base_class())
            .chain(
                unit.graph
                    .emission_order()
                    .iter()
                    .filter_map(|id| self.definition_class(unit, *id)),
            )
            .collect()
    }
}

fn slot_arguments(options: &SlotOptions) -> String {
    [
        &options.none,
        &options.before_first,
        &options.separator,
        &options.after_last,
    ]
    .iter()
    .map(|value| match value {
        Some(text) => java_string(text),
        None => "null".to_string(),
    })
    .collect::<Vec<_>>()
    .join(", ")
}

/// Java string literal for `text`
///
/// Control characters use octal escapes: `\u` escapes are decoded before
/// lexing, so `\u000a` would end the literal.
fn java_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    out.push('"');
    out
}
