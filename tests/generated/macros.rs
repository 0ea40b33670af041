//! Generated by macrogen. Do not edit.

#![allow(dead_code, unused_imports, non_snake_case, non_camel_case_types)]

use std::sync::OnceLock;

use macrogen::runtime::{Arg, Arguments, Catalog, Cursor, Document, EolPolicy, Handle, Kind, SlotOptions, SlotSpec, StaticSpec, Template, TemplateId};

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        Catalog::new(vec![
            Template::new("text_normal_id")
                .text("normal"),
            Template::new("teXTRIChid")
                .text("rich"),
            Template::new("mACrOrIChId")
                .text("rich macro"),
            Template::new("text_params")
                .param("a")
                .param("b")
                .param_ref(0)
                .text(",")
                .param_ref(1),
            Template::new("macro_params")
                .param("a")
                .param("b")
                .param_ref(0)
                .text("-")
                .param_ref(1),
            Template::new("macro_in_macro")
                .param("name")
                .text("School ")
                .param_ref(0)
                .text(":\n")
                .slot(SlotSpec::new(vec![TemplateId::new(6)])),
            Template::new("macro_in_macro_lv1")
                .param("title")
                .text("  ")
                .param_ref(0)
                .text("\n")
                .slot(SlotSpec::new(vec![TemplateId::new(7)])),
            Template::new("macro_in_macro_lv2")
                .param("person")
                .text("    - ")
                .param_ref(0)
                .text("\n"),
            Template::new("macro_heritage")
                .param("school")
                .slot(SlotSpec::new(vec![TemplateId::new(9)])),
            Template::new("macro_heritage_lv1")
                .param("role")
                .inherited_param("school", "school")
                .slot(SlotSpec::new(vec![TemplateId::new(10)]))
                .top_level(false),
            Template::new("macro_heritage_lv2")
                .param("person")
                .inherited_param("role", "role")
                .inherited_param("school", "school")
                .param_ref(0)
                .text(" (")
                .param_ref(1)
                .text(") at ")
                .param_ref(2)
                .text("\n")
                .top_level(false),
            Template::new("hello")
                .param("who")
                .text("Hello ")
                .param_ref(0),
            Template::new("bye")
                .text("Bye"),
            Template::new("macro_expand")
                .param("who")
                .static_child(StaticSpec::new(TemplateId::new(11)).arg(Arg::Param(0)))
                .text(", ")
                .static_child(StaticSpec::new(TemplateId::new(12)))
                .text("\n"),
            Template::new("macro_insert")
                .param("language")
                .insertion_point("answer")
                .text("Is ")
                .param_ref(0)
                .text(" is a simple language ? ")
                .insert_ref(0)
                .text("\n"),
            Template::new("expand_helpers")
                .text("Authors: ")
                .slot(SlotSpec::new(vec![TemplateId::new(16)]).with_options(SlotOptions::new().with_none("nobody").with_before_first("[").with_separator(" ").with_after_last("]")))
                .text("\n"),
            Template::new("author")
                .param("name")
                .param_ref(0),
            Template::new("signature")
                .param("author")
                .text("-- ")
                .param_ref(0)
                .text("\n\n")
                .eol(EolPolicy::SuppressTrailing),
            Template::new("outline")
                .param("title")
                .param_ref(0)
                .text("\n")
                .indent("  ")
                .slot(SlotSpec::new(vec![TemplateId::new(19)]))
                .end_indent(),
            Template::new("outline_item")
                .param("label")
                .text("- ")
                .param_ref(0)
                .text("\n")
                .indent("  ")
                .slot(SlotSpec::new(vec![TemplateId::new(19)]))
                .end_indent(),
        ])
    })
}

/// `text_normal_id`
pub struct MTextNormalId;

impl Kind for MTextNormalId {
    const TEMPLATE: TemplateId = TemplateId::new(0);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MTextNormalId {
    pub fn new() -> Document<Self> {
        Document::new(Arguments::new())
    }
}

/// `teXTRIChid`
pub struct M_teXTRIChid;

impl Kind for M_teXTRIChid {
    const TEMPLATE: TemplateId = TemplateId::new(1);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl M_teXTRIChid {
    pub fn new() -> Document<Self> {
        Document::new(Arguments::new())
    }
}

/// `mACrOrIChId`
pub struct M_mACrOrIChId;

impl Kind for M_mACrOrIChId {
    const TEMPLATE: TemplateId = TemplateId::new(2);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl M_mACrOrIChId {
    pub fn new() -> Document<Self> {
        Document::new(Arguments::new())
    }
}

/// `text_params`
pub struct MTextParams;

impl Kind for MTextParams {
    const TEMPLATE: TemplateId = TemplateId::new(3);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MTextParams {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(a).param(b))
    }
}

/// `macro_params`
pub struct MMacroParams;

impl Kind for MMacroParams {
    const TEMPLATE: TemplateId = TemplateId::new(4);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MMacroParams {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(a).param(b))
    }
}

/// `macro_in_macro`
pub struct MMacroInMacro;

impl Kind for MMacroInMacro {
    const TEMPLATE: TemplateId = TemplateId::new(5);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MMacroInMacro {
    pub fn new(name: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(name))
    }
}

pub trait MMacroInMacroSlots {
    fn new_macro_in_macro_lv1(&mut self, title: impl Into<String>) -> Handle<MMacroInMacroLv1>;
}

impl MMacroInMacroSlots for Cursor<'_, MMacroInMacro> {
    fn new_macro_in_macro_lv1(&mut self, title: impl Into<String>) -> Handle<MMacroInMacroLv1> {
        self.create(Arguments::new().param(title))
    }
}

/// `macro_in_macro_lv1`
pub struct MMacroInMacroLv1;

impl Kind for MMacroInMacroLv1 {
    const TEMPLATE: TemplateId = TemplateId::new(6);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MMacroInMacroLv1 {
    pub fn new(title: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(title))
    }
}

pub trait MMacroInMacroLv1Slots {
    fn new_macro_in_macro_lv2(&mut self, person: impl Into<String>) -> Handle<MMacroInMacroLv2>;
}

impl MMacroInMacroLv1Slots for Cursor<'_, MMacroInMacroLv1> {
    fn new_macro_in_macro_lv2(&mut self, person: impl Into<String>) -> Handle<MMacroInMacroLv2> {
        self.create(Arguments::new().param(person))
    }
}

/// `macro_in_macro_lv2`
pub struct MMacroInMacroLv2;

impl Kind for MMacroInMacroLv2 {
    const TEMPLATE: TemplateId = TemplateId::new(7);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MMacroInMacroLv2 {
    pub fn new(person: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(person))
    }
}

/// `macro_heritage`
pub struct MMacroHeritage;

impl Kind for MMacroHeritage {
    const TEMPLATE: TemplateId = TemplateId::new(8);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MMacroHeritage {
    pub fn new(school: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(school))
    }
}

pub trait MMacroHeritageSlots {
    fn new_macro_heritage_lv1(&mut self, role: impl Into<String>) -> Handle<MMacroHeritageLv1>;
}

impl MMacroHeritageSlots for Cursor<'_, MMacroHeritage> {
    fn new_macro_heritage_lv1(&mut self, role: impl Into<String>) -> Handle<MMacroHeritageLv1> {
        self.create(Arguments::new().param(role))
    }
}

/// `macro_heritage_lv1`
pub struct MMacroHeritageLv1;

impl Kind for MMacroHeritageLv1 {
    const TEMPLATE: TemplateId = TemplateId::new(9);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

pub trait MMacroHeritageLv1Slots {
    fn new_macro_heritage_lv2(&mut self, person: impl Into<String>) -> Handle<MMacroHeritageLv2>;
}

impl MMacroHeritageLv1Slots for Cursor<'_, MMacroHeritageLv1> {
    fn new_macro_heritage_lv2(&mut self, person: impl Into<String>) -> Handle<MMacroHeritageLv2> {
        self.create(Arguments::new().param(person))
    }
}

/// `macro_heritage_lv2`
pub struct MMacroHeritageLv2;

impl Kind for MMacroHeritageLv2 {
    const TEMPLATE: TemplateId = TemplateId::new(10);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

/// `hello`
pub struct MHello;

impl Kind for MHello {
    const TEMPLATE: TemplateId = TemplateId::new(11);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MHello {
    pub fn new(who: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(who))
    }
}

/// `bye`
pub struct MBye;

impl Kind for MBye {
    const TEMPLATE: TemplateId = TemplateId::new(12);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MBye {
    pub fn new() -> Document<Self> {
        Document::new(Arguments::new())
    }
}

/// `macro_insert`
pub struct MMacroInsert;

impl Kind for MMacroInsert {
    const TEMPLATE: TemplateId = TemplateId::new(14);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MMacroInsert {
    pub fn new(language: impl Into<String>, answer: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(language).insert(answer))
    }
}

/// `expand_helpers`
pub struct MExpandHelpers;

impl Kind for MExpandHelpers {
    const TEMPLATE: TemplateId = TemplateId::new(15);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MExpandHelpers {
    pub fn new() -> Document<Self> {
        Document::new(Arguments::new())
    }
}

pub trait MExpandHelpersSlots {
    fn new_author(&mut self, name: impl Into<String>) -> Handle<MAuthor>;
}

impl MExpandHelpersSlots for Cursor<'_, MExpandHelpers> {
    fn new_author(&mut self, name: impl Into<String>) -> Handle<MAuthor> {
        self.create(Arguments::new().param(name))
    }
}

/// `author`
pub struct MAuthor;

impl Kind for MAuthor {
    const TEMPLATE: TemplateId = TemplateId::new(16);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MAuthor {
    pub fn new(name: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(name))
    }
}

/// `signature`
pub struct MSignature;

impl Kind for MSignature {
    const TEMPLATE: TemplateId = TemplateId::new(17);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MSignature {
    pub fn new(author: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(author))
    }
}

/// `outline`
pub struct MOutline;

impl Kind for MOutline {
    const TEMPLATE: TemplateId = TemplateId::new(18);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MOutline {
    pub fn new(title: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(title))
    }
}

pub trait MOutlineSlots {
    fn new_outline_item(&mut self, label: impl Into<String>) -> Handle<MOutlineItem>;
}

impl MOutlineSlots for Cursor<'_, MOutline> {
    fn new_outline_item(&mut self, label: impl Into<String>) -> Handle<MOutlineItem> {
        self.create(Arguments::new().param(label))
    }
}

/// `outline_item`
pub struct MOutlineItem;

impl Kind for MOutlineItem {
    const TEMPLATE: TemplateId = TemplateId::new(19);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MOutlineItem {
    pub fn new(label: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(label))
    }
}

pub trait MOutlineItemSlots {
    fn new_outline_item(&mut self, label: impl Into<String>) -> Handle<MOutlineItem>;
}

impl MOutlineItemSlots for Cursor<'_, MOutlineItem> {
    fn new_outline_item(&mut self, label: impl Into<String>) -> Handle<MOutlineItem> {
        self.create(Arguments::new().param(label))
    }
}

/// `macro_expand`
pub struct MMacroExpand;

impl Kind for MMacroExpand {
    const TEMPLATE: TemplateId = TemplateId::new(13);

    fn catalog() -> &'static Catalog {
        catalog()
    }
}

impl MMacroExpand {
    pub fn new(who: impl Into<String>) -> Document<Self> {
        Document::new(Arguments::new().param(who))
    }
}
