//! Rendering scenarios driven by the showcase fixture

use macrogen::runtime::{Arguments, InstanceId, RuntimeError, TemplateId, Tree};
use macrogen::{compile, CompilationUnit};
use pretty_assertions::assert_eq;

const SHOWCASE: &str = include_str!("fixtures/showcase.mg");

fn showcase() -> CompilationUnit {
    compile(SHOWCASE).expect("showcase should compile")
}

fn id(unit: &CompilationUnit, name: &str) -> TemplateId {
    unit.catalog
        .find(name)
        .unwrap_or_else(|| panic!("no template named {name}"))
}

fn args(values: &[&str]) -> Arguments {
    values
        .iter()
        .fold(Arguments::new(), |args, value| args.param(*value))
}

#[test]
fn test_text_with_parameters() {
    let unit = showcase();
    let tree = Tree::new(
        &unit.catalog,
        id(&unit, "text_params"),
        args(&["Arnaud", "Julien"]),
    )
    .unwrap();
    assert_eq!(tree.render(), "Arnaud,Julien");
}

#[test]
fn test_identifiers_render_their_literals() {
    let unit = showcase();
    for (name, expected) in [
        ("text_normal_id", "normal"),
        ("teXTRIChid", "rich"),
        ("mACrOrIChId", "rich macro"),
    ] {
        let tree = Tree::new(&unit.catalog, id(&unit, name), Arguments::new()).unwrap();
        assert_eq!(tree.render(), expected);
    }
}

#[test]
fn test_nested_dynamic_children() {
    let unit = showcase();
    let lv1 = id(&unit, "macro_in_macro_lv1");
    let lv2 = id(&unit, "macro_in_macro_lv2");
    let mut tree = Tree::new(&unit.catalog, id(&unit, "macro_in_macro"), args(&["GRESIL"])).unwrap();
    let root = tree.root();

    let profs = tree.create(root, lv1, args(&["Profs :"])).unwrap();
    for person in ["Jean", "Etienne"] {
        tree.create(profs, lv2, args(&[person])).unwrap();
    }
    let students = tree.create(root, lv1, args(&["Students :"])).unwrap();
    for person in ["Arnaud", "Julien", "Alexis", "Jean-Sebastien"] {
        tree.create(students, lv2, args(&[person])).unwrap();
    }

    assert_eq!(
        tree.render(),
        "School GRESIL:\n  Profs :\n    - Jean\n    - Etienne\n  Students :\n    - Arnaud\n    - Julien\n    - Alexis\n    - Jean-Sebastien\n"
    );
    assert_eq!(tree.children(root).len(), 2);
    assert_eq!(tree.instance_count(), 9);
}

#[test]
fn test_heritage_propagates_through_levels() {
    let unit = showcase();
    let mut tree = Tree::new(&unit.catalog, id(&unit, "macro_heritage"), args(&["GRESIL"])).unwrap();
    let root = tree.root();
    let profs = tree
        .create(root, id(&unit, "macro_heritage_lv1"), args(&["Prof"]))
        .unwrap();
    let jean = tree
        .create(profs, id(&unit, "macro_heritage_lv2"), args(&["Jean"]))
        .unwrap();

    assert_eq!(tree.render(), "Jean (Prof) at GRESIL\n");
    assert_eq!(tree.param(jean, "school"), Some("GRESIL"));
    assert_eq!(tree.param(jean, "role"), Some("Prof"));
}

#[test]
fn test_inheriting_definition_is_not_constructible() {
    let unit = showcase();
    let err = Tree::new(
        &unit.catalog,
        id(&unit, "macro_heritage_lv2"),
        args(&["Jean"]),
    )
    .unwrap_err();
    assert!(matches!(err, RuntimeError::NotTopLevel { .. }));
}

#[test]
fn test_static_children() {
    let unit = showcase();
    let tree = Tree::new(&unit.catalog, id(&unit, "macro_expand"), args(&["Arnaud"])).unwrap();
    assert_eq!(tree.render(), "Hello Arnaud, Bye\n");
    // Static children exist as soon as the parent does
    assert_eq!(tree.instance_count(), 3);
}

#[test]
fn test_insertion_point() {
    let unit = showcase();
    let tree = Tree::new(
        &unit.catalog,
        id(&unit, "macro_insert"),
        Arguments::new().param("ObjectMacro").insert("Yes !"),
    )
    .unwrap();
    assert_eq!(tree.render(), "Is ObjectMacro is a simple language ? Yes !\n");
}

#[test]
fn test_missing_insertion_rejected() {
    let unit = showcase();
    let err = Tree::new(
        &unit.catalog,
        id(&unit, "macro_insert"),
        args(&["ObjectMacro"]).optional_insert(None),
    )
    .unwrap_err();
    assert!(matches!(err, RuntimeError::MissingInsertion { .. }));

    let err = Tree::new(
        &unit.catalog,
        id(&unit, "macro_insert"),
        args(&["ObjectMacro"]),
    )
    .unwrap_err();
    assert!(matches!(err, RuntimeError::ArgumentCount { .. }));
}

#[test]
fn test_slot_options() {
    let unit = showcase();
    let author = id(&unit, "author");
    let render = |names: &[&str]| {
        let mut tree =
            Tree::new(&unit.catalog, id(&unit, "expand_helpers"), Arguments::new()).unwrap();
        let root = tree.root();
        for name in names {
            tree.create(root, author, args(&[*name])).unwrap();
        }
        tree.render()
    };

    assert_eq!(render(&[]), "Authors: nobody\n");
    assert_eq!(render(&["Arnaud"]), "Authors: [Arnaud]\n");
    assert_eq!(
        render(&["Arnaud", "Julien", "Alexis"]),
        "Authors: [Arnaud Julien Alexis]\n"
    );
}

#[test]
fn test_suppress_trailing_removes_one_terminator() {
    let unit = showcase();
    let tree = Tree::new(&unit.catalog, id(&unit, "signature"), args(&["Arnaud"])).unwrap();
    assert_eq!(tree.render(), "-- Arnaud\n");
}

#[test]
fn test_render_is_idempotent_and_sees_new_children() {
    let unit = showcase();
    let author = id(&unit, "author");
    let mut tree = Tree::new(&unit.catalog, id(&unit, "expand_helpers"), Arguments::new()).unwrap();
    let root = tree.root();

    let first = tree.render();
    assert_eq!(first, tree.render());

    tree.create(root, author, args(&["Julien"])).unwrap();
    assert_eq!(tree.render(), "Authors: [Julien]\n");
    assert_eq!(tree.render(), tree.render());
}

#[test]
fn test_failed_create_leaves_tree_unchanged() {
    let unit = showcase();
    let mut tree = Tree::new(&unit.catalog, id(&unit, "macro_in_macro"), args(&["GRESIL"])).unwrap();
    let root = tree.root();
    let before = tree.render();
    let count = tree.instance_count();

    // Wrong argument count
    let err = tree
        .create(root, id(&unit, "macro_in_macro_lv1"), Arguments::new())
        .unwrap_err();
    assert!(matches!(err, RuntimeError::ArgumentCount { .. }));

    // Not a slot target of the root
    let err = tree
        .create(root, id(&unit, "author"), args(&["x"]))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::NoSuchFactory { .. }));

    assert_eq!(tree.render(), before);
    assert_eq!(tree.instance_count(), count);
    assert!(tree.children(root).is_empty());
}

#[test]
fn test_instances_can_be_rendered_individually() {
    let unit = showcase();
    let mut tree = Tree::new(&unit.catalog, id(&unit, "macro_in_macro"), args(&["GRESIL"])).unwrap();
    let root = tree.root();
    let profs: InstanceId = tree
        .create(root, id(&unit, "macro_in_macro_lv1"), args(&["Profs :"]))
        .unwrap();
    tree.create(profs, id(&unit, "macro_in_macro_lv2"), args(&["Jean"]))
        .unwrap();

    assert_eq!(tree.render_instance(profs), "  Profs :\n    - Jean\n");
    assert_eq!(tree.parent(profs), Some(root));
    tree.release();
}

#[test]
fn test_indentation_follows_nesting_depth() {
    let unit = showcase();
    let item = id(&unit, "outline_item");
    let mut tree = Tree::new(&unit.catalog, id(&unit, "outline"), args(&["Plan"])).unwrap();
    let root = tree.root();

    let a = tree.create(root, item, args(&["a"])).unwrap();
    let a1 = tree.create(a, item, args(&["a1"])).unwrap();
    tree.create(a1, item, args(&["deep"])).unwrap();
    tree.create(root, item, args(&["b"])).unwrap();

    assert_eq!(
        tree.render(),
        "Plan\n  - a\n    - a1\n      - deep\n  - b\n"
    );
    assert_eq!(tree.render_instance(a1), "- a1\n  - deep\n");
}

#[test]
fn test_empty_indent_region_adds_nothing() {
    let unit = showcase();
    let tree = Tree::new(&unit.catalog, id(&unit, "outline"), args(&["Plan"])).unwrap();
    assert_eq!(tree.render(), "Plan\n");
}
