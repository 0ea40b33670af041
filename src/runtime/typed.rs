//! Typed builder layer used by generated Rust code
//!
//! Generated modules declare one marker type per definition and implement
//! [`Kind`] for it. Factories are extension traits implemented for
//! [`Cursor`], so the compiler rejects creating a child through a parent
//! whose definition has no slot for it. Handles remember the tree that
//! minted them, and a [`Document`] refuses handles of other documents.

use std::fmt;
use std::marker::PhantomData;

use super::catalog::{Catalog, TemplateId};
use super::error::RuntimeError;
use super::tree::{Arguments, InstanceId, Tree};

/// Marker for one generated definition
pub trait Kind: 'static {
    const TEMPLATE: TemplateId;

    fn catalog() -> &'static Catalog;
}

/// Copyable reference to an instance owned by a [`Document`]
pub struct Handle<K> {
    tree: u64,
    id: InstanceId,
    kind: PhantomData<fn() -> K>,
}

impl<K> Handle<K> {
    fn new(tree: u64, id: InstanceId) -> Self {
        Self {
            tree,
            id,
            kind: PhantomData,
        }
    }

    pub fn id(self) -> InstanceId {
        self.id
    }
}

impl<K> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Handle<K> {}

impl<K> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree && self.id == other.id
    }
}

impl<K> Eq for Handle<K> {}

impl<K> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id.index()).finish()
    }
}

/// Owner of a tree whose root is a `K`
pub struct Document<K: Kind> {
    tree: Tree<'static>,
    kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Document<K> {
    /// Construct the root instance
    ///
    /// # Panics
    ///
    /// Panics if `args` does not match the definition of `K`. Generated
    /// constructors always pass matching arguments.
    pub fn new(args: Arguments) -> Self {
        match Self::try_new(args) {
            Ok(document) => document,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(args: Arguments) -> Result<Self, RuntimeError> {
        let tree = Tree::new(K::catalog(), K::TEMPLATE, args)?;
        Ok(Self {
            tree,
            kind: PhantomData,
        })
    }

    pub fn handle(&self) -> Handle<K> {
        Handle::new(self.tree.serial(), self.tree.root())
    }

    pub fn root(&mut self) -> Cursor<'_, K> {
        let id = self.tree.root();
        Cursor::new(&mut self.tree, id)
    }

    /// Cursor on an instance previously returned by a factory of this document
    pub fn at<C: Kind>(&mut self, handle: Handle<C>) -> Result<Cursor<'_, C>, RuntimeError> {
        self.owns(handle)?;
        Ok(Cursor::new(&mut self.tree, handle.id))
    }

    pub fn render(&self) -> String {
        self.tree.render()
    }

    pub fn render_at<C: Kind>(&self, handle: Handle<C>) -> Result<String, RuntimeError> {
        self.owns(handle)?;
        Ok(self.tree.render_instance(handle.id))
    }

    fn owns<C>(&self, handle: Handle<C>) -> Result<(), RuntimeError> {
        if handle.tree == self.tree.serial() && self.tree.contains(handle.id) {
            Ok(())
        } else {
            Err(RuntimeError::ForeignHandle {
                index: handle.id.index(),
            })
        }
    }

    pub fn tree(&self) -> &Tree<'static> {
        &self.tree
    }

    pub fn release(self) {
        self.tree.release();
    }
}

impl<K: Kind> fmt::Display for Document<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<K: Kind> fmt::Debug for Document<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("instances", &self.tree.instance_count())
            .finish()
    }
}

/// Mutable view of one instance of kind `K`
pub struct Cursor<'d, K> {
    tree: &'d mut Tree<'static>,
    id: InstanceId,
    kind: PhantomData<fn() -> K>,
}

impl<'d, K: Kind> Cursor<'d, K> {
    fn new(tree: &'d mut Tree<'static>, id: InstanceId) -> Self {
        Self {
            tree,
            id,
            kind: PhantomData,
        }
    }

    pub fn handle(&self) -> Handle<K> {
        Handle::new(self.tree.serial(), self.id)
    }

    /// Append a `C` to the slot of this instance that accepts it
    ///
    /// # Panics
    ///
    /// Panics if the catalog has no such slot or `args` does not match `C`.
    pub fn create<C: Kind>(&mut self, args: Arguments) -> Handle<C> {
        match self.try_create(args) {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_create<C: Kind>(&mut self, args: Arguments) -> Result<Handle<C>, RuntimeError> {
        let tree = self.tree.serial();
        self.tree
            .create(self.id, C::TEMPLATE, args)
            .map(|id| Handle::new(tree, id))
    }

    pub fn render(&self) -> String {
        self.tree.render_instance(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::catalog::{SlotOptions, SlotSpec, Template};
    use std::sync::OnceLock;

    fn catalog() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::new(vec![
                Template::new("list").text("items: ").slot(
                    SlotSpec::new(vec![TemplateId::new(1), TemplateId::new(2)])
                        .with_options(SlotOptions::new().with_separator(", ")),
                ),
                Template::new("word").param("w").param_ref(0),
                Template::new("number").param("n").text("#").param_ref(0),
            ])
        })
    }

    struct List;
    struct Word;
    struct Number;

    impl Kind for List {
        const TEMPLATE: TemplateId = TemplateId::new(0);
        fn catalog() -> &'static Catalog {
            catalog()
        }
    }

    impl Kind for Word {
        const TEMPLATE: TemplateId = TemplateId::new(1);
        fn catalog() -> &'static Catalog {
            catalog()
        }
    }

    impl Kind for Number {
        const TEMPLATE: TemplateId = TemplateId::new(2);
        fn catalog() -> &'static Catalog {
            catalog()
        }
    }

    #[test]
    fn test_factories_interleave_in_one_slot() {
        let mut doc = Document::<List>::new(Arguments::new());
        let mut root = doc.root();
        let word: Handle<Word> = root.create(Arguments::new().param("a"));
        let _: Handle<Number> = root.create(Arguments::new().param("1"));
        let _: Handle<Word> = root.create(Arguments::new().param("b"));

        assert_eq!(doc.render(), "items: a, #1, b");
        assert_eq!(doc.render_at(word).unwrap(), "a");
        assert_eq!(doc.to_string(), doc.render());
    }

    #[test]
    fn test_try_create_reports_misuse() {
        let mut doc = Document::<List>::new(Arguments::new());
        let err = doc
            .root()
            .try_create::<Word>(Arguments::new())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ArgumentCount { .. }));
        assert_eq!(doc.render(), "items: ");
    }

    #[test]
    fn test_handles_are_copy() {
        let mut doc = Document::<List>::new(Arguments::new());
        let handle: Handle<Word> = doc.root().create(Arguments::new().param("x"));
        let copy = handle;
        assert_eq!(handle, copy);
        assert_eq!(doc.at(copy).unwrap().render(), "x");
        doc.release();
    }

    #[test]
    fn test_handles_of_another_document_rejected() {
        let mut first = Document::<List>::new(Arguments::new());
        let word: Handle<Word> = first.root().create(Arguments::new().param("a"));
        let mut second = Document::<List>::new(Arguments::new());
        let other: Handle<Word> = second.root().create(Arguments::new().param("b"));

        // Same index in both trees, different owners
        assert_eq!(word.id(), other.id());
        assert_ne!(word, other);
        let err = second.at(word).map(|_| ()).unwrap_err();
        assert_eq!(err, RuntimeError::ForeignHandle { index: word.id().index() });
        assert!(second.render_at(word).is_err());
        assert_ne!(first.handle(), second.handle());

        assert_eq!(second.render(), "items: b");
        assert_eq!(first.at(word).unwrap().render(), "a");
    }
}
