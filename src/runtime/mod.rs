//! Runtime object model
//!
//! Everything generated code links against: the lowered [`Catalog`], the
//! arena-backed [`Tree`] with its render engine, and the typed
//! [`Document`]/[`Cursor`]/[`Handle`] layer.

mod catalog;
mod error;
mod tree;
mod typed;

pub use catalog::{
    Arg, Catalog, EolPolicy, InsertSpec, ParamSpec, Part, SlotOptions, SlotSpec, StaticSpec,
    Template, TemplateId,
};
pub use error::RuntimeError;
pub use tree::{Arguments, InstanceId, Tree};
pub use typed::{Cursor, Document, Handle, Kind};
