#![deny(rust_2018_idioms)]
//! Form fields bound to an externally owned form-state store.
//!
//! A field is described declaratively (children content plus typed props),
//! classified into one render branch, and rendered into a markup tree whose
//! controls carry [`Binding`]s. Interactions are routed back through the
//! binders, which read the store once and issue exactly one write.

pub mod binding;
mod descriptor;
mod document;
mod error;
mod io;
pub mod markup;
mod props;
mod render;
mod store;
mod theme;
mod validate;
mod variant;
mod visibility;

pub use binding::{
    ArrayToggle, Binding, FileHandle, Interaction, Membership, apply_toggle, toggle_member,
};
pub use descriptor::{
    ChildContent, ChildPart, FieldDescription, FieldIdentity, parse_description, slugify,
};
pub use document::{
    FieldSpec, FormDocument, form_document_schema, parse_form_document, render_document,
    render_document_html,
};
pub use error::UsageError;
pub use io::{
    DocumentFormat,
    input::{load_form_document, load_snapshot, parse_document_str},
    output::{OutputDestination, OutputOptions, emit_html},
};
pub use markup::{Element, Node};
pub use props::{ChangeCallback, FieldOption, FieldProps, OptionValue};
pub use render::{RenderedField, render_field};
pub use store::{ChangeEvent, FormConfig, FormStore, MemoryStore, StoreSnapshot, StoreWrite};
pub use theme::{ClassSet, CssOverrides, FieldClasses, ThemeName, resolve_classes};
pub use validate::FieldValidator;
pub use variant::{ElementKind, InputKind, InputType, Variant, VariantFlags};
pub use visibility::error_visible;

pub mod prelude {
    pub use super::{
        FieldDescription, FieldOption, FieldProps, FormStore, Interaction, MemoryStore,
        RenderedField, UsageError, VariantFlags, render_field,
    };
}
