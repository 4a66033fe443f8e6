//! Convenience re-exports for the common workflow: compile a docstring,
//! serialize it, validate it.

pub use crate::compile::{ToolContainer, ToolDeclaration, compile};
pub use crate::error::{Error, Result};
pub use crate::schema::{Primitive, SchemaKind, SchemaNode};
pub use crate::typemap::{is_optional_type_string, map_type};
pub use crate::validate::{validate_container, validate_declaration};
