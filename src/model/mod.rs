//! In-memory representation of a Swagger 2.0 document.
//!
//! Parsers produce a [`Specification`]; the diff engine only reads it. Every
//! model carries a [`ModelId`] unique within its document so recursive model
//! comparison can detect cycles by identity.

mod document;
mod extensions;
mod operation;
mod schema;

pub use document::*;
pub use extensions::*;
pub use operation::*;
pub use schema::*;
