//! # oasgen_spec
//!
//! Resource descriptions and their compilation into OpenAPI documents.
//!
//! A resource description is a small authoring document: a title, a
//! description, contact details and a list of named resources. The compiler
//! expands it deterministically into a complete API description with a
//! collection path and an item path per resource, tagged operations, stub
//! schemas and a shared `id` path parameter.
//!
//! ## Features
//!
//! - **Typed input**: [`ResourceDescription`] is parsed at the boundary, so the
//!   compiler never dereferences a missing field
//! - **Deterministic output**: identical input yields byte-identical JSON
//! - **Readonly resources**: create, update and delete are left out
//!
//! ## Example
//!
//! ```rust
//! use oasgen_spec::{compile, Contact, Resource, ResourceDescription};
//!
//! let doc = ResourceDescription::new(
//!     "Orders",
//!     "Order API",
//!     Contact::new("A", "a@b.nl", "https://b.nl"),
//! )
//! .with_resource(Resource::new("order", "orders"));
//!
//! let artifact = compile(&doc);
//! assert!(artifact.paths.contains_key("/orders/{id}"));
//! println!("{}", artifact.to_json().unwrap());
//! ```

pub mod artifact;
pub mod casing;
pub mod compiler;
pub mod error;
pub mod input;
pub mod models;

pub use artifact::{
    CompiledArtifact, Components, Info, InlineResponse, MediaType, Operation, Parameter,
    PathItem, PropertySchema, Reference, Response, Schema, Server, Tag,
};
pub use compiler::{collection_path, compile, compile_text, item_path, schema_name};
pub use error::{SpecError, SpecResult};
pub use input::{
    format_document, GeneratorSpec, IdentityMapper, ResponseMapper, SpecInput, GENERATOR_SYNTAX,
    PARAMETERS_SCHEMA,
};
pub use models::{Contact, Resource, ResourceDescription};
