//! OAS Docs - OpenAPI documents from an in-memory API definition.
//!
//! This library turns an [`model::ApiDefinition`] (routes, reusable component schemas,
//! security schemes and document metadata) into an OpenAPI document and writes it as YAML or
//! JSON.
//!
//! # Architecture
//!
//! 1. [`model`] - The API definition graph, loadable from a definition file
//! 2. [`node`] - The generic, insertion-ordered document tree
//! 3. [`builder`] - Primitive and aggregate map builders, one entity or collection at a time
//! 4. [`assembler`] - Groups routes by path and assembles the full document tree
//! 5. [`validator`] - Cross-reference checks run before assembly
//! 6. [`serializer`] - YAML/JSON serialization and the buffered file writer
//! 7. [`emitter`] - Validate, assemble, serialize and write in one call
//!
//! # Example Usage
//!
//! ```no_run
//! use oas_docs::{
//!     emitter::{build_docs, BuildConfig},
//!     model::{ApiDefinition, ComponentSchema, Components, ContentEntry, Response, Route},
//! };
//!
//! let mut api = ApiDefinition::default();
//! api.add_route(Route::new("/users", "GET").with_response(
//!     Response::new(200, "ok")
//!         .with_content(ContentEntry::new("application/json", "#/components/schemas/User")),
//! ));
//! api.add_component(Components {
//!     schemas: vec![ComponentSchema::new("User", "object")],
//!     security_schemes: vec![],
//! });
//!
//! build_docs(&api, BuildConfig::default().with_out_path("openapi.yaml")).unwrap();
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod assembler;
pub mod builder;
pub mod cli;
pub mod emitter;
pub mod error;
pub mod model;
pub mod node;
pub mod serializer;
pub mod validator;

pub use error::{Error, Result};
