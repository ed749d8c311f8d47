//! Map builders turning API definition entities into document tree mappings.
//!
//! - [`primitive`] builders handle a single entity and know nothing about other entities.
//! - [`aggregate`] builders fold primitives over collections, keying each entry by its natural
//!   identifier (status code, media type, schema name, scheme name).
//!
//! All builders are pure: they borrow their input and return freshly allocated mappings.

pub mod aggregate;
pub mod primitive;

pub use aggregate::{
    build_all_component_schemas, build_all_responses, build_all_security,
    build_all_security_schemes, build_request_body_map,
};
pub use primitive::{
    build_component_schema, build_content_map, build_external_docs, build_info,
    build_response_map, build_security_entry, build_security_scheme, build_servers, build_tags,
};

pub(crate) const KEY_OPENAPI: &str = "openapi";
pub(crate) const KEY_INFO: &str = "info";
pub(crate) const KEY_EXTERNAL_DOCS: &str = "externalDocs";
pub(crate) const KEY_SERVERS: &str = "servers";
pub(crate) const KEY_PATHS: &str = "paths";
pub(crate) const KEY_COMPONENTS: &str = "components";

pub(crate) const KEY_TAGS: &str = "tags";
pub(crate) const KEY_SUMMARY: &str = "summary";
pub(crate) const KEY_OPERATION_ID: &str = "operationId";
pub(crate) const KEY_SECURITY: &str = "security";
pub(crate) const KEY_REQUEST_BODY: &str = "requestBody";
pub(crate) const KEY_RESPONSES: &str = "responses";
pub(crate) const KEY_DESCRIPTION: &str = "description";
pub(crate) const KEY_CONTENT: &str = "content";
pub(crate) const KEY_SCHEMA: &str = "schema";
pub(crate) const KEY_REF: &str = "$ref";
pub(crate) const KEY_SCHEMAS: &str = "schemas";
pub(crate) const KEY_SECURITY_SCHEMES: &str = "securitySchemes";
pub(crate) const KEY_NAME: &str = "name";
pub(crate) const KEY_TYPE: &str = "type";
pub(crate) const KEY_PROPERTIES: &str = "properties";
pub(crate) const KEY_IN: &str = "in";
pub(crate) const KEY_XML: &str = "xml";

/// Returns the value when it is set to something other than the empty string.
///
/// Optional string fields treat `Some("")` the same as `None`.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
