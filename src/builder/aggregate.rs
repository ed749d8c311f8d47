//! Builders folding primitive maps over collections.
//!
//! Keyed collections follow the last-wins policy of [`crate::node::merge_last_wins`]: when two
//! entries share a status code, schema name or scheme name, the later entry replaces the
//! earlier one. This is intentional and is not reported as an error.

use super::*;
use crate::model::{ComponentSchema, RequestBody, Response, SecurityRequirement, SecurityScheme};
use crate::node::{insert_last_wins, Key, Mapping, Node};

/// Builds the `security` sequence of an operation, one map per alternative requirement,
/// in input order.
pub fn build_all_security(requirements: &[SecurityRequirement]) -> Vec<Node> {
    requirements
        .iter()
        .map(|req| Node::from(build_security_entry(req)))
        .collect()
}

/// Builds `{description, content}` for a request body.
pub fn build_request_body_map(body: &RequestBody) -> Mapping {
    let mut map = Mapping::new();
    map.insert(Key::from(KEY_DESCRIPTION), Node::from(&body.description));
    map.insert(
        Key::from(KEY_CONTENT),
        Node::from(build_content_map(&body.content)),
    );
    map
}

/// Builds the `responses` mapping keyed by numeric status code.
pub fn build_all_responses(responses: &[Response]) -> Mapping {
    let mut map = Mapping::with_capacity(responses.len());
    for response in responses {
        insert_last_wins(&mut map, response.code, Node::from(build_response_map(response)));
    }
    map
}

/// Builds the `schemas` mapping keyed by schema name.
pub fn build_all_component_schemas(schemas: &[ComponentSchema]) -> Mapping {
    let mut map = Mapping::with_capacity(schemas.len());
    for schema in schemas {
        insert_last_wins(&mut map, &schema.name, Node::from(build_component_schema(schema)));
    }
    map
}

/// Builds the `securitySchemes` mapping keyed by scheme name.
pub fn build_all_security_schemes(schemes: &[SecurityScheme]) -> Mapping {
    let mut map = Mapping::with_capacity(schemes.len());
    for scheme in schemes {
        insert_last_wins(&mut map, &scheme.name, Node::from(build_security_scheme(scheme)));
    }
    map
}
