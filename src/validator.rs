//! Cross-reference checks run before a document is assembled.
//!
//! The assembler trusts its input: every `$ref` is emitted as given. A [`GraphValidator`] runs
//! first and rejects definitions whose references would dangle in the produced document.

use crate::model::{ApiDefinition, ContentEntry, Route};
use log::debug;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Prefix of local component schema references.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Checks that an API definition is internally consistent.
pub trait GraphValidator {
    fn validate(&self, api: &ApiDefinition) -> Result<(), ValidationError>;
}

/// A single inconsistency found in an API definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("{method} {path}: `{reference}` does not name a component schema")]
    DanglingContentRef {
        method: String,
        path: String,
        reference: String,
    },

    #[error("schema `{schema}`: `{reference}` does not name a component schema")]
    DanglingSchemaRef { schema: String, reference: String },

    #[error("{method} {path}: security requirement `{name}` does not name a security scheme")]
    UnknownSecurityScheme {
        method: String,
        path: String,
        name: String,
    },

    #[error("{method} {path}: operation is defined more than once")]
    DuplicateOperation { method: String, path: String },
}

/// Every problem found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub problems: Vec<Problem>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} problem(s) found", self.problems.len())?;
        for problem in &self.problems {
            write!(f, "\n  - {}", problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Default validator.
///
/// Resolves references against the components entry that ends up in the document (the last
/// one). Only local `#/components/schemas/<Name>` references are checked; anything else is
/// treated as an external reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefValidator;

impl GraphValidator for RefValidator {
    fn validate(&self, api: &ApiDefinition) -> Result<(), ValidationError> {
        let effective = api.effective_components();
        let schema_names: HashSet<&str> = effective
            .map(|c| c.schemas.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default();
        let scheme_names: HashSet<&str> = effective
            .map(|c| c.security_schemes.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default();

        let mut problems = Vec::new();
        let mut operations: HashSet<(&str, String)> = HashSet::new();

        for route in api.routes() {
            if !operations.insert((route.path.as_str(), route.method_key())) {
                problems.push(Problem::DuplicateOperation {
                    method: route.method_key(),
                    path: route.path.clone(),
                });
            }

            for entry in route_content(route) {
                if let Some(name) = local_schema_name(&entry.schema_ref) {
                    if !schema_names.contains(name) {
                        problems.push(Problem::DanglingContentRef {
                            method: route.method_key(),
                            path: route.path.clone(),
                            reference: entry.schema_ref.clone(),
                        });
                    }
                }
            }

            for requirement in &route.security {
                if !scheme_names.contains(requirement.auth_name.as_str()) {
                    problems.push(Problem::UnknownSecurityScheme {
                        method: route.method_key(),
                        path: route.path.clone(),
                        name: requirement.auth_name.clone(),
                    });
                }
            }
        }

        for schema in effective.map(|c| c.schemas.as_slice()).unwrap_or_default() {
            if let Some(name) = local_schema_name(&schema.reference) {
                if !schema_names.contains(name) {
                    problems.push(Problem::DanglingSchemaRef {
                        schema: schema.name.clone(),
                        reference: schema.reference.clone(),
                    });
                }
            }
        }

        debug!(
            "Validated {} routes, {} problem(s) found",
            api.routes().len(),
            problems.len()
        );

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { problems })
        }
    }
}

fn route_content(route: &Route) -> impl Iterator<Item = &ContentEntry> {
    route
        .request_body
        .content
        .iter()
        .chain(route.responses.iter().flat_map(|r| r.content.iter()))
}

/// Returns the schema name of a local reference, `None` for empty or external references.
fn local_schema_name(reference: &str) -> Option<&str> {
    reference.strip_prefix(SCHEMA_REF_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ComponentSchema, Components, RequestBody, Response, SecurityRequirement, SecurityScheme,
    };
    use pretty_assertions::assert_eq;

    fn petstore() -> ApiDefinition {
        let mut api = ApiDefinition::default();
        api.add_route(
            Route::new("/pets", "GET")
                .with_security(SecurityRequirement::new("api_key", Vec::<String>::new()))
                .with_response(Response::new(200, "ok").with_content(ContentEntry::new(
                    "application/json",
                    "#/components/schemas/Pet",
                ))),
        );
        api.add_component(Components {
            schemas: vec![ComponentSchema::new("Pet", "object")],
            security_schemes: vec![SecurityScheme::new("api_key", "apiKey").located_in("header")],
        });
        api
    }

    #[test]
    fn test_valid_definition() {
        assert_eq!(RefValidator.validate(&petstore()), Ok(()));
    }

    #[test]
    fn test_empty_definition_is_valid() {
        assert!(RefValidator.validate(&ApiDefinition::default()).is_ok());
    }

    #[test]
    fn test_dangling_request_body_ref() {
        let mut api = petstore();
        api.add_route(Route::new("/pets", "POST").with_request_body(
            RequestBody::new("Pet").with_content(ContentEntry::new(
                "application/json",
                "#/components/schemas/NewPet",
            )),
        ));

        let err = RefValidator.validate(&api).unwrap_err();
        assert_eq!(
            err.problems,
            vec![Problem::DanglingContentRef {
                method: "post".to_string(),
                path: "/pets".to_string(),
                reference: "#/components/schemas/NewPet".to_string(),
            }]
        );
    }

    #[test]
    fn test_refs_resolve_against_last_components_entry() {
        let mut api = petstore();
        api.add_component(Components {
            schemas: vec![ComponentSchema::new("User", "object")],
            security_schemes: vec![SecurityScheme::new("api_key", "apiKey")],
        });

        let err = RefValidator.validate(&api).unwrap_err();
        assert_eq!(err.problems.len(), 1);
        assert!(matches!(
            &err.problems[0],
            Problem::DanglingContentRef { reference, .. } if reference == "#/components/schemas/Pet"
        ));
    }

    #[test]
    fn test_unknown_security_scheme() {
        let mut api = petstore();
        api.add_route(
            Route::new("/users", "GET")
                .with_security(SecurityRequirement::new("oauth", ["read"])),
        );

        let err = RefValidator.validate(&api).unwrap_err();
        assert_eq!(
            err.problems,
            vec![Problem::UnknownSecurityScheme {
                method: "get".to_string(),
                path: "/users".to_string(),
                name: "oauth".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_operation_ignores_method_case() {
        let mut api = petstore();
        api.add_route(Route::new("/pets", "get"));

        let err = RefValidator.validate(&api).unwrap_err();
        assert_eq!(
            err.problems,
            vec![Problem::DuplicateOperation {
                method: "get".to_string(),
                path: "/pets".to_string(),
            }]
        );
    }

    #[test]
    fn test_dangling_schema_ref() {
        let mut api = ApiDefinition::default();
        api.add_component(Components {
            schemas: vec![
                ComponentSchema::new("Cat", "object").with_reference("#/components/schemas/Pet"),
                ComponentSchema::new("Dog", "object").with_reference("#/components/schemas/Cat"),
            ],
            security_schemes: vec![],
        });

        let err = RefValidator.validate(&api).unwrap_err();
        assert_eq!(
            err.problems,
            vec![Problem::DanglingSchemaRef {
                schema: "Cat".to_string(),
                reference: "#/components/schemas/Pet".to_string(),
            }]
        );
    }

    #[test]
    fn test_external_refs_are_not_checked() {
        let mut api = petstore();
        api.add_route(Route::new("/orders", "GET").with_response(
            Response::new(200, "ok").with_content(ContentEntry::new(
                "application/json",
                "https://example.com/schemas/order.yaml",
            )),
        ));

        assert!(RefValidator.validate(&api).is_ok());
    }

    #[test]
    fn test_error_lists_every_problem() {
        let mut api = petstore();
        api.add_route(Route::new("/pets", "GET"));
        api.add_route(
            Route::new("/users", "GET")
                .with_security(SecurityRequirement::new("oauth", Vec::<String>::new())),
        );

        let err = RefValidator.validate(&api).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("2 problem(s) found"));
        assert!(message.contains("get /pets: operation is defined more than once"));
        assert!(message.contains("security requirement `oauth`"));
    }
}
