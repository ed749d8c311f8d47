//! In-memory API definition: routes, components and document metadata.
//!
//! These types are the read-only input of the document assembler. They derive serde traits so
//! a whole [`ApiDefinition`] can also be loaded from a YAML or JSON definition file.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// OpenAPI version written when a definition does not specify one.
pub const DEFAULT_OAS_VERSION: &str = "3.0.1";

/// One HTTP method bound to one API path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Route {
    /// Path string, e.g. `/users/{id}`
    pub path: String,
    /// HTTP method in any casing; emitted lowercased
    pub method: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub operation_id: String,
    /// Alternative security requirements (OR'd)
    pub security: Vec<SecurityRequirement>,
    pub request_body: RequestBody,
    pub responses: Vec<Response>,
}

impl Route {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = operation_id.into();
        self
    }

    pub fn with_security(mut self, requirement: SecurityRequirement) -> Self {
        self.security.push(requirement);
        self
    }

    pub fn with_request_body(mut self, body: RequestBody) -> Self {
        self.request_body = body;
        self
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    /// The method name as it appears in the document.
    pub fn method_key(&self) -> String {
        self.method.to_lowercase()
    }
}

/// A named security scheme plus the scopes an operation requires from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityRequirement {
    pub auth_name: String,
    pub scopes: Vec<String>,
}

impl SecurityRequirement {
    pub fn new<I, S>(auth_name: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            auth_name: auth_name.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    pub description: String,
    pub content: Vec<ContentEntry>,
}

impl RequestBody {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: Vec::new(),
        }
    }

    pub fn with_content(mut self, entry: ContentEntry) -> Self {
        self.content.push(entry);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    /// HTTP status code; the response's key within its route
    pub code: u16,
    pub description: String,
    pub content: Vec<ContentEntry>,
}

impl Response {
    pub fn new(code: u16, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            content: Vec::new(),
        }
    }

    pub fn with_content(mut self, entry: ContentEntry) -> Self {
        self.content.push(entry);
        self
    }
}

/// A media type paired with a reference to a reusable schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentEntry {
    /// Media type name, e.g. `application/json`
    #[serde(rename = "name")]
    pub media_type: String,
    /// Reference string, e.g. `#/components/schemas/User`
    #[serde(rename = "schema")]
    pub schema_ref: String,
}

impl ContentEntry {
    pub fn new(media_type: impl Into<String>, schema_ref: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            schema_ref: schema_ref.into(),
        }
    }
}

/// A reusable, named data shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Property definitions, emitted verbatim
    pub properties: serde_json::Map<String, serde_json::Value>,
    /// Composition reference; emitted as-is, even when empty
    #[serde(rename = "$ref")]
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<XmlEntry>,
}

impl ComponentSchema {
    pub fn new(name: impl Into<String>, schema_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_type: schema_type.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, definition: serde_json::Value) -> Self {
        self.properties.insert(name.into(), definition);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_xml(mut self, xml: XmlEntry) -> Self {
        self.xml = Some(xml);
        self
    }
}

/// XML serialization hints of a component schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlEntry {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<bool>,
}

impl XmlEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A named authentication mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityScheme {
    pub name: String,
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Location of an API key (`header`, `query`, `cookie`)
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SecurityScheme {
    pub fn new(name: impl Into<String>, scheme_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme_type: scheme_type.into(),
            location: None,
        }
    }

    pub fn located_in(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// One components entry. When a definition holds several, the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Components {
    pub schemas: Vec<ComponentSchema>,
    pub security_schemes: Vec<SecurityScheme>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Info {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalDocs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

/// Top-level document metadata written ahead of paths and components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMeta {
    /// OpenAPI version tag, e.g. `3.0.1`
    pub openapi: String,
    pub info: Info,
    pub external_docs: ExternalDocs,
    pub servers: Vec<Server>,
    pub tags: Vec<Tag>,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            openapi: DEFAULT_OAS_VERSION.to_string(),
            info: Info::default(),
            external_docs: ExternalDocs::default(),
            servers: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// Complete API definition: metadata, registered routes and components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDefinition {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default)]
    pub paths: Vec<Route>,
    #[serde(default)]
    pub components: Vec<Components>,
    /// Top-level keys no other field claimed; loading fails when any are present
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_yaml::Value>,
}

impl ApiDefinition {
    /// An empty definition carrying the given metadata.
    pub fn new(meta: DocumentMeta) -> Self {
        Self {
            meta,
            paths: Vec::new(),
            components: Vec::new(),
            unknown: BTreeMap::new(),
        }
    }

    /// Registers a route. Routes sharing a path are merged at assembly time.
    pub fn add_route(&mut self, route: Route) -> &mut Self {
        debug!("Registering route: {} {}", route.method, route.path);
        self.paths.push(route);
        self
    }

    /// Appends a components entry; a later entry replaces earlier ones in the document.
    pub fn add_component(&mut self, components: Components) -> &mut Self {
        self.components.push(components);
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.paths
    }

    pub fn route_by_index(&self, index: usize) -> Option<&Route> {
        self.paths.get(index)
    }

    /// The components entry that ends up in the document.
    pub fn effective_components(&self) -> Option<&Components> {
        self.components.last()
    }

    /// Parses a definition from YAML. JSON input is accepted as well.
    ///
    /// Unrecognised top-level keys (e.g. a misspelled `paths`) are rejected.
    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let api: Self = serde_yaml::from_str(content)?;

        if !api.unknown.is_empty() {
            let keys: Vec<&str> = api.unknown.keys().map(String::as_str).collect();
            return Err(serde::de::Error::custom(format!(
                "unknown top-level field(s): {}",
                keys.join(", ")
            )));
        }

        Ok(api)
    }

    /// Loads a definition file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading API definition from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| Error::Definition {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_yaml_str(&content).map_err(|e| Error::Definition {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
