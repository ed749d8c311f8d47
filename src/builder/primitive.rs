//! Builders for a single API definition entity.

use super::*;
use crate::model::{
    ComponentSchema, ContentEntry, ExternalDocs, Info, Response, SecurityRequirement,
    SecurityScheme, Server, Tag, XmlEntry,
};
use crate::node::{insert_last_wins, Key, Mapping, Node};

/// Builds `{authName: [scope, ...]}`.
pub fn build_security_entry(req: &SecurityRequirement) -> Mapping {
    let mut entry = Mapping::new();
    entry.insert(Key::from(&req.auth_name), Node::from(req.scopes.as_slice()));
    entry
}

/// Builds `{mediaType: {schema: {$ref: ref}}}` for every content entry.
///
/// An empty slice yields an empty mapping. A repeated media type keeps the last reference.
pub fn build_content_map(entries: &[ContentEntry]) -> Mapping {
    let mut content = Mapping::new();

    for entry in entries {
        let mut ref_map = Mapping::new();
        ref_map.insert(Key::from(KEY_REF), Node::from(&entry.schema_ref));

        let mut schema_map = Mapping::new();
        schema_map.insert(Key::from(KEY_SCHEMA), Node::from(ref_map));

        insert_last_wins(&mut content, &entry.media_type, Node::from(schema_map));
    }

    content
}

/// Builds `{description, content}` for one response. The status code is the caller's key.
pub fn build_response_map(response: &Response) -> Mapping {
    let mut map = Mapping::new();
    map.insert(Key::from(KEY_DESCRIPTION), Node::from(&response.description));
    map.insert(
        Key::from(KEY_CONTENT),
        Node::from(build_content_map(&response.content)),
    );
    map
}

/// Builds `{type, properties, $ref}` plus `xml` when the schema carries a non-empty XML name.
pub fn build_component_schema(schema: &ComponentSchema) -> Mapping {
    let mut map = Mapping::new();
    map.insert(Key::from(KEY_TYPE), Node::from(&schema.schema_type));
    map.insert(
        Key::from(KEY_PROPERTIES),
        Node::Mapping(
            schema
                .properties
                .iter()
                .map(|(name, definition)| (Key::from(name), Node::from(definition)))
                .collect(),
        ),
    );
    map.insert(Key::from(KEY_REF), Node::from(&schema.reference));

    if let Some(xml) = schema.xml.as_ref().filter(|xml| non_empty(&xml.name).is_some()) {
        map.insert(Key::from(KEY_XML), Node::from(build_xml(xml)));
    }

    map
}

fn build_xml(xml: &XmlEntry) -> Mapping {
    let mut map = Mapping::new();

    if let Some(name) = non_empty(&xml.name) {
        map.insert(Key::from(KEY_NAME), Node::from(name));
    }
    if let Some(namespace) = non_empty(&xml.namespace) {
        map.insert(Key::from("namespace"), Node::from(namespace));
    }
    if let Some(prefix) = non_empty(&xml.prefix) {
        map.insert(Key::from("prefix"), Node::from(prefix));
    }
    if let Some(attribute) = xml.attribute {
        map.insert(Key::from("attribute"), Node::from(attribute));
    }
    if let Some(wrapped) = xml.wrapped {
        map.insert(Key::from("wrapped"), Node::from(wrapped));
    }

    map
}

/// Builds `{name, type}` plus `in` when the scheme has a non-empty location.
pub fn build_security_scheme(scheme: &SecurityScheme) -> Mapping {
    let mut map = Mapping::new();
    map.insert(Key::from(KEY_NAME), Node::from(&scheme.name));
    map.insert(Key::from(KEY_TYPE), Node::from(&scheme.scheme_type));

    if let Some(location) = non_empty(&scheme.location) {
        map.insert(Key::from(KEY_IN), Node::from(location));
    }

    map
}

/// Builds the `info` object; empty optional fields are left out.
pub fn build_info(info: &Info) -> Mapping {
    let mut map = Mapping::new();
    map.insert(Key::from("title"), Node::from(&info.title));

    if let Some(description) = non_empty(&info.description) {
        map.insert(Key::from(KEY_DESCRIPTION), Node::from(description));
    }
    if let Some(terms) = non_empty(&info.terms_of_service) {
        map.insert(Key::from("termsOfService"), Node::from(terms));
    }
    if let Some(contact) = &info.contact {
        let mut contact_map = Mapping::new();
        for (key, value) in [
            (KEY_NAME, &contact.name),
            ("url", &contact.url),
            ("email", &contact.email),
        ] {
            if let Some(value) = non_empty(value) {
                contact_map.insert(Key::from(key), Node::from(value));
            }
        }
        if !contact_map.is_empty() {
            map.insert(Key::from("contact"), Node::from(contact_map));
        }
    }
    if let Some(license) = info.license.as_ref().filter(|l| !l.name.is_empty()) {
        let mut license_map = Mapping::new();
        license_map.insert(Key::from(KEY_NAME), Node::from(&license.name));
        if let Some(url) = non_empty(&license.url) {
            license_map.insert(Key::from("url"), Node::from(url));
        }
        map.insert(Key::from("license"), Node::from(license_map));
    }

    map.insert(Key::from("version"), Node::from(&info.version));
    map
}

/// Builds the top-level `externalDocs` object.
pub fn build_external_docs(docs: &ExternalDocs) -> Mapping {
    let mut map = Mapping::new();
    if let Some(description) = non_empty(&docs.description) {
        map.insert(Key::from(KEY_DESCRIPTION), Node::from(description));
    }
    map.insert(Key::from("url"), Node::from(&docs.url));
    map
}

/// Builds the `servers` list, one mapping per server in input order.
pub fn build_servers(servers: &[Server]) -> Vec<Node> {
    servers
        .iter()
        .map(|server| {
            let mut map = Mapping::new();
            map.insert(Key::from("url"), Node::from(&server.url));
            if let Some(description) = non_empty(&server.description) {
                map.insert(Key::from(KEY_DESCRIPTION), Node::from(description));
            }
            Node::from(map)
        })
        .collect()
}

/// Builds the top-level `tags` list, one mapping per tag in input order.
pub fn build_tags(tags: &[Tag]) -> Vec<Node> {
    tags.iter()
        .map(|tag| {
            let mut map = Mapping::new();
            map.insert(Key::from(KEY_NAME), Node::from(&tag.name));
            if let Some(description) = non_empty(&tag.description) {
                map.insert(Key::from(KEY_DESCRIPTION), Node::from(description));
            }
            if let Some(docs) = &tag.external_docs {
                map.insert(Key::from(KEY_EXTERNAL_DOCS), Node::from(build_external_docs(docs)));
            }
            Node::from(map)
        })
        .collect()
}
