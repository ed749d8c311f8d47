//! Document assembler: turns an [`ApiDefinition`] into the complete document tree.

use crate::builder::*;
use crate::model::{ApiDefinition, Components, DocumentMeta, Route};
use crate::node::{insert_last_wins, Key, Mapping, Node};
use indexmap::IndexMap;
use log::debug;

/// Assembles the document tree from routes, components and metadata.
///
/// Top-level keys always appear in this order: `openapi`, `info`, `externalDocs`, `servers`,
/// `tags`, `paths`, `components`. Empty routes or components still produce empty `paths` and
/// `components` mappings.
pub fn assemble(routes: &[Route], components: &[Components], meta: &DocumentMeta) -> Node {
    debug!(
        "Assembling document from {} routes and {} components entries",
        routes.len(),
        components.len()
    );

    let mut doc = Mapping::new();
    doc.insert(Key::from(KEY_OPENAPI), Node::from(&meta.openapi));
    doc.insert(Key::from(KEY_INFO), Node::from(build_info(&meta.info)));
    doc.insert(
        Key::from(KEY_EXTERNAL_DOCS),
        Node::from(build_external_docs(&meta.external_docs)),
    );
    doc.insert(Key::from(KEY_SERVERS), Node::from(build_servers(&meta.servers)));
    doc.insert(Key::from(KEY_TAGS), Node::from(build_tags(&meta.tags)));
    doc.insert(Key::from(KEY_PATHS), Node::from(build_paths(routes)));
    doc.insert(
        Key::from(KEY_COMPONENTS),
        Node::from(build_components(components)),
    );

    Node::from(doc)
}

/// Groups routes by path; each path maps lowercased method names to operations.
pub fn build_paths(routes: &[Route]) -> Mapping {
    let mut paths: IndexMap<&str, Mapping> = IndexMap::new();

    for route in routes {
        let methods = paths.entry(route.path.as_str()).or_default();
        insert_last_wins(methods, route.method_key(), Node::from(build_operation(route)));
    }

    debug!("Built {} path entries", paths.len());
    paths
        .into_iter()
        .map(|(path, methods)| (Key::from(path), Node::from(methods)))
        .collect()
}

/// Builds the per-method operation map of one route.
pub fn build_operation(route: &Route) -> Mapping {
    let mut op = Mapping::new();
    op.insert(Key::from(KEY_TAGS), Node::from(route.tags.as_slice()));
    op.insert(Key::from(KEY_SUMMARY), Node::from(&route.summary));
    op.insert(Key::from(KEY_OPERATION_ID), Node::from(&route.operation_id));
    op.insert(
        Key::from(KEY_SECURITY),
        Node::from(build_all_security(&route.security)),
    );
    op.insert(
        Key::from(KEY_REQUEST_BODY),
        Node::from(build_request_body_map(&route.request_body)),
    );
    op.insert(
        Key::from(KEY_RESPONSES),
        Node::from(build_all_responses(&route.responses)),
    );
    op
}

/// Builds the components mapping. Every entry overwrites both sub-maps of the previous one.
pub fn build_components(components: &[Components]) -> Mapping {
    let mut map = Mapping::new();

    for entry in components {
        insert_last_wins(
            &mut map,
            KEY_SCHEMAS,
            Node::from(build_all_component_schemas(&entry.schemas)),
        );
        insert_last_wins(
            &mut map,
            KEY_SECURITY_SCHEMES,
            Node::from(build_all_security_schemes(&entry.security_schemes)),
        );
    }

    map
}

impl ApiDefinition {
    /// Assembles this definition into a document tree.
    pub fn to_document(&self) -> Node {
        assemble(&self.paths, &self.components, &self.meta)
    }
}
