//! Emission driver: validate, assemble, serialize, write.

use crate::error::Result;
use crate::model::ApiDefinition;
use crate::serializer::{write_to_file, OutputFormat};
use crate::validator::{GraphValidator, RefValidator};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Output path used when none is configured.
pub const DEFAULT_DOCS_OUT_PATH: &str = "./internal/dist/openapi.yaml";

/// Settings for [`build_docs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Destination file
    pub out_path: PathBuf,
    /// Serialization format
    pub format: OutputFormat,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DEFAULT_DOCS_OUT_PATH),
            format: OutputFormat::Yaml,
        }
    }
}

impl BuildConfig {
    pub fn with_out_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_path = path.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}

/// Validates the definition with [`RefValidator`], then assembles, serializes and writes it.
///
/// # Errors
///
/// Returns the error of the first stage that fails: graph validation, serialization or output.
pub fn build_docs(api: &ApiDefinition, config: BuildConfig) -> Result<()> {
    build_docs_with(api, config, &RefValidator)
}

/// Same as [`build_docs`] with a caller-supplied validator.
pub fn build_docs_with(
    api: &ApiDefinition,
    config: BuildConfig,
    validator: &dyn GraphValidator,
) -> Result<()> {
    info!("Validating API definition ({} routes)", api.routes().len());
    validator.validate(api)?;

    let bytes = marshal(api, config.format)?;

    info!("Writing {:?} output to {}", config.format, config.out_path.display());
    write_to_file(&bytes, &config.out_path)?;

    Ok(())
}

/// Assembles the definition and serializes it without validating or writing.
pub fn marshal(api: &ApiDefinition, format: OutputFormat) -> Result<Vec<u8>> {
    let doc = api.to_document();
    debug!("Document assembled, serializing to {:?}", format);
    format.serialize(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{ComponentSchema, Components, ContentEntry, Response, Route};
    use crate::validator::ValidationError;
    use std::fs;
    use tempfile::TempDir;

    fn user_api() -> ApiDefinition {
        let mut api = ApiDefinition::default();
        api.meta.info.title = "Users".to_string();
        api.add_route(Route::new("/users", "GET").with_response(
            Response::new(200, "ok").with_content(ContentEntry::new(
                "application/json",
                "#/components/schemas/User",
            )),
        ));
        api.add_component(Components {
            schemas: vec![ComponentSchema::new("User", "object")],
            security_schemes: vec![],
        });
        api
    }

    struct RejectAll;

    impl GraphValidator for RejectAll {
        fn validate(&self, _api: &ApiDefinition) -> std::result::Result<(), ValidationError> {
            Err(ValidationError { problems: vec![] })
        }
    }

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.out_path(), Path::new(DEFAULT_DOCS_OUT_PATH));
        assert_eq!(config.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_build_docs_writes_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("openapi.yaml");

        build_docs(&user_api(), BuildConfig::default().with_out_path(&out)).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert!(content.contains("/users:"));
        assert!(content.contains("get:"));
        assert!(content.contains("#/components/schemas/User"));
    }

    #[test]
    fn test_build_docs_writes_json() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("openapi.json");
        let config = BuildConfig::default()
            .with_out_path(&out)
            .with_format(OutputFormat::Json);

        build_docs(&user_api(), config).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed["info"]["title"], "Users");
        assert_eq!(
            parsed["paths"]["/users"]["get"]["responses"]["200"]["description"],
            "ok"
        );
    }

    #[test]
    fn test_validation_failure_stops_before_writing() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("openapi.yaml");
        let mut api = user_api();
        api.components.clear();

        let err = build_docs(&api, BuildConfig::default().with_out_path(&out)).unwrap_err();

        assert!(matches!(err, Error::GraphValidation(_)));
        assert!(err.to_string().starts_with("failed validating API definition"));
        assert!(!out.exists());
    }

    #[test]
    fn test_custom_validator() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("openapi.yaml");

        let err = build_docs_with(
            &user_api(),
            BuildConfig::default().with_out_path(&out),
            &RejectAll,
        )
        .unwrap_err();

        assert!(matches!(err, Error::GraphValidation(_)));
    }

    #[test]
    fn test_output_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("no").join("such").join("openapi.yaml");

        let err = build_docs(&user_api(), BuildConfig::default().with_out_path(&out)).unwrap_err();

        assert!(matches!(err, Error::Output { .. }));
        assert!(err.to_string().contains("openapi.yaml"));
    }

    #[test]
    fn test_marshal_without_writing() {
        let bytes = marshal(&user_api(), OutputFormat::Yaml).unwrap();
        let yaml = String::from_utf8(bytes).unwrap();

        assert!(yaml.starts_with("openapi:"));
        assert!(yaml.contains("components:"));
    }
}
