//! Walks a root type set with schemars and emits the descriptor document the
//! downstream Java code generator consumes: draft-07 definitions keyed by
//! prefixed names, `javaType` annotations on every definition and reference,
//! and a `resources` section listing the concrete API types.

use std::collections::BTreeMap;

use schemars::gen::SchemaSettings;
use schemars::schema::{RootSchema, Schema, SchemaObject};
use schemars::visit::{visit_schema_object, Visitor};
use schemars::{JsonSchema, Map};
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

pub mod postprocess;

/// Maps one source package onto the output naming scheme.
pub struct PackageDescriptor {
    /// Dotted package prefix of the OpenAPI definition names.
    pub source: &'static str,
    /// Java package the generated classes land in.
    pub java_package: &'static str,
    /// Prefix prepended to the simple type name to form the definition key.
    pub prefix: &'static str,
}

/// The generated schema document.
///
/// Field order is the serialization order; all maps are ordered, so repeated
/// runs over the same type set produce byte-identical output.
#[derive(Debug, Serialize)]
pub struct GeneratedSchema {
    pub id: String,
    #[serde(rename = "$schema")]
    pub meta_schema: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub definitions: Map<String, Schema>,
    pub properties: Map<String, Schema>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,
    /// Concrete API resource listing; cleared entirely outside validation
    /// mode, in which case the key is omitted from the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Map<String, Schema>>,
}

/// Expands `T` and everything it references into a [`GeneratedSchema`].
///
/// Every definition name must resolve against `packages`; `substitutions`
/// replace whole definition bodies before renaming, and `custom_names`
/// rewrite simple type names before the package prefix is applied.
pub fn generate<T: JsonSchema>(
    packages: &[PackageDescriptor],
    substitutions: &BTreeMap<&str, Schema>,
    custom_names: &BTreeMap<&str, &str>,
    title: &str,
) -> Result<GeneratedSchema> {
    let generator = SchemaSettings::draft07()
        .with(|s| {
            s.meta_schema = None;
        })
        .into_generator();
    let mut root: RootSchema = generator.into_root_schema_for::<T>();

    for (target, replacement) in substitutions {
        if let Some(definition) = root.definitions.get_mut(*target) {
            *definition = replacement.clone();
        }
    }

    let renames = plan_renames(&root.definitions, packages, custom_names)?;

    RefRewriter { renames: &renames }.visit_root_schema(&mut root);

    let mut definitions = Map::new();
    for (source_name, mut schema) in std::mem::take(&mut root.definitions) {
        let rename = &renames[source_name.as_str()];
        if let Schema::Object(object) = &mut schema {
            object
                .extensions
                .insert("javaType".to_owned(), Value::String(rename.java_type.clone()));
        }
        definitions.insert(rename.name.clone(), schema);
    }

    let properties = std::mem::take(&mut root.schema.object().properties);
    let resources: Map<String, Schema> = properties
        .iter()
        .filter(|(_, schema)| references_resource(schema, &definitions))
        .map(|(name, schema)| (name.clone(), schema.clone()))
        .collect();

    Ok(GeneratedSchema {
        id: format!("http://fabric8.io/kubernetes-model-{title}/Schema#"),
        meta_schema: "http://json-schema.org/draft-07/schema#".to_owned(),
        schema_type: "object".to_owned(),
        definitions,
        properties,
        additional_properties: false,
        resources: Some(resources),
    })
}

struct Rename {
    name: String,
    java_type: String,
}

fn plan_renames(
    definitions: &Map<String, Schema>,
    packages: &[PackageDescriptor],
    custom_names: &BTreeMap<&str, &str>,
) -> Result<BTreeMap<String, Rename>> {
    let mut renames = BTreeMap::new();
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();
    for source_name in definitions.keys() {
        let (package, simple) = source_name
            .rsplit_once('.')
            .ok_or_else(|| Error::UnknownPackage(source_name.clone()))?;
        let descriptor = packages
            .iter()
            .find(|descriptor| descriptor.source == package)
            .ok_or_else(|| Error::UnknownPackage(package.to_owned()))?;
        let simple = custom_names.get(simple).copied().unwrap_or(simple);
        let generated = format!("{}{}", descriptor.prefix, simple);
        if let Some(previous) = claimed.insert(generated.clone(), source_name.clone()) {
            return Err(Error::DuplicateTypeName(
                previous,
                source_name.clone(),
                generated,
            ));
        }
        renames.insert(
            source_name.clone(),
            Rename {
                name: generated,
                java_type: format!("{}.{}", descriptor.java_package, simple),
            },
        );
    }
    Ok(renames)
}

/// Rewrites `$ref`s to the renamed definitions and tags each reference with
/// the Java class it resolves to.
struct RefRewriter<'a> {
    renames: &'a BTreeMap<String, Rename>,
}

impl Visitor for RefRewriter<'_> {
    fn visit_schema_object(&mut self, schema: &mut SchemaObject) {
        if let Some(reference) = schema.reference.as_mut() {
            if let Some(source_name) = reference.strip_prefix("#/definitions/") {
                if let Some(rename) = self.renames.get(source_name) {
                    schema.extensions.insert(
                        "javaType".to_owned(),
                        Value::String(rename.java_type.clone()),
                    );
                    *reference = format!("#/definitions/{}", rename.name);
                }
            }
        }
        visit_schema_object(self, schema);
    }
}

/// A root property counts as an API resource when its target definition
/// carries both `apiVersion` and `kind`, which is what separates servable
/// types from supporting structures.
fn references_resource(schema: &Schema, definitions: &Map<String, Schema>) -> bool {
    let Schema::Object(object) = schema else {
        return false;
    };
    let Some(reference) = object.reference.as_deref() else {
        return false;
    };
    let Some(name) = reference.strip_prefix("#/definitions/") else {
        return false;
    };
    match definitions.get(name) {
        Some(Schema::Object(definition)) => definition.object.as_ref().is_some_and(|validation| {
            validation.properties.contains_key("apiVersion")
                && validation.properties.contains_key("kind")
        }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{self, Roots};

    fn generated() -> GeneratedSchema {
        generate::<Roots>(
            &resources::packages(),
            &resources::type_substitutions(),
            &resources::custom_names(),
            resources::SCHEMA_TITLE,
        )
        .unwrap()
    }

    #[test]
    fn definitions_are_renamed_and_annotated() {
        let schema = generated();
        let object_meta =
            serde_json::to_value(&schema.definitions["kubernetes_apimachinery_ObjectMeta"])
                .unwrap();
        assert_eq!(
            object_meta["javaType"],
            "io.fabric8.kubernetes.api.model.ObjectMeta"
        );

        let crd = serde_json::to_value(
            &schema.definitions["kubernetes_apiextensions_CustomResourceDefinition"],
        )
        .unwrap();
        assert_eq!(
            crd["javaType"],
            "io.fabric8.kubernetes.api.model.apiextensions.CustomResourceDefinition"
        );
    }

    #[test]
    fn references_carry_java_types() {
        let schema = generated();
        let crd = serde_json::to_value(
            &schema.definitions["kubernetes_apiextensions_CustomResourceDefinition"],
        )
        .unwrap();
        let spec = &crd["properties"]["spec"];
        assert_eq!(
            spec["$ref"],
            "#/definitions/kubernetes_apiextensions_CustomResourceDefinitionSpec"
        );
        assert_eq!(
            spec["javaType"],
            "io.fabric8.kubernetes.api.model.apiextensions.CustomResourceDefinitionSpec"
        );
    }

    #[test]
    fn no_source_names_survive() {
        let schema = generated();
        let document = serde_json::to_string(&schema).unwrap();
        assert!(!document.contains("#/definitions/io.k8s."));
    }

    #[test]
    fn resources_lists_only_concrete_api_types() {
        let schema = generated();
        let listed = schema.resources.unwrap();
        assert!(listed.contains_key("CustomResourceDefinition"));
        assert!(listed.contains_key("CustomResourceDefinitionList"));
        assert!(!listed.contains_key("ObjectMeta"));
        assert!(!listed.contains_key("JSONSchemaProps"));
        assert!(!listed.contains_key("Time"));
    }

    #[test]
    fn output_is_deterministic() {
        let first = serde_json::to_string_pretty(&generated()).unwrap();
        let second = serde_json::to_string_pretty(&generated()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn resources_key_is_omitted_when_cleared() {
        let mut schema = generated();
        schema.resources = None;
        let document = serde_json::to_string(&schema).unwrap();
        assert!(!document.contains("\"resources\""));
    }

    fn emitted_document(validation: bool) -> String {
        let mut schema = generated();
        if !validation {
            schema.resources = None;
        }
        let mut document = serde_json::to_value(&schema).unwrap();
        postprocess::apply(&mut document);
        serde_json::to_string_pretty(&document).unwrap()
    }

    #[test]
    fn emitted_document_is_valid_json() {
        let document = emitted_document(true);
        let parsed: Value = serde_json::from_str(&document).unwrap();
        assert!(parsed.get("definitions").is_some());
    }

    #[test]
    fn emitted_document_never_misspells_additional_properties() {
        assert!(!emitted_document(true).contains("\"additionalProperty\":"));
    }

    #[test]
    fn json_wrapper_pairs_are_rewritten() {
        let document = emitted_document(true);
        // The wrapper definition itself survives; no reference may point at it.
        assert!(!document.contains("\"#/definitions/kubernetes_apiextensions_JSON\""));
        assert!(document.contains("com.fasterxml.jackson.databind.JsonNode"));
    }

    #[test]
    fn validation_mode_controls_the_resources_section() {
        let parsed: Value = serde_json::from_str(&emitted_document(false)).unwrap();
        assert!(parsed.get("resources").is_none());

        let parsed: Value = serde_json::from_str(&emitted_document(true)).unwrap();
        let listed = parsed["resources"].as_object().unwrap();
        assert!(!listed.is_empty());
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Holder {
        widget: Widget,
    }

    #[derive(JsonSchema)]
    #[schemars(rename = "com.example.unmapped.Widget")]
    #[allow(dead_code)]
    struct Widget {
        name: String,
    }

    #[test]
    fn unmapped_package_is_an_error() {
        let err = generate::<Holder>(
            &resources::packages(),
            &BTreeMap::new(),
            &BTreeMap::new(),
            "test",
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownPackage(package) if package == "com.example.unmapped"));
    }

    #[derive(JsonSchema)]
    #[schemars(rename = "com.example.mapped.OldName")]
    #[allow(dead_code)]
    struct Renamed {
        value: i32,
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct RenamedHolder {
        renamed: Renamed,
    }

    #[test]
    fn custom_names_rewrite_simple_names() {
        let packages = vec![PackageDescriptor {
            source: "com.example.mapped",
            java_package: "com.example.model",
            prefix: "example_",
        }];
        let custom_names = BTreeMap::from([("OldName", "NewName")]);
        let schema =
            generate::<RenamedHolder>(&packages, &BTreeMap::new(), &custom_names, "test").unwrap();
        assert!(schema.definitions.contains_key("example_NewName"));
        let definition = serde_json::to_value(&schema.definitions["example_NewName"]).unwrap();
        assert_eq!(definition["javaType"], "com.example.model.NewName");
    }
}
