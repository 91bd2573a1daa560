use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceConversion, CustomResourceDefinition, CustomResourceDefinitionCondition,
    CustomResourceDefinitionList, CustomResourceDefinitionNames, CustomResourceDefinitionSpec,
    CustomResourceDefinitionStatus, CustomResourceDefinitionVersion, CustomResourceSubresources,
    CustomResourceValidation, JSONSchemaProps, JSONSchemaPropsOrStringArray,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    APIGroup, APIGroupList, APIResource, APIResourceList, Condition, DeleteOptions, LabelSelector,
    ListMeta, ManagedFieldsEntry, MicroTime, ObjectMeta, OwnerReference, Patch, Preconditions,
    Status, Time,
};
use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use k8s_openapi::apimachinery::pkg::version::Info;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;

use crate::schemagen::PackageDescriptor;

pub static SCHEMA_TITLE: &str = "apiextensions";

/// Root type set handed to the schema generator.
///
/// Each field roots one type the downstream Java model needs a class for;
/// everything those types reference is expanded transitively into the
/// definitions section.
#[derive(JsonSchema)]
#[allow(dead_code)]
pub struct Roots {
    #[schemars(rename = "Info")]
    info: Info,
    #[schemars(rename = "APIGroup")]
    api_group: APIGroup,
    #[schemars(rename = "APIGroupList")]
    api_group_list: APIGroupList,
    #[schemars(rename = "APIResource")]
    api_resource: APIResource,
    #[schemars(rename = "APIResourceList")]
    api_resource_list: APIResourceList,
    #[schemars(rename = "ObjectMeta")]
    object_meta: ObjectMeta,
    #[schemars(rename = "ListMeta")]
    list_meta: ListMeta,
    #[schemars(rename = "Status")]
    status: Status,
    #[schemars(rename = "Patch")]
    patch: Patch,
    #[schemars(rename = "DeleteOptions")]
    delete_options: DeleteOptions,
    #[schemars(rename = "Preconditions")]
    preconditions: Preconditions,
    #[schemars(rename = "Time")]
    time: Time,
    #[schemars(rename = "MicroTime")]
    micro_time: MicroTime,
    #[schemars(rename = "LabelSelector")]
    label_selector: LabelSelector,
    #[schemars(rename = "OwnerReference")]
    owner_reference: OwnerReference,
    #[schemars(rename = "ManagedFieldsEntry")]
    managed_fields_entry: ManagedFieldsEntry,
    #[schemars(rename = "Condition")]
    condition: Condition,
    #[schemars(rename = "RawExtension")]
    raw_extension: RawExtension,
    #[schemars(rename = "IntOrString")]
    int_or_string: IntOrString,
    #[schemars(rename = "ObjectReference")]
    object_reference: ObjectReference,
    #[schemars(rename = "CustomResourceDefinition")]
    custom_resource_definition: CustomResourceDefinition,
    #[schemars(rename = "CustomResourceDefinitionList")]
    custom_resource_definition_list: CustomResourceDefinitionList,
    #[schemars(rename = "CustomResourceDefinitionSpec")]
    custom_resource_definition_spec: CustomResourceDefinitionSpec,
    #[schemars(rename = "CustomResourceDefinitionNames")]
    custom_resource_definition_names: CustomResourceDefinitionNames,
    #[schemars(rename = "CustomResourceDefinitionCondition")]
    custom_resource_definition_condition: CustomResourceDefinitionCondition,
    #[schemars(rename = "CustomResourceDefinitionStatus")]
    custom_resource_definition_status: CustomResourceDefinitionStatus,
    #[schemars(rename = "CustomResourceDefinitionVersion")]
    custom_resource_definition_version: CustomResourceDefinitionVersion,
    #[schemars(rename = "CustomResourceValidation")]
    custom_resource_validation: CustomResourceValidation,
    #[schemars(rename = "CustomResourceSubresources")]
    custom_resource_subresources: CustomResourceSubresources,
    #[schemars(rename = "CustomResourceConversion")]
    custom_resource_conversion: CustomResourceConversion,
    #[schemars(rename = "JSONSchemaProps")]
    json_schema_props: JSONSchemaProps,
    #[schemars(rename = "JSONSchemaPropsOrStringArray")]
    json_schema_props_or_string_array: JSONSchemaPropsOrStringArray,
}

/// How each source package maps onto the generated naming scheme.
pub fn packages() -> Vec<PackageDescriptor> {
    vec![
        PackageDescriptor {
            source: "io.k8s.apimachinery.pkg.util.intstr",
            java_package: "io.fabric8.kubernetes.api.model",
            prefix: "kubernetes_apimachinery_pkg_util_intstr_",
        },
        PackageDescriptor {
            source: "io.k8s.apimachinery.pkg.runtime",
            java_package: "io.fabric8.kubernetes.api.model.runtime",
            prefix: "kubernetes_apimachinery_pkg_runtime_",
        },
        PackageDescriptor {
            source: "io.k8s.apimachinery.pkg.version",
            java_package: "io.fabric8.kubernetes.api.model.version",
            prefix: "kubernetes_apimachinery_pkg_version_",
        },
        PackageDescriptor {
            source: "io.k8s.apimachinery.pkg.apis.meta.v1",
            java_package: "io.fabric8.kubernetes.api.model",
            prefix: "kubernetes_apimachinery_",
        },
        PackageDescriptor {
            source: "io.k8s.api.core.v1",
            java_package: "io.fabric8.kubernetes.api.model",
            prefix: "kubernetes_core_",
        },
        PackageDescriptor {
            source: "io.k8s.apiextensions-apiserver.pkg.apis.apiextensions.v1",
            java_package: "io.fabric8.kubernetes.api.model.apiextensions",
            prefix: "kubernetes_apiextensions_",
        },
    ]
}

/// Structural types collapsed to a plain string in the emitted schema: the
/// timestamp type and the empty patch marker, neither of which the Java
/// generator can produce a useful class for.
pub fn type_substitutions() -> BTreeMap<&'static str, Schema> {
    BTreeMap::from([
        ("io.k8s.apimachinery.pkg.apis.meta.v1.Time", string_schema()),
        ("io.k8s.apimachinery.pkg.apis.meta.v1.Patch", string_schema()),
    ])
}

/// Overrides applied to simple type names before prefixing, to settle naming
/// clashes in the generated model.
pub fn custom_names() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("K8sSubjectAccessReview", "SubjectAccessReview"),
        ("K8sLocalSubjectAccessReview", "LocalSubjectAccessReview"),
        ("JSONSchemaPropsorStringArray", "JSONSchemaPropsOrStringArray"),
    ])
}

fn string_schema() -> Schema {
    SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        ..Default::default()
    }
    .into()
}
