//! Fixups applied to the serialized schema document before printing.
//!
//! These operate on the parsed JSON tree rather than on the raw string so an
//! incidental key overlap elsewhere in the document cannot be corrupted.

use serde_json::{json, Map, Value};

const JSON_WRAPPER_REF: &str = "#/definitions/kubernetes_apiextensions_JSON";
const JSON_WRAPPER_JAVA_TYPE: &str = "io.fabric8.kubernetes.api.model.apiextensions.JSON";
const JSON_NODE_JAVA_TYPE: &str = "com.fasterxml.jackson.databind.JsonNode";

/// Applies every output rule, in order.
pub fn apply(document: &mut Value) {
    rename_additional_property_keys(document);
    replace_json_wrapper_refs(document);
}

/// The upstream schema builder spells the keyword `additionalProperty`; the
/// draft-07 keyword is `additionalProperties`.
fn rename_additional_property_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(inner) = map.remove("additionalProperty") {
                map.insert("additionalProperties".to_owned(), inner);
            }
            for inner in map.values_mut() {
                rename_additional_property_keys(inner);
            }
        }
        Value::Array(items) => {
            for inner in items {
                rename_additional_property_keys(inner);
            }
        }
        _ => {}
    }
}

/// The apiextensions JSON wrapper type has custom (de)serialization that the
/// Java generator cannot reproduce, so references to it are rewritten to
/// Jackson's catch-all JsonNode.
fn replace_json_wrapper_refs(value: &mut Value) {
    if let Value::Object(map) = value {
        if is_json_wrapper_ref(map) {
            *value = json!({ "javaType": JSON_NODE_JAVA_TYPE });
            return;
        }
    }
    match value {
        Value::Object(map) => {
            for inner in map.values_mut() {
                replace_json_wrapper_refs(inner);
            }
        }
        Value::Array(items) => {
            for inner in items {
                replace_json_wrapper_refs(inner);
            }
        }
        _ => {}
    }
}

fn is_json_wrapper_ref(map: &Map<String, Value>) -> bool {
    map.get("$ref").and_then(Value::as_str) == Some(JSON_WRAPPER_REF)
        && map.get("javaType").and_then(Value::as_str) == Some(JSON_WRAPPER_JAVA_TYPE)
}
