//! Application snapshot model
//!
//! The `App` tree mirrors the JSON export format of the configuration
//! service: an app owns services (with webhooks and rules), named pipelines
//! (with parameters), values, and auth providers. Structurally complex
//! fields (service configs, pipeline bodies, rule definitions, value
//! payloads) are carried as raw, unparsed JSON so they round-trip unchanged
//! and diff byte-for-byte.

pub mod diff;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// An opaque serialized JSON document. Never parsed, compared textually.
pub type RawDocument = Option<Box<RawValue>>;

/// Raw text of an opaque document. A missing document reads as empty.
pub(crate) fn raw_text(doc: &RawDocument) -> &str {
    doc.as_deref().map_or("", RawValue::get)
}

// ============================================================================
// Snapshot Tree
// ============================================================================

/// One full application configuration snapshot.
///
/// `group_id`, `app_id`, and `client_app_id` identify the app on the remote
/// service and are immutable; they are never part of a diff report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct App {
    #[serde(default)]
    pub config_version: u64,
    #[serde(default, rename = "group_id")]
    pub group: String,
    #[serde(default, rename = "app_id")]
    pub id: String,
    #[serde(default, rename = "client_app_id")]
    pub client_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
    #[serde(default)]
    pub values: Vec<Value>,
    #[serde(default)]
    pub auth_providers: Vec<AuthProvider>,
}

impl App {
    /// Parse a snapshot from its JSON export text.
    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    /// Serialize a snapshot back into its JSON export text.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A service attached to an app, e.g. an HTTP or database integration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: RawDocument,
    #[serde(default, rename = "incoming_webhooks")]
    pub webhooks: Vec<Webhook>,
    #[serde(default)]
    pub rules: Vec<ServiceRule>,
}

/// An incoming webhook attached to a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: RawDocument,
}

/// An access rule attached to a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: RawDocument,
}

/// A named pipeline attached to an app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub skip_rules: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_evaluate: RawDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: RawDocument,
    #[serde(default)]
    pub parameters: Vec<PipelineParameter>,
}

/// An argument declaration for a named pipeline. The name is its identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineParameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub required: bool,
}

/// An admin-defined constant attached to an app. The name is its identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Value {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: RawDocument,
}

/// An authentication provider attached to an app.
///
/// Not every field applies to every provider type; inapplicable ones stay
/// at their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthProvider {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub provider_type: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub metadata: Vec<String>,
    #[serde(default)]
    pub domain_restrictions: Vec<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: RawDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full_snapshot() {
        let data = r#"{
            "config_version": 20180301,
            "group_id": "group-1",
            "app_id": "5a1b",
            "client_app_id": "myapp-abcde",
            "name": "myapp",
            "services": [
                {
                    "id": "svc-1",
                    "name": "http",
                    "type": "http",
                    "config": {"key": "value"},
                    "incoming_webhooks": [
                        {"id": "wh-1", "name": "hook", "output": "json", "pipeline": []}
                    ],
                    "rules": [
                        {"id": "rule-1", "name": "allow-all", "rule": {}}
                    ]
                }
            ],
            "pipelines": [
                {
                    "id": "pipe-1",
                    "name": "publish",
                    "output": "",
                    "private": true,
                    "skip_rules": false,
                    "parameters": [{"name": "subject", "required": true}]
                }
            ],
            "values": [{"name": "threshold", "value": 42}],
            "auth_providers": [
                {
                    "id": "ap-1",
                    "name": "api-keys",
                    "type": "api-key",
                    "enabled": true,
                    "redirect_uris": ["https://example.com/cb"]
                }
            ]
        }"#;

        let app = App::from_json(data).unwrap();
        assert_eq!(app.config_version, 20180301);
        assert_eq!(app.group, "group-1");
        assert_eq!(app.id, "5a1b");
        assert_eq!(app.client_id, "myapp-abcde");
        assert_eq!(app.name, "myapp");

        assert_eq!(app.services.len(), 1);
        assert_eq!(app.services[0].service_type, "http");
        assert_eq!(raw_text(&app.services[0].config), r#"{"key": "value"}"#);
        assert_eq!(app.services[0].webhooks.len(), 1);
        assert_eq!(app.services[0].rules.len(), 1);

        assert_eq!(app.pipelines.len(), 1);
        assert!(app.pipelines[0].private);
        assert_eq!(app.pipelines[0].parameters[0].name, "subject");

        assert_eq!(app.values.len(), 1);
        assert_eq!(raw_text(&app.values[0].value), "42");

        assert_eq!(app.auth_providers.len(), 1);
        assert!(app.auth_providers[0].enabled);
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let app = App::from_json(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(app.name, "bare");
        assert!(app.services.is_empty());
        assert!(app.pipelines.is_empty());
        assert!(app.values.is_empty());
        assert!(app.auth_providers.is_empty());
        assert_eq!(raw_text(&None), "");
    }

    #[test]
    fn test_round_trip_preserves_contract_fields() {
        let data = r#"{"config_version":1,"group_id":"g","app_id":"a","client_app_id":"c","name":"n","values":[{"name":"x","value":{"b":2,"a":1}}]}"#;
        let app = App::from_json(data).unwrap();
        let out = app.to_json().unwrap();

        for field in [
            "config_version",
            "group_id",
            "app_id",
            "client_app_id",
            "name",
        ] {
            assert!(out.contains(field), "missing {field} in {out}");
        }
        // raw payload text survives untouched, including key order
        assert!(out.contains(r#"{"b":2,"a":1}"#));
    }
}
