pub mod mattermost;

pub use mattermost::{
    Database, ExternalDatabase, ExternalFileStore, ExternalVolumeFileStore, FileStore, Mattermost,
    MattermostSpec, MattermostStatus, OperatorManagedDatabase, OperatorManagedMinio,
};

pub fn conditions_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    serde_json::from_value(serde_json::json!({
        "type": "array",
        "x-kubernetes-list-type": "map",
        "x-kubernetes-list-map-keys": ["type"],
        "items": {
            "type": "object",
            "properties": {
                "lastTransitionTime": { "format": "date-time", "type": "string" },
                "message": { "type": "string" },
                "observedGeneration": { "type": "integer", "format": "int64", "default": 0 },
                "reason": { "type": "string" },
                "status": { "type": "string" },
                "type": { "type": "string" }
            },
            "required": [
                "lastTransitionTime",
                "message",
                "reason",
                "status",
                "type"
            ],
        },
    }))
    .unwrap_or(schemars::schema::Schema::Bool(true))
}

/// Compute resources are validated by the API server on the pods they end up in.
pub fn resources_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    serde_json::from_value(serde_json::json!({
        "type": "object",
        "properties": {
            "limits": {
                "type": "object",
                "additionalProperties": { "x-kubernetes-int-or-string": true }
            },
            "requests": {
                "type": "object",
                "additionalProperties": { "x-kubernetes-int-or-string": true }
            }
        },
    }))
    .unwrap_or(schemars::schema::Schema::Bool(true))
}
