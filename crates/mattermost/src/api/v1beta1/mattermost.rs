use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::v1beta1::{conditions_schema, resources_schema};
use crate::config;

/// Generate the Kubernetes wrapper struct `Mattermost` from our Spec and Status struct
///
/// This provides a hook for generating the CRD yaml (in crdgen)
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[cfg_attr(test, derive(Default))]
#[kube(
    kind = "Mattermost",
    group = "installation.mattermost.com",
    version = "v1beta1",
    namespaced
)]
#[kube(status = "MattermostStatus", shortname = "mm")]
#[serde(rename_all = "camelCase")]
pub struct MattermostSpec {
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_replicas")]
    pub replicas: i32,

    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub file_store: FileStore,
}

fn default_image() -> String {
    config::DEFAULT_MATTERMOST_IMAGE.to_string()
}
fn default_version() -> String {
    config::DEFAULT_MATTERMOST_VERSION.to_string()
}
fn default_replicas() -> i32 {
    config::DEFAULT_MATTERMOST_REPLICAS
}

/// The status object of `Mattermost`
#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MattermostStatus {
    #[schemars(schema_with = "conditions_schema")]
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub state: Option<String>,
}

/// Where Mattermost keeps uploaded files. Exactly one field must be set.
#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileStore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_managed: Option<OperatorManagedMinio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalFileStore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_volume: Option<ExternalVolumeFileStore>,
}

/// MinIO deployed and owned by the operator.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperatorManagedMinio {
    #[serde(default = "default_minio_storage_size")]
    pub storage_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default)]
    #[schemars(schema_with = "resources_schema")]
    pub resources: ResourceRequirements,
}

impl Default for OperatorManagedMinio {
    fn default() -> Self {
        Self {
            storage_size: default_minio_storage_size(),
            replicas: None,
            resources: ResourceRequirements::default(),
        }
    }
}

impl OperatorManagedMinio {
    pub fn replicas_or_default(&self) -> i32 {
        self.replicas.unwrap_or(config::DEFAULT_MINIO_REPLICAS)
    }
}

fn default_minio_storage_size() -> String {
    config::DEFAULT_MINIO_STORAGE_SIZE.to_string()
}

/// S3-compatible object storage hosted outside the cluster.
#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFileStore {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub bucket: String,
    /// Secret holding the `accesskey` and `secretkey` fields
    #[serde(default)]
    pub secret: String,
}

/// Pre-provisioned volume mounted into the Mattermost pods.
#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalVolumeFileStore {
    #[serde(default)]
    pub volume_claim_name: String,
    /// Overrides the mount path, `/mattermost/data` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

/// The database backing Mattermost. When neither field is set the operator
/// provisions MySQL with default settings.
#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalDatabase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_managed: Option<OperatorManagedDatabase>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDatabase {
    /// Secret holding `DB_CONNECTION_STRING` and optionally
    /// `DB_CONNECTION_CHECK_URL` and `DB_READ_REPLICAS`
    pub secret: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperatorManagedDatabase {
    #[serde(default = "default_mysql_version")]
    pub version: String,
    #[serde(default = "default_mysql_storage_size")]
    pub storage_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default)]
    #[schemars(schema_with = "resources_schema")]
    pub resources: ResourceRequirements,
}

impl Default for OperatorManagedDatabase {
    fn default() -> Self {
        Self {
            version: default_mysql_version(),
            storage_size: default_mysql_storage_size(),
            replicas: None,
            resources: ResourceRequirements::default(),
        }
    }
}

fn default_mysql_version() -> String {
    config::DEFAULT_MYSQL_VERSION.to_string()
}
fn default_mysql_storage_size() -> String {
    config::DEFAULT_MYSQL_STORAGE_SIZE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_defaults_from_yaml() {
        let spec: MattermostSpec = serde_yaml::from_str(
            r#"
fileStore:
  operatorManaged: {}
"#,
        )
        .unwrap();

        assert_eq!(spec.image, config::DEFAULT_MATTERMOST_IMAGE);
        assert_eq!(spec.replicas, 1);
        assert_eq!(spec.database, Database::default());

        let minio = spec.file_store.operator_managed.unwrap();
        assert_eq!(minio.storage_size, "50Gi");
        assert_eq!(minio.replicas_or_default(), 4);
        assert!(spec.file_store.external.is_none());
        assert!(spec.file_store.external_volume.is_none());
    }

    #[test]
    fn test_external_volume_from_yaml() {
        let spec: MattermostSpec = serde_yaml::from_str(
            r#"
database:
  external:
    secret: db-credentials
fileStore:
  externalVolume:
    volumeClaimName: pvc1
    localPath: /srv/files
"#,
        )
        .unwrap();

        let volume = spec.file_store.external_volume.unwrap();
        assert_eq!(volume.volume_claim_name, "pvc1");
        assert_eq!(volume.local_path.as_deref(), Some("/srv/files"));
        assert_eq!(spec.database.external.unwrap().secret, "db-credentials");
    }
}
