use k8s_openapi::api::core::v1::{Container, EnvVar, Volume, VolumeMount};
use tracing::debug;

use crate::api::v1beta1::FileStore;
use crate::owner::Owner;
use crate::util::errors::{Error, Result};
use crate::util::secrets::{env_var, secret_key_env_var, SecretData};

pub mod external;
pub mod external_volume;
pub mod operator_managed;

pub use external::ExternalConfig;
pub use external_volume::ExternalVolumeConfig;
pub use operator_managed::{minio_secret_name, minio_service_url, OperatorManagedConfig};

pub const ACCESS_KEY: &str = "accesskey";
pub const SECRET_KEY: &str = "secretkey";

/// Pod fragments a resolved file store contributes to the Mattermost workload.
pub trait WorkloadFragments {
    fn init_containers(&self, owner: &Owner) -> Vec<Container>;

    /// Volumes and their mounts in the Mattermost container.
    fn volumes(&self, owner: &Owner) -> (Vec<Volume>, Vec<VolumeMount>);

    fn env_vars(&self, owner: &Owner) -> Vec<EnvVar>;
}

/// Connection details shared by the object storage backed variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStoreInfo {
    pub secret_name: String,
    pub url: String,
    pub bucket_name: String,
    pub use_tls: bool,
}

/// A file store resolved to exactly one backing implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum FileStoreConfig {
    OperatorManaged(OperatorManagedConfig),
    External(ExternalConfig),
    ExternalVolume(ExternalVolumeConfig),
}

impl FileStoreConfig {
    fn fragments(&self) -> &dyn WorkloadFragments {
        match self {
            FileStoreConfig::OperatorManaged(config) => config,
            FileStoreConfig::External(config) => config,
            FileStoreConfig::ExternalVolume(config) => config,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FileStoreConfig::OperatorManaged(_) => "operatorManaged",
            FileStoreConfig::External(_) => "external",
            FileStoreConfig::ExternalVolume(_) => "externalVolume",
        }
    }
}

impl WorkloadFragments for FileStoreConfig {
    fn init_containers(&self, owner: &Owner) -> Vec<Container> {
        self.fragments().init_containers(owner)
    }

    fn volumes(&self, owner: &Owner) -> (Vec<Volume>, Vec<VolumeMount>) {
        self.fragments().volumes(owner)
    }

    fn env_vars(&self, owner: &Owner) -> Vec<EnvVar> {
        self.fragments().env_vars(owner)
    }
}

/// Resolves the single file store variant selected in the spec.
///
/// `secret` is the payload of the external store's secret; other variants ignore it.
pub fn resolve(file_store: &FileStore, owner: &Owner, secret: &SecretData) -> Result<FileStoreConfig> {
    let configured = [
        file_store.operator_managed.is_some(),
        file_store.external.is_some(),
        file_store.external_volume.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();

    if configured == 0 {
        return Err(Error::ConfigurationError(
            "no file store configuration provided".to_string(),
        ));
    }
    if configured > 1 {
        return Err(Error::ConfigurationError(
            "multiple file store configurations provided".to_string(),
        ));
    }

    let config = match file_store {
        FileStore {
            operator_managed: Some(minio),
            ..
        } => FileStoreConfig::OperatorManaged(OperatorManagedConfig::new(
            minio,
            owner,
            &minio_secret_name(owner),
            &minio_service_url(owner),
        )),
        FileStore {
            external: Some(external),
            ..
        } => FileStoreConfig::External(ExternalConfig::new(external, secret)?),
        FileStore {
            external_volume: Some(volume),
            ..
        } => FileStoreConfig::ExternalVolume(ExternalVolumeConfig::new(volume)?),
        _ => {
            return Err(Error::ConfigurationError(
                "no file store configuration provided".to_string(),
            ))
        }
    };

    debug!(kind = config.kind(), owner = %owner.name, "resolved file store");
    Ok(config)
}

/// Environment for an S3 compatible store.
pub fn s3_env_vars(info: &FileStoreInfo) -> Vec<EnvVar> {
    vec![
        env_var("MM_FILESETTINGS_DRIVERNAME", "amazons3"),
        secret_key_env_var("MM_FILESETTINGS_AMAZONS3ACCESSKEYID", &info.secret_name, ACCESS_KEY),
        secret_key_env_var("MM_FILESETTINGS_AMAZONS3SECRETACCESSKEY", &info.secret_name, SECRET_KEY),
        env_var("MM_FILESETTINGS_AMAZONS3BUCKET", info.bucket_name.clone()),
        env_var("MM_FILESETTINGS_AMAZONS3ENDPOINT", info.url.clone()),
        env_var("MM_FILESETTINGS_AMAZONS3SSL", info.use_tls.to_string()),
    ]
}

/// Environment for a store on a local filesystem path.
pub fn local_file_env_vars(path: &str) -> Vec<EnvVar> {
    vec![
        env_var("MM_FILESETTINGS_DRIVERNAME", "local"),
        env_var("MM_FILESETTINGS_DIRECTORY", path),
    ]
}
