use k8s_openapi::api::core::v1::{
    Container, EnvVar, PersistentVolumeClaimVolumeSource, Volume, VolumeMount,
};
use tracing::debug;

use crate::api::v1beta1::ExternalVolumeFileStore;
use crate::config::{DEFAULT_LOCAL_FILE_PATH, FILE_STORE_DEFAULT_VOLUME_NAME};
use crate::file_store::{local_file_env_vars, WorkloadFragments};
use crate::owner::Owner;
use crate::util::errors::{Error, Result};

/// Files kept on a pre-provisioned PersistentVolumeClaim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalVolumeConfig {
    pub volume_claim_name: String,
    pub mount_path: String,
}

impl ExternalVolumeConfig {
    pub fn new(spec: &ExternalVolumeFileStore) -> Result<Self> {
        if spec.volume_claim_name.is_empty() {
            return Err(Error::ConfigurationError(
                "volume claim name shouldn't be empty".to_string(),
            ));
        }

        let mount_path = spec
            .local_path
            .clone()
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCAL_FILE_PATH.to_string());

        debug!(claim = %spec.volume_claim_name, path = %mount_path, "using external volume file store");
        Ok(ExternalVolumeConfig {
            volume_claim_name: spec.volume_claim_name.clone(),
            mount_path,
        })
    }
}

impl WorkloadFragments for ExternalVolumeConfig {
    fn init_containers(&self, _owner: &Owner) -> Vec<Container> {
        vec![]
    }

    fn volumes(&self, _owner: &Owner) -> (Vec<Volume>, Vec<VolumeMount>) {
        let volumes = vec![Volume {
            name: FILE_STORE_DEFAULT_VOLUME_NAME.to_string(),
            persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                claim_name: self.volume_claim_name.clone(),
                ..Default::default()
            }),
            ..Default::default()
        }];

        let mounts = vec![VolumeMount {
            name: FILE_STORE_DEFAULT_VOLUME_NAME.to_string(),
            mount_path: self.mount_path.clone(),
            ..Default::default()
        }];

        (volumes, mounts)
    }

    fn env_vars(&self, _owner: &Owner) -> Vec<EnvVar> {
        local_file_env_vars(&self.mount_path)
    }
}
