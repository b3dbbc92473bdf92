use k8s_openapi::api::core::v1::{Container, EnvVar, Volume, VolumeMount};
use tracing::debug;

use crate::api::v1beta1::OperatorManagedMinio;
use crate::config::{CURL_IMAGE, MINIO_CLIENT_IMAGE, MINIO_PORT};
use crate::file_store::{s3_env_vars, FileStoreInfo, WorkloadFragments, ACCESS_KEY, SECRET_KEY};
use crate::owner::Owner;
use crate::util::secrets::{env_var, secret_key_env_var};

/// MinIO provisioned in-cluster by the operator, one bucket per installation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorManagedConfig {
    info: FileStoreInfo,
    minio: OperatorManagedMinio,
}

/// Secret the operator generates MinIO credentials into.
pub fn minio_secret_name(owner: &Owner) -> String {
    format!("{}-minio", owner.name)
}

/// In-cluster address of the owner's MinIO headless service.
pub fn minio_service_url(owner: &Owner) -> String {
    format!(
        "{}-minio-hl-svc.{}.svc.cluster.local:{}",
        owner.name, owner.namespace, MINIO_PORT
    )
}

impl OperatorManagedConfig {
    /// `service_url` is a host and port. The init containers prepend `http://`,
    /// so a leading `http://` or `https://` is dropped.
    pub fn new(minio: &OperatorManagedMinio, owner: &Owner, secret_name: &str, service_url: &str) -> Self {
        let service_url = service_url
            .strip_prefix("http://")
            .or_else(|| service_url.strip_prefix("https://"))
            .unwrap_or(service_url);
        debug!(bucket = %owner.name, url = service_url, "using operator managed minio");
        OperatorManagedConfig {
            info: FileStoreInfo {
                secret_name: secret_name.to_string(),
                url: service_url.to_string(),
                bucket_name: owner.name.clone(),
                use_tls: false,
            },
            minio: minio.clone(),
        }
    }

    pub fn info(&self) -> &FileStoreInfo {
        &self.info
    }

    /// Storage size, replicas and resources for the MinIO deployment builder.
    pub fn provisioning(&self) -> &OperatorManagedMinio {
        &self.minio
    }

    fn minio_env(&self) -> Vec<EnvVar> {
        vec![
            env_var("MINIO_SERVICE", self.info.url.clone()),
            env_var("BUCKET_NAME", self.info.bucket_name.clone()),
            secret_key_env_var("MINIO_ACCESS_KEY", &self.info.secret_name, ACCESS_KEY),
            secret_key_env_var("MINIO_SECRET_KEY", &self.info.secret_name, SECRET_KEY),
        ]
    }
}

impl WorkloadFragments for OperatorManagedConfig {
    /// Waits for MinIO to become ready, then makes sure the bucket exists.
    fn init_containers(&self, _owner: &Owner) -> Vec<Container> {
        vec![
            Container {
                name: "init-check-minio".to_string(),
                image: Some(CURL_IMAGE.to_string()),
                image_pull_policy: Some("IfNotPresent".to_string()),
                command: Some(vec![
                    "sh".to_string(),
                    "-c".to_string(),
                    "until curl --max-time 5 http://$(MINIO_SERVICE)/minio/health/ready; do echo waiting for minio; sleep 5; done;"
                        .to_string(),
                ]),
                env: Some(vec![env_var("MINIO_SERVICE", self.info.url.clone())]),
                ..Default::default()
            },
            Container {
                name: "create-minio-bucket".to_string(),
                image: Some(MINIO_CLIENT_IMAGE.to_string()),
                image_pull_policy: Some("IfNotPresent".to_string()),
                command: Some(vec!["/bin/sh".to_string(), "-c".to_string()]),
                args: Some(vec![
                    "mc alias set localminio http://$(MINIO_SERVICE) $(MINIO_ACCESS_KEY) $(MINIO_SECRET_KEY) && mc mb --ignore-existing localminio/$(BUCKET_NAME)"
                        .to_string(),
                ]),
                env: Some(self.minio_env()),
                ..Default::default()
            },
        ]
    }

    fn volumes(&self, _owner: &Owner) -> (Vec<Volume>, Vec<VolumeMount>) {
        (vec![], vec![])
    }

    fn env_vars(&self, _owner: &Owner) -> Vec<EnvVar> {
        s3_env_vars(&self.info)
    }
}
