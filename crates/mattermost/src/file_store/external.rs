use k8s_openapi::api::core::v1::{Container, EnvVar, Volume, VolumeMount};
use tracing::{debug, warn};

use crate::api::v1beta1::ExternalFileStore;
use crate::file_store::{s3_env_vars, FileStoreInfo, WorkloadFragments, ACCESS_KEY, SECRET_KEY};
use crate::owner::Owner;
use crate::util::errors::{Error, Result};
use crate::util::secrets::{self, SecretData};

/// S3 compatible storage the operator does not own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalConfig {
    info: FileStoreInfo,
}

impl ExternalConfig {
    /// Only the spec is validated. The secret's keys are checked by the
    /// workload when it connects, so missing keys are logged and tolerated.
    pub fn new(spec: &ExternalFileStore, secret: &SecretData) -> Result<Self> {
        if spec.url.is_empty() {
            return Err(Error::ConfigurationError(
                "external file store url shouldn't be empty".to_string(),
            ));
        }
        if spec.secret.is_empty() {
            return Err(Error::ConfigurationError(
                "external file store secret shouldn't be empty".to_string(),
            ));
        }

        if secret.is_empty() {
            debug!(secret = %spec.secret, "no file store secret supplied, keys not checked");
        } else {
            for key in missing_keys(secret) {
                warn!(secret = %spec.secret, key, "external file store secret is missing a key");
            }
        }

        debug!(url = %spec.url, bucket = %spec.bucket, "using external file store");
        Ok(ExternalConfig {
            info: FileStoreInfo {
                secret_name: spec.secret.clone(),
                url: spec.url.clone(),
                bucket_name: spec.bucket.clone(),
                use_tls: true,
            },
        })
    }

    pub fn info(&self) -> &FileStoreInfo {
        &self.info
    }
}

fn missing_keys(secret: &SecretData) -> Vec<&'static str> {
    [ACCESS_KEY, SECRET_KEY]
        .into_iter()
        .filter(|key| secrets::get(secret, key).is_empty())
        .collect()
}

impl WorkloadFragments for ExternalConfig {
    fn init_containers(&self, _owner: &Owner) -> Vec<Container> {
        vec![]
    }

    fn volumes(&self, _owner: &Owner) -> (Vec<Volume>, Vec<VolumeMount>) {
        (vec![], vec![])
    }

    fn env_vars(&self, _owner: &Owner) -> Vec<EnvVar> {
        s3_env_vars(&self.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;

    fn spec() -> ExternalFileStore {
        ExternalFileStore {
            url: "http://minio".to_string(),
            bucket: "test-bucket".to_string(),
            secret: "external-file-store".to_string(),
        }
    }

    #[test]
    fn test_external_file_store() {
        let owner = Owner::new("mm-test", "chat");
        let secret = SecretData::from([
            (ACCESS_KEY.to_string(), ByteString(b"key".to_vec())),
            (SECRET_KEY.to_string(), ByteString(b"secret".to_vec())),
        ]);

        let config = ExternalConfig::new(&spec(), &secret).unwrap();
        assert!(config.init_containers(&owner).is_empty());
        assert_eq!(config.info().secret_name, "external-file-store");
        assert_eq!(config.info().url, "http://minio");
        assert_eq!(config.info().bucket_name, "test-bucket");
        assert!(config.info().use_tls);

        let env = config.env_vars(&owner);
        assert!(env
            .iter()
            .any(|e| e.name == "MM_FILESETTINGS_AMAZONS3SSL" && e.value.as_deref() == Some("true")));
    }

    #[test]
    fn test_incomplete_secret_is_accepted() {
        let config = ExternalConfig::new(&spec(), &SecretData::new()).unwrap();
        assert!(config.info().use_tls);
    }

    #[test]
    fn test_missing_keys_only_for_partial_secret() {
        assert_eq!(missing_keys(&SecretData::new()), vec![ACCESS_KEY, SECRET_KEY]);

        let partial = SecretData::from([(ACCESS_KEY.to_string(), ByteString(b"key".to_vec()))]);
        assert_eq!(missing_keys(&partial), vec![SECRET_KEY]);
        assert!(ExternalConfig::new(&spec(), &partial).is_ok());
    }

    #[test]
    fn test_contradictory_spec_is_rejected() {
        let no_url = ExternalFileStore {
            url: String::new(),
            ..spec()
        };
        assert_eq!(
            ExternalConfig::new(&no_url, &SecretData::new()).unwrap_err(),
            Error::ConfigurationError("external file store url shouldn't be empty".to_string())
        );

        let no_secret = ExternalFileStore {
            secret: String::new(),
            ..spec()
        };
        assert!(ExternalConfig::new(&no_secret, &SecretData::new()).is_err());
    }
}
