use k8s_openapi::api::core::v1::{Container, EnvVar, Volume, VolumeMount};
use tracing::info;

use crate::api::v1beta1::Mattermost;
use crate::database::{self, DatabaseInfo};
use crate::file_store::{self, FileStoreConfig, WorkloadFragments};
use crate::owner::Owner;
use crate::util::errors::Result;
use crate::util::secrets::SecretData;

/// Database and file store of one installation, both resolved and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dependencies {
    pub owner: Owner,
    pub database: DatabaseInfo,
    pub database_secret: String,
    pub file_store: FileStoreConfig,
}

impl Dependencies {
    /// Resolves both dependencies from secret snapshots fetched by the caller.
    ///
    /// `file_store_secret` is only read for external file stores.
    pub fn resolve(
        mattermost: &Mattermost,
        database_secret: &SecretData,
        file_store_secret: &SecretData,
    ) -> Result<Self> {
        let owner = Owner::try_from(mattermost)?;

        let database_secret_name = database::secret_name(&mattermost.spec.database, &owner)?;
        let database = DatabaseInfo::from_secret(database_secret);
        database.is_valid()?;

        let file_store = file_store::resolve(&mattermost.spec.file_store, &owner, file_store_secret)?;

        info!(
            owner = %owner.name,
            namespace = %owner.namespace,
            external_database = database.is_external(),
            file_store = file_store.kind(),
            "resolved dependencies"
        );

        Ok(Dependencies {
            owner,
            database,
            database_secret: database_secret_name,
            file_store,
        })
    }

    /// Database checks run before file store setup.
    pub fn init_containers(&self) -> Vec<Container> {
        let mut containers = self.database.init_containers(&self.owner, &self.database_secret);
        containers.extend(self.file_store.init_containers(&self.owner));
        containers
    }

    pub fn volumes(&self) -> (Vec<Volume>, Vec<VolumeMount>) {
        self.file_store.volumes(&self.owner)
    }

    pub fn env_vars(&self) -> Vec<EnvVar> {
        let mut env = self.database.env_vars(&self.owner, &self.database_secret);
        env.extend(self.file_store.env_vars(&self.owner));
        env
    }
}
