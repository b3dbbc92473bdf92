//! Defaults shared by the API types, the resolvers and the fragments they generate.

/// Directory Mattermost stores files in when backed by a local filesystem.
pub const DEFAULT_LOCAL_FILE_PATH: &str = "/mattermost/data";

/// Name of the volume carrying files for volume-backed stores.
pub const FILE_STORE_DEFAULT_VOLUME_NAME: &str = "mattermost-data";

pub const DEFAULT_MATTERMOST_IMAGE: &str = "mattermost/mattermost-enterprise-edition";
pub const DEFAULT_MATTERMOST_VERSION: &str = "9.11.0";
pub const DEFAULT_MATTERMOST_REPLICAS: i32 = 1;

pub const DEFAULT_MINIO_STORAGE_SIZE: &str = "50Gi";
pub const DEFAULT_MINIO_REPLICAS: i32 = 4;
pub const DEFAULT_MYSQL_STORAGE_SIZE: &str = "50Gi";
pub const DEFAULT_MYSQL_VERSION: &str = "8.0.32";

pub const MINIO_PORT: u16 = 9000;
pub const MYSQL_PORT: u16 = 3306;

// Init container images
pub const MINIO_CLIENT_IMAGE: &str = "minio/mc:latest";
pub const CURL_IMAGE: &str = "curlimages/curl:8.8.0";
pub const MYSQL_IMAGE: &str = "mysql:8.0.32";

/// Namespace assumed when the owning object carries none.
pub const DEFAULT_NAMESPACE: &str = "default";
