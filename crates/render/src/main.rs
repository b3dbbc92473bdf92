use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use k8s_openapi::api::core::v1::{Container, EnvVar, Secret, Volume, VolumeMount};
use mattermost::api::v1beta1::Mattermost;
use mattermost::dependencies::Dependencies;
use mattermost::util::secrets::{data_of, SecretData};
use mattermost::util::status::resolution_condition;
use mattermost::util::telemetry;
use serde::Serialize;
use tracing::error;

/// Resolve the database and file store of a Mattermost manifest and print the
/// pod fragments they produce.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Mattermost custom resource manifest
    #[arg(long, env = "MATTERMOST_MANIFEST")]
    mattermost: PathBuf,

    /// Secret manifest holding the database credentials
    #[arg(long, env = "MATTERMOST_DATABASE_SECRET")]
    database_secret: Option<PathBuf>,

    /// Secret manifest holding the external file store keys
    #[arg(long, env = "MATTERMOST_FILE_STORE_SECRET")]
    file_store_secret: Option<PathBuf>,

    /// Log as JSON instead of compact text
    #[arg(long)]
    json_logs: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Fragments {
    init_containers: Vec<Container>,
    volumes: Vec<Volume>,
    volume_mounts: Vec<VolumeMount>,
    env: Vec<EnvVar>,
}

fn read_manifest<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn read_secret(path: Option<&Path>) -> anyhow::Result<SecretData> {
    match path {
        Some(path) => Ok(data_of(&read_manifest::<Secret>(path)?)),
        None => Ok(SecretData::new()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    telemetry::init(args.json_logs)?;

    let mattermost: Mattermost = read_manifest(&args.mattermost)?;
    let database_secret = read_secret(args.database_secret.as_deref())?;
    let file_store_secret = read_secret(args.file_store_secret.as_deref())?;

    let resolved = Dependencies::resolve(&mattermost, &database_secret, &file_store_secret);
    let condition = resolution_condition(&resolved, mattermost.metadata.generation);

    let dependencies = match resolved {
        Ok(dependencies) => dependencies,
        Err(e) => {
            error!(
                reason = %condition.reason,
                error = %e.metric_label(),
                "failed to resolve dependencies: {}",
                condition.message
            );
            return Err(e.into());
        }
    };

    print!("{}", render(&dependencies)?);
    Ok(())
}

fn render(dependencies: &Dependencies) -> anyhow::Result<String> {
    let (volumes, volume_mounts) = dependencies.volumes();
    let fragments = Fragments {
        init_containers: dependencies.init_containers(),
        volumes,
        volume_mounts,
        env: dependencies.env_vars(),
    };
    Ok(serde_yaml::to_string(&fragments)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;
    use mattermost::file_store::ACCESS_KEY;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn fragments_parse_as_yaml_while_logging() {
        let mattermost: Mattermost = serde_yaml::from_str(
            r#"
apiVersion: installation.mattermost.com/v1beta1
kind: Mattermost
metadata:
  name: mm-test
spec:
  database:
    external:
      secret: db-credentials
  fileStore:
    external:
      url: s3.amazonaws.com
      bucket: mm-files
      secret: s3-credentials
"#,
        )
        .unwrap();
        let database_secret = SecretData::from([(
            "DB_CONNECTION_STRING".to_string(),
            ByteString(b"postgres://db".to_vec()),
        )]);
        // secretkey is left out so resolution logs a warning
        let file_store_secret = SecretData::from([(ACCESS_KEY.to_string(), ByteString(b"key".to_vec()))]);

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = telemetry::subscriber(false, move || writer.clone());
        let output = tracing::subscriber::with_default(subscriber, || {
            let dependencies = Dependencies::resolve(&mattermost, &database_secret, &file_store_secret).unwrap();
            render(&dependencies).unwrap()
        });

        assert!(!output.contains('\x1b'));
        let parsed: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed["env"][0]["name"].as_str(), Some("MM_CONFIG"));
        assert!(parsed["initContainers"].as_sequence().is_some());

        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("missing a key"));
    }
}
