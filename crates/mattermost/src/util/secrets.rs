use k8s_openapi::api::core::v1::{EnvVar, EnvVarSource, Secret, SecretKeySelector};
use k8s_openapi::ByteString;
use std::collections::BTreeMap;

/// Raw `data` section of a Secret, as fetched by the caller.
pub type SecretData = BTreeMap<String, ByteString>;

/// Returns the value stored under `key` as a string.
///
/// A missing key yields an empty string; resolvers rely on that to tell
/// variants apart and to detect unset optional fields.
pub fn get(data: &SecretData, key: &str) -> String {
    data.get(key)
        .map(|value| String::from_utf8_lossy(&value.0).into_owned())
        .unwrap_or_default()
}

/// Returns true when `key` is present, even with an empty value.
pub fn contains(data: &SecretData, key: &str) -> bool {
    data.contains_key(key)
}

/// Takes the data section out of a fetched Secret.
pub fn data_of(secret: &Secret) -> SecretData {
    secret.data.clone().unwrap_or_default()
}

/// Environment variable read from `key` of the named secret.
pub fn secret_key_env_var(name: &str, secret_name: &str, key: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                key: key.to_string(),
                name: secret_name.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Same as [`secret_key_env_var`], but the pod still starts when the key is absent.
pub fn optional_secret_key_env_var(name: &str, secret_name: &str, key: &str) -> EnvVar {
    let mut env = secret_key_env_var(name, secret_name, key);
    if let Some(selector) = env
        .value_from
        .as_mut()
        .and_then(|source| source.secret_key_ref.as_mut())
    {
        selector.optional = Some(true);
    }
    env
}

/// Plain name/value environment variable.
pub fn env_var(name: &str, value: impl Into<String>) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.into()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> SecretData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
            .collect()
    }

    #[test]
    fn test_get_present_and_missing_keys() {
        let data = data(&[("USER", "mmuser"), ("PASSWORD", "")]);
        assert_eq!(get(&data, "USER"), "mmuser");
        assert_eq!(get(&data, "PASSWORD"), "");
        assert_eq!(get(&data, "DATABASE"), "");
        assert!(contains(&data, "PASSWORD"));
        assert!(!contains(&data, "DATABASE"));
    }

    #[test]
    fn test_get_invalid_utf8_is_lossy() {
        let mut data = SecretData::new();
        data.insert("USER".to_string(), ByteString(vec![0x6d, 0xff, 0x6d]));
        assert_eq!(get(&data, "USER"), "m\u{fffd}m");
    }

    #[test]
    fn test_data_of_secret_without_data() {
        let secret = Secret::default();
        assert!(data_of(&secret).is_empty());
    }

    #[test]
    fn test_secret_key_env_var() {
        let env = secret_key_env_var("MM_CONFIG", "db-secret", "DB_CONNECTION_STRING");
        assert_eq!(env.name, "MM_CONFIG");
        assert!(env.value.is_none());

        let selector = env.value_from.unwrap().secret_key_ref.unwrap();
        assert_eq!(selector.name, "db-secret");
        assert_eq!(selector.key, "DB_CONNECTION_STRING");
        assert_eq!(selector.optional, None);

        let optional = optional_secret_key_env_var("REPLICAS", "db-secret", "DB_READ_REPLICAS");
        let selector = optional.value_from.unwrap().secret_key_ref.unwrap();
        assert_eq!(selector.optional, Some(true));
    }
}
