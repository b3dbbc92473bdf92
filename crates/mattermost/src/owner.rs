use kube::ResourceExt;

use crate::api::v1beta1::Mattermost;
use crate::config::DEFAULT_NAMESPACE;
use crate::util::errors::{Error, Result};

/// Identity of the installation whose dependencies are being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    pub namespace: String,
}

impl Owner {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Owner {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl TryFrom<&Mattermost> for Owner {
    type Error = Error;

    fn try_from(mattermost: &Mattermost) -> Result<Self> {
        let name = mattermost
            .metadata
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::MetadataMissing("Mattermost object has no name".to_string()))?;
        let namespace = mattermost
            .namespace()
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        Ok(Owner { name, namespace })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v1beta1::MattermostSpec;

    #[test]
    fn test_owner_from_mattermost() {
        let mut mattermost = Mattermost::new("mm-test", MattermostSpec::default());
        assert_eq!(Owner::try_from(&mattermost).unwrap(), Owner::new("mm-test", "default"));

        mattermost.metadata.namespace = Some("chat".to_string());
        assert_eq!(Owner::try_from(&mattermost).unwrap().namespace, "chat");
    }

    #[test]
    fn test_owner_requires_name() {
        let mut mattermost = Mattermost::new("mm-test", MattermostSpec::default());
        mattermost.metadata.name = None;
        let err = Owner::try_from(&mattermost).unwrap_err();
        assert_eq!(err.reason(), "MetadataMissing");
    }
}
