use kube::CustomResourceExt as _;
use mattermost::api::v1beta1::Mattermost;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&Mattermost::crd())?);
    Ok(())
}
