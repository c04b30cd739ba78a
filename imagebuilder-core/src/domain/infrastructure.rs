//! Infrastructure configuration: the build-time EC2 environment

use serde::Serialize;

use super::{CfnResource, Resource};

/// `AWS::ImageBuilder::InfrastructureConfiguration`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InfrastructureConfiguration {
    pub name: String,
    pub instance_profile_name: String,
    pub key_pair: String,
    pub terminate_instance_on_failure: bool,
}

impl CfnResource for InfrastructureConfiguration {
    const TYPE: &'static str = "AWS::ImageBuilder::InfrastructureConfiguration";

    fn from_resource(resource: &Resource) -> Option<&Self> {
        match resource {
            Resource::InfrastructureConfiguration(config) => Some(config),
            _ => None,
        }
    }
}

impl From<InfrastructureConfiguration> for Resource {
    fn from(config: InfrastructureConfiguration) -> Self {
        Resource::InfrastructureConfiguration(config)
    }
}
