//! Distribution configuration: where built AMIs are published and how they are named

use serde::Serialize;

use super::{CfnResource, Resource, Tags};

/// `AWS::ImageBuilder::DistributionConfiguration`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionConfiguration {
    pub name: String,
    pub distributions: Vec<Distribution>,
}

/// Per-region distribution settings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Distribution {
    pub region: String,
    pub ami_distribution_configuration: AmiDistributionConfiguration,
}

/// Naming and tagging policy for the output AMI
///
/// `name` may contain service-side placeholders such as
/// `{{ imagebuilder:buildDate }}`; they are emitted untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmiDistributionConfiguration {
    pub name: String,
    pub ami_tags: Tags,
}

impl CfnResource for DistributionConfiguration {
    const TYPE: &'static str = "AWS::ImageBuilder::DistributionConfiguration";

    fn from_resource(resource: &Resource) -> Option<&Self> {
        match resource {
            Resource::DistributionConfiguration(config) => Some(config),
            _ => None,
        }
    }
}

impl From<DistributionConfiguration> for Resource {
    fn from(config: DistributionConfiguration) -> Self {
        Resource::DistributionConfiguration(config)
    }
}
