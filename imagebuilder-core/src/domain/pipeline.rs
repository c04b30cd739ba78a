//! Image pipeline: a named, enableable build-and-distribute unit

use serde::Serialize;
use std::fmt;

use super::{
    CfnResource, DistributionConfiguration, ImageRecipe, ImageTestsConfiguration,
    InfrastructureConfiguration, Resource, Tags,
};
use crate::construct::{CfnRef, RefTarget};

/// `AWS::ImageBuilder::ImagePipeline`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImagePipeline {
    pub name: String,
    pub distribution_configuration_arn: CfnRef<DistributionConfiguration>,
    pub infrastructure_configuration_arn: CfnRef<InfrastructureConfiguration>,
    pub image_recipe_arn: CfnRef<ImageRecipe>,
    pub image_tests_configuration: ImageTestsConfiguration,
    pub status: PipelineStatus,
    pub tags: Tags,
}

/// Pipeline enablement status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStatus {
    #[default]
    Enabled,
    Disabled,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Enabled => "ENABLED",
            PipelineStatus::Disabled => "DISABLED",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CfnResource for ImagePipeline {
    const TYPE: &'static str = "AWS::ImageBuilder::ImagePipeline";

    fn from_resource(resource: &Resource) -> Option<&Self> {
        match resource {
            Resource::ImagePipeline(pipeline) => Some(pipeline),
            _ => None,
        }
    }

    fn references(&self) -> Vec<(&'static str, RefTarget)> {
        vec![
            (
                "DistributionConfigurationArn",
                self.distribution_configuration_arn.target(),
            ),
            (
                "InfrastructureConfigurationArn",
                self.infrastructure_configuration_arn.target(),
            ),
            ("ImageRecipeArn", self.image_recipe_arn.target()),
        ]
    }
}

impl From<ImagePipeline> for Resource {
    fn from(pipeline: ImagePipeline) -> Self {
        Resource::ImagePipeline(pipeline)
    }
}
