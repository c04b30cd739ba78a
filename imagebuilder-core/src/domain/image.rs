//! Image: a single build of a recipe with the given configurations

use serde::Serialize;

use super::{CfnResource, DistributionConfiguration, ImageRecipe, InfrastructureConfiguration, Resource, Tags};
use crate::construct::{CfnRef, RefTarget};

/// `AWS::ImageBuilder::Image`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Image {
    pub distribution_configuration_arn: CfnRef<DistributionConfiguration>,
    pub infrastructure_configuration_arn: CfnRef<InfrastructureConfiguration>,
    pub image_recipe_arn: CfnRef<ImageRecipe>,
    pub image_tests_configuration: ImageTestsConfiguration,
    pub tags: Tags,
}

/// Whether the built image is tested, and for how long
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageTestsConfiguration {
    pub image_tests_enabled: bool,
    pub timeout_minutes: u32,
}

impl Default for ImageTestsConfiguration {
    fn default() -> Self {
        Self {
            image_tests_enabled: true,
            timeout_minutes: 720,
        }
    }
}

impl CfnResource for Image {
    const TYPE: &'static str = "AWS::ImageBuilder::Image";

    fn from_resource(resource: &Resource) -> Option<&Self> {
        match resource {
            Resource::Image(image) => Some(image),
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

impl From<Image> for Resource {
    fn from(image: Image) -> Self {
        Resource::Image(image)
    }
}
