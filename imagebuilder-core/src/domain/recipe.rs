//! Image recipe: a parent image plus the components installed on top of it

use serde::Serialize;

use super::{CfnResource, Resource, Tags};

/// `AWS::ImageBuilder::ImageRecipe`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageRecipe {
    pub name: String,
    pub version: String,
    /// Applied in order
    pub components: Vec<ComponentConfiguration>,
    /// ARN of the base image
    pub parent_image: String,
    pub tags: Tags,
}

/// A build or test component, identified by its ARN
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComponentConfiguration {
    pub component_arn: String,
}

impl ComponentConfiguration {
    pub fn new(component_arn: impl Into<String>) -> Self {
        Self {
            component_arn: component_arn.into(),
        }
    }
}

impl CfnResource for ImageRecipe {
    const TYPE: &'static str = "AWS::ImageBuilder::ImageRecipe";

    fn from_resource(resource: &Resource) -> Option<&Self> {
        match resource {
            Resource::ImageRecipe(recipe) => Some(recipe),
            _ => None,
        }
    }
}

impl From<ImageRecipe> for Resource {
    fn from(recipe: ImageRecipe) -> Self {
        Resource::ImageRecipe(recipe)
    }
}
