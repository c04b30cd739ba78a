//! Image Builder resource records
//!
//! One module per `AWS::ImageBuilder::*` resource type. Each record is a flat
//! set of properties that serializes to the CloudFormation property block of
//! its resource type.

pub mod distribution;
pub mod image;
pub mod infrastructure;
pub mod pipeline;
pub mod recipe;

pub use distribution::{AmiDistributionConfiguration, Distribution, DistributionConfiguration};
pub use image::{Image, ImageTestsConfiguration};
pub use infrastructure::InfrastructureConfiguration;
pub use pipeline::{ImagePipeline, PipelineStatus};
pub use recipe::{ComponentConfiguration, ImageRecipe};

use serde::Serialize;
use std::collections::BTreeMap;

use crate::construct::RefTarget;
use crate::error::Result;

/// Resource tags. Empty maps are kept and rendered as `{}`.
pub type Tags = BTreeMap<String, String>;

/// A record that can be added to a stack as a CloudFormation resource
pub trait CfnResource: Serialize + Into<Resource> + Sized {
    /// CloudFormation resource type, e.g. `AWS::ImageBuilder::Image`
    const TYPE: &'static str;

    /// Borrow the record back out of a type-erased resource
    fn from_resource(resource: &Resource) -> Option<&Self>;

    /// Outgoing references as `(property name, target)` pairs
    fn references(&self) -> Vec<(&'static str, RefTarget)> {
        Vec::new()
    }
}

/// Any resource a stack can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    ImageRecipe(ImageRecipe),
    DistributionConfiguration(DistributionConfiguration),
    InfrastructureConfiguration(InfrastructureConfiguration),
    Image(Image),
    ImagePipeline(ImagePipeline),
}

impl Resource {
    /// CloudFormation resource type of the wrapped record
    pub fn type_name(&self) -> &'static str {
        match self {
            Resource::ImageRecipe(_) => ImageRecipe::TYPE,
            Resource::DistributionConfiguration(_) => DistributionConfiguration::TYPE,
            Resource::InfrastructureConfiguration(_) => InfrastructureConfiguration::TYPE,
            Resource::Image(_) => Image::TYPE,
            Resource::ImagePipeline(_) => ImagePipeline::TYPE,
        }
    }

    /// Render the CloudFormation `Properties` block
    pub fn properties(&self) -> Result<serde_json::Value> {
        let value = match self {
            Resource::ImageRecipe(r) => serde_json::to_value(r)?,
            Resource::DistributionConfiguration(r) => serde_json::to_value(r)?,
            Resource::InfrastructureConfiguration(r) => serde_json::to_value(r)?,
            Resource::Image(r) => serde_json::to_value(r)?,
            Resource::ImagePipeline(r) => serde_json::to_value(r)?,
        };
        Ok(value)
    }

    /// Outgoing references of the wrapped record
    pub fn references(&self) -> Vec<(&'static str, RefTarget)> {
        match self {
            Resource::ImageRecipe(r) => r.references(),
            Resource::DistributionConfiguration(r) => r.references(),
            Resource::InfrastructureConfiguration(r) => r.references(),
            Resource::Image(r) => r.references(),
            Resource::ImagePipeline(r) => r.references(),
        }
    }
}
