//! Windows Server 2019 image pipeline
//!
//! Declares a recipe on top of the English full base image with the
//! CloudWatch agent, AWS CLI v2, PowerShell, Python 3 and Windows updates
//! installed, published as an AMI in us-east-1 and rebuilt by an enabled
//! pipeline.

use tracing::debug;

use crate::construct::{App, CfnRef, StackProps};
use crate::domain::{
    AmiDistributionConfiguration, ComponentConfiguration, Distribution,
    DistributionConfiguration, Image, ImagePipeline, ImageRecipe, ImageTestsConfiguration,
    InfrastructureConfiguration, PipelineStatus, Tags,
};
use crate::error::Result;

pub const REGION: &str = "us-east-1";

/// Components applied by the recipe, in install order
pub const COMPONENT_ARNS: [&str; 5] = [
    "arn:aws:imagebuilder:us-east-1:aws:component/amazon-cloudwatch-agent-windows/x.x.x",
    "arn:aws:imagebuilder:us-east-1:aws:component/aws-cli-version-2-windows/x.x.x",
    "arn:aws:imagebuilder:us-east-1:aws:component/powershell-windows/x.x.x",
    "arn:aws:imagebuilder:us-east-1:aws:component/python-3-windows/x.x.x",
    "arn:aws:imagebuilder:us-east-1:aws:component/update-windows/x.x.x",
];

pub const PARENT_IMAGE_ARN: &str =
    "arn:aws:imagebuilder:us-east-1:aws:image/windows-server-2019-english-full-base-x86/x.x.x";

pub const INSTANCE_PROFILE_NAME: &str = "EC2InstanceProfileForImageBuilder";
pub const KEY_PAIR: &str = "key";
pub const TEST_TIMEOUT_MINUTES: u32 = 720;

pub const RECIPE_ID: &str = "ImageBuilderImageRecipe";
pub const DISTRIBUTION_ID: &str = "ImageBuilderDistributionConfiguration";
pub const INFRASTRUCTURE_ID: &str = "ImageBuilderInfrastructureConfiguration";
pub const IMAGE_ID: &str = "ImageBuilderImage";
pub const PIPELINE_ID: &str = "ImageBuilderImagePipeline";

/// Handles to the resources of a Windows image stack
#[derive(Debug, Clone, PartialEq)]
pub struct WindowsImageStack {
    pub stack_id: String,
    pub recipe: CfnRef<ImageRecipe>,
    pub distribution: CfnRef<DistributionConfiguration>,
    pub infrastructure: CfnRef<InfrastructureConfiguration>,
    pub image: CfnRef<Image>,
    pub pipeline: CfnRef<ImagePipeline>,
}

impl WindowsImageStack {
    /// Add the stack to `scope` with default props
    pub fn new(scope: &mut App, id: &str) -> Result<Self> {
        Self::with_props(scope, id, StackProps::default())
    }

    /// Add the stack to `scope`
    ///
    /// # Errors
    /// Only construct-tree errors: `id` is not a valid stack name or is
    /// already taken in `scope`.
    pub fn with_props(scope: &mut App, id: &str, props: StackProps) -> Result<Self> {
        let stack = scope.add_stack(id, props)?;

        let recipe = stack.add(RECIPE_ID, image_recipe())?;
        let distribution = stack.add(DISTRIBUTION_ID, distribution_configuration())?;
        let infrastructure = stack.add(INFRASTRUCTURE_ID, infrastructure_configuration())?;

        let image = stack.add(
            IMAGE_ID,
            Image {
                distribution_configuration_arn: distribution.clone(),
                infrastructure_configuration_arn: infrastructure.clone(),
                image_recipe_arn: recipe.clone(),
                image_tests_configuration: tests_configuration(),
                tags: Tags::new(),
            },
        )?;

        let pipeline = stack.add(
            PIPELINE_ID,
            ImagePipeline {
                name: "vm-windows-server-2019".to_string(),
                distribution_configuration_arn: distribution.clone(),
                infrastructure_configuration_arn: infrastructure.clone(),
                image_recipe_arn: recipe.clone(),
                image_tests_configuration: tests_configuration(),
                status: PipelineStatus::Enabled,
                tags: Tags::new(),
            },
        )?;

        debug!("Declared Windows image stack {}", id);

        Ok(Self {
            stack_id: id.to_string(),
            recipe,
            distribution,
            infrastructure,
            image,
            pipeline,
        })
    }
}

fn image_recipe() -> ImageRecipe {
    ImageRecipe {
        name: "windows-base".to_string(),
        version: "1.1.0".to_string(),
        components: COMPONENT_ARNS
            .iter()
            .map(|arn| ComponentConfiguration::new(*arn))
            .collect(),
        parent_image: PARENT_IMAGE_ARN.to_string(),
        tags: Tags::new(),
    }
}

fn distribution_configuration() -> DistributionConfiguration {
    DistributionConfiguration {
        name: "windows-2019-base".to_string(),
        distributions: vec![Distribution {
            region: REGION.to_string(),
            ami_distribution_configuration: AmiDistributionConfiguration {
                name: "windows-2019-base-{{ imagebuilder:buildDate }}".to_string(),
                ami_tags: Tags::from([("Name".to_string(), "windows-2019-base".to_string())]),
            },
        }],
    }
}

fn infrastructure_configuration() -> InfrastructureConfiguration {
    InfrastructureConfiguration {
        name: "windows-server-2019".to_string(),
        instance_profile_name: INSTANCE_PROFILE_NAME.to_string(),
        key_pair: KEY_PAIR.to_string(),
        terminate_instance_on_failure: true,
    }
}

fn tests_configuration() -> ImageTestsConfiguration {
    ImageTestsConfiguration {
        image_tests_enabled: true,
        timeout_minutes: TEST_TIMEOUT_MINUTES,
    }
}
