//! Construct tree
//!
//! An `App` owns stacks, a `Stack` owns resources. Ids are unique within
//! their scope and adding a resource hands back a typed reference to it, so
//! resources that depend on each other are wired together by construction.

mod reference;

pub use reference::{CfnRef, RefTarget};

use std::fmt;
use tracing::debug;

use crate::domain::{CfnResource, Resource};
use crate::error::{Result, StackError};
use crate::template::Template;

const MAX_STACK_ID_LEN: usize = 128;
const MAX_LOGICAL_ID_LEN: usize = 255;

/// Root of the construct tree
#[derive(Debug, Default)]
pub struct App {
    stacks: Vec<Stack>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, empty stack
    ///
    /// # Errors
    /// Returns an error if the id is not a valid stack name or is already
    /// used by another stack in this app.
    pub fn add_stack(&mut self, id: &str, props: StackProps) -> Result<&mut Stack> {
        validate_stack_id(id)?;

        if self.stacks.iter().any(|s| s.id == id) {
            return Err(StackError::DuplicateId {
                scope: "app".to_string(),
                id: id.to_string(),
            });
        }

        debug!("Adding stack {} ({})", id, props.env);

        let index = self.stacks.len();
        self.stacks.push(Stack {
            id: id.to_string(),
            props,
            resources: Vec::new(),
        });
        Ok(&mut self.stacks[index])
    }

    pub fn stack(&self, id: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.id == id)
    }

    /// Stacks in the order they were added
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Synthesize a template for every stack
    pub fn synth(&self) -> Result<Vec<(&Stack, Template)>> {
        self.stacks
            .iter()
            .map(|stack| Ok((stack, stack.synthesize()?)))
            .collect()
    }
}

/// Optional stack settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackProps {
    /// Template description
    pub description: Option<String>,
    pub env: Environment,
}

/// Target account and region of a stack
///
/// Unset values are left for the deployment tool to resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub account: Option<String>,
    pub region: Option<String>,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "aws://{}/{}",
            self.account.as_deref().unwrap_or("unknown-account"),
            self.region.as_deref().unwrap_or("unknown-region")
        )
    }
}

/// A deployable unit of resources
#[derive(Debug)]
pub struct Stack {
    id: String,
    props: StackProps,
    resources: Vec<StackResource>,
}

/// A resource and the logical id it was added under
#[derive(Debug, Clone, PartialEq)]
pub struct StackResource {
    pub logical_id: String,
    pub resource: Resource,
}

/// An edge of the resource graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Logical id of the referencing resource
    pub from: &'a str,
    /// Property holding the reference
    pub property: &'static str,
    pub target: RefTarget,
}

impl Stack {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn props(&self) -> &StackProps {
        &self.props
    }

    /// Add a resource under `logical_id` and return a reference to it
    ///
    /// # Errors
    /// Returns an error if the logical id is not alphanumeric or is already
    /// used in this stack.
    pub fn add<R: CfnResource>(&mut self, logical_id: &str, resource: R) -> Result<CfnRef<R>> {
        validate_logical_id(logical_id)?;

        if self.find(logical_id).is_some() {
            return Err(StackError::DuplicateId {
                scope: self.id.clone(),
                id: logical_id.to_string(),
            });
        }

        debug!("Adding {} {} to stack {}", R::TYPE, logical_id, self.id);

        self.resources.push(StackResource {
            logical_id: logical_id.to_string(),
            resource: resource.into(),
        });

        Ok(CfnRef::from_logical_id(&self.id, logical_id))
    }

    /// Look up the record behind a reference
    ///
    /// Returns `None` for references owned by other stacks, unknown ids and
    /// ids that hold a different kind of resource.
    pub fn get<R: CfnResource>(&self, reference: &CfnRef<R>) -> Option<&R> {
        if reference.stack() != self.id {
            return None;
        }
        self.find(reference.logical_id())
            .and_then(|entry| R::from_resource(&entry.resource))
    }

    /// Resources in the order they were added
    pub fn resources(&self) -> &[StackResource] {
        &self.resources
    }

    /// All references held by resources of this stack
    pub fn references(&self) -> Vec<Reference<'_>> {
        self.resources
            .iter()
            .flat_map(|entry| {
                entry
                    .resource
                    .references()
                    .into_iter()
                    .map(move |(property, target)| Reference {
                        from: entry.logical_id.as_str(),
                        property,
                        target,
                    })
            })
            .collect()
    }

    /// Check that every reference resolves to a resource of the right kind
    /// in this stack
    pub fn validate(&self) -> Result<()> {
        for reference in self.references() {
            let target = &reference.target;

            if target.stack != self.id {
                return Err(StackError::CrossStackReference {
                    stack: self.id.clone(),
                    from: reference.from.to_string(),
                    target: target.logical_id.clone(),
                    owner: target.stack.clone(),
                });
            }

            let entry = self.find(&target.logical_id).ok_or_else(|| {
                StackError::DanglingReference {
                    stack: self.id.clone(),
                    from: reference.from.to_string(),
                    target: target.logical_id.clone(),
                }
            })?;

            let found = entry.resource.type_name();
            if found != target.kind {
                return Err(StackError::KindMismatch {
                    from: reference.from.to_string(),
                    target: target.logical_id.clone(),
                    expected: target.kind,
                    found,
                });
            }
        }

        Ok(())
    }

    /// Validate references and render the CloudFormation template
    pub fn synthesize(&self) -> Result<Template> {
        self.validate()?;
        Template::from_stack(self)
    }

    fn find(&self, logical_id: &str) -> Option<&StackResource> {
        self.resources.iter().find(|r| r.logical_id == logical_id)
    }
}

fn validate_stack_id(id: &str) -> Result<()> {
    let invalid = |reason: &str| StackError::InvalidId {
        kind: "stack",
        id: id.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = id.chars();
    match chars.next() {
        None => return Err(invalid("must not be empty")),
        Some(c) if !c.is_ascii_alphabetic() => return Err(invalid("must start with a letter")),
        Some(_) => {}
    }
    if id.len() > MAX_STACK_ID_LEN {
        return Err(invalid("must be at most 128 characters"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid("may only contain letters, digits and hyphens"));
    }

    Ok(())
}

fn validate_logical_id(id: &str) -> Result<()> {
    let invalid = |reason: &str| StackError::InvalidId {
        kind: "logical",
        id: id.to_string(),
        reason: reason.to_string(),
    };

    if id.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if id.len() > MAX_LOGICAL_ID_LEN {
        return Err(invalid("must be at most 255 characters"));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("may only contain letters and digits"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Image, ImageRecipe, ImageTestsConfiguration, InfrastructureConfiguration, Tags,
    };

    fn recipe() -> ImageRecipe {
        ImageRecipe {
            name: "recipe".to_string(),
            version: "1.0.0".to_string(),
            components: Vec::new(),
            parent_image: "arn:parent".to_string(),
            tags: Tags::new(),
        }
    }

    fn infrastructure() -> InfrastructureConfiguration {
        InfrastructureConfiguration {
            name: "infra".to_string(),
            instance_profile_name: "profile".to_string(),
            key_pair: "key".to_string(),
            terminate_instance_on_failure: true,
        }
    }

    #[test]
    fn test_stack_id_rules() {
        let mut app = App::new();
        assert!(app.add_stack("ImageBuilder-1", StackProps::default()).is_ok());
        assert!(matches!(
            app.add_stack("", StackProps::default()),
            Err(StackError::InvalidId { kind: "stack", .. })
        ));
        assert!(app.add_stack("1stack", StackProps::default()).is_err());
        assert!(app.add_stack("my_stack", StackProps::default()).is_err());
        assert!(app.add_stack(&"a".repeat(129), StackProps::default()).is_err());
    }

    #[test]
    fn test_duplicate_stack_rejected() {
        let mut app = App::new();
        app.add_stack("Images", StackProps::default()).unwrap();
        let err = app.add_stack("Images", StackProps::default()).unwrap_err();
        assert!(matches!(err, StackError::DuplicateId { ref id, .. } if id == "Images"));
        assert_eq!(app.stacks().len(), 1);
    }

    #[test]
    fn test_add_and_get_resource() {
        let mut app = App::new();
        let stack = app.add_stack("Images", StackProps::default()).unwrap();

        let recipe_ref = stack.add("Recipe", recipe()).unwrap();
        assert_eq!(recipe_ref.stack(), "Images");
        assert_eq!(recipe_ref.logical_id(), "Recipe");
        assert_eq!(stack.get(&recipe_ref), Some(&recipe()));

        // Same id, wrong kind
        let wrong: CfnRef<InfrastructureConfiguration> = CfnRef::from_logical_id("Images", "Recipe");
        assert_eq!(stack.get(&wrong), None);
    }

    #[test]
    fn test_logical_id_rules() {
        let mut app = App::new();
        let stack = app.add_stack("Images", StackProps::default()).unwrap();

        stack.add("Recipe", recipe()).unwrap();
        assert!(matches!(
            stack.add("Recipe", recipe()),
            Err(StackError::DuplicateId { .. })
        ));
        assert!(matches!(
            stack.add("Image-Recipe", recipe()),
            Err(StackError::InvalidId { kind: "logical", .. })
        ));
        assert!(stack.add("", recipe()).is_err());
        assert_eq!(stack.resources().len(), 1);
    }

    fn image_with(
        stack: &str,
        recipe_id: &str,
        infra: CfnRef<InfrastructureConfiguration>,
    ) -> Image {
        Image {
            distribution_configuration_arn: CfnRef::from_logical_id(stack, "Dist"),
            infrastructure_configuration_arn: infra,
            image_recipe_arn: CfnRef::from_logical_id(stack, recipe_id),
            image_tests_configuration: ImageTestsConfiguration::default(),
            tags: Tags::new(),
        }
    }

    #[test]
    fn test_dangling_reference() {
        let mut app = App::new();
        let stack = app.add_stack("Images", StackProps::default()).unwrap();
        let infra = stack.add("Infra", infrastructure()).unwrap();
        stack.add("Recipe", recipe()).unwrap();
        stack.add("Image", image_with("Images", "Recipe", infra)).unwrap();

        let err = stack.validate().unwrap_err();
        assert!(
            matches!(err, StackError::DanglingReference { ref target, .. } if target == "Dist")
        );
        assert!(stack.synthesize().is_err());
    }

    #[test]
    fn test_kind_mismatch() {
        let mut app = App::new();
        let stack = app.add_stack("Images", StackProps::default()).unwrap();
        let infra = stack.add("Infra", infrastructure()).unwrap();
        stack
            .add(
                "Dist",
                crate::domain::DistributionConfiguration {
                    name: "dist".to_string(),
                    distributions: Vec::new(),
                },
            )
            .unwrap();
        // Recipe slot pointing at the infrastructure configuration
        stack.add("Image", image_with("Images", "Infra", infra)).unwrap();

        let err = stack.validate().unwrap_err();
        match err {
            StackError::KindMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected, ImageRecipe::TYPE);
                assert_eq!(found, InfrastructureConfiguration::TYPE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cross_stack_reference() {
        let mut app = App::new();
        let infra = app
            .add_stack("Shared", StackProps::default())
            .unwrap()
            .add("Infra", infrastructure())
            .unwrap();

        let stack = app.add_stack("Images", StackProps::default()).unwrap();
        stack.add("Image", image_with("Images", "Recipe", infra)).unwrap();

        let err = stack.validate().unwrap_err();
        assert!(matches!(err, StackError::CrossStackReference { ref owner, .. } if owner == "Shared"));
        assert!(err.is_reference_error());
    }

    #[test]
    fn test_references_lists_edges() {
        let mut app = App::new();
        let stack = app.add_stack("Images", StackProps::default()).unwrap();
        let infra = stack.add("Infra", infrastructure()).unwrap();
        stack.add("Image", image_with("Images", "Recipe", infra)).unwrap();

        let edges = stack.references();
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|e| e.from == "Image"));
        assert_eq!(edges[1].property, "InfrastructureConfigurationArn");
        assert_eq!(edges[1].target.logical_id, "Infra");
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(
            Environment::default().to_string(),
            "aws://unknown-account/unknown-region"
        );
        let env = Environment {
            account: Some("123456789012".to_string()),
            region: Some("us-east-1".to_string()),
        };
        assert_eq!(env.to_string(), "aws://123456789012/us-east-1");
    }
}
