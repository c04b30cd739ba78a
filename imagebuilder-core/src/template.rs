//! CloudFormation template synthesis

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::construct::Stack;
use crate::error::Result;

/// Metadata key recording where in the construct tree a resource came from
pub const PATH_METADATA_KEY: &str = "aws:cdk:path";

/// A synthesized CloudFormation template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keyed by logical id
    pub resources: BTreeMap<String, TemplateResource>,
}

/// One entry of the `Resources` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: serde_json::Value,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Template {
    /// Render a stack without validating its references
    ///
    /// Use `Stack::synthesize` unless the stack is known to be valid.
    pub fn from_stack(stack: &Stack) -> Result<Self> {
        let mut resources = BTreeMap::new();

        for entry in stack.resources() {
            let metadata = BTreeMap::from([(
                PATH_METADATA_KEY.to_string(),
                format!("{}/{}", stack.id(), entry.logical_id),
            )]);

            resources.insert(
                entry.logical_id.clone(),
                TemplateResource {
                    resource_type: entry.resource.type_name().to_string(),
                    properties: entry.resource.properties()?,
                    metadata,
                },
            );
        }

        Ok(Self {
            description: stack.props().description.clone(),
            resources,
        })
    }

    /// Logical ids of all resources of the given CloudFormation type
    pub fn logical_ids_of_type<'a>(&'a self, resource_type: &'a str) -> impl Iterator<Item = &'a str> {
        self.resources
            .iter()
            .filter(move |(_, r)| r.resource_type == resource_type)
            .map(|(id, _)| id.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::{App, StackProps};
    use crate::domain::{CfnResource, InfrastructureConfiguration};
    use serde_json::json;

    fn app_with_infra(description: Option<&str>) -> App {
        let mut app = App::new();
        let props = StackProps {
            description: description.map(str::to_string),
            ..StackProps::default()
        };
        app.add_stack("Infra", props)
            .unwrap()
            .add(
                "Build",
                InfrastructureConfiguration {
                    name: "build".to_string(),
                    instance_profile_name: "profile".to_string(),
                    key_pair: "key".to_string(),
                    terminate_instance_on_failure: false,
                },
            )
            .unwrap();
        app
    }

    #[test]
    fn test_template_layout() {
        let app = app_with_infra(None);
        let template = app.stack("Infra").unwrap().synthesize().unwrap();

        let value: serde_json::Value = serde_json::from_str(&template.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "Resources": {
                    "Build": {
                        "Type": "AWS::ImageBuilder::InfrastructureConfiguration",
                        "Properties": {
                            "Name": "build",
                            "InstanceProfileName": "profile",
                            "KeyPair": "key",
                            "TerminateInstanceOnFailure": false
                        },
                        "Metadata": { "aws:cdk:path": "Infra/Build" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_description_and_parse_back() {
        let app = app_with_infra(Some("Build infrastructure"));
        let template = app.stack("Infra").unwrap().synthesize().unwrap();

        let rendered = template.to_json_pretty().unwrap();
        assert!(rendered.starts_with("{\n  \"Description\": \"Build infrastructure\""));

        let parsed: Template = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, template);
        assert_eq!(
            parsed
                .logical_ids_of_type(InfrastructureConfiguration::TYPE)
                .collect::<Vec<_>>(),
            vec!["Build"]
        );
    }
}
