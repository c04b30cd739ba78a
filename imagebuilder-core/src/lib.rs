//! Image Builder Core
//!
//! Declarative model of the EC2 Image Builder stack and its synthesis into
//! CloudFormation.
//!
//! This crate contains:
//! - Domain types: the five `AWS::ImageBuilder::*` resource records
//! - Constructs: the app/stack tree and typed references between resources
//! - Stacks: the Windows Server 2019 image pipeline definition
//! - Synthesis: CloudFormation templates and the cloud assembly on disk

pub mod assembly;
pub mod construct;
pub mod domain;
pub mod error;
pub mod stacks;
pub mod template;

pub use error::{Result, StackError};
