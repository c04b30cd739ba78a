//! Typed references between resources
//!
//! A `CfnRef<R>` names a resource of kind `R` by the stack that owns it and
//! its logical id. It renders as the CloudFormation `Ref` intrinsic, which
//! for Image Builder resources resolves to the resource ARN at deploy time.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

use crate::domain::CfnResource;

/// Reference to a resource of kind `R`
pub struct CfnRef<R> {
    stack: String,
    logical_id: String,
    kind: PhantomData<fn() -> R>,
}

/// Untyped view of a reference, used for validation and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefTarget {
    pub stack: String,
    pub logical_id: String,
    /// CloudFormation type the reference expects
    pub kind: &'static str,
}

impl<R> CfnRef<R> {
    /// Reference a logical id directly.
    ///
    /// `Stack::add` is the usual way to obtain a reference; this is for ids
    /// declared elsewhere. Whether the id exists and has kind `R` is checked
    /// when the stack is synthesized.
    pub fn from_logical_id(stack: impl Into<String>, logical_id: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            logical_id: logical_id.into(),
            kind: PhantomData,
        }
    }

    /// Id of the stack that owns the referenced resource
    pub fn stack(&self) -> &str {
        &self.stack
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }
}

impl<R: CfnResource> CfnRef<R> {
    pub fn target(&self) -> RefTarget {
        RefTarget {
            stack: self.stack.clone(),
            logical_id: self.logical_id.clone(),
            kind: R::TYPE,
        }
    }
}

impl<R> Clone for CfnRef<R> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            logical_id: self.logical_id.clone(),
            kind: PhantomData,
        }
    }
}

impl<R> PartialEq for CfnRef<R> {
    fn eq(&self, other: &Self) -> bool {
        self.stack == other.stack && self.logical_id == other.logical_id
    }
}

impl<R> Eq for CfnRef<R> {}

impl<R> fmt::Debug for CfnRef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CfnRef({}/{})", self.stack, self.logical_id)
    }
}

impl<R> fmt::Display for CfnRef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.stack, self.logical_id)
    }
}

impl<R> Serialize for CfnRef<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("Ref", &self.logical_id)?;
        map.end()
    }
}
