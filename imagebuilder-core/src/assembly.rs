//! Cloud assembly
//!
//! The on-disk output of synthesis: one template file per stack plus a
//! `manifest.json` describing them, ready for a deployment tool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::construct::{App, Stack};
use crate::error::{Result, StackError};
use crate::template::Template;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const MANIFEST_VERSION: &str = "1.0.0";
pub const STACK_ARTIFACT_TYPE: &str = "aws:cloudformation:stack";

/// Contents of `manifest.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyManifest {
    pub version: String,
    /// Keyed by stack id
    pub artifacts: BTreeMap<String, ArtifactManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// `aws://<account>/<region>`
    pub environment: String,
    pub properties: StackArtifactProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackArtifactProperties {
    /// Relative to the assembly directory
    pub template_file: String,
}

/// A cloud assembly written to disk
#[derive(Debug, Clone)]
pub struct CloudAssembly {
    pub directory: PathBuf,
    pub manifest: AssemblyManifest,
}

impl CloudAssembly {
    /// Synthesize every stack of `app` into `out_dir`
    ///
    /// All stacks are synthesized before anything is written, so a stack
    /// with invalid references leaves the directory untouched. Files are
    /// written to a sibling staging directory which then replaces `out_dir`
    /// as a whole: templates of stacks no longer in the app do not survive a
    /// rewrite, and a failed write leaves the previous assembly in place.
    pub fn write(app: &App, out_dir: impl AsRef<Path>) -> Result<Self> {
        let directory = out_dir.as_ref().to_path_buf();
        let synthesized = app.synth()?;

        let staging = staging_dir(&directory)?;
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| StackError::io(&staging, e))?;
        }
        fs::create_dir_all(&staging).map_err(|e| StackError::io(&staging, e))?;

        let manifest = match write_files(&staging, synthesized) {
            Ok(manifest) => manifest,
            Err(err) => {
                let _ = fs::remove_dir_all(&staging);
                return Err(err);
            }
        };

        if directory.exists() {
            fs::remove_dir_all(&directory).map_err(|e| StackError::io(&directory, e))?;
        }
        fs::rename(&staging, &directory).map_err(|e| StackError::io(&directory, e))?;
        info!("Cloud assembly written to {}", directory.display());

        Ok(Self {
            directory,
            manifest,
        })
    }

    /// Read back a previously written manifest
    pub fn read_manifest(dir: impl AsRef<Path>) -> Result<AssemblyManifest> {
        let path = dir.as_ref().join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| StackError::io(&path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Paths of the template files, in stack id order
    pub fn template_paths(&self) -> Vec<PathBuf> {
        self.manifest
            .artifacts
            .values()
            .map(|a| self.directory.join(&a.properties.template_file))
            .collect()
    }
}

pub fn template_file_name(stack_id: &str) -> String {
    format!("{}.template.json", stack_id)
}

/// `<parent>/.<name>.staging` next to the output directory
fn staging_dir(directory: &Path) -> Result<PathBuf> {
    let name = directory.file_name().ok_or_else(|| {
        StackError::io(
            directory,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "output directory must end in a named component",
            ),
        )
    })?;
    Ok(directory.with_file_name(format!(".{}.staging", name.to_string_lossy())))
}

/// Write every template plus the manifest into `dir`
fn write_files(dir: &Path, synthesized: Vec<(&Stack, Template)>) -> Result<AssemblyManifest> {
    let mut artifacts = BTreeMap::new();
    for (stack, template) in synthesized {
        let template_file = template_file_name(stack.id());
        let path = dir.join(&template_file);

        fs::write(&path, template.to_json_pretty()?).map_err(|e| StackError::io(&path, e))?;
        info!(
            "Wrote {} ({} resources)",
            template_file,
            template.resources.len()
        );

        artifacts.insert(
            stack.id().to_string(),
            ArtifactManifest {
                artifact_type: STACK_ARTIFACT_TYPE.to_string(),
                environment: stack.props().env.to_string(),
                properties: StackArtifactProperties { template_file },
            },
        );
    }

    let manifest = AssemblyManifest {
        version: MANIFEST_VERSION.to_string(),
        artifacts,
    };

    let manifest_path = dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .map_err(|e| StackError::io(&manifest_path, e))?;

    Ok(manifest)
}
