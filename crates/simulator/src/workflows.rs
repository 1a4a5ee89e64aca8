//! Discovery of workflow files

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use types::SimulationError;

/// One workflow file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowInfo {
    /// File name, e.g. `ci.yml`
    pub name: String,
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

impl WorkflowInfo {
    /// Size in kilobytes
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

/// Lists workflow files in a directory
#[derive(Debug, Clone)]
pub struct WorkflowCatalog {
    directory: PathBuf,
}

impl WorkflowCatalog {
    /// Create a new catalog over `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// All `*.yml` and `*.yaml` files, sorted by name
    pub async fn list(&self) -> Result<Vec<WorkflowInfo>, SimulationError> {
        let mut entries = tokio::fs::read_dir(&self.directory).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => SimulationError::WorkflowsDirNotFound {
                path: self.directory.display().to_string(),
            },
            _ => SimulationError::Io(e),
        })?;

        let mut workflows = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_workflow_file(&path) {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            workflows.push(WorkflowInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                size: metadata.len(),
                last_modified: DateTime::<Utc>::from(metadata.modified()?),
            });
        }

        workflows.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(
            directory = %self.directory.display(),
            count = workflows.len(),
            "Listed workflows"
        );
        Ok(workflows)
    }

    /// Look up a workflow by file name
    pub async fn find(&self, name: &str) -> Result<WorkflowInfo, SimulationError> {
        self.list()
            .await?
            .into_iter()
            .find(|workflow| workflow.name == name)
            .ok_or_else(|| SimulationError::WorkflowNotFound {
                name: name.to_string(),
            })
    }
}

fn is_workflow_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml") | Some("yaml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn catalog_with(files: &[(&str, &str)]) -> (tempfile::TempDir, WorkflowCatalog) {
        let dir = tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let catalog = WorkflowCatalog::new(dir.path());
        (dir, catalog)
    }

    #[tokio::test]
    async fn test_lists_yaml_files_sorted() {
        let (dir, catalog) = catalog_with(&[
            ("release.yaml", "on: push"),
            ("ci.yml", "name: ci\non: push\n"),
            ("README.md", "docs"),
            ("notes.txt", "x"),
        ]);
        fs::create_dir(dir.path().join("nested.yml")).unwrap();

        let workflows = catalog.list().await.unwrap();
        let names: Vec<_> = workflows.iter().map(|w| w.name.as_str()).collect();

        assert_eq!(names, ["ci.yml", "release.yaml"]);
        assert_eq!(workflows[0].size, 18);
        assert_eq!(workflows[0].path, dir.path().join("ci.yml"));
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let catalog = WorkflowCatalog::new(dir.path().join(".github/workflows"));

        let err = catalog.list().await.unwrap_err();
        assert!(matches!(err, SimulationError::WorkflowsDirNotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let (_dir, catalog) = catalog_with(&[]);
        assert!(catalog.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find() {
        let (_dir, catalog) = catalog_with(&[("ci.yml", "on: push")]);

        assert_eq!(catalog.find("ci.yml").await.unwrap().name, "ci.yml");
        assert!(matches!(
            catalog.find("deploy.yml").await.unwrap_err(),
            SimulationError::WorkflowNotFound { ref name } if name == "deploy.yml"
        ));
    }

    #[test]
    fn test_serializes_for_json_listing() {
        let info = WorkflowInfo {
            name: "ci.yml".to_string(),
            path: PathBuf::from(".github/workflows/ci.yml"),
            size: 2048,
            last_modified: DateTime::<Utc>::from(std::time::UNIX_EPOCH),
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["name"], "ci.yml");
        assert_eq!(value["size"], 2048);
        assert_eq!(info.size_kb(), 2.0);
    }
}
