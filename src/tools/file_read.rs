use super::traits::{BoundArgs, Tool, ToolFuture};
use anyhow::{Context, bail};
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncReadExt;

const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Read file contents with path sandboxing
pub struct FileReadTool {
    workspace_dir: PathBuf,
}

impl FileReadTool {
    pub fn new(workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            workspace_dir: workspace_dir.into(),
        }
    }

    async fn read(&self, path: &str) -> anyhow::Result<String> {
        if path.is_empty() {
            bail!("Missing 'path' parameter");
        }

        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("Path must stay inside the workspace: {path}");
        }

        let workspace = tokio::fs::canonicalize(&self.workspace_dir)
            .await
            .context("Failed to resolve workspace directory")?;

        // Resolve path before reading to block symlink escapes.
        let resolved_path = tokio::fs::canonicalize(workspace.join(relative))
            .await
            .context("Failed to resolve file path")?;
        if !resolved_path.starts_with(&workspace) {
            bail!("Path must stay inside the workspace: {path}");
        }

        let mut file = tokio::fs::File::open(&resolved_path)
            .await
            .context("Failed to read file")?;

        // Check file size AFTER canonicalization to prevent TOCTOU symlink bypass
        let metadata = file
            .metadata()
            .await
            .context("Failed to read file metadata")?;
        if metadata.len() > MAX_FILE_SIZE {
            bail!(
                "File too large: {} bytes (limit: {MAX_FILE_SIZE} bytes)",
                metadata.len()
            );
        }

        #[allow(clippy::cast_possible_truncation)]
        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        file.read_to_end(&mut bytes)
            .await
            .context("Failed to read file")?;

        String::from_utf8(bytes).context("Failed to read file: file is not valid UTF-8")
    }
}

impl Tool for FileReadTool {
    fn name(&self) -> &str {
        "FileRead"
    }

    fn description(&self) -> &str {
        "Read the contents of a text file, given its path relative to the workspace"
    }

    fn parameters(&self) -> Vec<&str> {
        vec!["path"]
    }

    fn execute<'a>(&'a self, args: BoundArgs) -> ToolFuture<'a> {
        Box::pin(async move {
            let path = args.get("path").map_or("", String::as_str);
            self.read(path).await
        })
    }
}
