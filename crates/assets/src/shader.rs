use std::path::{Path, PathBuf};

use crate::AssetError;

/// Source text of a vertex + fragment program, one WGSL file per stage.
#[derive(Debug, Clone)]
pub struct ProgramSource {
    pub name: String,
    pub vertex: String,
    pub fragment: String,
}

impl ProgramSource {
    /// Paths of the two stage files for program `name` under `dir`:
    /// `<name>.vert.wgsl` and `<name>.frag.wgsl`.
    pub fn stage_paths(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
        (
            dir.join(format!("{name}.vert.wgsl")),
            dir.join(format!("{name}.frag.wgsl")),
        )
    }

    /// Read both stage files.
    pub fn load(dir: &Path, name: &str) -> Result<Self, AssetError> {
        let (vs, fs) = Self::stage_paths(dir, name);
        Ok(Self {
            name: name.to_string(),
            vertex: read_stage(&vs)?,
            fragment: read_stage(&fs)?,
        })
    }
}

fn read_stage(path: &Path) -> Result<String, AssetError> {
    let code = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = code.len(), "read shader source");
    Ok(code)
}
