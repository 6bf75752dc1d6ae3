use std::path::{Path, PathBuf};

use matbox_material::{CompiledMaterial, MaterialError};
use matbox_target::TargetCodeError;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: MaterialError,
    },
    #[error("no sub-expression at `{0}`")]
    NoSuchPath(String),
    #[error(transparent)]
    Layout(#[from] TargetCodeError),
}

pub fn load_material(path: &Path) -> Result<CompiledMaterial, CommandError> {
    let bytes = std::fs::read(path).map_err(|source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    CompiledMaterial::from_bytes(&bytes).map_err(|source| CommandError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
