/// Failure to restore a persisted compiled material.
#[derive(Debug, thiserror::Error)]
pub enum MaterialError {
    #[error("malformed compiled material: {0}")]
    Decode(postcard::Error),
    #[error("temporary {index} refers to temporary {target}; only lower indices are allowed")]
    ForwardTemporary { index: usize, target: usize },
}
