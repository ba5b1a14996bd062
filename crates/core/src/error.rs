#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0} does not seem to be a correct Github URL")]
    InvalidRepositoryUrl(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
