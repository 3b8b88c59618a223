use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MenuError {
    #[error("Invalid menu configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Button index {index} out of range for {count} buttons")]
    OutOfRange { index: usize, count: usize },
    #[error("Could not load icon '{0}'")]
    MissingResource(String),
}
