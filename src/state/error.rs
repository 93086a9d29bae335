use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("cannot open the viewer on an empty catalog")]
    EmptyCatalog,
    #[error("photo index {index} is out of range for a catalog of {len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("viewer is closed; cannot select photo {index}")]
    ViewerClosed { index: usize },
}
