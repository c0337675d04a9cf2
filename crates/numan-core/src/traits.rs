use crate::error::Result;

/// Validate the structural preconditions of an entity before it is evaluated.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
