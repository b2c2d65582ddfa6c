//! Error types for dice configuration, conditions, and simulation runs.

/// Errors raised while validating dice, conditions, or simulation input.
///
/// Every variant except [`DiceError::Cancelled`] is produced before any
/// simulation work starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// A dice configuration has non-positive sides or count, or its
    /// notation could not be parsed.
    #[error("invalid dice configuration: {0}")]
    InvalidConfiguration(String),

    /// A condition kind is unknown, or a count-matching condition has no count.
    #[error("invalid condition: {0}")]
    InvalidCondition(String),

    /// A simulation argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The worker pool for a simulation run could not be created.
    #[error("worker pool error: {0}")]
    WorkerPool(String),

    /// The run was cancelled before a single batch completed.
    #[error("simulation cancelled before any batch completed")]
    Cancelled,
}

impl DiceError {
    /// True for errors caused by caller input rather than the runtime.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_) | Self::InvalidCondition(_) | Self::InvalidArgument(_)
        )
    }
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DiceError::InvalidConfiguration("sides must be positive".into()).to_string(),
            "invalid dice configuration: sides must be positive"
        );
        assert_eq!(
            DiceError::InvalidCondition("unknown kind: foo".into()).to_string(),
            "invalid condition: unknown kind: foo"
        );
        assert_eq!(
            DiceError::InvalidArgument("simulations must be positive".into()).to_string(),
            "invalid argument: simulations must be positive"
        );
    }

    #[test]
    fn input_error_classification() {
        assert!(DiceError::InvalidArgument(String::new()).is_input_error());
        assert!(DiceError::InvalidCondition(String::new()).is_input_error());
        assert!(!DiceError::Cancelled.is_input_error());
        assert!(!DiceError::WorkerPool(String::new()).is_input_error());
    }
}
