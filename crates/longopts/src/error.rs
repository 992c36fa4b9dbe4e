use crate::value::DecodeError;

/// Why option processing failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptsError {
    /// The same name was registered twice.
    #[error("option --{name} already exists")]
    DuplicateName { name: String },

    /// Two options that are not a negated pair write the same slot.
    #[error("--{first} and --{second} use the same target")]
    TargetConflict { first: String, second: String },

    #[error("option --{name} not recognized")]
    UnrecognizedOption { name: String },

    #[error("option --{name} missing required argument")]
    MissingArgument { name: String },

    /// The caller still holds a [`Slot::borrow`](crate::Slot::borrow) guard on
    /// the option's slot when the scan is ready to commit.
    #[error("option --{name} target is borrowed")]
    SlotBorrowed { name: String },

    #[error("invalid value for option --{name}")]
    InvalidSyntax {
        name: String,
        #[source]
        source: DecodeError,
    },
}

impl OptsError {
    /// The option name the error is about (the first one for conflicts).
    pub fn name(&self) -> &str {
        match self {
            Self::DuplicateName { name }
            | Self::UnrecognizedOption { name }
            | Self::MissingArgument { name }
            | Self::SlotBorrowed { name }
            | Self::InvalidSyntax { name, .. } => name,
            Self::TargetConflict { first, .. } => first,
        }
    }
}

/// A failed scan: the error plus the input exactly as it was passed in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to process arguments: {error}")]
pub struct ScanFailure {
    #[source]
    pub error: OptsError,
    pub args: Vec<String>,
}

impl ScanFailure {
    pub(crate) fn new<S: AsRef<str>>(error: OptsError, args: &[S]) -> Self {
        Self {
            error,
            args: args.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

impl From<ScanFailure> for OptsError {
    fn from(failure: ScanFailure) -> Self {
        failure.error
    }
}

pub type OptsResult<T> = Result<T, OptsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn scan_failure_display_names_the_cause() {
        let failure = ScanFailure::new(
            OptsError::UnrecognizedOption {
                name: "bogus".to_string(),
            },
            &["--bogus"],
        );
        assert_eq!(
            failure.to_string(),
            "failed to process arguments: option --bogus not recognized"
        );
        assert!(failure.source().is_some());
        assert_eq!(failure.error.name(), "bogus");
        assert_eq!(failure.into_args(), ["--bogus"]);
    }
}
