use thiserror::Error;

/// Failures raised by the pattern mechanics.
///
/// All three kinds are local and immediate: the component that detects them
/// hands them straight back to the caller without retrying or defaulting.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("{family} cannot build variant '{selector}'")]
    UnsupportedVariant { family: String, selector: String },

    #[error("holder '{holder}' was invoked before any unit was set")]
    UnboundDelegate { holder: String },

    #[error("'{type_name}' can only be obtained through its accessor")]
    ConstructionNotAllowed { type_name: String },
}

impl PatternError {
    pub fn unsupported_variant(family: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::UnsupportedVariant {
            family: family.into(),
            selector: selector.into(),
        }
    }

    pub fn unbound_delegate(holder: impl Into<String>) -> Self {
        Self::UnboundDelegate {
            holder: holder.into(),
        }
    }

    pub fn construction_not_allowed(type_name: impl Into<String>) -> Self {
        Self::ConstructionNotAllowed {
            type_name: type_name.into(),
        }
    }
}
