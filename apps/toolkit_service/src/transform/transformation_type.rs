use std::{fmt, str::FromStr};

use super::transform_error::TransformError;

/// The closed set of rewrites the service knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformationType {
    Summarize,
    Keywords,
    Formal,
    Casual,
    Sheldon,
}

impl TransformationType {
    pub const ALL: [TransformationType; 5] = [
        TransformationType::Summarize,
        TransformationType::Keywords,
        TransformationType::Formal,
        TransformationType::Casual,
        TransformationType::Sheldon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransformationType::Summarize => "summarize",
            TransformationType::Keywords => "keywords",
            TransformationType::Formal => "formal",
            TransformationType::Casual => "casual",
            TransformationType::Sheldon => "sheldon",
        }
    }

    /// Instruction prepended to the user's text for this transformation.
    pub fn instruction(&self) -> &'static str {
        match self {
            TransformationType::Summarize => {
                "Summarize the following text into 3 concise bullet points:"
            }
            TransformationType::Keywords => {
                "Extract the 5 most important keywords from the following text. List them separated by commas:"
            }
            TransformationType::Formal => {
                "Rewrite the following text in a formal and professional tone:"
            }
            TransformationType::Casual => {
                "Rewrite the following text in a casual, friendly, and simple tone:"
            }
            TransformationType::Sheldon => {
                "Rewrite the following text as if it were spoken by Sheldon, a character in the American sitcom, The Big Bang Theory."
            }
        }
    }
}

impl fmt::Display for TransformationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys are matched case-insensitively: "Summarize" and "summarize" are the
/// same transformation. Whitespace is not stripped.
impl FromStr for TransformationType {
    type Err = TransformError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let normalized = key.to_lowercase();
        TransformationType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| TransformError::InvalidTransformationType(key.to_string()))
    }
}

/// Looks up the instruction for a raw transformation key.
pub fn resolve(transformation_type: &str) -> Result<&'static str, TransformError> {
    transformation_type
        .parse::<TransformationType>()
        .map(|kind| kind.instruction())
}
