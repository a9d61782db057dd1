use std::fmt::Display;

use tokenizers::Tokenizer;

use crate::benchmarks::config::ModelConfig;

/// The unique string token that identifies the PyTorch framework
pub static PYTORCH: &str = "pytorch";

/// The unique string token that identifies the SpaCy framework
pub static SPACY: &str = "spacy";

/// Execution frameworks a dataset can be prepared for
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Framework {
    /// Neural models fed with tokenized tensors
    PyTorch,

    /// Rule-based linguistic pipelines
    Spacy,
}

impl TryFrom<&str> for Framework {
    type Error = FrameworkError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            v if v == PYTORCH => Ok(Framework::PyTorch),
            v if v == SPACY => Ok(Framework::Spacy),
            _ => Err(FrameworkError::Unknown(value.to_string())),
        }
    }
}

impl Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Framework::PyTorch => PYTORCH,
            Framework::Spacy => SPACY,
        };

        write!(f, "{}", name)
    }
}

/// The framework a dataset is prepared for, together with the objects that framework
/// needs during preprocessing
#[derive(Clone, Copy)]
pub enum FrameworkInputs<'a> {
    /// Tokenize with the given tokenizer and numericalise with the config's label2id
    PyTorch {
        /// Tokenizer for converting text to token IDs
        tokenizer: &'a Tokenizer,

        /// Model configuration carrying the label mapping
        config: &'a ModelConfig,
    },

    /// SpaCy pipelines take no extra inputs
    Spacy,
}

impl FrameworkInputs<'_> {
    /// The framework these inputs belong to
    pub fn framework(&self) -> Framework {
        match self {
            FrameworkInputs::PyTorch { .. } => Framework::PyTorch,
            FrameworkInputs::Spacy => Framework::Spacy,
        }
    }
}

/// Framework Error
#[derive(thiserror::Error, Debug)]
pub enum FrameworkError {
    /// No framework found for the given string
    #[error("no framework found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_known_frameworks() {
        assert_eq!(Framework::try_from("pytorch").unwrap(), Framework::PyTorch);
        assert_eq!(Framework::try_from("spacy").unwrap(), Framework::Spacy);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        for tag in ["SpaCy", "PyTorch", "PYTORCH"] {
            assert!(matches!(
                Framework::try_from(tag),
                Err(FrameworkError::Unknown(name)) if name == tag
            ));
        }
    }

    #[test]
    fn test_reject_unknown_framework() {
        let err = Framework::try_from("jax").unwrap_err();

        assert_eq!(err.to_string(), "no framework found for jax");
    }

    #[test]
    fn test_display_matches_tag() {
        for framework in [Framework::PyTorch, Framework::Spacy] {
            let tag = framework.to_string();

            assert_eq!(Framework::try_from(tag.as_str()).unwrap(), framework);
        }
    }

    #[test]
    fn test_inputs_report_framework() {
        assert_eq!(FrameworkInputs::Spacy.framework(), Framework::Spacy);
    }
}
