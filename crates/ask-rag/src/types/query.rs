//! Ask request type

use serde::{Deserialize, Serialize};

/// Body of `POST /ask`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question to answer
    #[serde(default)]
    pub question: Option<String>,
}

impl AskRequest {
    /// Create a request
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
        }
    }

    /// The question, unless it is absent or blank
    pub fn question(&self) -> Option<&str> {
        self.question
            .as_deref()
            .filter(|q| !q.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_questions_are_missing() {
        assert_eq!(AskRequest::default().question(), None);
        assert_eq!(AskRequest::new("").question(), None);
        assert_eq!(AskRequest::new("  \n\t").question(), None);
    }

    #[test]
    fn test_question_is_kept_verbatim() {
        let request: AskRequest = serde_json::from_str(r#"{"question": " What is X? "}"#).unwrap();
        assert_eq!(request.question(), Some(" What is X? "));
    }

    #[test]
    fn test_null_question_deserializes() {
        let request: AskRequest = serde_json::from_str(r#"{"question": null}"#).unwrap();
        assert_eq!(request.question(), None);
    }
}
