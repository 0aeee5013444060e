use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A (case, instruction) pair injected into every translation prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Rule {
    pub id: i64,
    pub case: String,
    pub instruction: String,
}

/// Free-text note injected into every translation prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Feedback {
    pub id: i64,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRule {
    pub case: String,
    pub instruction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFeedback {
    pub feedback: String,
}

impl NewRule {
    pub fn into_rule(self, id: i64) -> Rule {
        Rule {
            id,
            case: self.case,
            instruction: self.instruction,
        }
    }
}

impl NewFeedback {
    pub fn into_feedback(self, id: i64) -> Feedback {
        Feedback {
            id,
            feedback: self.feedback,
        }
    }
}
