use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an id from a route segment or wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

backend_id!(
    /// Identifier of a quiz assigned by the backend.
    QuizId
);
backend_id!(
    /// Identifier of a question, unique within its quiz.
    ///
    /// The backend keys answers by question position, so this is usually the index.
    QuestionId
);
backend_id!(
    /// Identifier of an essay prompt.
    EssayId
);
backend_id!(
    /// Backend user id (not the identity provider uid).
    UserId
);
backend_id!(
    /// Identifier of a quiz or essay submission.
    SubmissionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_id_display() {
        assert_eq!(QuizId::new(42).to_string(), "42");
    }

    #[test]
    fn question_id_debug_names_the_kind() {
        assert_eq!(format!("{:?}", QuestionId::new(3)), "QuestionId(3)");
    }

    #[test]
    fn essay_id_from_str_trims_whitespace() {
        let id: EssayId = " 17 ".parse().unwrap();
        assert_eq!(id, EssayId::new(17));
    }

    #[test]
    fn user_id_from_str_invalid() {
        let err = "abc".parse::<UserId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse UserId from string");
    }
}
