use api::ApiError;
use dioxus::prelude::*;
use services::{AuthError, DashboardError, EssayServiceError, QuizServiceError};

use atheno_core::model::AttemptError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    EmptyQuiz,
    Unauthenticated,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::NotFound => "We couldn't find that item.",
            Self::EmptyQuiz => "This quiz has no questions yet.",
            Self::Unauthenticated => "Your session has ended. Please sign in again.",
        }
    }

    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::MissingToken | ApiError::Unauthorized => Self::Unauthenticated,
            ApiError::NotFound => Self::NotFound,
            _ => Self::Unknown,
        }
    }
}

impl From<QuizServiceError> for ViewError {
    fn from(err: QuizServiceError) -> Self {
        match err {
            QuizServiceError::Attempt(AttemptError::EmptyQuiz) => Self::EmptyQuiz,
            QuizServiceError::Api(err) => Self::from_api(&err),
            _ => Self::Unknown,
        }
    }
}

impl From<EssayServiceError> for ViewError {
    fn from(err: EssayServiceError) -> Self {
        match err {
            EssayServiceError::Api(err) => Self::from_api(&err),
            _ => Self::Unknown,
        }
    }
}

impl From<DashboardError> for ViewError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Api(err) => Self::from_api(&err),
            _ => Self::Unknown,
        }
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Api(err) => Self::from_api(&err),
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
