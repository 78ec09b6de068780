use std::sync::Arc;

use api::EssayGateway;
use atheno_core::model::{EssayComposition, EssayId};

use crate::error::EssayServiceError;

/// Loads essay prompts and sends student text as drafts or final submissions.
#[derive(Clone)]
pub struct EssayWritingService {
    essays: Arc<dyn EssayGateway>,
}

impl EssayWritingService {
    #[must_use]
    pub fn new(essays: Arc<dyn EssayGateway>) -> Self {
        Self { essays }
    }

    /// # Errors
    ///
    /// Returns `EssayServiceError::Api` if the essay cannot be fetched.
    pub async fn start(&self, essay_id: EssayId) -> Result<EssayComposition, EssayServiceError> {
        let essay = self
            .essays
            .essay(essay_id)
            .await
            .inspect_err(|err| log::warn!("failed to load essay {essay_id}: {err}"))?;
        Ok(EssayComposition::new(essay))
    }

    /// Final submission; refused locally when blank or over the word limit.
    ///
    /// # Errors
    ///
    /// Returns `EssayServiceError::Essay` for local validation failures, or
    /// `EssayServiceError::Api` if the request fails.
    pub async fn submit(&self, composition: &EssayComposition) -> Result<(), EssayServiceError> {
        let submission = composition.submission()?;
        self.essays
            .submit_essay(&submission)
            .await
            .inspect_err(|err| log::warn!("essay {} submission failed: {err}", submission.essay_id))?;
        log::info!(
            "essay {} submitted with {} words",
            submission.essay_id,
            composition.word_count()
        );
        Ok(())
    }

    /// Save a draft. The word limit is not enforced here.
    ///
    /// # Errors
    ///
    /// Returns `EssayServiceError::Essay` for blank text, or
    /// `EssayServiceError::Api` if the request fails.
    pub async fn save_draft(&self, composition: &EssayComposition) -> Result<(), EssayServiceError> {
        let draft = composition.draft()?;
        self.essays
            .save_draft(&draft)
            .await
            .inspect_err(|err| log::warn!("essay {} draft save failed: {err}", draft.essay_id))?;
        log::debug!("saved draft for essay {}", draft.essay_id);
        Ok(())
    }
}
