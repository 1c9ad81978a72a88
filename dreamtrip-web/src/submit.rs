//! Form delivery.
//!
//! The site has no backend yet, so [`SimulatedSubmitter`] logs the payload
//! and resolves after a short delay. A real transport implements
//! [`FormSubmitter`] and is passed to [`crate::app::mount`].
use crate::dom;
use async_trait::async_trait;
use dreamtrip_core::{FormSubmission, SubmitError};

#[async_trait(?Send)]
pub trait FormSubmitter {
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the submission is refused or cannot be delivered.
    async fn submit(&self, submission: &FormSubmission) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedSubmitter {
    delay_ms: u32,
}

impl SimulatedSubmitter {
    #[must_use]
    pub const fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

#[async_trait(?Send)]
impl FormSubmitter for SimulatedSubmitter {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), SubmitError> {
        let payload = serde_json::to_string(&submission.fields)
            .map_err(|err| SubmitError::Rejected(err.to_string()))?;
        log::info!("submitting {} form: {payload}", submission.kind);
        if self.delay_ms > 0 {
            dom::sleep_ms(self.delay_ms)
                .await
                .map_err(|err| SubmitError::Transport(err.to_string()))?;
        }
        Ok(())
    }
}
