//! Client-side submission path.
//!
//! Runs the same [`validate`] routine as the server handler, then inserts
//! directly with the low-privilege credential.

use tracing::error;

use super::store::{ContactStore, SupabaseStore};
use super::{ContactForm, validate};
use crate::error::SubmitError;

pub struct ContactFormClient<S = SupabaseStore> {
    store: S,
}

impl<S: ContactStore> ContactFormClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and store one submission. Nothing is retried.
    pub async fn submit(&self, form: &ContactForm) -> Result<(), SubmitError> {
        let row = validate(form)?;
        self.store.insert(row).await.map_err(|e| {
            error!(error = %e, "failed to store contact submission");
            SubmitError::Storage(e)
        })?;
        Ok(())
    }
}
