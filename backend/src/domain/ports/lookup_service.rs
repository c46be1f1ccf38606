//! Driving port for reference-data lookups.
//!
//! One service instance serves one [`LookupCategory`]. Implementors supply
//! the collection and the by-code query; lookup by id, the non-failing
//! `find_*` lookups and the localised variants are derived from those.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{AppError, Language, LookupCategory, LookupEntity};

/// Uniform read access to one reference-data category.
#[async_trait]
pub trait LookupService<E: LookupEntity>: Send + Sync {
    /// The category this service serves.
    fn category(&self) -> LookupCategory;

    /// Every well-formed entry of the category.
    async fn list_all(&self) -> Result<Vec<E>, AppError>;

    /// The entry whose code is `code`. When several entries share the code,
    /// the first one reported wins.
    ///
    /// # Errors
    ///
    /// Returns the category's not-found error when no entry has the code.
    async fn get_by_code(&self, code: &str) -> Result<E, AppError>;

    /// The entry whose id is `id`, found by scanning [`Self::list_all`].
    ///
    /// # Errors
    ///
    /// Returns the category's not-found error when no entry has the id.
    async fn get_by_id(&self, id: i64) -> Result<E, AppError> {
        self.list_all()
            .await?
            .into_iter()
            .find(|entry| entry.id() == id)
            .ok_or_else(|| self.category().not_found_by_id(id))
    }

    /// Like [`Self::get_by_id`] but never fails; `None` when absent.
    async fn find_by_id(&self, id: i64) -> Option<E> {
        into_option_with(self.get_by_id(id).await, self.category())
    }

    /// Like [`Self::get_by_code`] but never fails; `None` when absent.
    async fn find_by_code(&self, code: &str) -> Option<E> {
        into_option_with(self.get_by_code(code).await, self.category())
    }

    async fn list_all_localized(&self, language: Language) -> Result<Vec<E::Localized>, AppError> {
        let entries = self.list_all().await?;
        Ok(entries
            .iter()
            .map(|entry| entry.localize(language))
            .collect())
    }

    async fn get_localized_by_id(
        &self,
        id: i64,
        language: Language,
    ) -> Result<E::Localized, AppError> {
        Ok(self.get_by_id(id).await?.localize(language))
    }

    async fn get_localized_by_code(
        &self,
        code: &str,
        language: Language,
    ) -> Result<E::Localized, AppError> {
        Ok(self.get_by_code(code).await?.localize(language))
    }

    async fn find_localized_by_id(&self, id: i64, language: Language) -> Option<E::Localized> {
        self.find_by_id(id)
            .await
            .map(|entry| entry.localize(language))
    }

    async fn find_localized_by_code(
        &self,
        code: &str,
        language: Language,
    ) -> Option<E::Localized> {
        self.find_by_code(code)
            .await
            .map(|entry| entry.localize(language))
    }
}

/// Collapse a lookup result into an optional.
///
/// Not-found is the expected absent case. Any other failure also yields
/// `None` so `find_*` calls never fail, but is logged because it hides an outage.
pub(crate) fn into_option_with<T>(
    result: Result<T, AppError>,
    subject: impl std::fmt::Display,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) if error.is_not_found() => None,
        Err(error) => {
            warn!(
                subject = %subject,
                code = %error.code(),
                http_status = ?error.http_status(),
                error = %error,
                "lookup failed; treating entry as absent"
            );
            None
        }
    }
}
