//! Correlation identifier carried from a caller through backend API calls.
//!
//! Callers wrap a unit of work in [`CorrelationId::scope`]; the gateway then
//! forwards the identifier on every outbound request and every
//! [`AppError`](super::AppError) raised inside the scope records it.
//!
//! Tokio task-local values are not inherited by spawned tasks, so spawned
//! work must be wrapped in its own scope.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CORRELATION_ID: CorrelationId;
}

/// Identifier correlating one caller operation with backend API logs.
///
/// # Examples
/// ```
/// use vacman::domain::CorrelationId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = CorrelationId::generate();
/// let observed = CorrelationId::scope(id, async { CorrelationId::current() }).await;
/// assert_eq!(observed, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Generate a fresh random identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The identifier in scope for the current task, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { CORRELATION_ID.try_with(|id| *id).ok() }

    /// Borrow the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `id` as the current correlation identifier.
    pub async fn scope<Fut>(id: CorrelationId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CORRELATION_ID.scope(id, fut).await
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn current_is_none_outside_a_scope() {
        assert!(CorrelationId::current().is_none());
    }

    #[tokio::test]
    async fn nested_scope_shadows_outer_identifier() {
        let outer = CorrelationId::generate();
        let inner = CorrelationId::generate();
        let observed = CorrelationId::scope(outer, async move {
            CorrelationId::scope(inner, async { CorrelationId::current() }).await
        })
        .await;
        assert_eq!(observed, Some(inner));
    }

    #[test]
    fn parses_hyphenated_uuid_text() {
        let id: CorrelationId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        assert_eq!(id.as_uuid(), &Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
