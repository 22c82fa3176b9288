//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod bonus;
pub mod kpi;
pub mod observation;
pub mod org;
pub mod reports;
pub mod review;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;

use serde::Serialize;

use crate::domain::foundation::{CommandMetadata, DomainEvent, EventEnvelope};
use crate::ports::EventPublisher;

/// Wraps `event` with the caller's correlation context and publishes it.
///
/// The write has already been committed when this runs, so a publish failure
/// is logged and swallowed.
pub(crate) async fn publish_event<E>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
) where
    E: DomainEvent + Serialize,
{
    let envelope = EventEnvelope::from_event(event)
        .with_correlation_id(metadata.correlation_id())
        .with_user_id(metadata.user_id().to_string());

    if let Err(err) = publisher.publish(envelope).await {
        tracing::warn!(
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            error = %err,
            "failed to publish domain event"
        );
    }
}
