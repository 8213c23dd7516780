//! "lands leave" — optional integration with the `lands` host feature.

use std::sync::Arc;

use questline_core::capability::Dependency;
use questline_engine::domain::countable::CountableObjective;
use questline_engine::domain::objective::ObjectiveType;
use serde_json::Value;

use crate::events::{LAND_UNTRUST, LandUntrustEvent};

/// Counts land-untrust events for the untrusted actor. Registration is
/// skipped when the `lands` capability is not installed.
#[must_use]
pub fn lands_leave() -> Arc<dyn ObjectiveType> {
    CountableObjective::new("lands leave", LAND_UNTRUST, |event: &LandUntrustEvent| {
        Some(event.target)
    })
    .dependency(Dependency::on("lands"))
    .condition("land", |config: &Value, event: &LandUntrustEvent| {
        config.as_str().is_some_and(|land| land == event.land)
    })
    .build()
}
