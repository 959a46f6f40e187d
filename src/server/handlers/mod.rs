//! HTTP handlers for the configuration API.

mod fields;
mod health;
mod profiles;
mod rules;
mod sources;
mod templates;

pub use fields::{create_field, delete_field, get_field, list_fields, update_field};
pub use health::{health, ready, root};
pub use profiles::{create_profile, list_profiles};
pub use rules::{create_rule, delete_rule, get_rule, list_rules};
pub use sources::{create_source, get_source, list_sources, update_source_config};
pub use templates::{create_template, delete_template, get_template, list_templates};

use super::error::ApiError;
use super::AppState;

/// Resolve the parent source before any child-entity operation. A missing
/// source short-circuits with a specific not-found error rather than
/// falling through to a foreign-key violation.
pub(crate) async fn require_source(state: &AppState, source_id: &str) -> Result<(), ApiError> {
    if state.sources.exists(source_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found(format!(
            "Source with ID '{}' not found",
            source_id
        )))
    }
}
