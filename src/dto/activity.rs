use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

/// Action reported by the game client for the audit trail.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ActivityRequest {
    /// Short action name, e.g. `prestige` or `purchase_upgrade`.
    #[validate(length(min = 1, max = 64))]
    pub action: String,
    /// Free-form details attached to the action.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: Map<String, Value>,
}
