use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Access token handed over by the identity provider after sign-in.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SessionRequest {
    #[validate(length(min = 1))]
    pub access_token: String,
}
