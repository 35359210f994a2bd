use tracing::info;
use validator::Validate;

use crate::{dto::session::SessionRequest, error::ServiceError, state::SharedState};

/// Adopt the access token issued by the identity provider.
pub async fn sign_in(state: &SharedState, request: SessionRequest) -> Result<(), ServiceError> {
    request.validate()?;
    state.access_token().set(request.access_token).await;
    info!("session token installed");
    Ok(())
}

/// Forget the current access token; later saves go to the local snapshot.
pub async fn sign_out(state: &SharedState) {
    state.access_token().clear().await;
    info!("session token cleared");
}
