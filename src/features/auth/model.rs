use serde::{Deserialize, Serialize};

/// The logged-in caller, injected into request extensions by the auth
/// middleware. `sub` is the user id every ownership check keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub sub: String,
}
