/// Authenticated admin session, inserted into request extensions by the auth
/// middleware after token validation.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Token subject (fixed to "admin" for the shared-secret scheme)
    pub sub: String,
}
