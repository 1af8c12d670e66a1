/// Request-level auth helpers for update-post-service
///
/// Token validation happens at the gateway; by the time a request reaches this
/// service the authorizer's claims ride along in the request context. This
/// module turns those claims into a `CallerIdentity` and checks ownership.
pub mod identity;
pub mod permissions;

pub use identity::{CallerIdentity, IdentityExtractor, RequestContextIdentity};
pub use permissions::*;
