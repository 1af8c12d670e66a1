/// Update Post Service Library
///
/// Owns the "edit my post" endpoint of the posts API: the caller's identity is
/// taken from the gateway's authorizer claims, ownership is checked against the
/// post's `UserId`, and the post's `Message` and `UpdatedTimestamp` are written
/// to the DynamoDB `posts` table with a single partial update.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route wiring
/// - `models`: Post record and its key / mutable-field projections
/// - `services`: Authorize-then-update business logic
/// - `db`: Post store abstraction and the DynamoDB implementation
/// - `middleware`: Caller identity extraction and ownership checks
/// - `error`: Error types and their HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
