/// Business logic layer for update-post-service
///
/// - Post service: ownership check followed by the partial update
pub mod posts;

pub use posts::PostService;
