/// Store access layer
///
/// This module provides:
/// - `PostStore`: the partial-update seam the service depends on
/// - `DynamoPostStore`: the DynamoDB implementation used in deployments
pub mod post_repo;

pub use post_repo::{DynamoPostStore, PostStore, StoreError};
