use crate::config::DynamoDbConfig;
use crate::models::{format_store_timestamp, PostChanges, PostKey};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Stored attribute names of a post record.
pub const ATTR_USER_ID: &str = "UserId";
pub const ATTR_MESSAGE_ID: &str = "MessageId";
pub const ATTR_CREATED_TIMESTAMP: &str = "CreatedTimestamp";
pub const ATTR_MESSAGE: &str = "Message";
pub const ATTR_UPDATED_TIMESTAMP: &str = "UpdatedTimestamp";

/// Errors surfaced by a post store, split by whether retrying can help.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The addressed post does not exist
    #[error("Post not found: {0}")]
    NotFound(String),

    /// Throttling, timeouts, transport failures, store-side 5xx
    #[error("Store temporarily unavailable: {0}")]
    Retryable(String),

    /// Validation, permissions, missing table and anything else a retry won't fix
    #[error("Store request failed: {0}")]
    Permanent(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Retryable(_))
    }
}

/// Partial-update access to stored posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Write `changes` onto the post addressed by `key`.
    ///
    /// Single attempt, no read-before-write: concurrent writers to the same
    /// key race and the last completed write wins.
    async fn update_post(&self, key: &PostKey, changes: &PostChanges) -> Result<(), StoreError>;
}

/// [`PostStore`] backed by a DynamoDB table.
#[derive(Clone)]
pub struct DynamoPostStore {
    client: Client,
    table_name: String,
}

impl DynamoPostStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build the client from the default AWS provider chain (env, profile, IRSA,
    /// execution role). Meant to run once at startup; the client is reused for
    /// every request afterwards.
    pub async fn from_config(config: &DynamoDbConfig) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        info!(
            table = %config.table_name,
            endpoint = ?config.endpoint_url,
            "Initialized DynamoDB client"
        );

        Self::new(Client::from_conf(builder.build()), config.table_name.clone())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl PostStore for DynamoPostStore {
    async fn update_post(&self, key: &PostKey, changes: &PostChanges) -> Result<(), StoreError> {
        let request = UpdateItemParts::new(key, changes);

        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(request.key))
            .update_expression(request.update_expression)
            .condition_expression(request.condition_expression)
            .set_expression_attribute_names(Some(request.names))
            .set_expression_attribute_values(Some(request.values))
            .send()
            .await
            .map_err(|err| classify_sdk_error(&err, key))?;

        debug!(
            user_id = %key.user_id,
            message_id = %key.message_id,
            table = %self.table_name,
            "Post updated"
        );

        Ok(())
    }
}

/// The pieces of an `UpdateItem` call for one post.
///
/// The key carries exactly the three key attributes and the update expression
/// writes exactly `Message` and `UpdatedTimestamp`.
#[derive(Debug)]
struct UpdateItemParts {
    key: HashMap<String, AttributeValue>,
    update_expression: &'static str,
    condition_expression: &'static str,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl UpdateItemParts {
    fn new(key: &PostKey, changes: &PostChanges) -> Self {
        let key = HashMap::from([
            (
                ATTR_USER_ID.to_string(),
                AttributeValue::S(key.user_id.clone()),
            ),
            (
                ATTR_MESSAGE_ID.to_string(),
                AttributeValue::S(key.message_id.clone()),
            ),
            (
                ATTR_CREATED_TIMESTAMP.to_string(),
                AttributeValue::S(format_store_timestamp(&key.created_timestamp)),
            ),
        ]);

        let names = HashMap::from([
            ("#msg".to_string(), ATTR_MESSAGE.to_string()),
            ("#upd".to_string(), ATTR_UPDATED_TIMESTAMP.to_string()),
        ]);

        let values = HashMap::from([
            (":msg".to_string(), AttributeValue::S(changes.message.clone())),
            (
                ":upd".to_string(),
                AttributeValue::S(format_store_timestamp(&changes.updated_timestamp)),
            ),
        ]);

        Self {
            key,
            update_expression: "SET #msg = :msg, #upd = :upd",
            // Existence only: an edit must never create a post
            condition_expression: "attribute_exists(UserId)",
            names,
            values,
        }
    }
}

fn describe_key(key: &PostKey) -> String {
    format!(
        "{}/{}@{}",
        key.user_id,
        key.message_id,
        format_store_timestamp(&key.created_timestamp)
    )
}

fn classify_sdk_error(err: &SdkError<UpdateItemError, HttpResponse>, key: &PostKey) -> StoreError {
    match err {
        SdkError::ServiceError(service) => classify_service_error(service.err(), key),
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            StoreError::Retryable(DisplayErrorContext(err).to_string())
        }
        _ => StoreError::Permanent(DisplayErrorContext(err).to_string()),
    }
}

fn classify_service_error(err: &UpdateItemError, key: &PostKey) -> StoreError {
    if err.is_conditional_check_failed_exception() {
        return StoreError::NotFound(describe_key(key));
    }

    let retryable = err.is_provisioned_throughput_exceeded_exception()
        || err.is_request_limit_exceeded()
        || err.is_internal_server_error()
        || err.is_transaction_conflict_exception()
        || matches!(err.code(), Some("ThrottlingException" | "ServiceUnavailable"));

    if retryable {
        StoreError::Retryable(DisplayErrorContext(err).to_string())
    } else {
        StoreError::Permanent(DisplayErrorContext(err).to_string())
    }
}
