//! Shared fixtures for update-post-service integration tests
//!
//! Provides a mockall store for asserting on calls, an in-memory store that
//! behaves like the posts table, and request helpers.
#![allow(dead_code)]

use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::DateTime;
use mockall::mock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use update_post_service::db::{PostStore, StoreError};
use update_post_service::handlers::configure_routes;
use update_post_service::middleware::identity::REQUEST_CONTEXT_HEADER;
use update_post_service::models::{format_store_timestamp, Post, PostChanges, PostKey};

mock! {
    pub Store {}

    #[async_trait]
    impl PostStore for Store {
        async fn update_post(&self, key: &PostKey, changes: &PostChanges) -> Result<(), StoreError>;
    }
}

/// Key attributes exactly as written to the table
pub type StoredKey = (String, String, String);

/// Mutable attributes exactly as written to the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredChanges {
    pub message: String,
    pub updated_timestamp: String,
}

impl From<&PostChanges> for StoredChanges {
    fn from(changes: &PostChanges) -> Self {
        Self {
            message: changes.message.clone(),
            updated_timestamp: format_store_timestamp(&changes.updated_timestamp),
        }
    }
}

pub fn stored_key(key: &PostKey) -> StoredKey {
    (
        key.user_id.clone(),
        key.message_id.clone(),
        format_store_timestamp(&key.created_timestamp),
    )
}

/// Posts table stand-in: string-typed attributes, existence-guarded partial updates
#[derive(Default)]
pub struct InMemoryPostStore {
    records: Mutex<HashMap<StoredKey, StoredChanges>>,
    update_calls: AtomicUsize,
}

impl InMemoryPostStore {
    pub fn with_posts(posts: &[Post]) -> Self {
        let store = Self::default();
        {
            let mut records = store.records.lock().unwrap();
            for post in posts {
                records.insert(stored_key(&post.key()), StoredChanges::from(&post.changes()));
            }
        }
        store
    }

    pub fn get(&self, key: &PostKey) -> Option<StoredChanges> {
        self.records.lock().unwrap().get(&stored_key(key)).cloned()
    }

    pub fn snapshot(&self) -> HashMap<StoredKey, StoredChanges> {
        self.records.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn update_post(&self, key: &PostKey, changes: &PostChanges) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.lock().unwrap();
        match records.get_mut(&stored_key(key)) {
            Some(stored) => {
                *stored = StoredChanges::from(changes);
                Ok(())
            }
            None => Err(StoreError::NotFound(format!(
                "{}/{}",
                key.user_id, key.message_id
            ))),
        }
    }
}

/// The post from the canonical alice scenario
pub fn alice_post() -> Post {
    Post {
        user_id: "alice".to_string(),
        message_id: "m1".to_string(),
        created_timestamp: DateTime::parse_from_rfc3339("2023-01-01T00:00:00Z").unwrap(),
        message: "hi".to_string(),
        updated_timestamp: DateTime::parse_from_rfc3339("2023-01-02T00:00:00Z").unwrap(),
    }
}

pub const ALICE_POST_JSON: &str = r#"{"UserId":"alice","MessageId":"m1","CreatedTimestamp":"2023-01-01T00:00:00Z","Message":"hi","UpdatedTimestamp":"2023-01-02T00:00:00Z"}"#;

/// Request context as forwarded by the gateway for `username`
pub fn request_context(username: &str) -> String {
    serde_json::json!({
        "accountId": "123456789012",
        "stage": "prod",
        "authorizer": {
            "claims": {
                "cognito:username": username,
                "token_use": "id"
            }
        }
    })
    .to_string()
}

/// PUT /api/v1/posts as `username` with a raw body
pub fn update_request(username: &str, body: &str) -> test::TestRequest {
    test::TestRequest::put()
        .uri("/api/v1/posts")
        .insert_header((REQUEST_CONTEXT_HEADER, request_context(username)))
        .set_payload(body.to_string())
}

/// Run one request through the service wired to `store`
pub async fn send(store: Arc<dyn PostStore>, req: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .configure(configure_routes),
    )
    .await;

    test::call_service(&app, req.to_request()).await
}
