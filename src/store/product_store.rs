//! CRUD operations on the remote `/products` resource.

use super::error::StoreError;
use super::transport::{HttpRequest, Transport};
use crate::model::{Envelope, Product, ProductDraft, ProductPatch};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const DEFAULT_RESOURCE_PATH: &str = "/products";
pub const DEFAULT_READ_RETRIES: u32 = 2;

/// Client for the product resource. Cheap to clone.
#[derive(Clone)]
pub struct ProductStore {
    transport: Arc<dyn Transport>,
    resource_path: String,
    read_retries: u32,
}

impl ProductStore {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            resource_path: DEFAULT_RESOURCE_PATH.to_string(),
            read_retries: DEFAULT_READ_RETRIES,
        }
    }

    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    /// Additional attempts `list` makes after a failure.
    pub fn with_read_retries(mut self, retries: u32) -> Self {
        self.read_retries = retries;
        self
    }

    /// Full URL of the resource, for user-facing messages.
    pub fn resource_url(&self) -> String {
        format!("{}{}", self.transport.base_url(), self.resource_path)
    }

    /// Fetches every product, retrying failed attempts.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let attempts = self.read_retries.saturating_add(1);
        let mut attempt = 1;
        loop {
            let result = self
                .send(HttpRequest::get(self.resource_path.clone()))
                .await
                .and_then(decode::<Vec<Product>>);
            match result {
                Ok(products) => {
                    info!(count = products.len(), attempt, "Products loaded");
                    return Ok(products);
                }
                Err(e) if attempt < attempts => {
                    warn!(attempt, error = %e, "List failed, retrying");
                    attempt += 1;
                }
                Err(e) => {
                    warn!(attempts, error = %e, "List failed");
                    return Err(StoreError::RetriesExhausted {
                        attempts,
                        last: Box::new(e),
                    });
                }
            }
        }
    }

    /// Fetches one product. A 404 or a `null` payload is [`StoreError::NotFound`].
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Product, StoreError> {
        let body = match self.send(HttpRequest::get(self.item_path(id))).await {
            Err(StoreError::Transport(e)) if e.status() == Some(404) => {
                return Err(StoreError::NotFound(id.to_string()))
            }
            other => other?,
        };
        decode::<Option<Product>>(body)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let body = serde_json::to_value(draft).map_err(|e| StoreError::Decode(e.to_string()))?;
        let product = decode::<Product>(self.send(HttpRequest::post(self.resource_path.clone(), body)).await?)?;
        info!(id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, StoreError> {
        let body = serde_json::to_value(patch).map_err(|e| StoreError::Decode(e.to_string()))?;
        let product = match self.send(HttpRequest::put(self.item_path(id), body)).await {
            Err(StoreError::Transport(e)) if e.status() == Some(404) => {
                return Err(StoreError::NotFound(id.to_string()))
            }
            other => decode::<Product>(other?)?,
        };
        info!(%id, "Product updated");
        Ok(product)
    }

    /// Deletes one product and returns the backend's confirmation payload.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<Value, StoreError> {
        let body = self.send(HttpRequest::delete(self.item_path(id))).await?;
        info!(%id, "Product removed");
        Ok(match body {
            Value::Object(mut map) => map.remove("products").unwrap_or(Value::Null),
            other => other,
        })
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.resource_path, id)
    }

    async fn send(&self, request: HttpRequest) -> Result<Value, StoreError> {
        Ok(self.transport.send(request).await?)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, StoreError> {
    serde_json::from_value::<Envelope<T>>(body)
        .map(|envelope| envelope.products)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::store::{Method, TransportError};
    use serde_json::json;

    fn store(mock: &MockTransport) -> ProductStore {
        ProductStore::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_list_recovers_after_two_failures() {
        let mut mock = MockTransport::new();
        mock.expect(Method::Get, "/products")
            .return_err(TransportError::client("connection refused"));
        mock.expect(Method::Get, "/products")
            .return_err(TransportError::server(503, "Service Unavailable"));
        mock.expect(Method::Get, "/products")
            .return_ok(json!({"products": [{"id": "1", "title": "Desk"}]}));

        let products = store(&mock).list().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Desk");
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_gives_up_after_retry_budget() {
        let mut mock = MockTransport::new();
        for _ in 0..3 {
            mock.expect(Method::Get, "/products")
                .return_err(TransportError::client("connection refused"));
        }

        let err = store(&mock).list().await.unwrap_err();
        assert!(matches!(err, StoreError::RetriesExhausted { attempts: 3, .. }));
        mock.verify();
    }

    #[tokio::test]
    async fn test_unbounded_retry_budget_does_not_overflow() {
        let mut mock = MockTransport::new();
        mock.expect(Method::Get, "/products")
            .return_err(TransportError::client("connection refused"));
        mock.expect(Method::Get, "/products")
            .return_ok(json!({"products": []}));

        let products = store(&mock).with_read_retries(u32::MAX).list().await.unwrap();
        assert!(products.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let mut mock = MockTransport::new();
        mock.expect(Method::Get, "/products/9")
            .return_err(TransportError::server(404, "Not Found"));
        mock.expect(Method::Get, "/products/10")
            .return_ok(json!({"products": null}));

        let store = store(&mock);
        assert!(store.get_by_id("9").await.unwrap_err().is_not_found());
        assert!(store.get_by_id("10").await.unwrap_err().is_not_found());
        mock.verify();
    }

    #[tokio::test]
    async fn test_writes_are_not_retried() {
        let mut mock = MockTransport::new();
        mock.expect(Method::Post, "/products")
            .return_err(TransportError::server(500, "Internal Server Error"));

        let err = store(&mock).create(&ProductDraft::default()).await.unwrap_err();
        assert_eq!(err, StoreError::Transport(TransportError::server(500, "Internal Server Error")));
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_sends_patch_body() {
        let mut mock = MockTransport::new();
        mock.expect(Method::Put, "/products/3")
            .return_ok(json!({"products": {"id": "3", "price": "12.50"}}));

        let patch = ProductPatch {
            price: Some("12.50".to_string()),
            ..Default::default()
        };
        let product = store(&mock).update("3", &patch).await.unwrap();
        assert_eq!(product.price, "12.50");
        assert_eq!(mock.requests()[0].body, Some(json!({"price": "12.50"})));
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_returns_confirmation() {
        let mut mock = MockTransport::new();
        mock.expect(Method::Delete, "/products/3")
            .return_ok(json!({"products": {"deleted": true}}));

        let confirmation = store(&mock).remove("3").await.unwrap();
        assert_eq!(confirmation, json!({"deleted": true}));
        mock.verify();
    }
}
