use crate::inventory::{DeleteOutcome, InventoryCommand, InventoryError, InventoryPage, InventoryReply};
use crate::model::Product;
use async_trait::async_trait;
use form_framework::{FormError, PageClient, PageHandle};
use tracing::{debug, instrument};

/// Client for interacting with the inventory page.
#[derive(Clone)]
pub struct InventoryClient {
    inner: PageClient<InventoryPage>,
}

impl InventoryClient {
    pub fn new(inner: PageClient<InventoryPage>) -> Self {
        Self { inner }
    }

    async fn send(&self, command: InventoryCommand) -> Result<InventoryReply, InventoryError> {
        debug!(?command, "Sending request");
        self.inner.command(command).await.map_err(Self::map_error)
    }

    /// Reloads the product list; returns how many products were loaded.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, InventoryError> {
        match self.send(InventoryCommand::Load).await? {
            InventoryReply::Load(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    /// Creates or updates the product in the form.
    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<Product, InventoryError> {
        match self.send(InventoryCommand::Save).await? {
            InventoryReply::Save(product) => Ok(product),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn edit(&self, id: &str) -> Result<Product, InventoryError> {
        match self.send(InventoryCommand::Edit(id.to_string())).await? {
            InventoryReply::Edit(product) => Ok(product),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str, title: &str) -> Result<DeleteOutcome, InventoryError> {
        let command = InventoryCommand::Delete {
            id: id.to_string(),
            title: title.to_string(),
        };
        match self.send(command).await? {
            InventoryReply::Delete(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), InventoryError> {
        match self.send(InventoryCommand::Reset).await? {
            InventoryReply::Reset(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(reply: InventoryReply) -> InventoryError {
    InventoryError::PageCommunication(format!("Unexpected reply: {:?}", reply))
}

#[async_trait]
impl PageHandle<InventoryPage> for InventoryClient {
    type Error = InventoryError;

    fn inner(&self) -> &PageClient<InventoryPage> {
        &self.inner
    }

    fn map_error(e: FormError) -> Self::Error {
        e.downcast::<InventoryError>()
            .unwrap_or_else(|e| InventoryError::PageCommunication(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreError, TransportError};
    use form_framework::mock::{create_mock_client, expect_command};

    #[tokio::test]
    async fn test_store_errors_are_recovered() {
        let (client, mut receiver) = create_mock_client::<InventoryPage>(10);
        let client = InventoryClient::new(client);
        let error = InventoryError::Store(StoreError::Transport(TransportError::server(500, "boom")));

        let expected = error.clone();
        let page = tokio::spawn(async move {
            let (command, respond_to) = expect_command(&mut receiver).await.expect("save command");
            assert_eq!(command, InventoryCommand::Save);
            let _ = respond_to.send(Err(FormError::PageError(Box::new(expected))));
        });

        assert_eq!(client.save().await.unwrap_err(), error);
        page.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_page_maps_to_communication_error() {
        let (client, receiver) = create_mock_client::<InventoryPage>(10);
        drop(receiver);

        let client = InventoryClient::new(client);
        assert_eq!(
            client.load().await.unwrap_err(),
            InventoryError::PageCommunication("Page closed".to_string())
        );
    }
}
