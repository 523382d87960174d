use super::route::Route;
use crate::clients::{InventoryClient, QuotationClient, RegistrationClient};
use crate::inventory::{InventoryContext, InventoryError};
use crate::prompt::Prompt;
use crate::store::ProductStore;
use form_framework::PageHandle;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LifecycleError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Teardown of {route} failed: {message}")]
    Teardown { route: Route, message: String },

    #[error("Page task failed: {0}")]
    TaskFailed(String),
}

enum OpenPage {
    Quotation(QuotationClient),
    Registration(RegistrationClient),
    Inventory(InventoryClient),
}

impl OpenPage {
    fn route(&self) -> Route {
        match self {
            OpenPage::Quotation(_) => Route::Quotation,
            OpenPage::Registration(_) => Route::Registration,
            OpenPage::Inventory(_) => Route::Inventory,
        }
    }

    async fn teardown(&self) -> Result<(), String> {
        match self {
            OpenPage::Quotation(client) => client.teardown().await.map_err(|e| e.to_string()),
            OpenPage::Registration(client) => client.teardown().await.map_err(|e| e.to_string()),
            OpenPage::Inventory(client) => client.teardown().await.map_err(|e| e.to_string()),
        }
    }
}

/// The running front end: at most one page open at a time.
///
/// `CatalogSystem` is responsible for:
/// - **Navigation**: opening a route's page on first visit and tearing down the
///   page that was open before
/// - **Dependency Wiring**: handing the product store and the prompt to the
///   pages that need them
///
/// # Example
///
/// ```ignore
/// let mut system = CatalogSystem::new(store, prompt);
///
/// system.navigate(Route::Quotation).await?;
/// let quotation = system.quotation().unwrap();
/// quotation.input("quantity", 3.0.into()).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    store: ProductStore,
    prompt: Arc<dyn Prompt>,
    current: Option<(OpenPage, JoinHandle<()>)>,
}

impl CatalogSystem {
    pub fn new(store: ProductStore, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            store,
            prompt,
            current: None,
        }
    }

    pub fn current_route(&self) -> Option<Route> {
        self.current.as_ref().map(|(page, _)| page.route())
    }

    /// Opens `route`, tearing down the page that was open. Navigating to the
    /// route already open does nothing.
    pub async fn navigate(&mut self, route: Route) -> Result<(), LifecycleError> {
        if self.current_route() == Some(route) {
            return Ok(());
        }
        self.close().await?;

        info!(%route, "Opening page");
        let opened = match route {
            Route::Quotation => {
                let (actor, client) = crate::quotation::new();
                let handle = tokio::spawn(actor.run(self.prompt.clone()));
                (OpenPage::Quotation(client), handle)
            }
            Route::Registration => {
                let (actor, client) = crate::registration::new();
                let handle = tokio::spawn(actor.run(self.prompt.clone()));
                (OpenPage::Registration(client), handle)
            }
            Route::Inventory => {
                let (actor, client) = crate::inventory::new()?;
                let context = InventoryContext::new(self.store.clone(), self.prompt.clone());
                let handle = tokio::spawn(actor.run(context));
                (OpenPage::Inventory(client), handle)
            }
        };
        self.current = Some(opened);
        Ok(())
    }

    pub fn quotation(&self) -> Option<&QuotationClient> {
        match &self.current {
            Some((OpenPage::Quotation(client), _)) => Some(client),
            _ => None,
        }
    }

    pub fn registration(&self) -> Option<&RegistrationClient> {
        match &self.current {
            Some((OpenPage::Registration(client), _)) => Some(client),
            _ => None,
        }
    }

    pub fn inventory(&self) -> Option<&InventoryClient> {
        match &self.current {
            Some((OpenPage::Inventory(client), _)) => Some(client),
            _ => None,
        }
    }

    /// Tears down the open page and waits for its loop to finish.
    pub async fn close(&mut self) -> Result<(), LifecycleError> {
        let Some((page, handle)) = self.current.take() else {
            return Ok(());
        };
        let route = page.route();
        page.teardown()
            .await
            .map_err(|message| LifecycleError::Teardown { route, message })?;
        drop(page);

        if let Err(e) = handle.await {
            error!(%route, "Page task failed: {:?}", e);
            return Err(LifecycleError::TaskFailed(format!("{:?}", e)));
        }
        info!(%route, "Page closed");
        Ok(())
    }

    /// Gracefully shuts down the open page, if any.
    pub async fn shutdown(mut self) -> Result<(), LifecycleError> {
        info!("Shutting down system...");
        self.close().await?;
        info!("System shutdown complete.");
        Ok(())
    }
}
