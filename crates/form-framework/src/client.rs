//! # Generic Page Client
//!
//! This module defines the generic client for communicating with page loops.

use crate::error::FormError;
use crate::message::PageRequest;
use crate::page::FormPage;
use crate::value::FieldValue;
use tokio::sync::{mpsc, oneshot};

/// ## PageClient
///
/// The `PageClient<P>` is the async, type-safe handle to a running
/// [`PageActor<P>`](crate::runtime::PageActor). It forwards requests over a Tokio
/// mpsc channel and awaits the reply on a oneshot channel. Cloning only clones
/// the sender. When the last clone is dropped the page tears itself down.
pub struct PageClient<P: FormPage> {
    sender: mpsc::Sender<PageRequest<P>>,
}

impl<P: FormPage> Clone for PageClient<P> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<P: FormPage> PageClient<P> {
    pub fn new(sender: mpsc::Sender<PageRequest<P>>) -> Self {
        Self { sender }
    }

    pub async fn input(
        &self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PageRequest::Input {
                field: field.into(),
                value: value.into(),
                respond_to,
            })
            .await
            .map_err(|_| FormError::PageClosed)?;
        response.await.map_err(|_| FormError::PageDropped)?
    }

    pub async fn blur(&self, field: impl Into<String>) -> Result<(), FormError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PageRequest::Blur {
                field: field.into(),
                respond_to,
            })
            .await
            .map_err(|_| FormError::PageClosed)?;
        response.await.map_err(|_| FormError::PageDropped)?
    }

    pub async fn command(&self, command: P::Command) -> Result<P::Reply, FormError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PageRequest::Command {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FormError::PageClosed)?;
        response.await.map_err(|_| FormError::PageDropped)?
    }

    pub async fn view(&self) -> Result<P::View, FormError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PageRequest::View { respond_to })
            .await
            .map_err(|_| FormError::PageClosed)?;
        response.await.map_err(|_| FormError::PageDropped)?
    }

    pub async fn teardown(&self) -> Result<(), FormError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PageRequest::Teardown { respond_to })
            .await
            .map_err(|_| FormError::PageClosed)?;
        response.await.map_err(|_| FormError::PageDropped)?
    }

    /// `true` once the page loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
