use crate::registration::{RegistrationCommand, RegistrationError, RegistrationPage, RegistrationReply};
use async_trait::async_trait;
use form_framework::{FormError, FormValue, PageClient, PageHandle};
use tracing::{debug, instrument};

/// Client for interacting with the registration page.
#[derive(Clone)]
pub struct RegistrationClient {
    inner: PageClient<RegistrationPage>,
}

impl RegistrationClient {
    pub fn new(inner: PageClient<RegistrationPage>) -> Self {
        Self { inner }
    }

    /// Submits the registration and returns the value that was sent.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<FormValue, RegistrationError> {
        debug!("Sending request");
        match self
            .inner
            .command(RegistrationCommand::Submit)
            .await
            .map_err(Self::map_error)?
        {
            RegistrationReply::Submit(value) => Ok(value),
            other => Err(RegistrationError::PageCommunication(format!("Unexpected reply: {:?}", other))),
        }
    }

    /// Flips password visibility; returns whether it is now shown.
    #[instrument(skip(self))]
    pub async fn toggle_password_visibility(&self) -> Result<bool, RegistrationError> {
        match self
            .inner
            .command(RegistrationCommand::TogglePasswordVisibility)
            .await
            .map_err(Self::map_error)?
        {
            RegistrationReply::TogglePasswordVisibility(shown) => Ok(shown),
            other => Err(RegistrationError::PageCommunication(format!("Unexpected reply: {:?}", other))),
        }
    }
}

#[async_trait]
impl PageHandle<RegistrationPage> for RegistrationClient {
    type Error = RegistrationError;

    fn inner(&self) -> &PageClient<RegistrationPage> {
        &self.inner
    }

    fn map_error(e: FormError) -> Self::Error {
        e.downcast::<RegistrationError>()
            .unwrap_or_else(|e| RegistrationError::PageCommunication(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_framework::mock::MockPage;

    #[tokio::test]
    async fn test_incomplete_registration_is_recovered() {
        let mut mock = MockPage::<RegistrationPage>::new();
        let error = RegistrationError::Incomplete {
            invalid_fields: vec!["Username".to_string()],
        };
        mock.expect_command()
            .return_err(FormError::PageError(Box::new(error.clone())));
        mock.expect_command()
            .return_ok(RegistrationReply::TogglePasswordVisibility(true));

        let client = RegistrationClient::new(mock.client());
        assert_eq!(client.submit().await.unwrap_err(), error);
        assert!(client.toggle_password_visibility().await.unwrap());
        mock.verify();
    }

    #[tokio::test]
    async fn test_teardown_of_stopped_page_is_ok() {
        let mut mock = MockPage::<RegistrationPage>::new();
        mock.expect_teardown();

        let client = RegistrationClient::new(mock.client());
        assert!(client.teardown().await.is_ok());
        mock.verify();
    }
}
