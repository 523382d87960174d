use crate::quotation::{Quote, QuoteCommand, QuoteError, QuoteReply, QuotationPage};
use async_trait::async_trait;
use form_framework::{FormError, PageClient, PageHandle};
use tracing::{debug, instrument};

/// Client for interacting with the quotation page.
#[derive(Clone)]
pub struct QuotationClient {
    inner: PageClient<QuotationPage>,
}

impl QuotationClient {
    pub fn new(inner: PageClient<QuotationPage>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<Quote, QuoteError> {
        debug!("Sending request");
        match self.inner.command(QuoteCommand::Submit).await.map_err(Self::map_error)? {
            QuoteReply::Submit(quote) => Ok(quote),
            other => Err(QuoteError::PageCommunication(format!("Unexpected reply: {:?}", other))),
        }
    }

    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), QuoteError> {
        match self.inner.command(QuoteCommand::Reset).await.map_err(Self::map_error)? {
            QuoteReply::Reset(()) => Ok(()),
            other => Err(QuoteError::PageCommunication(format!("Unexpected reply: {:?}", other))),
        }
    }
}

#[async_trait]
impl PageHandle<QuotationPage> for QuotationClient {
    type Error = QuoteError;

    fn inner(&self) -> &PageClient<QuotationPage> {
        &self.inner
    }

    fn map_error(e: FormError) -> Self::Error {
        e.downcast::<QuoteError>()
            .unwrap_or_else(|e| QuoteError::PageCommunication(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_framework::mock::MockPage;
    use form_framework::FormValue;

    #[tokio::test]
    async fn test_submit_unwraps_quote() {
        let mut mock = MockPage::<QuotationPage>::new();
        let quote = Quote {
            value: FormValue::new(),
            total: 270.0,
        };
        mock.expect_command().return_ok(QuoteReply::Submit(quote.clone()));

        let client = QuotationClient::new(mock.client());
        assert_eq!(client.submit().await.unwrap(), quote);
        mock.verify();
    }

    #[tokio::test]
    async fn test_page_errors_are_recovered() {
        let mut mock = MockPage::<QuotationPage>::new();
        mock.expect_command()
            .return_err(FormError::PageError(Box::new(QuoteError::InvalidForm)));
        mock.expect_input_on("product")
            .return_err(FormError::UnknownField("product".to_string()));

        let client = QuotationClient::new(mock.client());
        assert_eq!(client.submit().await.unwrap_err(), QuoteError::InvalidForm);
        assert_eq!(
            client.input("product", "Desk".into()).await.unwrap_err(),
            QuoteError::PageCommunication("Unknown field: product".to_string())
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_reply_is_reported() {
        let mut mock = MockPage::<QuotationPage>::new();
        mock.expect_command().return_ok(QuoteReply::Reset(()));

        let client = QuotationClient::new(mock.client());
        assert!(matches!(
            client.submit().await,
            Err(QuoteError::PageCommunication(_))
        ));
    }
}
