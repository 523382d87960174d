use catalog_forms::clients::{QuotationClient, RegistrationClient};
use catalog_forms::lifecycle::{CatalogSystem, Route};
use catalog_forms::mock::{MockTransport, RecordingPrompt};
use catalog_forms::prompt::Prompt;
use catalog_forms::quotation::QuoteError;
use catalog_forms::registration::RegistrationError;
use catalog_forms::store::{Method, ProductStore};
use form_framework::{FieldValue, FormStatus, PageHandle};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

fn start_quotation(prompt: &RecordingPrompt) -> (QuotationClient, JoinHandle<()>) {
    let (actor, client) = catalog_forms::quotation::new();
    let context: Arc<dyn Prompt> = Arc::new(prompt.clone());
    (client, tokio::spawn(actor.run(context)))
}

fn start_registration(prompt: &RecordingPrompt) -> (RegistrationClient, JoinHandle<()>) {
    let (actor, client) = catalog_forms::registration::new();
    let context: Arc<dyn Prompt> = Arc::new(prompt.clone());
    (client, tokio::spawn(actor.run(context)))
}

async fn fill(client: &RegistrationClient, fields: &[(&str, FieldValue)]) {
    for (field, value) in fields {
        client.input(field, value.clone()).await.expect("input accepted");
        client.blur(field).await.expect("blur accepted");
    }
}

fn valid_registration() -> Vec<(&'static str, FieldValue)> {
    vec![
        ("username", "alice".into()),
        ("email", "alice@example.com".into()),
        ("password", "Secret1!".into()),
        ("confirmPassword", "Secret1!".into()),
        ("age", "30".into()),
        ("termsAccepted", true.into()),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_discount_applies_after_quiet_period() {
    let prompt = RecordingPrompt::new();
    let (client, handle) = start_quotation(&prompt);

    client.input("quantity", 3.0.into()).await.unwrap();
    client.input("unitPrice", 100.0.into()).await.unwrap();
    client.input("discountCode", "DESC10".into()).await.unwrap();

    let view = client.view().await.unwrap();
    assert_eq!(view.subtotal, 300.0);
    assert_eq!(view.total, 300.0);
    assert_eq!(view.discount_amount, 0.0);

    tokio::time::sleep(Duration::from_millis(499)).await;
    assert_eq!(client.view().await.unwrap().total, 300.0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let view = client.view().await.unwrap();
    assert_eq!(view.discount_amount, 30.0);
    assert_eq!(view.total, 270.0);

    client.teardown().await.unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_only_last_discount_code_of_a_burst_applies() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_quotation(&prompt);

    client.input("quantity", 1.0.into()).await.unwrap();
    client.input("unitPrice", 200.0.into()).await.unwrap();
    for code in ["D", "DE", "DESC", "DESC2", "DESC20"] {
        client.input("discountCode", code.into()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(500)).await;

    let view = client.view().await.unwrap();
    assert_eq!(view.discount_amount, 40.0);
    assert_eq!(view.total, 160.0);
}

#[tokio::test(start_paused = true)]
async fn test_total_follows_inputs_without_code() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_quotation(&prompt);

    assert_eq!(client.view().await.unwrap().total, 0.0);
    client.input("unitPrice", "12.5".into()).await.unwrap();
    assert_eq!(client.view().await.unwrap().total, 12.5);
    client.input("quantity", "".into()).await.unwrap();
    assert_eq!(client.view().await.unwrap().total, 0.0);
    client.input("quantity", "4".into()).await.unwrap();
    assert_eq!(client.view().await.unwrap().total, 50.0);
}

#[tokio::test]
async fn test_invalid_quote_is_rejected() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_quotation(&prompt);

    client.input("product", "Desk".into()).await.unwrap();
    assert_eq!(client.submit().await.unwrap_err(), QuoteError::InvalidForm);
    assert_eq!(prompt.alerts(), vec!["Please fill in all fields correctly"]);
    assert_eq!(client.view().await.unwrap().value.text("product"), "Desk");
}

#[tokio::test]
async fn test_fractional_quantity_is_rejected() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_quotation(&prompt);

    client.input("product", "Desk".into()).await.unwrap();
    client.input("unitPrice", 50.0.into()).await.unwrap();
    client.input("email", "buyer@example.com".into()).await.unwrap();
    client.input("quantity", 2.5.into()).await.unwrap();
    assert_eq!(client.view().await.unwrap().status, FormStatus::Invalid);
    assert_eq!(client.submit().await.unwrap_err(), QuoteError::InvalidForm);

    client.input("quantity", 2.0.into()).await.unwrap();
    assert_eq!(client.view().await.unwrap().status, FormStatus::Valid);
    let quote = client.submit().await.unwrap();
    assert_eq!(quote.total, 100.0);
}

#[tokio::test(start_paused = true)]
async fn test_submitted_quote_resets_form() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_quotation(&prompt);

    client.input("product", "Desk".into()).await.unwrap();
    client.input("quantity", 2.0.into()).await.unwrap();
    client.input("unitPrice", 50.0.into()).await.unwrap();
    client.input("email", "buyer@example.com".into()).await.unwrap();
    client.input("discountCode", "DESC20".into()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;

    let quote = client.submit().await.unwrap();
    assert_eq!(quote.total, 80.0);
    assert_eq!(quote.value.text("product"), "Desk");
    assert_eq!(prompt.last_alert().as_deref(), Some("Quote sent successfully!"));

    let view = client.view().await.unwrap();
    assert_eq!(view.total, 0.0);
    assert_eq!(view.discount_amount, 0.0);
    assert_eq!(view.value.get("quantity"), &FieldValue::Number(1.0));
    assert_eq!(view.value.text("product"), "");
    assert_eq!(view.status, FormStatus::Invalid);
}

#[tokio::test]
async fn test_username_length_drives_status() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_registration(&prompt);

    client.input("username", "ab".into()).await.unwrap();
    let view = client.view().await.unwrap();
    assert_eq!(view.field_statuses["username"], FormStatus::Invalid);
    assert_eq!(view.field_errors["username"], vec!["minlength"]);

    client.input("username", "abcd".into()).await.unwrap();
    let view = client.view().await.unwrap();
    assert_eq!(view.field_statuses["username"], FormStatus::Valid);
    assert!(!view.field_errors.contains_key("username"));
}

#[tokio::test]
async fn test_invalid_names_track_touched_fields() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_registration(&prompt);

    let view = client.view().await.unwrap();
    assert_eq!(view.status, FormStatus::Invalid);
    assert_eq!(view.message, "Some fields have errors - please review");
    assert!(view.invalid_field_names.is_empty());

    // Touching alone refreshes nothing; the next status notification does.
    client.blur("username").await.unwrap();
    client.input("email", "not-an-email".into()).await.unwrap();
    client.blur("email").await.unwrap();
    client.input("age", "17".into()).await.unwrap();

    let view = client.view().await.unwrap();
    assert_eq!(view.invalid_field_names, vec!["Username", "Email"]);
}

#[tokio::test]
async fn test_incomplete_registration_marks_everything_touched() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_registration(&prompt);

    client.input("username", "alice".into()).await.unwrap();
    let error = client.submit().await.unwrap_err();
    assert_eq!(
        error,
        RegistrationError::Incomplete {
            invalid_fields: vec![
                "Email".to_string(),
                "Password".to_string(),
                "Confirm password".to_string(),
                "Age".to_string(),
                "Terms and conditions".to_string(),
            ],
        }
    );
    assert_eq!(prompt.alerts(), vec!["Please fill in all fields correctly"]);
    assert_eq!(client.view().await.unwrap().invalid_field_names.len(), 5);
}

#[tokio::test]
async fn test_password_mismatch_blocks_submit() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_registration(&prompt);

    let mut fields = valid_registration();
    fields[3] = ("confirmPassword", "Secret1?".into());
    fill(&client, &fields).await;

    let view = client.view().await.unwrap();
    assert_eq!(view.status, FormStatus::Invalid);
    assert_eq!(view.group_errors, vec!["passwordMismatch"]);
    // Every field passes on its own.
    assert!(view.invalid_field_names.is_empty());
    assert!(client.submit().await.is_err());

    client.input("confirmPassword", "Secret1!".into()).await.unwrap();
    let view = client.view().await.unwrap();
    assert_eq!(view.status, FormStatus::Valid);
    assert!(view.group_errors.is_empty());
}

#[tokio::test]
async fn test_successful_registration_resets() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_registration(&prompt);

    fill(&client, &valid_registration()).await;
    let view = client.view().await.unwrap();
    assert_eq!(view.status, FormStatus::Valid);
    assert_eq!(view.message, "Form complete and valid - ready to submit");

    let submitted = client.submit().await.unwrap();
    assert_eq!(submitted.text("username"), "alice");
    assert_eq!(prompt.last_alert().as_deref(), Some("Registration successful!"));

    let view = client.view().await.unwrap();
    assert_eq!(view.status, FormStatus::Invalid);
    assert_eq!(view.value.text("username"), "");
    assert_eq!(view.value.get("termsAccepted"), &FieldValue::Bool(false));
    assert!(view.invalid_field_names.is_empty());
}

#[tokio::test]
async fn test_weak_password_is_flagged() {
    let prompt = RecordingPrompt::new();
    let (client, _handle) = start_registration(&prompt);

    client.input("password", "password1".into()).await.unwrap();
    let view = client.view().await.unwrap();
    assert_eq!(view.field_errors["password"], vec!["weakPassword"]);

    assert!(client.toggle_password_visibility().await.unwrap());
    assert!(client.view().await.unwrap().show_password);
}

#[tokio::test]
async fn test_navigation_tears_down_previous_page() {
    let mut transport = MockTransport::new();
    transport
        .expect(Method::Get, "/products")
        .return_ok(json!({ "products": [{ "id": "1", "title": "Desk", "price": "100", "discount": "0", "stock": "2" }] }));

    let prompt = RecordingPrompt::new();
    let store = ProductStore::new(Arc::new(transport.clone()));
    let mut system = CatalogSystem::new(store, Arc::new(prompt.clone()));
    assert_eq!(system.current_route(), None);

    system.navigate(Route::Quotation).await.unwrap();
    let quotation = system.quotation().unwrap().clone();
    quotation.input("quantity", 2.0.into()).await.unwrap();

    system.navigate(Route::Registration).await.unwrap();
    assert_eq!(system.current_route(), Some(Route::Registration));
    assert!(system.quotation().is_none());
    assert!(quotation.view().await.is_err());

    // Navigating to the open route keeps the page.
    let registration = system.registration().unwrap().clone();
    system.navigate(Route::Registration).await.unwrap();
    assert!(registration.view().await.is_ok());

    system.navigate(Route::Inventory).await.unwrap();
    let view = system.inventory().unwrap().view().await.unwrap();
    assert_eq!(view.stats.total_products, 1);
    assert_eq!(view.stats.total_inventory_value, 200.0);

    system.shutdown().await.unwrap();
    transport.verify();
}
