//! Payment authorization bridge.
//!
//! One job: turn a decimal price into an ephemeral authorization handle
//! (`clientSecret`) the consumer uses to complete the charge. Nothing here
//! links the authorization to a booking, verifies settlement, or retries;
//! those gaps are deliberate and documented in DESIGN.md.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use tracing::{debug, warn};

use haven_core::{Money, PaymentAuthorization, SETTLEMENT_CURRENCY};

use crate::error::{ApiError, ApiResult};

/// Boxed future alias for dyn-compatible async trait methods.
type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

/// Abstraction over the payment processor.
///
/// The conversion contract: `price` is a decimal major-unit amount; the
/// authorization is for `round(price * 100)` minor units in the fixed
/// settlement currency, card method only.
pub trait PaymentGateway: Send + Sync {
    /// Request authorization to charge `price` (major units).
    fn create_authorization(&self, price: f64) -> GatewayFuture<'_, PaymentAuthorization>;
}

// =============================================================================
// Stripe Gateway
// =============================================================================

/// Shape of a successful payment-intent response.
#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    client_secret: String,
}

/// Shape of a processor error response.
#[derive(Debug, Deserialize)]
struct ProcessorErrorResponse {
    error: ProcessorErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProcessorErrorBody {
    message: String,
}

/// Stripe-backed payment gateway.
///
/// POSTs `/v1/payment_intents` form-encoded with the secret key as bearer
/// credential. Processor rejection and network failure both surface as
/// `PaymentBridge` carrying the processor's message.
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    /// Create a new gateway against the given API base URL.
    pub fn new(secret_key: String, api_base: String) -> Self {
        StripeGateway {
            client: reqwest::Client::new(),
            secret_key,
            api_base,
        }
    }

    async fn request_intent(&self, amount: Money) -> ApiResult<PaymentAuthorization> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        debug!(amount = amount.cents(), "Requesting payment authorization");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.cents().to_string()),
                ("currency", SETTLEMENT_CURRENCY.to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::PaymentBridge(format!("Processor unreachable: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::PaymentBridge(format!("Processor response unreadable: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProcessorErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!(%status, %message, "Payment authorization refused");
            return Err(ApiError::PaymentBridge(message));
        }

        let intent: PaymentIntentResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::PaymentBridge(format!("Malformed processor response: {e}")))?;

        Ok(PaymentAuthorization {
            amount_minor_units: amount.cents(),
            currency: SETTLEMENT_CURRENCY.to_string(),
            client_secret: intent.client_secret,
        })
    }
}

impl PaymentGateway for StripeGateway {
    fn create_authorization(&self, price: f64) -> GatewayFuture<'_, PaymentAuthorization> {
        Box::pin(async move {
            haven_core::validation::validate_authorization_price(price)?;
            let amount = Money::from_decimal(price);
            self.request_intent(amount).await
        })
    }
}

// =============================================================================
// Mock Gateway
// =============================================================================

/// In-process gateway for tests and local development.
///
/// Returns a deterministic client secret derived from the amount, or the
/// configured failure.
pub struct MockGateway {
    fail_with: Option<String>,
}

impl MockGateway {
    /// A gateway that always authorizes.
    pub fn authorizing() -> Self {
        MockGateway { fail_with: None }
    }

    /// A gateway that refuses every authorization with the given message.
    pub fn refusing(message: impl Into<String>) -> Self {
        MockGateway {
            fail_with: Some(message.into()),
        }
    }
}

impl PaymentGateway for MockGateway {
    fn create_authorization(&self, price: f64) -> GatewayFuture<'_, PaymentAuthorization> {
        Box::pin(async move {
            haven_core::validation::validate_authorization_price(price)?;

            if let Some(message) = &self.fail_with {
                return Err(ApiError::PaymentBridge(message.clone()));
            }

            let amount = Money::from_decimal(price);
            Ok(PaymentAuthorization {
                amount_minor_units: amount.cents(),
                currency: SETTLEMENT_CURRENCY.to_string(),
                client_secret: format!("pi_mock_secret_{}", amount.cents()),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_minor_unit_conversion() {
        let gateway = MockGateway::authorizing();

        let auth = gateway.create_authorization(129.50).await.unwrap();
        assert_eq!(auth.amount_minor_units, 12950);
        assert_eq!(auth.currency, "usd");

        // Float prices round, never truncate
        let auth = gateway.create_authorization(10.005).await.unwrap();
        assert_eq!(auth.amount_minor_units, 1001);
    }

    #[tokio::test]
    async fn test_rejects_non_positive_price() {
        let gateway = MockGateway::authorizing();

        assert!(matches!(
            gateway.create_authorization(0.0).await.unwrap_err(),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            gateway.create_authorization(-5.0).await.unwrap_err(),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            gateway.create_authorization(f64::NAN).await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_processor_refusal_surfaces_message() {
        let gateway = MockGateway::refusing("card declined");

        let err = gateway.create_authorization(50.0).await.unwrap_err();
        match err {
            ApiError::PaymentBridge(message) => assert_eq!(message, "card declined"),
            other => panic!("expected PaymentBridge, got {other:?}"),
        }
    }
}
