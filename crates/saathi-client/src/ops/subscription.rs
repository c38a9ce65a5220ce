use std::path::Path;

use serde_json::json;
use tracing::{info, warn};

use saathi_shared::error::{ApiError, Result};
use saathi_store::subscription::SubscriptionAction;
use saathi_store::{Action, Order, Plan};

use crate::payment::{CheckoutOrder, GatewayReceipt, PaymentGateway, ReceiptWriter};
use crate::SaathiClient;

impl SaathiClient {
    pub async fn fetch_plans(&self) -> Result<Vec<Plan>> {
        self.dispatch(Action::Subscription(SubscriptionAction::Pending));

        match self
            .api()
            .get::<Vec<Plan>>("/subscription/plans", "Failed to load plans")
            .await
        {
            Ok(plans) => {
                self.dispatch(Action::Subscription(SubscriptionAction::PlansLoaded(
                    plans.clone(),
                )));
                Ok(plans)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Subscription(SubscriptionAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    pub async fn create_order(&self, plan_id: &str) -> Result<Order> {
        self.dispatch(Action::Subscription(SubscriptionAction::Pending));
        let body = json!({ "planId": plan_id });

        match self
            .api()
            .post::<Order>("/subscription/orders", &body, "Failed to create order")
            .await
        {
            Ok(order) => {
                info!(order = %order.id, plan = plan_id, "Order created");
                self.dispatch(Action::Subscription(SubscriptionAction::OrderCreated(
                    order.clone(),
                )));
                Ok(order)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Subscription(SubscriptionAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    /// Hands the active order to the hosted checkout, then confirms the
    /// payment with the backend. A gateway failure marks the order failed
    /// locally; nothing is rolled back server-side — the order simply stays
    /// unpaid.
    pub async fn launch_checkout(&self, gateway: &dyn PaymentGateway) -> Result<Order> {
        let descriptor = {
            let state = self
                .store()
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let Some(ref order) = state.subscription.order else {
                return Err(ApiError::Validation("No order to pay for".into()));
            };
            let plan_name = state
                .subscription
                .plans
                .iter()
                .find(|p| p.id == order.plan_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| order.plan_id.clone());
            CheckoutOrder {
                order_id: order.id.clone(),
                amount: order.amount,
                currency: order.currency.clone(),
                description: format!("Saathi {plan_name} subscription"),
            }
        };

        let receipt = match gateway.checkout(&descriptor).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(order = %descriptor.order_id, error = %e, "Checkout did not complete");
                self.dispatch(Action::Subscription(SubscriptionAction::PaymentFailed(
                    e.to_string(),
                )));
                return Err(ApiError::Api(e.to_string()));
            }
        };

        self.confirm_payment(&receipt).await
    }

    /// Reports the gateway receipt for the active order back to the
    /// backend, which verifies the signature and activates the plan.
    pub async fn confirm_payment(&self, receipt: &GatewayReceipt) -> Result<Order> {
        let order_id = {
            let state = self
                .store()
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            match state.subscription.order {
                Some(ref order) => order.id.clone(),
                None => return Err(ApiError::Validation("No order to confirm".into())),
            }
        };

        let body = json!({
            "paymentId": receipt.payment_id,
            "signature": receipt.signature,
        });
        let path = format!("/subscription/orders/{order_id}/confirm");

        match self
            .api()
            .post::<Order>(&path, &body, "Failed to confirm payment")
            .await
        {
            Ok(order) => {
                info!(order = %order.id, "Payment confirmed");
                self.dispatch(Action::Subscription(SubscriptionAction::PaymentConfirmed(
                    order.clone(),
                )));
                Ok(order)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Subscription(SubscriptionAction::PaymentFailed(e.to_string())),
                );
                Err(e)
            }
        }
    }

    /// Writes a receipt for the paid order into `dir`. Synchronous; no
    /// network round-trip.
    pub fn download_receipt(&self, writer: &dyn ReceiptWriter, dir: &Path) -> Result<()> {
        let (order, user) = {
            let state = self
                .store()
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let Some(order) = state.subscription.order.clone() else {
                return Err(ApiError::Validation("No order to print".into()));
            };
            let Some(user) = state.auth.session.user().cloned() else {
                return Err(ApiError::Unauthorized);
            };
            (order, user)
        };

        let path = writer
            .write_receipt(&order, &user, dir)
            .map_err(|e| ApiError::Io(e.to_string()))?;

        info!(path = %path.display(), "Receipt written");
        self.dispatch(Action::Subscription(SubscriptionAction::ReceiptSaved(path)));
        Ok(())
    }
}
