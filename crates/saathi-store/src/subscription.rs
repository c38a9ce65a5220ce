//! Subscription slice: plans, the active order, and payment outcomes.

use std::path::PathBuf;

use crate::models::{Order, PaymentStatus, Plan};

#[derive(Debug, Default)]
pub struct SubscriptionState {
    pub plans: Vec<Plan>,
    pub order: Option<Order>,
    /// Where the last receipt was written, if one was generated.
    pub receipt_path: Option<PathBuf>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SubscriptionAction {
    Pending,
    PlansLoaded(Vec<Plan>),
    OrderCreated(Order),
    /// The gateway callback and the confirm call both succeeded.
    PaymentConfirmed(Order),
    PaymentFailed(String),
    ReceiptSaved(PathBuf),
    Rejected(String),
}

pub fn reduce(state: &mut SubscriptionState, action: SubscriptionAction) {
    match action {
        SubscriptionAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        SubscriptionAction::PlansLoaded(plans) => {
            state.loading = false;
            state.plans = plans;
        }
        SubscriptionAction::OrderCreated(order) => {
            state.loading = false;
            state.order = Some(order);
            state.receipt_path = None;
        }
        SubscriptionAction::PaymentConfirmed(order) => {
            state.loading = false;
            state.order = Some(order);
        }
        SubscriptionAction::PaymentFailed(message) => {
            state.loading = false;
            if let Some(ref mut order) = state.order {
                order.status = PaymentStatus::Failed;
            }
            state.error = Some(message);
        }
        SubscriptionAction::ReceiptSaved(path) => {
            state.receipt_path = Some(path);
        }
        SubscriptionAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}
