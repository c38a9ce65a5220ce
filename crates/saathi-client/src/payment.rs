//! Seams to the external payment collaborators: the third-party hosted
//! checkout and the receipt generator.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use saathi_shared::types::OrderId;
use saathi_store::{Order, UserAccount};

/// The order descriptor handed to the hosted checkout.
#[derive(Debug, Clone)]
pub struct CheckoutOrder {
    pub order_id: OrderId,
    pub amount: f64,
    pub currency: String,
    pub description: String,
}

/// What the gateway hands back on success; forwarded verbatim to the
/// confirm endpoint.
#[derive(Debug, Clone)]
pub struct GatewayReceipt {
    pub payment_id: String,
    pub signature: String,
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Payment cancelled")]
    Cancelled,

    #[error("Payment failed: {0}")]
    Failed(String),
}

/// The third-party hosted checkout. Production wires the gateway SDK
/// behind this; the operation only sees the resolved receipt or the
/// failure.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn checkout(&self, order: &CheckoutOrder) -> Result<GatewayReceipt, PaymentError>;
}

/// Produces a downloadable receipt with no network round-trip.
pub trait ReceiptWriter: Send + Sync {
    fn write_receipt(&self, order: &Order, user: &UserAccount, dir: &Path)
        -> io::Result<PathBuf>;
}

/// Plain-text receipt, one file per order.
pub struct TextReceiptWriter;

impl ReceiptWriter for TextReceiptWriter {
    fn write_receipt(
        &self,
        order: &Order,
        user: &UserAccount,
        dir: &Path,
    ) -> io::Result<PathBuf> {
        let path = dir.join(format!("receipt-{}.txt", order.id));
        let body = format!(
            "Saathi subscription receipt\n\n\
             Order:     {}\n\
             Plan:      {}\n\
             Billed to: {} <{}>\n\
             Amount:    {:.2} {}\n\
             Date:      {}\n",
            order.id,
            order.plan_id,
            user.full_name,
            user.email,
            order.amount,
            order.currency,
            order.created_at.to_rfc3339(),
        );
        std::fs::write(&path, body)?;
        Ok(path)
    }
}
