//! Invoice renderer
//!
//! Renders an order into the printable invoice document. Same order and
//! render timestamp in, byte-identical document out.

use tracing::error;

use shared::models::Order;
use shared::money::format_eur;

use super::document::{DOC_WIDTH, DocBuilder, InvoiceDocument, truncate};
use crate::core::config::{BankDetails, StoreInfo};

/// Room reserved on an item line for the amount column
const AMOUNT_COL: usize = 14;

/// Invoice renderer
///
/// Company header and payment instructions come from configuration, never
/// from order data.
#[derive(Clone)]
pub struct InvoiceRenderer {
    store: StoreInfo,
    bank: BankDetails,
    width: usize,
}

impl InvoiceRenderer {
    pub fn new(store: StoreInfo, bank: BankDetails) -> Self {
        Self {
            store,
            bank,
            width: DOC_WIDTH,
        }
    }

    /// Render the invoice for an order
    ///
    /// `rendered_at` is the generation timestamp shown in the header; it is
    /// metadata only and never part of a computed amount. Totals are
    /// recomputed from the stored items; a mismatch with the stored totals is
    /// a data-integrity fault that is logged loudly while the document still
    /// renders.
    pub fn render(&self, order: &Order, rendered_at: i64) -> InvoiceDocument {
        let mut b = DocBuilder::new(self.width);

        self.render_header(&mut b, order, rendered_at);
        self.render_addresses(&mut b, order);
        self.render_items(&mut b, order);
        self.render_totals(&mut b, order);
        self.render_payment_instructions(&mut b, order);

        b.build(rendered_at)
    }

    /// Company header and invoice identity
    fn render_header(&self, b: &mut DocBuilder, order: &Order, rendered_at: i64) {
        b.center(&self.store.name.to_uppercase());
        b.center(&self.store.address);
        b.center(&self.store.city);
        b.center(&format!(
            "VAT {} · {} · {}",
            self.store.vat_id, self.store.email, self.store.phone
        ));
        b.sep_double();
        // The invoice number is the public order reference
        b.line_lr(
            &format!("INVOICE {}", order.order_ref),
            &format_date(rendered_at),
        );
        b.line(&format!("Order placed: {}", format_date(order.created_at)));
        b.sep_single();
    }

    /// Bill-to and ship-to are the same address in this system
    fn render_addresses(&self, b: &mut DocBuilder, order: &Order) {
        let addr = &order.shipping_address;
        b.line("BILL TO / SHIP TO");
        b.line(&addr.full_name());
        b.line(&addr.address);
        b.line(&format!(
            "{} {} ({})",
            addr.postal_code, addr.city, addr.province
        ));
        b.line(&format!("{} · {}", addr.email, addr.phone));
        b.sep_single();
    }

    /// One block per line item: quantity, truncated name, sku, unit price,
    /// line total
    fn render_items(&self, b: &mut DocBuilder, order: &Order) {
        for item in &order.items {
            let name_budget = self.width.saturating_sub(AMOUNT_COL + 8);
            let label = format!("{} x {}", item.quantity, truncate(&item.name, name_budget));
            b.line_lr(&label, &format_eur(item.line_total()));
            b.line(&format!(
                "     SKU {}  @ {} each",
                item.sku,
                format_eur(item.price)
            ));
        }
        b.sep_single();
    }

    /// Totals recomputed from the stored items
    fn render_totals(&self, b: &mut DocBuilder, order: &Order) {
        let subtotal = order.computed_subtotal();
        let total = order.computed_total();

        if subtotal != order.subtotal || total != order.total {
            error!(
                order_ref = %order.order_ref,
                stored_subtotal = order.subtotal,
                computed_subtotal = subtotal,
                stored_total = order.total,
                computed_total = total,
                "Invoice totals disagree with stored order totals"
            );
        }

        b.line_lr("Subtotal", &format_eur(subtotal));
        b.line_lr("Shipping", &format_eur(order.shipping_cost));
        b.line_lr("TOTAL", &format_eur(total));
        b.sep_double();
    }

    /// Static payment instructions from configuration
    fn render_payment_instructions(&self, b: &mut DocBuilder, order: &Order) {
        b.line("PAYMENT BY BANK TRANSFER");
        b.line(&self.bank.account_holder);
        b.line(&self.bank.bank_name);
        b.line(&format!("IBAN {}", self.bank.iban));
        b.line(&format!("BIC  {}", self.bank.bic));
        b.blank();
        b.line(&format!(
            "Use {} as the transfer subject.",
            order.order_ref
        ));
        b.line("Your order ships once the payment is confirmed.");
    }
}

/// Format a millisecond timestamp as `YYYY-MM-DD`
fn format_date(millis: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderItem, OrderStatus, ShippingAddress};

    fn renderer() -> InvoiceRenderer {
        InvoiceRenderer::new(StoreInfo::default(), BankDetails::default())
    }

    fn item(sku: &str, name: &str, price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: format!("p-{sku}"),
            sku: sku.to_string(),
            name: name.to_string(),
            brand: "Acme".to_string(),
            price,
            quantity,
            image: None,
        }
    }

    fn test_order(items: Vec<OrderItem>, shipping_cost: i64) -> Order {
        let subtotal: i64 = items.iter().map(OrderItem::line_total).sum();
        Order {
            id: "o-1".to_string(),
            order_ref: "XT-TEST-0001".to_string(),
            user_id: "u-1".to_string(),
            user_email: "ana@example.com".to_string(),
            items,
            subtotal,
            shipping_cost,
            total: subtotal + shipping_cost,
            status: OrderStatus::PendingPayment,
            shipping_address: ShippingAddress {
                first_name: "Ana".to_string(),
                last_name: "Torres".to_string(),
                email: "ana@example.com".to_string(),
                phone: "+34 600 000 000".to_string(),
                address: "Calle Mayor 1".to_string(),
                city: "Madrid".to_string(),
                province: "Madrid".to_string(),
                postal_code: "28001".to_string(),
            },
            created_at: 1_722_470_400_000,
            updated_at: 1_722_470_400_000,
            paid_at: None,
            ordered_at: None,
            shipped_at: None,
            delivered_at: None,
            tracking_number: None,
            tracking_url: None,
            courier_name: None,
            supplier_order_ref: None,
            notes: None,
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let order = test_order(vec![item("A", "GPU", 49999, 1)], 499);
        let rendered_at = 1_722_556_800_000;

        let first = renderer().render(&order, rendered_at);
        let second = renderer().render(&order, rendered_at);
        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn totals_match_the_order_and_its_items() {
        let order = test_order(
            vec![item("A", "GPU", 1000, 2), item("B", "PSU", 500, 1)],
            0,
        );
        let doc = renderer().render(&order, 0);
        let text = doc.to_text();

        // Recomputed independently from the items
        let expected_subtotal: i64 = order.items.iter().map(OrderItem::line_total).sum();
        assert_eq!(expected_subtotal, order.subtotal);
        assert!(text.contains(&format_eur(expected_subtotal)));
        assert!(text.contains(&format_eur(order.total)));
        assert!(text.contains("INVOICE XT-TEST-0001"));
    }

    #[test]
    fn carries_header_addresses_and_payment_instructions() {
        let order = test_order(vec![item("A", "GPU", 1000, 1)], 0);
        let doc = renderer().render(&order, 0);
        let text = doc.to_text();

        assert!(text.contains(&StoreInfo::default().name.to_uppercase()));
        assert!(text.contains("BILL TO / SHIP TO"));
        assert!(text.contains("Ana Torres"));
        assert!(text.contains(&BankDetails::default().iban));
        assert!(text.contains("Use XT-TEST-0001 as the transfer subject."));
    }

    #[test]
    fn long_item_names_are_truncated() {
        let long_name = "Ultra Mega Extreme Gaming Graphics Card Limited Edition With RGB \
                         And A Very Long Marketing Name";
        let order = test_order(vec![item("A", long_name, 1000, 1)], 0);
        let doc = renderer().render(&order, 0);

        assert!(!doc.to_text().contains(long_name));
        assert!(doc.to_text().contains('…'));
    }

    #[test]
    fn a_mismatched_stored_total_still_renders() {
        let mut order = test_order(vec![item("A", "GPU", 1000, 1)], 0);
        order.total = 9_999_999;

        let doc = renderer().render(&order, 0);
        // Recomputed values are what gets printed
        assert!(doc.to_text().contains(&format_eur(1000)));
    }

    #[test]
    fn many_items_paginate() {
        let items: Vec<OrderItem> = (0..60)
            .map(|i| item(&format!("SKU-{i}"), &format!("Component {i}"), 100, 1))
            .collect();
        let order = test_order(items, 0);
        let doc = renderer().render(&order, 0);
        assert!(doc.pages().len() > 1);
    }
}
