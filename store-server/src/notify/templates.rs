//! Email templates
//!
//! Pure content builders: order/quote data in, subject + text + HTML out.
//! Customer-supplied strings are escaped before they reach the HTML parts.

use shared::models::Order;
use shared::money::format_eur;
use shared::request::QuoteRequest;

use crate::core::config::BankDetails;

/// Rendered email content
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Customer order confirmation: items, total, bank details, reference
pub fn order_confirmation(order: &Order, bank: &BankDetails) -> EmailContent {
    let subject = format!("Your XTech Components order {}", order.order_ref);

    let mut text = String::new();
    text.push_str(&format!(
        "Thank you for your order, {}!\n\nOrder reference: {}\n\n",
        order.shipping_address.first_name, order.order_ref
    ));
    text.push_str(&items_text(order));
    text.push_str(&format!(
        "\nSubtotal: {}\nShipping: {}\nTotal: {}\n",
        format_eur(order.subtotal),
        format_eur(order.shipping_cost),
        format_eur(order.total)
    ));
    text.push_str(&format!(
        "\nPlease transfer the total to:\n  {}\n  {}\n  IBAN: {}\n  BIC: {}\n\n\
         Use {} as the transfer subject. Your order ships once the payment is confirmed.\n",
        bank.account_holder, bank.bank_name, bank.iban, bank.bic, order.order_ref
    ));

    let mut html = String::new();
    html.push_str(&format!(
        "<h2>Thank you for your order, {}!</h2>\
         <p>Order reference: <strong>{}</strong></p>",
        escape_html(&order.shipping_address.first_name),
        escape_html(&order.order_ref)
    ));
    html.push_str(&items_table(order));
    html.push_str(&format!(
        "<p>Subtotal: {}<br>Shipping: {}<br><strong>Total: {}</strong></p>",
        format_eur(order.subtotal),
        format_eur(order.shipping_cost),
        format_eur(order.total)
    ));
    html.push_str(&format!(
        "<h3>Payment by bank transfer</h3>\
         <p>{}<br>{}<br>IBAN: {}<br>BIC: {}</p>\
         <p>Use <strong>{}</strong> as the transfer subject. \
         Your order ships once the payment is confirmed.</p>",
        escape_html(&bank.account_holder),
        escape_html(&bank.bank_name),
        escape_html(&bank.iban),
        escape_html(&bank.bic),
        escape_html(&order.order_ref)
    ));

    EmailContent { subject, text, html }
}

/// Admin alert for a new order: customer contact, items, management link
pub fn admin_order_alert(order: &Order, management_url: &str) -> EmailContent {
    let subject = format!("New order {} ({})", order.order_ref, format_eur(order.total));
    let addr = &order.shipping_address;

    let mut text = String::new();
    text.push_str(&format!(
        "New order {}\n\nCustomer: {}\nEmail: {}\nPhone: {}\nShip to: {}, {} {} ({})\n\n",
        order.order_ref,
        addr.full_name(),
        order.user_email,
        addr.phone,
        addr.address,
        addr.postal_code,
        addr.city,
        addr.province
    ));
    text.push_str(&items_text(order));
    text.push_str(&format!(
        "\nTotal: {}\n\nManage: {}/orders/{}\n",
        format_eur(order.total),
        management_url,
        order.order_ref
    ));

    let mut html = String::new();
    html.push_str(&format!(
        "<h2>New order {}</h2>\
         <p>Customer: {}<br>Email: {}<br>Phone: {}<br>Ship to: {}, {} {} ({})</p>",
        escape_html(&order.order_ref),
        escape_html(&addr.full_name()),
        escape_html(&order.user_email),
        escape_html(&addr.phone),
        escape_html(&addr.address),
        escape_html(&addr.postal_code),
        escape_html(&addr.city),
        escape_html(&addr.province)
    ));
    html.push_str(&items_table(order));
    html.push_str(&format!(
        "<p><strong>Total: {}</strong></p>\
         <p><a href=\"{}/orders/{}\">Open in management view</a></p>",
        format_eur(order.total),
        escape_html(management_url),
        escape_html(&order.order_ref)
    ));

    EmailContent { subject, text, html }
}

/// Customer status-change notification
///
/// Nothing dispatches this automatically yet; see `Notifier::status_change`.
pub fn status_change(order: &Order) -> EmailContent {
    let subject = format!(
        "Order {} update: {}",
        order.order_ref,
        order.status.label()
    );

    let mut tracking_text = String::new();
    let mut tracking_html = String::new();
    if let Some(number) = &order.tracking_number {
        tracking_text.push_str(&format!("\nTracking number: {number}"));
        tracking_html.push_str(&format!(
            "<br>Tracking number: {}",
            escape_html(number)
        ));
        if let Some(url) = &order.tracking_url {
            tracking_text.push_str(&format!("\nTrack it at: {url}"));
            tracking_html.push_str(&format!(
                "<br><a href=\"{}\">Track your parcel</a>",
                escape_html(url)
            ));
        }
    }

    let text = format!(
        "Hello {},\n\nYour order {} is now: {}.{}\n",
        order.shipping_address.first_name,
        order.order_ref,
        order.status.label(),
        tracking_text
    );
    let html = format!(
        "<h2>Order {}</h2><p>Hello {},</p>\
         <p>Your order is now: <strong>{}</strong>.{}</p>",
        escape_html(&order.order_ref),
        escape_html(&order.shipping_address.first_name),
        order.status.label(),
        tracking_html
    );

    EmailContent { subject, text, html }
}

/// Confirmation for a quote request
pub fn quote_confirmation(quote: &QuoteRequest, quote_ref: &str) -> EmailContent {
    let subject = format!("We received your quote request {quote_ref}");
    let text = format!(
        "Hello {},\n\nWe received your quote request {} and will get back to you \
         within one business day.\n\nYour request:\n{}\n",
        quote.name, quote_ref, quote.details
    );
    let html = format!(
        "<h2>Quote request {}</h2><p>Hello {},</p>\
         <p>We received your request and will get back to you within one business day.</p>\
         <blockquote>{}</blockquote>",
        escape_html(quote_ref),
        escape_html(&quote.name),
        escape_html(&quote.details)
    );

    EmailContent { subject, text, html }
}

/// Admin alert for a quote request
pub fn quote_admin_alert(
    quote: &QuoteRequest,
    quote_ref: &str,
    management_url: &str,
) -> EmailContent {
    let subject = format!("New quote request {quote_ref}");
    let phone = quote.phone.as_deref().unwrap_or("-");
    let text = format!(
        "Quote request {}\n\nFrom: {} <{}>\nPhone: {}\n\n{}\n\nManage: {}/quotes/{}\n",
        quote_ref, quote.name, quote.email, phone, quote.details, management_url, quote_ref
    );
    let html = format!(
        "<h2>Quote request {}</h2>\
         <p>From: {} &lt;{}&gt;<br>Phone: {}</p>\
         <blockquote>{}</blockquote>\
         <p><a href=\"{}/quotes/{}\">Open in management view</a></p>",
        escape_html(quote_ref),
        escape_html(&quote.name),
        escape_html(&quote.email),
        escape_html(phone),
        escape_html(&quote.details),
        escape_html(management_url),
        escape_html(quote_ref)
    );

    EmailContent { subject, text, html }
}

// ========== Helpers ==========

fn items_text(order: &Order) -> String {
    let mut out = String::new();
    for item in &order.items {
        out.push_str(&format!(
            "  {} x {} ({}) — {}\n",
            item.quantity,
            item.name,
            item.sku,
            format_eur(item.line_total())
        ));
    }
    out
}

fn items_table(order: &Order) -> String {
    let mut out = String::from(
        "<table border=\"1\" cellpadding=\"4\" cellspacing=\"0\">\
         <tr><th>Qty</th><th>Item</th><th>SKU</th><th>Line total</th></tr>",
    );
    for item in &order.items {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            item.quantity,
            escape_html(&item.name),
            escape_html(&item.sku),
            format_eur(item.line_total())
        ));
    }
    out.push_str("</table>");
    out
}

/// Minimal HTML escaping for customer-supplied strings
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderItem, OrderStatus, ShippingAddress};

    fn test_order() -> Order {
        Order {
            id: "o-1".to_string(),
            order_ref: "XT-TEST-0001".to_string(),
            user_id: "u-1".to_string(),
            user_email: "ana@example.com".to_string(),
            items: vec![OrderItem {
                product_id: "p-a".to_string(),
                sku: "GPU-01".to_string(),
                name: "Graphics card <deluxe>".to_string(),
                brand: "Acme".to_string(),
                price: 49999,
                quantity: 1,
                image: None,
            }],
            subtotal: 49999,
            shipping_cost: 499,
            total: 50498,
            status: OrderStatus::Shipped,
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
            created_at: 1,
            updated_at: 2,
            paid_at: None,
            ordered_at: None,
            shipped_at: Some(2),
            delivered_at: None,
            tracking_number: Some("TRK-99".to_string()),
            tracking_url: Some("https://courier.example.com/TRK-99".to_string()),
            courier_name: None,
            supplier_order_ref: None,
            notes: None,
        }
    }

    #[test]
    fn confirmation_carries_reference_total_and_bank_details() {
        let bank = BankDetails::default();
        let content = order_confirmation(&test_order(), &bank);

        assert!(content.subject.contains("XT-TEST-0001"));
        assert!(content.html.contains("504.98 €"));
        assert!(content.html.contains(&bank.iban));
        assert!(content.text.contains(&bank.iban));
        // Customer-supplied strings are escaped in the HTML part
        assert!(content.html.contains("Graphics card &lt;deluxe&gt;"));
        assert!(!content.html.contains("<deluxe>"));
    }

    #[test]
    fn admin_alert_links_to_the_management_view() {
        let content = admin_order_alert(&test_order(), "https://admin.example.com");
        assert!(content.html.contains("https://admin.example.com/orders/XT-TEST-0001"));
        assert!(content.text.contains("ana@example.com"));
        assert!(content.text.contains("+34 600 000 000"));
    }

    #[test]
    fn status_change_names_the_new_status_and_tracking() {
        let content = status_change(&test_order());
        assert!(content.subject.contains("Shipped"));
        assert!(content.text.contains("TRK-99"));
        assert!(content.html.contains("https://courier.example.com/TRK-99"));
    }

    #[test]
    fn quote_templates_carry_the_reference() {
        let quote = QuoteRequest {
            name: "Leo".to_string(),
            email: "leo@example.com".to_string(),
            phone: None,
            details: "Quiet build, 64GB RAM, mid-range GPU".to_string(),
        };
        let confirmation = quote_confirmation(&quote, "XTQ-TEST-0001");
        assert!(confirmation.subject.contains("XTQ-TEST-0001"));
        assert!(confirmation.text.contains("64GB RAM"));

        let alert = quote_admin_alert(&quote, "XTQ-TEST-0001", "https://admin.example.com");
        assert!(alert.html.contains("https://admin.example.com/quotes/XTQ-TEST-0001"));
        assert!(alert.text.contains("leo@example.com"));
    }
}
