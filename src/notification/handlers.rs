use super::models::OrderEvent;
use crate::order::lifecycle::normalize_order_signal;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::env;

pub struct EmailContent {
    pub subject: String,
    pub text: String,
}

/// Thousands-grouped naira amount, "N/A" when no amount is known yet
/// (rentals waiting on an admin price).
fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(value) => format!("NGN {}", group_thousands(value)),
        None => "N/A".to_owned(),
    }
}

fn group_thousands(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

pub fn build_order_email_content(event: &OrderEvent) -> EmailContent {
    let payload = event.payload();
    let type_label = if payload.order_type.to_lowercase().contains("rent") {
        "Rental"
    } else {
        "Order"
    };
    let status = normalize_order_signal(&payload.status);
    let status = if status.is_empty() { "unknown".to_owned() } else { status };

    let subject = format!("[Sachio] {} - {}", event.label(), payload.order_id);
    let text = [
        event.label().to_owned(),
        format!("Order ID: {}", payload.order_id),
        format!("Type: {}", type_label),
        format!("Customer: {}", payload.customer_name),
        format!("Status: {}", status),
        format!("Amount: {}", format_amount(payload.amount)),
    ]
    .join("\n");

    EmailContent { subject, text }
}

pub async fn send_email(event: OrderEvent) -> Result<(), String> {
    let content = build_order_email_content(&event);

    let recipients = env::var("ADMIN_NOTIFY_EMAILS")
        .map_err(|e| format!("admin notify emails must be set: {}", e))?;

    for recipient in recipients.split(',').map(str::trim).filter(|r| !r.is_empty()) {
        let recipient = recipient.to_owned();
        let subject = content.subject.clone();
        let text = content.text.clone();

        tokio::task::spawn_blocking(move || build_and_send(&recipient, &subject, &text))
            .await
            .map_err(|e| format!("mail task failed: {}", e))??;
    }

    Ok(())
}

fn build_and_send(receiver_email: &str, subject: &str, body: &str) -> Result<(), String> {
    let email = Message::builder()
        .from(Mailbox::new(
            Some("Sachio Ops".to_owned()),
            "no-reply@sachioexpress.com"
                .parse()
                .map_err(|e| format!("Failed to parse sender email: {}", e))?,
        ))
        .to(Mailbox::new(
            None,
            receiver_email
                .parse()
                .map_err(|e| format!("Failed to parse receiver email: {}", e))?,
        ))
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_owned())
        .map_err(|e| format!("Failed to build a message: {}", e))?;

    let creds = Credentials::new(
        env::var("SMTP_USERNAME").map_err(|e| format!("smtp username must be set: {}", e))?,
        env::var("SMTP_PASSWORD").map_err(|e| format!("smtp password must be set: {}", e))?,
    );

    let relay = env::var("SMTP_RELAY").unwrap_or_else(|_| "smtp.gmail.com".to_owned());
    let mailer = SmtpTransport::relay(&relay)
        .map_err(|e| format!("Wrong smtp transport: {}", e))?
        .credentials(creds)
        .build();

    mailer
        .send(&email)
        .map_err(|e| format!("failed to send an email: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::models::OrderEventPayload;
    use uuid::Uuid;

    fn payload(order_type: &str, status: &str, amount: Option<f64>) -> OrderEventPayload {
        OrderEventPayload {
            order_id: Uuid::nil(),
            customer_name: "Halima O.".to_owned(),
            order_type: order_type.to_owned(),
            status: status.to_owned(),
            amount,
            product_title: Some("VIP Mobile Toilet".to_owned()),
        }
    }

    #[test]
    fn paid_rental_email_lists_every_line() {
        let event = OrderEvent::Paid(payload("rent", "PAID_OUT", Some(420_000.0)));
        let content = build_order_email_content(&event);

        assert_eq!(
            content.subject,
            format!("[Sachio] Order paid - {}", Uuid::nil())
        );
        let lines: Vec<&str> = content.text.lines().collect();
        assert_eq!(lines[0], "Order paid");
        assert_eq!(lines[2], "Type: Rental");
        assert_eq!(lines[3], "Customer: Halima O.");
        assert_eq!(lines[4], "Status: paid out");
        assert_eq!(lines[5], "Amount: NGN 420,000");
    }

    #[test]
    fn missing_amount_renders_na() {
        let event = OrderEvent::New(payload("rent", "waiting_admin_price", None));
        let content = build_order_email_content(&event);
        assert!(content.text.ends_with("Amount: N/A"));
    }

    #[test]
    fn blank_status_renders_unknown() {
        let event = OrderEvent::Cancelled(payload("buy", "", Some(1_200_000.0)));
        let content = build_order_email_content(&event);
        assert!(content.text.contains("Status: unknown"));
        assert!(content.text.contains("Type: Order"));
        assert!(content.text.contains("Amount: NGN 1,200,000"));
    }
}
