use chrono::{DateTime, Utc};

use crate::reminder::Reminder;
use crate::subscription::Subscription;

pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

pub fn reminder_due_tomorrow(reminder: &Reminder, recipient: &str, app_url: &str) -> RenderedEmail {
    RenderedEmail {
        subject: format!("Payment Reminder: {} Due Tomorrow", reminder.title),
        html: payment_card(
            "Payment Due Tomorrow",
            display_name(recipient),
            &format!(
                "This is a friendly reminder that your payment for <strong>{}</strong> is due tomorrow.",
                reminder.title
            ),
            &[
                ("Amount", format!("₹{:.2}", reminder.amount)),
                ("Due Date", format_date(reminder.due_date)),
                ("Category", reminder.category_label()),
            ],
            "Please ensure your payment is made on time to avoid any late fees or service interruptions.",
            &format!("{app_url}/reminders"),
            "View Reminder",
        ),
    }
}

pub fn subscription_renewal_tomorrow(
    subscription: &Subscription,
    recipient: &str,
    app_url: &str,
) -> RenderedEmail {
    RenderedEmail {
        subject: format!("Subscription Renewal: {} Due Tomorrow", subscription.name),
        html: payment_card(
            "Subscription Renewal Tomorrow",
            display_name(recipient),
            &format!(
                "Your subscription to <strong>{}</strong> is due for renewal tomorrow.",
                subscription.name
            ),
            &[
                ("Amount", format!("₹{:.2}", subscription.amount)),
                ("Next Billing Date", format_date(subscription.next_billing_date)),
                ("Billing Cycle", subscription.cycle_label()),
            ],
            "Please ensure your payment method is up to date to avoid any service interruptions.",
            &format!("{app_url}/subscriptions"),
            "View Subscription",
        ),
    }
}

pub fn reminder_due_soon(reminder: &Reminder, recipient: &str, app_url: &str) -> RenderedEmail {
    RenderedEmail {
        subject: format!("Payment Reminder: {} Due Soon", reminder.title),
        html: payment_card(
            "Payment Reminder",
            display_name(recipient),
            &format!(
                "This is a friendly reminder that your payment for <strong>{}</strong> is due soon.",
                reminder.title
            ),
            &[
                ("Amount", format!("₹{:.2}", reminder.amount)),
                ("Due Date", format_date(reminder.due_date)),
            ],
            "Please ensure your payment is made on time to avoid any late fees or service interruptions.",
            &format!("{app_url}/reminders"),
            "View Reminder",
        ),
    }
}

pub fn subscription_renewal_soon(
    subscription: &Subscription,
    recipient: &str,
    app_url: &str,
) -> RenderedEmail {
    RenderedEmail {
        subject: format!("Subscription Renewal: {} Coming Up", subscription.name),
        html: payment_card(
            "Subscription Renewal",
            display_name(recipient),
            &format!(
                "Your subscription to <strong>{}</strong> is due for renewal soon.",
                subscription.name
            ),
            &[
                ("Amount", format!("₹{:.2}", subscription.amount)),
                ("Next Billing Date", format_date(subscription.next_billing_date)),
            ],
            "Please ensure your payment method is up to date to avoid any service interruptions.",
            &format!("{app_url}/subscriptions"),
            "View Subscription",
        ),
    }
}

fn display_name(email: &str) -> &str {
    email.split('@').next().unwrap_or("there")
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn payment_card(
    heading: &str,
    name: &str,
    lead: &str,
    rows: &[(&str, String)],
    footer: &str,
    cta_href: &str,
    cta_label: &str,
) -> String {
    let details: String = rows
        .iter()
        .map(|(label, value)| format!("<p><strong>{label}:</strong> {value}</p>"))
        .collect();

    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 8px;">
  <h1 style="color: #333; margin-bottom: 20px;">{heading}</h1>
  <p>Hello {name},</p>
  <p>{lead}</p>
  <div style="background-color: #f9f9f9; padding: 15px; border-radius: 6px; margin: 20px 0;">{details}</div>
  <p>{footer}</p>
  <a href="{cta_href}" style="display: inline-block; background-color: #4f46e5; color: white; padding: 10px 20px; text-decoration: none; border-radius: 4px; margin-top: 15px;">{cta_label}</a>
  <p style="margin-top: 30px; font-size: 14px; color: #666;">This is an automated message. Please do not reply to this email.</p>
</div>"#
    )
}
