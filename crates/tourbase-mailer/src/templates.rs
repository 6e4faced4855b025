//! Transactional email templates
//!
//! Each payload struct is a pure rendering input: identical payloads always
//! produce identical documents, and rendering performs no I/O. Optional
//! fields are `Option`s rendered through conditional blocks, so an omitted
//! field omits its section entirely instead of leaving an empty placeholder.

use askama::Template;
use chrono::NaiveDate;
use std::fmt;

use tourbase_core::{email::EmailMessage, Error, Result};

use crate::currency::format_currency;

/// A template that can produce a complete outbound message.
pub trait EmailTemplate: Template {
    /// Subject line for this notification
    fn subject(&self) -> String;

    /// Render subject and body into a deliverable message
    fn to_message(&self) -> Result<EmailMessage> {
        let html_body = self
            .render()
            .map_err(|e| Error::Template(e.to_string()))?;
        Ok(EmailMessage {
            subject: self.subject(),
            html_body,
        })
    }
}

/// A money amount plus the context needed to display it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAmount {
    /// Major units, e.g. whole euros
    pub amount: i64,
    pub currency: String,
    pub locale: String,
}

impl CurrencyAmount {
    pub fn new(amount: i64, currency: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            locale: locale.into(),
        }
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency(self.amount, &self.currency, &self.locale))
    }
}

/// One labelled line of a payment breakdown
#[derive(Debug, Clone)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: CurrencyAmount,
}

/// Sent when a customer account is created
#[derive(Debug, Clone, Template)]
#[template(path = "welcome.html")]
pub struct WelcomeEmail {
    pub tenant_name: String,
    pub customer_name: String,
}

impl EmailTemplate for WelcomeEmail {
    fn subject(&self) -> String {
        format!("Welcome to {}!", self.tenant_name)
    }
}

/// Sent when a booking is confirmed
#[derive(Debug, Clone, Template)]
#[template(path = "booking_confirmation.html")]
pub struct BookingConfirmation {
    pub tenant_name: String,
    pub customer_name: String,
    pub booking_number: String,
    pub tour_title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl EmailTemplate for BookingConfirmation {
    fn subject(&self) -> String {
        format!(
            "Booking {} confirmed: {}",
            self.booking_number, self.tour_title
        )
    }
}

/// Sent when a booking is cancelled. The refund line only appears when a
/// refund was issued.
#[derive(Debug, Clone, Template)]
#[template(path = "booking_cancellation.html")]
pub struct BookingCancellation {
    pub tenant_name: String,
    pub customer_name: String,
    pub booking_number: String,
    pub tour_title: String,
    pub refund_amount: Option<CurrencyAmount>,
}

impl BookingCancellation {
    pub fn with_refund(mut self, refund: CurrencyAmount) -> Self {
        self.refund_amount = Some(refund);
        self
    }
}

impl EmailTemplate for BookingCancellation {
    fn subject(&self) -> String {
        format!("Booking {} cancelled", self.booking_number)
    }
}

/// Sent when a payment settles; the breakdown table is optional
#[derive(Debug, Clone, Template)]
#[template(path = "payment_received.html")]
pub struct PaymentReceived {
    pub tenant_name: String,
    pub customer_name: String,
    pub booking_number: String,
    pub amount: CurrencyAmount,
    pub breakdown: Option<Vec<BreakdownLine>>,
}

impl PaymentReceived {
    pub fn with_breakdown(mut self, lines: Vec<BreakdownLine>) -> Self {
        self.breakdown = Some(lines);
        self
    }
}

impl EmailTemplate for PaymentReceived {
    fn subject(&self) -> String {
        format!("Payment received for booking {}", self.booking_number)
    }
}

/// Sent after a tour ends, asking for a review
#[derive(Debug, Clone, Template)]
#[template(path = "review_request.html")]
pub struct ReviewRequest {
    pub tenant_name: String,
    pub customer_name: String,
    pub booking_number: String,
    pub tour_title: String,
    pub review_url: String,
}

impl EmailTemplate for ReviewRequest {
    fn subject(&self) -> String {
        format!("How was {}?", self.tour_title)
    }
}

/// Sent a fixed number of days before departure
#[derive(Debug, Clone, Template)]
#[template(path = "tour_reminder.html")]
pub struct TourReminder {
    pub tenant_name: String,
    pub customer_name: String,
    pub booking_number: String,
    pub tour_title: String,
    pub start_date: NaiveDate,
    pub days_before: u32,
}

impl EmailTemplate for TourReminder {
    fn subject(&self) -> String {
        format!("{} starts in {} days", self.tour_title, self.days_before)
    }
}

/// Sent when an operator invites a staff member
#[derive(Debug, Clone, Template)]
#[template(path = "staff_invite.html")]
pub struct StaffInvite {
    pub tenant_name: String,
    pub invitee_email: String,
    pub inviter_name: String,
    pub role: String,
    pub invitation_url: String,
}

impl EmailTemplate for StaffInvite {
    fn subject(&self) -> String {
        format!("You have been invited to join {}", self.tenant_name)
    }
}

/// Sent in response to a password reset request
#[derive(Debug, Clone, Template)]
#[template(path = "password_reset.html")]
pub struct PasswordReset {
    pub tenant_name: String,
    pub email: String,
    pub reset_url: String,
}

impl EmailTemplate for PasswordReset {
    fn subject(&self) -> String {
        format!("Reset your {} password", self.tenant_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cancellation() -> BookingCancellation {
        BookingCancellation {
            tenant_name: "Alpine Adventures".to_string(),
            customer_name: "Maria Lang".to_string(),
            booking_number: "BK-2041".to_string(),
            tour_title: "Glacier Hike".to_string(),
            refund_amount: None,
        }
    }

    #[test]
    fn test_cancellation_is_deterministic_without_refund() {
        let first = cancellation().to_message().unwrap();
        let second = cancellation().to_message().unwrap();

        assert_eq!(first, second);
        assert!(!first.html_body.to_lowercase().contains("refund"));
    }

    #[test]
    fn test_cancellation_renders_refund_when_present() {
        let message = cancellation()
            .with_refund(CurrencyAmount::new(350, "EUR", "de-DE"))
            .to_message()
            .unwrap();

        assert!(message.html_body.contains("refund"));
        assert!(message.html_body.contains("€350,00"));
    }

    #[test]
    fn test_welcome_renders_both_names() {
        let message = WelcomeEmail {
            tenant_name: "Alpine Adventures".to_string(),
            customer_name: "Maria Lang".to_string(),
        }
        .to_message()
        .unwrap();

        assert_eq!(message.subject, "Welcome to Alpine Adventures!");
        assert!(message.html_body.contains("Maria Lang"));
        assert!(message.html_body.contains("Alpine Adventures"));
    }

    #[test]
    fn test_confirmation_renders_dates() {
        let message = BookingConfirmation {
            tenant_name: "Alpine Adventures".to_string(),
            customer_name: "Maria Lang".to_string(),
            booking_number: "BK-2041".to_string(),
            tour_title: "Glacier Hike".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 18).unwrap(),
        }
        .to_message()
        .unwrap();

        assert!(message.html_body.contains("14 July 2025"));
        assert!(message.html_body.contains("18 July 2025"));
        assert!(message.html_body.contains("BK-2041"));
    }

    #[test]
    fn test_payment_received_omits_absent_breakdown() {
        let payment = PaymentReceived {
            tenant_name: "Alpine Adventures".to_string(),
            customer_name: "Maria Lang".to_string(),
            booking_number: "BK-2041".to_string(),
            amount: CurrencyAmount::new(1499, "USD", "en-US"),
            breakdown: None,
        };

        let message = payment.clone().to_message().unwrap();
        assert!(message.html_body.contains("$1,499.00"));
        assert!(!message.html_body.contains("<table class=\"breakdown\""));

        let with_lines = payment
            .with_breakdown(vec![
                BreakdownLine {
                    label: "Tour price".to_string(),
                    amount: CurrencyAmount::new(1399, "USD", "en-US"),
                },
                BreakdownLine {
                    label: "Booking fee".to_string(),
                    amount: CurrencyAmount::new(100, "USD", "en-US"),
                },
            ])
            .to_message()
            .unwrap();
        assert!(with_lines.html_body.contains("Tour price"));
        assert!(with_lines.html_body.contains("$1,399.00"));
        assert!(with_lines.html_body.contains("Booking fee"));
    }

    #[test]
    fn test_review_request_links_review_url() {
        let message = ReviewRequest {
            tenant_name: "Alpine Adventures".to_string(),
            customer_name: "Maria Lang".to_string(),
            booking_number: "BK-2041".to_string(),
            tour_title: "Glacier Hike".to_string(),
            review_url: "https://alpine.example/reviews/bk-2041".to_string(),
        }
        .to_message()
        .unwrap();

        assert!(message
            .html_body
            .contains("https://alpine.example/reviews/bk-2041"));
    }

    #[test]
    fn test_reminder_subject_counts_days() {
        let reminder = TourReminder {
            tenant_name: "Alpine Adventures".to_string(),
            customer_name: "Maria Lang".to_string(),
            booking_number: "BK-2041".to_string(),
            tour_title: "Glacier Hike".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
            days_before: 7,
        };
        assert_eq!(reminder.subject(), "Glacier Hike starts in 7 days");
    }

    #[test]
    fn test_staff_invite_renders_role_and_url() {
        let message = StaffInvite {
            tenant_name: "Alpine Adventures".to_string(),
            invitee_email: "guide@example.com".to_string(),
            inviter_name: "Jonas Berg".to_string(),
            role: "Guide".to_string(),
            invitation_url: "https://alpine.example/invites/abc".to_string(),
        }
        .to_message()
        .unwrap();

        assert!(message.html_body.contains("Guide"));
        assert!(message.html_body.contains("Jonas Berg"));
        assert!(message.html_body.contains("https://alpine.example/invites/abc"));
    }

    #[test]
    fn test_password_reset_renders_url() {
        let message = PasswordReset {
            tenant_name: "Alpine Adventures".to_string(),
            email: "maria@example.com".to_string(),
            reset_url: "https://alpine.example/reset/xyz".to_string(),
        }
        .to_message()
        .unwrap();

        assert!(message.html_body.contains("https://alpine.example/reset/xyz"));
        assert!(message.html_body.contains("maria@example.com"));
    }
}
