//! Outbound message bodies

use crate::domain::entities::Purpose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    VerificationCode,
    Welcome,
}

/// A rendered message ready for a delivery gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub kind: MessageKind,
}

fn purpose_phrase(purpose: Purpose) -> &'static str {
    match purpose {
        Purpose::Signup => "complete your registration",
        Purpose::Login => "sign in",
        Purpose::PasswordReset => "reset your password",
    }
}

impl OutboundMessage {
    /// Message carrying a one-time code
    pub fn verification_code(recipient: &str, code: &str, purpose: Purpose, ttl_minutes: i64) -> Self {
        let action = purpose_phrase(purpose);
        let text_body = format!(
            "Your Jharkhand Tourism verification code is {code}.\n\n\
             Use it to {action}. This code is valid for {ttl_minutes} minutes.\n\
             Do not share this code with anyone."
        );
        let html_body = format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h2 style=\"color: #16a34a;\">Jharkhand Tourism</h2>\
             <p>Use the code below to {action}:</p>\
             <p style=\"font-size: 32px; font-weight: bold; letter-spacing: 8px;\">{code}</p>\
             <p>This code is valid for {ttl_minutes} minutes.</p>\
             <p style=\"color: #6b7280;\">Do not share this code with anyone.</p>\
             </div>"
        );

        Self {
            recipient: recipient.to_string(),
            subject: "Your Jharkhand Tourism verification code".to_string(),
            text_body,
            html_body,
            kind: MessageKind::VerificationCode,
        }
    }

    /// Greeting sent after a successful signup
    pub fn welcome(recipient: &str, name: &str) -> Self {
        let text_body = format!(
            "Welcome to Jharkhand Tourism, {name}!\n\n\
             Your account is verified. Explore waterfalls, wildlife and \
             culture across Jharkhand."
        );
        let html_body = format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h2 style=\"color: #16a34a;\">Welcome to Jharkhand Tourism, {name}!</h2>\
             <p>Your account is verified. Explore waterfalls, wildlife and culture across Jharkhand.</p>\
             </div>"
        );

        Self {
            recipient: recipient.to_string(),
            subject: "Welcome to Jharkhand Tourism".to_string(),
            text_body,
            html_body,
            kind: MessageKind::Welcome,
        }
    }
}
