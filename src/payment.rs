//! Simulated checkout. Nothing is charged: a "payment" only validates the
//! form and records an interaction.

use thiserror::Error;

use crate::types::{EventType, Interaction, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid UPI id: {0}")]
    InvalidUpiId(String),
    #[error("card number must be 12 to 19 digits")]
    InvalidCardNumber,
    #[error("expiry must look like MM/YY")]
    InvalidExpiry,
    #[error("CVV must be 3 or 4 digits")]
    InvalidCvv,
    #[error("invalid IFSC code: {0}")]
    InvalidIfsc(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentMethod {
    Upi {
        upi_id: String,
    },
    Card {
        name: String,
        number: String,
        expiry: String,
        cvv: String,
    },
    NetBanking {
        bank: String,
        account_number: String,
        ifsc: String,
    },
}

fn required(value: &str, field: &'static str) -> Result<(), PaymentError> {
    if value.trim().is_empty() {
        Err(PaymentError::MissingField(field))
    } else {
        Ok(())
    }
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.trim().split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 || !all_digits(month) || !all_digits(year) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Upi { .. } => "UPI",
            PaymentMethod::Card { .. } => "CARD",
            PaymentMethod::NetBanking { .. } => "BANK",
        }
    }

    pub fn validate(&self) -> Result<(), PaymentError> {
        match self {
            PaymentMethod::Upi { upi_id } => {
                required(upi_id, "upi_id")?;
                match upi_id.split_once('@') {
                    Some((handle, bank)) if !handle.is_empty() && !bank.is_empty() => Ok(()),
                    _ => Err(PaymentError::InvalidUpiId(upi_id.clone())),
                }
            }
            PaymentMethod::Card {
                name,
                number,
                expiry,
                cvv,
            } => {
                required(name, "card_name")?;
                required(number, "card_number")?;
                required(expiry, "expiry")?;
                required(cvv, "cvv")?;
                let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
                if !all_digits(&digits) || !(12..=19).contains(&digits.len()) {
                    return Err(PaymentError::InvalidCardNumber);
                }
                if !valid_expiry(expiry) {
                    return Err(PaymentError::InvalidExpiry);
                }
                if !all_digits(cvv) || !(3..=4).contains(&cvv.len()) {
                    return Err(PaymentError::InvalidCvv);
                }
                Ok(())
            }
            PaymentMethod::NetBanking {
                bank,
                account_number,
                ifsc,
            } => {
                required(bank, "bank_name")?;
                required(account_number, "account_number")?;
                required(ifsc, "ifsc_code")?;
                if ifsc.len() != 11 || !ifsc.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(PaymentError::InvalidIfsc(ifsc.clone()));
                }
                Ok(())
            }
        }
    }
}

/// Validates the form and returns the interaction recording the purchase.
pub fn complete_payment(
    user: &User,
    course_id: &str,
    course_title: &str,
    method: &PaymentMethod,
) -> Result<Interaction, PaymentError> {
    method.validate()?;
    Ok(Interaction::new(
        user.user_id.clone(),
        course_id,
        EventType::PaymentCompleted,
        format!(
            "Payment successful via {} for {}",
            method.label(),
            course_title
        ),
    ))
}

pub fn redirect_for(course_id: i64) -> String {
    format!("/payment_page?course_id={course_id}")
}

pub fn payment_page_html(course_id: Option<i64>) -> String {
    let course_id = course_id.map(|id| id.to_string()).unwrap_or_default();
    format!(
        r#"<html><body>
  <h3>Fake Payment Page</h3>
  <p>Course ID: {course_id}</p>
  <form method="POST" action="/payment_submit">
    <input type="hidden" name="course_id" value="{course_id}" />
    Card Number: <input name="card_number" /><br/>
    Expiry: <input name="expiry" /><br/>
    CVV: <input name="cvv" /><br/>
    <button type="submit">Pay (Fake)</button>
  </form>
</body></html>
"#
    )
}

pub const PAYMENT_DONE_HTML: &str =
    "<html><body><h3>Fake payment successful. You can close this tab.</h3></body></html>";
