//! Payment record domain entity

use chrono::{DateTime, Utc};

use crate::domain::DomainError;

/// Card reference kept for a client
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    /// Unique payment ID (0 until the store assigns one)
    pub id: i32,
    pub client_id: i32,
    /// Only the last four digits survive, e.g. `**** **** **** 4242`
    pub masked_card: String,
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Build a record for `client_id`, masking `card_number` immediately.
    pub fn new(client_id: i32, card_number: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: 0,
            client_id,
            masked_card: mask_card_number(card_number)?,
            created_at: Utc::now(),
        })
    }
}

/// Reduce a card number to its last four digits.
///
/// Spaces and dashes are ignored; anything else non-numeric, or fewer than
/// 12 / more than 19 digits, is rejected.
pub fn mask_card_number(card_number: &str) -> Result<String, DomainError> {
    let digits: String = card_number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::Validation(
            "card number must contain only digits".to_string(),
        ));
    }
    if !(12..=19).contains(&digits.len()) {
        return Err(DomainError::Validation(format!(
            "card number must have 12-19 digits, got {}",
            digits.len()
        )));
    }

    Ok(format!("**** **** **** {}", &digits[digits.len() - 4..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_all_but_last_four() {
        let record = PaymentRecord::new(1, "4242 4242 4242 1234").unwrap();
        assert_eq!(record.masked_card, "**** **** **** 1234");
        assert!(!record.masked_card.contains("4242 4242"));
    }

    #[test]
    fn accepts_dashes() {
        assert_eq!(
            mask_card_number("5555-4444-3333-1111").unwrap(),
            "**** **** **** 1111"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(mask_card_number("4242-abcd-4242-4242").is_err());
        assert!(mask_card_number("1234").is_err());
        assert!(mask_card_number("").is_err());
    }
}
