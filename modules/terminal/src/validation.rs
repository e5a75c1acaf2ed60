//! Card input formatting and validation
//!
//! Formatting mirrors the format-as-you-type transforms of the payer screen;
//! validation runs only on submit, independently per field, and accumulates
//! every error instead of short-circuiting.

use chrono::{DateTime, Datelike, Utc};

/// Raw card fields as submitted by the payer
///
/// `name` is `None` when the form variant without a cardholder field is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardInput {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub name: Option<String>,
}

/// Card field identifiers used as keys in the error mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    CardNumber,
    Expiry,
    Cvv,
    Name,
}

impl CardField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardField::CardNumber => "card_number",
            CardField::Expiry => "expiry",
            CardField::Cvv => "cvv",
            CardField::Name => "name",
        }
    }
}

/// Cumulative per-field validation outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardInputErrors {
    errors: Vec<(CardField, &'static str)>,
}

impl CardInputErrors {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: CardField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| *message)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardField, &'static str)> + '_ {
        self.errors.iter().copied()
    }

    fn add(&mut self, field: CardField, message: &'static str) {
        self.errors.push((field, message));
    }
}

/// The month a card is validated against, compared on (two-digit year, month)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentMonth {
    pub year: u32,
    pub month: u32,
}

impl CurrentMonth {
    pub fn from_datetime(now: &DateTime<Utc>) -> Self {
        Self {
            year: now.year() as u32 % 100,
            month: now.month(),
        }
    }
}

/// Strip non-digits and regroup in blocks of four
///
/// Early typing (fewer than two groups) keeps the raw value untouched so the
/// caret does not jump while the first group is entered.
pub fn format_card_number(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

    let groups: Vec<&str> = digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect();

    if groups.len() > 1 {
        groups.join(" ")
    } else {
        value.to_string()
    }
}

/// Strip non-digits and insert the MM/YY separator once two digits exist
pub fn format_expiry(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() >= 2 {
        let months = &digits[..2];
        let years = &digits[2..digits.len().min(4)];
        format!("{}/{}", months, years)
    } else {
        digits
    }
}

/// Strip everything that is not a digit
pub fn format_cvv(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a submitted card input against the current month
///
/// Pure: every check runs every time and errors accumulate per field, so a
/// payer can correct fields independently.
pub fn validate_card_input(input: &CardInput, today: CurrentMonth) -> CardInputErrors {
    let mut errors = CardInputErrors::default();

    let digit_count = input
        .card_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .count();
    if digit_count < 16 {
        errors.add(CardField::CardNumber, "Invalid card number");
    }

    validate_expiry(&input.expiry, today, &mut errors);

    if input.cvv.chars().filter(|c| c.is_ascii_digit()).count() < 3 {
        errors.add(CardField::Cvv, "Invalid CVV");
    }

    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            errors.add(CardField::Name, "Name required");
        }
    }

    errors
}

fn validate_expiry(expiry: &str, today: CurrentMonth, errors: &mut CardInputErrors) {
    if expiry.len() != 5 || !expiry.is_ascii() || expiry.as_bytes()[2] != b'/' {
        errors.add(CardField::Expiry, "Invalid date");
        return;
    }

    let month: u32 = match expiry[..2].parse() {
        Ok(m) => m,
        Err(_) => {
            errors.add(CardField::Expiry, "Invalid date");
            return;
        }
    };
    let year: u32 = match expiry[3..].parse() {
        Ok(y) => y,
        Err(_) => {
            errors.add(CardField::Expiry, "Invalid date");
            return;
        }
    };

    if !(1..=12).contains(&month) {
        errors.add(CardField::Expiry, "Invalid month");
    } else if year < today.year || (year == today.year && month < today.month) {
        errors.add(CardField::Expiry, "Card expired");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: CurrentMonth = CurrentMonth { year: 26, month: 8 };

    fn valid_input() -> CardInput {
        CardInput {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry: "08/27".to_string(),
            cvv: "123".to_string(),
            name: Some("JANE DOE".to_string()),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let errors = validate_card_input(&valid_input(), TODAY);
        assert!(errors.is_valid());
    }

    #[test]
    fn test_format_card_number_groups_by_four() {
        assert_eq!(
            format_card_number("4242424242424242"),
            "4242 4242 4242 4242"
        );
    }

    #[test]
    fn test_format_card_number_is_idempotent_on_grouped_input() {
        let formatted = format_card_number("4242 4242 4242 4242");
        assert_eq!(formatted, "4242 4242 4242 4242");
        assert_eq!(format_card_number(&formatted), formatted);
    }

    #[test]
    fn test_format_card_number_keeps_raw_value_while_typing() {
        // Fewer than two groups: caller keeps whatever was typed
        assert_eq!(format_card_number("42a4"), "42a4");
        assert_eq!(format_card_number("4242"), "4242");
    }

    #[test]
    fn test_format_expiry_inserts_separator() {
        assert_eq!(format_expiry("0"), "0");
        assert_eq!(format_expiry("08"), "08/");
        assert_eq!(format_expiry("0827"), "08/27");
        assert_eq!(format_expiry("08/27"), "08/27");
        assert_eq!(format_expiry("08272"), "08/27");
    }

    #[test]
    fn test_format_cvv_strips_non_digits() {
        assert_eq!(format_cvv("1a2b3"), "123");
    }

    #[test]
    fn test_short_card_number_fails_regardless_of_other_fields() {
        let mut input = valid_input();
        input.card_number = "4242 4242 4242".to_string();

        let errors = validate_card_input(&input, TODAY);

        assert_eq!(errors.get(CardField::CardNumber), Some("Invalid card number"));
        assert_eq!(errors.get(CardField::Expiry), None);
        assert_eq!(errors.get(CardField::Cvv), None);
    }

    #[test]
    fn test_expiry_wrong_length_is_invalid_date() {
        let mut input = valid_input();
        input.expiry = "8/27".to_string();

        let errors = validate_card_input(&input, TODAY);
        assert_eq!(errors.get(CardField::Expiry), Some("Invalid date"));
    }

    #[test]
    fn test_expiry_month_thirteen_is_invalid_month() {
        let mut input = valid_input();
        input.expiry = "13/25".to_string();

        let errors = validate_card_input(&input, TODAY);
        assert_eq!(errors.get(CardField::Expiry), Some("Invalid month"));
    }

    #[test]
    fn test_expiry_in_the_past_is_expired() {
        let mut input = valid_input();
        input.expiry = "01/20".to_string();

        let errors = validate_card_input(&input, TODAY);
        assert_eq!(errors.get(CardField::Expiry), Some("Card expired"));
    }

    #[test]
    fn test_expiry_current_month_passes() {
        let mut input = valid_input();
        input.expiry = "08/26".to_string();

        let errors = validate_card_input(&input, TODAY);
        assert_eq!(errors.get(CardField::Expiry), None);
    }

    #[test]
    fn test_expiry_last_month_is_expired() {
        let mut input = valid_input();
        input.expiry = "07/26".to_string();

        let errors = validate_card_input(&input, TODAY);
        assert_eq!(errors.get(CardField::Expiry), Some("Card expired"));
    }

    #[test]
    fn test_short_cvv_fails() {
        let mut input = valid_input();
        input.cvv = "12".to_string();

        let errors = validate_card_input(&input, TODAY);
        assert_eq!(errors.get(CardField::Cvv), Some("Invalid CVV"));
    }

    #[test]
    fn test_blank_name_fails_when_field_present() {
        let mut input = valid_input();
        input.name = Some("   ".to_string());

        let errors = validate_card_input(&input, TODAY);
        assert_eq!(errors.get(CardField::Name), Some("Name required"));
    }

    #[test]
    fn test_absent_name_field_is_not_validated() {
        let mut input = valid_input();
        input.name = None;

        let errors = validate_card_input(&input, TODAY);
        assert!(errors.is_valid());
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let input = CardInput {
            card_number: "1234".to_string(),
            expiry: "13/25".to_string(),
            cvv: "1".to_string(),
            name: Some("".to_string()),
        };

        let errors = validate_card_input(&input, TODAY);

        assert_eq!(errors.get(CardField::CardNumber), Some("Invalid card number"));
        assert_eq!(errors.get(CardField::Expiry), Some("Invalid month"));
        assert_eq!(errors.get(CardField::Cvv), Some("Invalid CVV"));
        assert_eq!(errors.get(CardField::Name), Some("Name required"));
        assert_eq!(errors.iter().count(), 4);
    }

    #[test]
    fn test_current_month_from_datetime() {
        let now = "2026-08-08T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let today = CurrentMonth::from_datetime(&now);

        assert_eq!(today, CurrentMonth { year: 26, month: 8 });
    }
}
