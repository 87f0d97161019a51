//! Value validators used by the field widgets

use crate::field::{FieldError, FieldResult};
use regex::Regex;
use std::sync::LazyLock;

// Email pattern.
//
// local part: dot-separated runs of word characters and hyphens
// domain: optional dotted labels, then a label of at most 67 characters
// top level: 2-6 letters with an optional 2-letter country suffix
//
// Word characters are ASCII only.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?i)^([A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*)@((?:[A-Za-z0-9_-]+\.)*[A-Za-z0-9_][A-Za-z0-9_-]{0,66})\.([a-z]{2,6}(?:\.[a-z]{2})?)$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Validates the format of an email address.
///
/// # Examples
///
/// ```
/// use modelform_fields::validators::EmailValidator;
///
/// let validator = EmailValidator::new();
/// assert!(validator.is_valid("bo@example.com"));
/// assert!(validator.is_valid("first.last@mail.example.co.uk"));
/// assert!(!validator.is_valid("fieldNewValue"));
/// assert!(!validator.is_valid(""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
	pub fn new() -> Self {
		Self
	}

	pub fn is_valid(&self, value: &str) -> bool {
		EMAIL_REGEX.is_match(value)
	}

	/// Validates `value` on behalf of the field `name`.
	pub fn validate(&self, name: &str, value: &str) -> FieldResult<()> {
		if self.is_valid(value) {
			Ok(())
		} else {
			Err(FieldError::InvalidEmail(name.to_string()))
		}
	}
}

/// Validates the character count of a text value.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
	max: usize,
}

impl MaxLengthValidator {
	pub fn new(max: usize) -> Self {
		Self { max }
	}

	pub fn max(&self) -> usize {
		self.max
	}

	/// Counts characters, not bytes.
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::validators::MaxLengthValidator;
	///
	/// let validator = MaxLengthValidator::new(3);
	/// assert!(validator.validate("name", "abc").is_ok());
	/// assert!(validator.validate("name", "äöü").is_ok());
	/// assert!(validator.validate("name", "abcd").is_err());
	/// ```
	pub fn validate(&self, name: &str, value: &str) -> FieldResult<()> {
		let actual = value.chars().count();
		if actual > self.max {
			return Err(FieldError::MaxLength {
				name: name.to_string(),
				max: self.max,
				actual,
			});
		}
		Ok(())
	}
}

/// Validates that a text value parses as a number.
///
/// Surrounding whitespace is ignored.
#[derive(Debug, Clone, Default)]
pub struct NumberValidator;

impl NumberValidator {
	pub fn new() -> Self {
		Self
	}

	pub fn validate(&self, name: &str, value: &str) -> FieldResult<()> {
		match value.trim().parse::<f64>() {
			Ok(n) if n.is_finite() => Ok(()),
			_ => Err(FieldError::NotANumber(name.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	// =========================================================================
	// EmailValidator tests
	// =========================================================================

	#[rstest]
	#[case("bo@example.com")]
	#[case("bo@enactuswaterloo.com")]
	#[case("BO@EXAMPLE.COM")]
	#[case("first.last@example.org")]
	#[case("under_score-dash@sub.domain.example.io")]
	#[case("user@example.co.uk")]
	fn test_valid_emails(#[case] email: &str) {
		assert!(EmailValidator::new().is_valid(email), "{}", email);
	}

	#[rstest]
	#[case("")]
	#[case("fieldNewValue")]
	#[case("@example.com")]
	#[case("bo@")]
	#[case("bo@example")]
	#[case("bo@example.c")]
	#[case("bo@example.toolongtld")]
	#[case("bo@@example.com")]
	#[case("bo example@example.com")]
	#[case(".bo@example.com")]
	#[case("bö@example.com")]
	fn test_invalid_emails(#[case] email: &str) {
		assert!(!EmailValidator::new().is_valid(email), "{}", email);
	}

	#[rstest]
	fn test_email_error_names_field() {
		let err = EmailValidator::new()
			.validate("fieldName", "nope")
			.unwrap_err();
		assert_eq!(err.to_string(), "fieldName is not a valid email");
	}

	// =========================================================================
	// MaxLengthValidator tests
	// =========================================================================

	#[rstest]
	fn test_max_length_counts_characters() {
		let validator = MaxLengthValidator::new(5);

		assert!(validator.validate("f", "こんにちは").is_ok());
		assert_eq!(
			validator.validate("f", "こんにちはX"),
			Err(FieldError::MaxLength {
				name: "f".to_string(),
				max: 5,
				actual: 6,
			})
		);
	}

	// =========================================================================
	// NumberValidator tests
	// =========================================================================

	#[rstest]
	#[case("3")]
	#[case(" 42 ")]
	#[case("-1.5")]
	#[case("1e3")]
	fn test_numbers_accepted(#[case] value: &str) {
		assert!(NumberValidator::new().validate("n", value).is_ok());
	}

	#[rstest]
	#[case("abc")]
	#[case("3 apples")]
	#[case("NaN")]
	#[case("inf")]
	fn test_non_numbers_rejected(#[case] value: &str) {
		assert_eq!(
			NumberValidator::new().validate("n", value),
			Err(FieldError::NotANumber("n".to_string()))
		);
	}

	proptest! {
		#[test]
		fn prop_simple_addresses_are_valid(
			local in "[a-z0-9_-]{1,20}",
			domain in "[a-z0-9][a-z0-9-]{0,20}",
			tld in "[a-z]{2,6}",
		) {
			let email = format!("{}@{}.{}", local, domain, tld);
			prop_assert!(EmailValidator::new().is_valid(&email));
		}

		#[test]
		fn prop_strings_without_at_sign_are_invalid(s in "[^@]{0,40}") {
			prop_assert!(!EmailValidator::new().is_valid(&s));
		}
	}
}
