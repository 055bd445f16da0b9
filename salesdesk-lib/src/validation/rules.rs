//! Built-in validation rules.

use email_address::EmailAddress;

use super::CellValue;
use crate::error::ValidationError;

/// Non-blank text. Accepted values are trimmed.
pub fn required(value: &CellValue) -> Result<CellValue, ValidationError> {
    match value {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(ValidationError::new("required", "This field is required"))
            } else {
                Ok(CellValue::text(trimmed))
            }
        }
        CellValue::List(items) if items.is_empty() => {
            Err(ValidationError::new("required", "Select at least one option"))
        }
        other => Ok(other.clone()),
    }
}

/// RFC-compliant email address format.
pub fn email(value: &CellValue) -> Result<CellValue, ValidationError> {
    let trimmed = value.expect_text("email")?.trim();
    if EmailAddress::is_valid(trimmed) {
        Ok(CellValue::text(trimmed))
    } else {
        Err(ValidationError::new("email", "Enter a valid email address"))
    }
}

/// Phone number with a digit count inside `min..=max`.
///
/// Formatting characters (`+`, `-`, spaces, parentheses, dots) are allowed
/// and ignored for the count; anything else rejects.
pub fn phone(value: &CellValue, min: usize, max: usize) -> Result<CellValue, ValidationError> {
    let trimmed = value.expect_text("phone")?.trim();
    let mut digits = 0usize;
    for c in trimmed.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !matches!(c, '+' | '-' | ' ' | '(' | ')' | '.') {
            return Err(ValidationError::new(
                "phone",
                format!("Unexpected character '{c}' in phone number"),
            ));
        }
    }
    if (min..=max).contains(&digits) {
        Ok(CellValue::text(trimmed))
    } else {
        Err(ValidationError::new(
            "phone",
            format!("Phone number must have {min} to {max} digits"),
        ))
    }
}

/// Integer inside `min..=max`, entered as text.
pub fn int_range(
    value: &CellValue,
    min: i64,
    max: i64,
    what: &str,
) -> Result<CellValue, ValidationError> {
    let trimmed = value.expect_text("range")?.trim();
    let parsed: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::new("range", format!("Enter a whole number for {what}")))?;
    if (min..=max).contains(&parsed) {
        Ok(CellValue::text(parsed.to_string()))
    } else {
        Err(ValidationError::new(
            "range",
            format!("{what} must be between {min} and {max}"),
        ))
    }
}

/// Membership in an enumerated option set.
///
/// Text values must be one of the options; list values must be a subset.
pub fn one_of(value: &CellValue, options: &[String]) -> Result<CellValue, ValidationError> {
    let reject = |v: &str| {
        ValidationError::new("option", format!("'{v}' is not one of the allowed options"))
    };
    match value {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if options.iter().any(|o| o == trimmed) {
                Ok(CellValue::text(trimmed))
            } else {
                Err(reject(trimmed))
            }
        }
        CellValue::List(items) => {
            for item in items {
                if !options.iter().any(|o| o == item) {
                    return Err(reject(item));
                }
            }
            Ok(value.clone())
        }
        other => Err(ValidationError::new(
            "option",
            format!("Expected an option value, got {other:?}"),
        )),
    }
}

/// At most `max` selected entries in a list value.
pub fn max_selected(value: &CellValue, max: usize) -> Result<CellValue, ValidationError> {
    match value {
        CellValue::List(items) if items.len() > max => Err(ValidationError::new(
            "max_selected",
            format!("Select at most {max} options"),
        )),
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_of_checks_lists_as_subsets() {
        let options = vec!["A".to_string(), "B".to_string(), "C".to_string()];

        let ok = CellValue::List(vec!["A".into(), "C".into()]);
        assert!(one_of(&ok, &options).is_ok());

        let bad = CellValue::List(vec!["A".into(), "X".into()]);
        assert_eq!(one_of(&bad, &options).unwrap_err().code, "option");
    }

    #[test]
    fn max_selected_caps_list_length() {
        let three = CellValue::List(vec!["a".into(), "b".into(), "c".into()]);
        assert!(max_selected(&three, 3).is_ok());
        assert_eq!(max_selected(&three, 2).unwrap_err().code, "max_selected");
    }

    #[test]
    fn phone_rejects_letters_outright() {
        let err = phone(&CellValue::text("555-CALL-NOW"), 7, 15).unwrap_err();
        assert_eq!(err.code, "phone");
    }
}
