//! # Validation Module
//!
//! Client-side form validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dispatcher (Rust, THIS MODULE)                               │
//! │  ├── Format checks (email, card number, expiry)                        │
//! │  └── Rejects before any HTTP call is issued                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront API                                               │
//! │  ├── Authentication and authorization                                  │
//! │  ├── Stock and pricing truth                                           │
//! │  └── Payment processing                                                │
//! │                                                                         │
//! │  The API stays authoritative: passing here only means "worth sending". │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Functions that depend on the current date take it as a parameter so this
//! crate never reads the clock.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;
use crate::types::{CheckoutRequest, Credentials, PasswordChange, ProductDraft, ProductPatch, Registration};
use crate::{MAX_ITEM_QUANTITY, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Account Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - `local@domain.tld`, exactly one `@`
/// - local part: letters, digits and `._%+-`
/// - domain: letters, digits, `.` and `-`, ending in an alphabetic TLD of 2+ letters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_email;
///
/// assert!(validate_email("ana.lopez+shop@mail.example.com").is_ok());
/// assert!(validate_email("ana@localhost").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing @"))?;

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    if !local_ok {
        return Err(invalid("invalid characters before @"));
    }

    let (host, tld) = domain
        .rsplit_once('.')
        .ok_or_else(|| invalid("domain must contain a dot"))?;

    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    if !host_ok || !tld_ok {
        return Err(invalid("invalid domain"));
    }

    Ok(())
}

/// Validates a new password.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LENGTH`] characters
/// - At least one letter and one digit
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "must contain at least one letter".to_string(),
        });
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "must contain at least one number".to_string(),
        });
    }

    Ok(())
}

/// Checks that a password and its confirmation agree.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> ValidationResult<()> {
    if password != confirmation {
        return Err(ValidationError::Mismatch {
            field: "password confirmation".to_string(),
        });
    }
    Ok(())
}

/// Validates an optional phone number.
///
/// Spaces, dashes and parentheses are ignored; what remains must be an
/// optional `+` followed by 7-16 digits not starting with 0.
pub fn validate_phone(phone: Option<&str>) -> ValidationResult<()> {
    let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    let ok = (7..=16).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0');
    if !ok {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be 7 to 16 digits, optionally starting with +".to_string(),
        });
    }

    Ok(())
}

/// Validates the login form. Only presence is checked; the API owns the
/// account rules, so addresses like `admin@localhost` still reach it.
pub fn validate_credentials(credentials: &Credentials) -> ValidationResult<()> {
    required("email", &credentials.email)?;
    required("password", &credentials.password)?;
    Ok(())
}

/// Validates the registration form.
pub fn validate_registration(registration: &Registration) -> ValidationResult<()> {
    validate_email(&registration.email)?;
    validate_password(&registration.password)?;
    validate_phone(registration.phone.as_deref())?;
    Ok(())
}

/// Validates a password change. The new password must follow the password
/// rules and differ from the current one.
pub fn validate_password_change(change: &PasswordChange) -> ValidationResult<()> {
    required("current_password", &change.current_password)?;
    validate_password(&change.new_password)?;
    if change.current_password == change.new_password {
        return Err(ValidationError::InvalidFormat {
            field: "new_password".to_string(),
            reason: "must differ from the current password".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Cart & Catalog Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates the admin product form.
///
/// ## Rules
/// - name and description required
/// - price > 0, stock >= 0
/// - category id must be set (positive)
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    required("name", &draft.name)?;
    required("description", &draft.description)?;

    if !draft.price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if draft.stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if draft.category_id <= 0 {
        return Err(ValidationError::Required {
            field: "category_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a partial product update. Only the fields present are checked.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if patch.is_empty() {
        return Err(ValidationError::Required {
            field: "product fields".to_string(),
        });
    }
    if let Some(name) = &patch.name {
        required("name", name)?;
    }
    if let Some(description) = &patch.description {
        required("description", description)?;
    }
    if let Some(price) = patch.price {
        if !price.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "price".to_string(),
            });
        }
    }
    if let Some(stock) = patch.stock {
        if stock < 0 {
            return Err(ValidationError::OutOfRange {
                field: "stock".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Strips the spaces and dashes users type into card numbers.
pub fn normalize_card_number(card_number: &str) -> String {
    card_number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect()
}

/// Validates a card number: 13-19 digits passing the Luhn checksum.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4111 1111 1111 1111").is_ok());
/// assert!(validate_card_number("4111 1111 1111 1112").is_err());
/// ```
pub fn validate_card_number(card_number: &str) -> ValidationResult<()> {
    let digits = normalize_card_number(card_number);
    required("card_number", &digits)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "card_number".to_string(),
        reason: reason.to_string(),
    };

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("must contain only digits"));
    }
    if !(13..=19).contains(&digits.len()) {
        return Err(invalid("must be 13 to 19 digits"));
    }
    if !luhn_check(&digits) {
        return Err(invalid("checksum failed"));
    }

    Ok(())
}

/// Luhn checksum over an all-digit string.
fn luhn_check(digits: &str) -> bool {
    let total: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    total % 10 == 0
}

/// Validates a card expiry date in `MM/YY` form against `today`.
///
/// A card is valid through the last day of its expiry month.
pub fn validate_expiry_date(expiry: &str, today: NaiveDate) -> ValidationResult<()> {
    let expiry = expiry.trim();
    required("expiry_date", expiry)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "expiry_date".to_string(),
        reason: "expected MM/YY".to_string(),
    };

    let (month, year) = expiry.split_once('/').ok_or_else(invalid)?;
    if month.len() != 2 || year.len() != 2 {
        return Err(invalid());
    }
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    let year = 2000 + year;
    if year < today.year() || (year == today.year() && month < today.month()) {
        return Err(ValidationError::Expired);
    }

    Ok(())
}

/// Validates a card security code: 3 or 4 digits.
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    let cvv = cvv.trim();
    required("cvv", cvv)?;
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 or 4 digits".to_string(),
        });
    }
    Ok(())
}

/// Validates the checkout form.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Checkout: Place Order                                                  │
/// │                                                                         │
/// │  validate_checkout(request, today) ← THIS FUNCTION                     │
/// │       │                                                                 │
/// │       ├── no shipping address? → "shipping_address is required"        │
/// │       │                                                                 │
/// │       ├── credit_card without details? → "payment_details is required" │
/// │       │                                                                 │
/// │       ├── card fields → name, Luhn, MM/YY not expired, CVV             │
/// │       │                                                                 │
/// │       └── OK → POST /api/checkout                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_checkout(request: &CheckoutRequest, today: NaiveDate) -> ValidationResult<()> {
    required("shipping_address", &request.shipping_address)?;

    if request.payment_method.requires_card() {
        let card = request
            .payment_details
            .as_ref()
            .ok_or_else(|| ValidationError::Required {
                field: "payment_details".to_string(),
            })?;
        required("cardholder_name", &card.cardholder_name)?;
        validate_card_number(&card.card_number)?;
        validate_expiry_date(&card.expiry_date, today)?;
        validate_cvv(&card.cvv)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
