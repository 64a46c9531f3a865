//! # Validation Module
//!
//! Input validation for the HTML forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser                                                      │
//! │  └── <input type="number" min="1" required>                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Handler (Rust)                                               │
//! │  ├── Form decoding keeps raw strings                                   │
//! │  └── THIS MODULE: parse + range check → ValidationError                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  ├── Foreign key constraints                                           │
//! │  └── CHECK (quantity <> 0) on stock_movements                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cafe_core::validation::{parse_quantity, validate_quantity};
//!
//! assert_eq!(parse_quantity("5").unwrap(), 5);
//! assert!(parse_quantity("five").is_err());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ADJUSTMENT_QUANTITY, MAX_USERNAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock movement quantity.
///
/// ## Rules
/// - Must be positive (> 0); the direction supplies the sign
/// - Must not exceed MAX_ADJUSTMENT_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ADJUSTMENT_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ADJUSTMENT_QUANTITY,
        });
    }

    Ok(())
}

/// Parses and validates the raw `quantity` form field.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Stock In form                                                          │
/// │                                                                         │
/// │  Staff enters quantity: "12"                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity("12") ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── blank?        → "quantity is required"                       │
/// │       ├── not a number? → "quantity has invalid format: ..."           │
/// │       ├── <= 0?         → "quantity must be positive"                  │
/// │       ├── too large?    → "quantity must be between 1 and 10000"       │
/// │       │                                                                 │
/// │       └── OK(12) → record the movement                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }

    let qty: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    validate_quantity(qty)?;
    Ok(qty)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a staff user name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most MAX_USERNAME_LEN characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_username(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    Ok(name.to_string())
}
