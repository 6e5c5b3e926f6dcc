//! Input normalizers for the data-entry fields. Each is a total function over
//! arbitrary user text; "not convertible" is an explicit return value, never a
//! panic.
//!
//! When each normalizer fires is decided by the controller, not here:
//!
//! | field       | while typing              | on leaving the field       |
//! |-------------|---------------------------|----------------------------|
//! | visit date  | at exactly 8 digits       | always                     |
//! | phone       | at 11 digits or more      | always (8/9/10/11 digits)  |
//! | monthly fee | never                     | always                     |
//!
//! Ten-digit phone input is deliberately left untouched while typing so an
//! in-progress eleven-digit mobile number is not reformatted halfway through.

pub mod currency;
pub mod date;
pub mod phone;

pub use currency::{normalize_currency, parse_fee_display, Money};
pub use date::VisitDate;
pub use phone::{normalize_phone, phone_digits};
