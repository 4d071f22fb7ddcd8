// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Form-field validation.
//!
//! Everything here is pure and synchronous. Field validators report
//! `{valid, message}`. The forms derive `validator::Validate` with those
//! validators as custom rules, and every failure is collected so a form can
//! show all of its problems at once.

use std::borrow::Cow;

use chrono::NaiveDate;

use regex::Regex;

use validator::{Validate, ValidationError, ValidationErrors};

use bb;
use bb::error::ErrorKind;

pub const PHONE_DIGITS: usize = 10;
pub const MAX_AMOUNT: f64 = 999_999_999.0;
pub const TEXT_MIN: usize = 1;
pub const TEXT_MAX: usize = 500;
pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const ADDRESS_MAX: usize = 200;

lazy_static! {
    static ref NAME_CHARS: Regex = Regex::new(r"^[\p{L}0-9 \-'.]+$").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// The outcome of checking a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail<S: Into<String>>(message: S) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// A failed field within a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The outcome of checking a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormValidation {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl FormValidation {
    /// The message for a field, if that field failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when valid, otherwise a `ValidationError` carrying every
    /// failed field.
    pub fn into_result(self) -> bb::Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(ErrorKind::ValidationError(self.errors).into())
        }
    }
}

/// Exactly ten digits once spaces, dashes and parentheses are removed.
pub fn validate_phone(phone: &str) -> Validation {
    let cleaned: String = phone
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == '-' || *c == '(' || *c == ')'))
        .collect();

    if cleaned.is_empty() {
        return Validation::fail("Phone number is required");
    }
    if cleaned.len() != PHONE_DIGITS || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Validation::fail("Phone number must be exactly 10 digits");
    }
    Validation::ok()
}

/// A number greater than zero and no more than 999,999,999.
pub fn validate_amount(amount: &str) -> Validation {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Validation::fail("Amount is required");
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => validate_amount_value(value),
        _ => Validation::fail("Please enter a valid amount"),
    }
}

pub fn validate_amount_value(value: f64) -> Validation {
    if value.is_nan() {
        Validation::fail("Please enter a valid amount")
    } else if value <= 0.0 {
        Validation::fail("Amount must be greater than 0")
    } else if value > MAX_AMOUNT {
        Validation::fail("Amount cannot exceed 999,999,999")
    } else {
        Validation::ok()
    }
}

/// Trimmed length (in characters) within `[min_length, max_length]`.
pub fn validate_text(value: &str, field_name: &str, min_length: usize, max_length: usize) -> Validation {
    let length = value.trim().chars().count();
    if length == 0 && min_length > 0 {
        Validation::fail(format!("{} is required", field_name))
    } else if length < min_length {
        Validation::fail(format!(
            "{} must be at least {} characters",
            field_name, min_length
        ))
    } else if length > max_length {
        Validation::fail(format!(
            "{} must not exceed {} characters",
            field_name, max_length
        ))
    } else {
        Validation::ok()
    }
}

/// Required text with the default bounds of 1 to 500 characters.
pub fn validate_required(value: &str, field_name: &str) -> Validation {
    validate_text(value, field_name, TEXT_MIN, TEXT_MAX)
}

/// 2 to 100 characters of letters, digits, spaces, hyphens, apostrophes
/// and periods.
pub fn validate_name(name: &str, field_name: &str) -> Validation {
    let length = validate_text(name, field_name, NAME_MIN, NAME_MAX);
    if !length.valid {
        return length;
    }
    if !NAME_CHARS.is_match(name.trim()) {
        return Validation::fail(format!(
            "{} can only contain letters, numbers, spaces, hyphens, apostrophes and periods",
            field_name
        ));
    }
    Validation::ok()
}

/// Optional; at most 200 characters when given.
pub fn validate_address(address: Option<&str>) -> Validation {
    match address {
        Some(a) if a.trim().chars().count() > ADDRESS_MAX => {
            Validation::fail("Address must not exceed 200 characters")
        }
        _ => Validation::ok(),
    }
}

pub fn validate_email(email: Option<&str>, required: bool) -> Validation {
    match email.map(str::trim).filter(|e| !e.is_empty()) {
        None if required => Validation::fail("Email is required"),
        None => Validation::ok(),
        Some(e) if EMAIL.is_match(e) => Validation::ok(),
        Some(_) => Validation::fail("Please enter a valid email address"),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn validate_optional_date(value: &str, field_name: &str) -> Validation {
    if value.trim().is_empty() || parse_date(value).is_some() {
        Validation::ok()
    } else {
        Validation::fail(format!("{} is not a valid date", field_name))
    }
}

fn as_opt(value: &Option<String>) -> Option<&str> {
    value.as_ref().map(String::as_str)
}

// Field validators as `validator` rules. The rule code names the form field
// the failure belongs to.
fn rule(code: &'static str, outcome: Validation) -> Result<(), ValidationError> {
    if outcome.valid {
        return Ok(());
    }
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(outcome.message));
    Err(err)
}

fn check_customer_name(name: &str) -> Result<(), ValidationError> {
    rule("name", validate_name(name, "Customer name"))
}

fn check_phone(phone: &str) -> Result<(), ValidationError> {
    rule("phone", validate_phone(phone))
}

fn check_optional_email(email: &str) -> Result<(), ValidationError> {
    rule("email", validate_email(Some(email), false))
}

fn check_optional_address(address: &str) -> Result<(), ValidationError> {
    rule("address", validate_address(Some(address)))
}

fn check_amount(amount: &str) -> Result<(), ValidationError> {
    rule("amount", validate_amount(amount))
}

fn check_bill_customer(customer_id: &str) -> Result<(), ValidationError> {
    rule("customerId", validate_required(customer_id, "Customer"))
}

fn check_description(description: &str) -> Result<(), ValidationError> {
    rule("description", validate_text(description, "Description", 0, TEXT_MAX))
}

fn check_bill_date(date: &str) -> Result<(), ValidationError> {
    rule("billDate", validate_optional_date(date, "Bill date"))
}

fn check_due_date(date: &str) -> Result<(), ValidationError> {
    rule("dueDate", validate_optional_date(date, "Due date"))
}

fn check_bill_dates_in_order(form: &BillForm) -> Result<(), ValidationError> {
    let bill_on = as_opt(&form.bill_date).and_then(parse_date);
    let due_on = as_opt(&form.due_date).and_then(parse_date);
    match (bill_on, due_on) {
        (Some(bill_on), Some(due_on)) if due_on < bill_on => rule(
            "dueDate",
            Validation::fail("Due date cannot be before the bill date"),
        ),
        _ => Ok(()),
    }
}

fn check_payment_bill(bill_id: &str) -> Result<(), ValidationError> {
    rule("billId", validate_required(bill_id, "Bill"))
}

fn check_payment_mode(mode: &str) -> Result<(), ValidationError> {
    rule("paymentMode", validate_required(mode, "Payment mode"))
}

fn check_payment_date(date: &str) -> Result<(), ValidationError> {
    rule("paymentDate", validate_optional_date(date, "Payment date"))
}

fn check_cheque_number_for_cheques(form: &PaymentForm) -> Result<(), ValidationError> {
    if !form.payment_mode.trim().eq_ignore_ascii_case("cheque") {
        return Ok(());
    }
    rule(
        "chequeNumber",
        validate_required(as_opt(&form.cheque_number).unwrap_or(""), "Cheque number"),
    )
}

// Errors from struct-level rules are filed under this key.
const FORM_LEVEL: &str = "__all__";

/// A form field: its Rust field name and the name it is reported under.
type FormField = (&'static str, &'static str);

const CUSTOMER_FIELDS: &[FormField] = &[
    ("name", "name"),
    ("phone", "phone"),
    ("email", "email"),
    ("address", "address"),
];

const BILL_FIELDS: &[FormField] = &[
    ("customer_id", "customerId"),
    ("amount", "amount"),
    ("description", "description"),
    ("bill_date", "billDate"),
    ("due_date", "dueDate"),
];

const PAYMENT_FIELDS: &[FormField] = &[
    ("bill_id", "billId"),
    ("amount", "amount"),
    ("payment_mode", "paymentMode"),
    ("cheque_number", "chequeNumber"),
    ("payment_date", "paymentDate"),
];

fn message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

impl FormValidation {
    /// Flatten a `validator` report into one error per failed field, in
    /// form order.
    fn from_report(fields: &[FormField], report: Result<(), ValidationErrors>) -> Self {
        let report = match report {
            Ok(()) => return Self { valid: true, errors: vec![] },
            Err(report) => report,
        };
        let by_field = report.field_errors();
        let form_level: Vec<&ValidationError> = by_field
            .get(FORM_LEVEL)
            .map(|errors| errors.iter().collect())
            .unwrap_or_default();

        let errors: Vec<FieldError> = fields
            .iter()
            .filter_map(|&(field, reported_as)| {
                by_field
                    .get(field)
                    .or_else(|| by_field.get(reported_as))
                    .and_then(|errors| errors.first())
                    .or_else(|| form_level.iter().cloned().find(|e| e.code == reported_as))
                    .map(|e| FieldError::new(reported_as, message(e)))
            })
            .collect();

        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// The customer create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerForm {
    #[validate(custom = "check_customer_name")]
    pub name: String,
    #[validate(custom = "check_phone")]
    pub phone: String,
    #[validate(custom = "check_optional_email")]
    pub email: Option<String>,
    #[validate(custom = "check_optional_address")]
    pub address: Option<String>,
}

pub fn validate_customer(form: &CustomerForm) -> FormValidation {
    FormValidation::from_report(CUSTOMER_FIELDS, form.validate())
}

/// The bill create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "check_bill_dates_in_order", skip_on_field_errors = false))]
pub struct BillForm {
    #[validate(custom = "check_bill_customer")]
    pub customer_id: String,
    #[validate(custom = "check_amount")]
    pub amount: String,
    #[validate(custom = "check_description")]
    pub description: Option<String>,
    #[validate(custom = "check_bill_date")]
    pub bill_date: Option<String>,
    #[validate(custom = "check_due_date")]
    pub due_date: Option<String>,
}

pub fn validate_bill(form: &BillForm) -> FormValidation {
    FormValidation::from_report(BILL_FIELDS, form.validate())
}

/// The payment entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "check_cheque_number_for_cheques", skip_on_field_errors = false))]
pub struct PaymentForm {
    #[validate(custom = "check_payment_bill")]
    pub bill_id: String,
    #[validate(custom = "check_amount")]
    pub amount: String,
    #[validate(custom = "check_payment_mode")]
    pub payment_mode: String,
    pub cheque_number: Option<String>,
    #[validate(custom = "check_payment_date")]
    pub payment_date: Option<String>,
}

pub fn validate_payment(form: &PaymentForm) -> FormValidation {
    FormValidation::from_report(PAYMENT_FIELDS, form.validate())
}
