//! Normalization and validation of incoming member, collection and expense
//! payloads.

use chrono::NaiveDate;
use shared::{
    CollectionPayload, ExpenseCategory, ExpensePayload, Gender, MemberGroup, MemberPayload,
    PaymentMode,
};

use crate::error::{StoreError, StoreResult};

/// Member fields after trimming and defaulting.
///
/// Applied to the whole payload on both add and update, so anything the
/// caller leaves out becomes empty rather than keeping its old value.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMember {
    pub name: String,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub contact: String,
    pub address: String,
    pub group: Option<MemberGroup>,
    pub photo: String,
}

impl NormalizedMember {
    pub fn from_payload(payload: MemberPayload) -> Self {
        Self {
            name: trimmed(payload.name),
            gender: payload.gender,
            dob: payload.dob,
            anniversary: payload.anniversary,
            contact: trimmed(payload.contact),
            address: trimmed(payload.address),
            group: payload.group,
            photo: payload.photo.unwrap_or_default(),
        }
    }

    /// Names of the required fields that ended up empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.contact.is_empty() {
            missing.push("contact");
        }
        if self.group.is_none() {
            missing.push("group");
        }
        missing
    }

    pub fn require_complete(&self) -> StoreResult<()> {
        if self.missing_fields().is_empty() {
            Ok(())
        } else {
            Err(StoreError::validation("Missing required member fields"))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidCollection {
    pub member_name: String,
    pub amount: f64,
    pub mode: PaymentMode,
}

pub fn validate_collection(payload: CollectionPayload) -> StoreResult<ValidCollection> {
    let member_name = trimmed(payload.member_name);
    match (member_name.is_empty(), valid_amount(payload.amount)) {
        (false, Some(amount)) => Ok(ValidCollection {
            member_name,
            amount,
            mode: payload.mode.unwrap_or_default(),
        }),
        _ => Err(StoreError::validation("Invalid collection payload")),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense {
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
}

pub fn validate_expense(payload: ExpensePayload) -> StoreResult<ValidExpense> {
    let description = trimmed(payload.description);
    match (description.is_empty(), valid_amount(payload.amount)) {
        (false, Some(amount)) => Ok(ValidExpense {
            description,
            amount,
            category: payload.category.unwrap_or_default(),
        }),
        _ => Err(StoreError::validation("Invalid expense payload")),
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Amounts must be present, finite and non-negative
fn valid_amount(amount: Option<f64>) -> Option<f64> {
    amount.filter(|a| a.is_finite() && *a >= 0.0)
}
