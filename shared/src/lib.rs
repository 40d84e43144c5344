use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reads an optional calendar date sent either as `YYYY-MM-DD` or as a full
/// RFC 3339 timestamp (the UI sends `Date.toISOString()`). Timestamps keep the
/// calendar date in their own offset. Null or an empty string reads as `None`.
pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_calendar_date(text).map(Some).map_err(serde::de::Error::custom),
    }
}

pub fn parse_calendar_date(text: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|e| format!("Invalid date '{}': {}", text, e))
}

/// A gym member as stored by the desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Empty (`None`) only when an update omitted it
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "deserialize_calendar_date")]
    pub dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_calendar_date")]
    pub anniversary: Option<NaiveDate>,
    pub contact: String,
    pub address: String,
    /// Empty (`None`) only when an update omitted it
    pub group: Option<MemberGroup>,
    /// Data URI, remote URL, or empty when no photo was taken
    pub photo: String,
    pub membership_expires_on: DateTime<Utc>,
}

/// Input for adding or updating a member.
///
/// Every field is optional; the store normalizes missing values to empty
/// strings or `None` before validating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "deserialize_calendar_date")]
    pub dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_calendar_date")]
    pub anniversary: Option<NaiveDate>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub group: Option<MemberGroup>,
    pub photo: Option<String>,
}

/// A payment received from a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// Free text, not a reference to a stored member
    pub member_name: String,
    pub amount: f64,
    pub mode: PaymentMode,
    /// Assigned by the store at creation time
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPayload {
    pub member_name: Option<String>,
    pub amount: Option<f64>,
    /// Defaults to cash
    pub mode: Option<PaymentMode>,
    /// Accepted for compatibility with older clients, always ignored
    pub date: Option<DateTime<Utc>>,
}

/// Money spent by the gym
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    pub description: Option<String>,
    pub amount: Option<f64>,
    /// Defaults to other
    pub category: Option<ExpenseCategory>,
    /// Accepted for compatibility with older clients, always ignored
    pub date: Option<DateTime<Utc>>,
}

/// A staff account able to log in to the desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Staff,
}

/// Staff identity handed to the UI after login and cached by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    pub id: String,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl From<&UserRecord> for StaffProfile {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            email: None,
            phone: None,
            full_name: None,
        }
    }
}

/// Partial profile edit; present fields replace the cached ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfilePatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub staff: StaffProfile,
    pub token: String,
}

/// Sidebar entry; children are one level deep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Unset or empty means visible to every role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
}

impl MenuItem {
    pub fn is_visible_to(&self, role: Option<Role>) -> bool {
        match (&self.roles, role) {
            (None, _) => true,
            (Some(roles), _) if roles.is_empty() => true,
            (Some(_), None) => true,
            (Some(roles), Some(role)) => roles.contains(&role),
        }
    }
}

/// Aggregates shown on the dashboard and reports screens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_memberships: usize,
    pub active_members: usize,
    pub today_expiry: usize,
    pub today_collection: f64,
    pub week_collection: f64,
    pub pending_collection: f64,
    pub month_collection: f64,
    pub month_expenses: f64,
}

/// All-time totals for the reports screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub total_members: usize,
    pub total_collections: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
}

/// Rejection body in the shape the UI reads (`response.data.detail`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub detail: String,
}

/// Label/value pair used to fill pickers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub label: String,
    pub value: String,
}

/// Enumerations that have a wire value and a human label
pub trait Labeled: Copy + 'static {
    const ALL: &'static [Self];

    fn value(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn options() -> Vec<OptionItem> {
        Self::ALL
            .iter()
            .map(|item| OptionItem {
                label: item.label().to_string(),
                value: item.value().to_string(),
            })
            .collect()
    }

    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|item| item.value() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Labeled for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Other];

    fn value(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Training batch a member belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberGroup {
    Morning,
    Evening,
    Personal,
    Yoga,
    Cardio,
    Weight,
    Strength,
}

impl Labeled for MemberGroup {
    const ALL: &'static [Self] = &[
        MemberGroup::Morning,
        MemberGroup::Evening,
        MemberGroup::Personal,
        MemberGroup::Yoga,
        MemberGroup::Cardio,
        MemberGroup::Weight,
        MemberGroup::Strength,
    ];

    fn value(&self) -> &'static str {
        match self {
            MemberGroup::Morning => "morning",
            MemberGroup::Evening => "evening",
            MemberGroup::Personal => "personal",
            MemberGroup::Yoga => "yoga",
            MemberGroup::Cardio => "cardio",
            MemberGroup::Weight => "weight",
            MemberGroup::Strength => "strength",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MemberGroup::Morning => "Morning Batch",
            MemberGroup::Evening => "Evening Batch",
            MemberGroup::Personal => "Personal Training",
            MemberGroup::Yoga => "Yoga",
            MemberGroup::Cardio => "Cardio",
            MemberGroup::Weight => "Weight Training",
            MemberGroup::Strength => "Strength",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Cash,
    Upi,
    Card,
    Bank,
}

impl Labeled for PaymentMode {
    const ALL: &'static [Self] = &[
        PaymentMode::Cash,
        PaymentMode::Upi,
        PaymentMode::Card,
        PaymentMode::Bank,
    ];

    fn value(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Upi => "upi",
            PaymentMode::Card => "card",
            PaymentMode::Bank => "bank",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "Card",
            PaymentMode::Bank => "Bank Transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Equipment,
    Maintenance,
    Utilities,
    Salary,
    Rent,
    #[default]
    Other,
}

impl Labeled for ExpenseCategory {
    const ALL: &'static [Self] = &[
        ExpenseCategory::Equipment,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Utilities,
        ExpenseCategory::Salary,
        ExpenseCategory::Rent,
        ExpenseCategory::Other,
    ];

    fn value(&self) -> &'static str {
        match self {
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Salary => "salary",
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Equipment => "Equipment",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Salary => "Salary",
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl Labeled for Role {
    const ALL: &'static [Self] = &[Role::Admin, Role::Staff];

    fn value(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
        }
    }
}
