//! The in-memory state container behind the store.
//!
//! `StoreData` owns every collection. Fixture users and the sidebar menu are
//! always present; the demo roster (members, collections, expenses) is only
//! loaded when asked for, with dates relative to the moment it is built.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use shared::{
    CollectionRecord, ExpenseCategory, ExpenseRecord, Gender, MemberGroup, Member, MenuItem,
    PaymentMode, Role, UserRecord,
};
use uuid::Uuid;

use crate::domain::navigation::routes;

pub const MEMBER_ID_PREFIX: &str = "m";
pub const COLLECTION_ID_PREFIX: &str = "c";
pub const EXPENSE_ID_PREFIX: &str = "e";
pub const USER_ID_PREFIX: &str = "u";

const ID_SUFFIX_LEN: usize = 7;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreData {
    pub users: Vec<UserRecord>,
    pub members: Vec<Member>,
    pub collections: Vec<CollectionRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub menu_items: Vec<MenuItem>,
}

impl StoreData {
    /// Fixture users and menu, no members or money records
    pub fn baseline() -> Self {
        Self {
            users: fixture_users(),
            menu_items: sidebar_menu(),
            ..Self::default()
        }
    }

    /// Baseline plus the demo roster, dated relative to `now`
    pub fn demo(now: DateTime<Utc>) -> Self {
        Self {
            members: demo_members(now),
            collections: demo_collections(now),
            expenses: demo_expenses(now),
            ..Self::baseline()
        }
    }

    pub fn next_member_id(&self) -> String {
        generate_id(MEMBER_ID_PREFIX, |id| self.members.iter().any(|m| m.id == id))
    }

    pub fn next_collection_id(&self) -> String {
        generate_id(COLLECTION_ID_PREFIX, |id| self.collections.iter().any(|c| c.id == id))
    }

    pub fn next_expense_id(&self) -> String {
        generate_id(EXPENSE_ID_PREFIX, |id| self.expenses.iter().any(|e| e.id == id))
    }

    pub fn next_user_id(&self) -> String {
        generate_id(USER_ID_PREFIX, |id| self.users.iter().any(|u| u.id == id))
    }
}

/// `<prefix>_<7 hex chars>`, redrawn until it does not collide
pub fn generate_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!("{}_{}", prefix, &suffix[..ID_SUFFIX_LEN]);
        if !taken(&id) {
            return id;
        }
    }
}

fn fixture_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: "u_1".to_string(),
            username: "admin".to_string(),
            password: "password".to_string(),
            role: Role::Admin,
        },
        UserRecord {
            id: "u_2".to_string(),
            username: "trainer".to_string(),
            password: "trainer".to_string(),
            role: Role::Staff,
        },
    ]
}

fn demo_members(now: DateTime<Utc>) -> Vec<Member> {
    vec![
        Member {
            id: "m_1".to_string(),
            name: "Rohan Mehta".to_string(),
            gender: Some(Gender::Male),
            dob: NaiveDate::from_ymd_opt(1991, 4, 4),
            anniversary: None,
            contact: "9876543210".to_string(),
            address: "Bandra West, Mumbai".to_string(),
            group: Some(MemberGroup::Strength),
            photo: "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?auto=format&fit=crop&w=600&q=60".to_string(),
            membership_expires_on: now,
        },
        Member {
            id: "m_2".to_string(),
            name: "Ananya Rao".to_string(),
            gender: Some(Gender::Female),
            dob: NaiveDate::from_ymd_opt(1994, 9, 18),
            anniversary: None,
            contact: "9123456780".to_string(),
            address: "HSR Layout, Bengaluru".to_string(),
            group: Some(MemberGroup::Yoga),
            photo: "https://images.unsplash.com/photo-1544723795-3fb6469f5b39?auto=format&fit=crop&w=600&q=60".to_string(),
            membership_expires_on: now + Duration::days(2),
        },
        Member {
            id: "m_3".to_string(),
            name: "Vikram Singh".to_string(),
            gender: Some(Gender::Male),
            dob: NaiveDate::from_ymd_opt(1988, 12, 2),
            anniversary: NaiveDate::from_ymd_opt(2016, 2, 14),
            contact: "9000001122".to_string(),
            address: "Banjara Hills, Hyderabad".to_string(),
            group: Some(MemberGroup::Cardio),
            photo: String::new(),
            membership_expires_on: now + Duration::days(7),
        },
    ]
}

fn demo_collections(now: DateTime<Utc>) -> Vec<CollectionRecord> {
    vec![
        CollectionRecord {
            id: "c_1".to_string(),
            member_name: "Rohan Mehta".to_string(),
            amount: 2500.0,
            mode: PaymentMode::Upi,
            date: now,
        },
        CollectionRecord {
            id: "c_2".to_string(),
            member_name: "Ananya Rao".to_string(),
            amount: 2200.0,
            mode: PaymentMode::Cash,
            date: now - Duration::days(2),
        },
        CollectionRecord {
            id: "c_3".to_string(),
            member_name: "Vikram Singh".to_string(),
            amount: 1800.0,
            mode: PaymentMode::Card,
            date: now - Duration::days(10),
        },
    ]
}

fn demo_expenses(now: DateTime<Utc>) -> Vec<ExpenseRecord> {
    vec![
        ExpenseRecord {
            id: "e_1".to_string(),
            description: "New kettlebells".to_string(),
            amount: 1200.0,
            category: ExpenseCategory::Equipment,
            date: now,
        },
        ExpenseRecord {
            id: "e_2".to_string(),
            description: "Studio rent".to_string(),
            amount: 8000.0,
            category: ExpenseCategory::Rent,
            date: now - Duration::days(5),
        },
        ExpenseRecord {
            id: "e_3".to_string(),
            description: "Trainer payout".to_string(),
            amount: 3500.0,
            category: ExpenseCategory::Salary,
            date: now - Duration::days(35),
        },
    ]
}

fn menu_item(id: &str, title: &str, icon: &str, route: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        route: Some(route.to_string()),
        roles: None,
        children: None,
    }
}

fn sidebar_menu() -> Vec<MenuItem> {
    vec![
        menu_item("dashboard", "Dashboard", "home-outline", routes::DASHBOARD),
        menu_item("members", "Members", "people-outline", routes::MEMBERS),
        menu_item("collections", "Collections", "wallet-outline", routes::COLLECTIONS),
        menu_item("expenses", "Expenses", "receipt-outline", routes::EXPENSES),
        menu_item("profile", "Profile", "person-outline", routes::PROFILE),
        MenuItem {
            roles: Some(vec![Role::Admin]),
            children: Some(vec![
                menu_item("settings-general", "General Settings", "options-outline", routes::SETTINGS),
                menu_item("settings-account", "Account Settings", "person-circle-outline", routes::PROFILE),
            ]),
            ..menu_item("settings", "Settings", "settings-outline", routes::SETTINGS)
        },
        MenuItem {
            children: Some(vec![
                menu_item("reports-financial", "Financial Reports", "cash-outline", routes::REPORTS),
                menu_item("reports-members", "Member Reports", "people-outline", routes::REPORTS),
            ]),
            ..menu_item("reports", "Reports", "bar-chart-outline", routes::REPORTS)
        },
    ]
}
