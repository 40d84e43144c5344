//! The desk's mock backend.
//!
//! `StatsStore` owns every record collection and serves CRUD and statistics
//! queries to the screens. Each call waits for the configured artificial
//! latency first, then reads or mutates the state under a single lock
//! without awaiting, so a mutation is never partially applied.

use chrono::{Duration, Local, Utc};
use shared::{
    CollectionPayload, CollectionRecord, DashboardStats, ExpensePayload, ExpenseRecord,
    FinancialReport, LoginResponse, Member, MemberPayload, MenuItem, Role, StaffProfile,
    UserRecord,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::{LatencyKind, LatencyProfile, StoreConfig};
use crate::domain::dashboard::{compute_dashboard_stats, compute_financial_report};
use crate::domain::member_validation::{validate_collection, validate_expense, NormalizedMember};
use crate::error::{StoreError, StoreResult};
use crate::storage::StoreData;

/// Placeholder token handed out on every successful login
pub const DEMO_TOKEN: &str = "static-demo-token";

pub const MEMBERSHIP_TERM_DAYS: i64 = 30;

#[derive(Clone)]
pub struct StatsStore {
    data: Arc<RwLock<StoreData>>,
    latency: LatencyProfile,
}

impl StatsStore {
    /// Create a store over existing state
    pub fn new(data: StoreData, latency: LatencyProfile) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            latency,
        }
    }

    /// Create a store seeded and paced as `config` says
    pub fn from_config(config: &StoreConfig) -> Self {
        let data = if config.seed_demo_data {
            StoreData::demo(Utc::now())
        } else {
            StoreData::baseline()
        };
        info!(
            "Creating stats store: {} members, latency {}ms",
            data.members.len(),
            config.latency_ms
        );
        Self::new(data, config.latency())
    }

    /// Copy of the whole state, mostly for diagnostics and tests
    pub async fn snapshot(&self) -> StoreData {
        self.data.read().await.clone()
    }

    /// Check staff credentials; the username match ignores case
    pub async fn login(&self, username: &str, password: &str) -> StoreResult<LoginResponse> {
        self.latency.pause(LatencyKind::Standard).await;
        let wanted = username.trim().to_lowercase();
        info!("Login attempt for {}", wanted);

        let data = self.data.read().await;
        let user = data
            .users
            .iter()
            .find(|u| u.username.to_lowercase() == wanted)
            .filter(|u| u.password == password)
            .ok_or_else(|| {
                warn!("Rejected login for {}", wanted);
                StoreError::invalid_credentials()
            })?;

        Ok(LoginResponse {
            staff: StaffProfile::from(user),
            token: DEMO_TOKEN.to_string(),
        })
    }

    /// Register a new staff account
    pub async fn signup(&self, username: &str, password: &str, role: Role) -> StoreResult<StaffProfile> {
        self.latency.pause(LatencyKind::Standard).await;
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::validation("Username is required"));
        }

        let mut data = self.data.write().await;
        let lowered = username.to_lowercase();
        if data.users.iter().any(|u| u.username.to_lowercase() == lowered) {
            warn!("Signup conflict for {}", username);
            return Err(StoreError::conflict("Username already exists"));
        }

        let user = UserRecord {
            id: data.next_user_id(),
            username: username.to_string(),
            password: password.to_string(),
            role,
        };
        let profile = StaffProfile::from(&user);
        data.users.push(user);

        info!("Created {:?} account {} ({})", role, profile.username, profile.id);
        Ok(profile)
    }

    /// Dashboard aggregates against the local clock
    pub async fn get_dashboard_stats(&self) -> DashboardStats {
        self.latency.pause(LatencyKind::Standard).await;
        let data = self.data.read().await;
        compute_dashboard_stats(&data, &Local::now())
    }

    /// All-time totals across collections and expenses
    pub async fn get_financial_report(&self) -> FinancialReport {
        self.latency.pause(LatencyKind::Standard).await;
        let data = self.data.read().await;
        compute_financial_report(&data)
    }

    /// Get all members, newest first
    pub async fn get_members(&self) -> Vec<Member> {
        self.latency.pause(LatencyKind::Standard).await;
        self.data.read().await.members.clone()
    }

    /// Members whose name contains `query` (ignoring case) or whose contact
    /// contains it verbatim. A blank query matches everyone; otherwise the
    /// query is matched as typed, surrounding spaces included.
    pub async fn search_members(&self, query: &str) -> Vec<Member> {
        self.latency.pause(LatencyKind::Standard).await;
        let data = self.data.read().await;
        if query.trim().is_empty() {
            return data.members.clone();
        }

        let lowered = query.to_lowercase();
        data.members
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&lowered) || m.contact.contains(query))
            .cloned()
            .collect()
    }

    /// Get a member by ID
    pub async fn get_member_by_id(&self, id: &str) -> StoreResult<Member> {
        self.latency.pause(LatencyKind::Standard).await;
        self.data
            .read()
            .await
            .members
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| member_not_found(id))
    }

    /// Add a member with a fresh membership term
    pub async fn add_member(&self, payload: MemberPayload) -> StoreResult<Member> {
        self.latency.pause(LatencyKind::Standard).await;
        let normalized = NormalizedMember::from_payload(payload);
        if let Err(err) = normalized.require_complete() {
            warn!("Rejected member, missing {:?}", normalized.missing_fields());
            return Err(err);
        }

        let mut data = self.data.write().await;
        let member = Member {
            id: data.next_member_id(),
            name: normalized.name,
            gender: normalized.gender,
            dob: normalized.dob,
            anniversary: normalized.anniversary,
            contact: normalized.contact,
            address: normalized.address,
            group: normalized.group,
            photo: normalized.photo,
            membership_expires_on: Utc::now() + Duration::days(MEMBERSHIP_TERM_DAYS),
        };
        data.members.insert(0, member.clone());

        info!("Added member {} ({})", member.name, member.id);
        Ok(member)
    }

    /// Replaces every editable field with the normalized payload; id and
    /// membership expiry are kept.
    pub async fn update_member(&self, id: &str, payload: MemberPayload) -> StoreResult<Member> {
        self.latency.pause(LatencyKind::Standard).await;
        let normalized = NormalizedMember::from_payload(payload);

        let mut data = self.data.write().await;
        let member = data
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| member_not_found(id))?;

        member.name = normalized.name;
        member.gender = normalized.gender;
        member.dob = normalized.dob;
        member.anniversary = normalized.anniversary;
        member.contact = normalized.contact;
        member.address = normalized.address;
        member.group = normalized.group;
        member.photo = normalized.photo;

        info!("Updated member {} ({})", member.name, member.id);
        Ok(member.clone())
    }

    /// Delete a member
    pub async fn delete_member(&self, id: &str) -> StoreResult<()> {
        self.latency.pause(LatencyKind::Standard).await;
        let mut data = self.data.write().await;
        let index = data
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| member_not_found(id))?;

        let removed = data.members.remove(index);
        info!("Deleted member {} ({})", removed.name, removed.id);
        Ok(())
    }

    /// Get all collections, newest first
    pub async fn get_collections(&self) -> Vec<CollectionRecord> {
        self.latency.pause(LatencyKind::Standard).await;
        self.data.read().await.collections.clone()
    }

    /// Record a payment dated now
    pub async fn add_collection(&self, payload: CollectionPayload) -> StoreResult<CollectionRecord> {
        self.latency.pause(LatencyKind::Standard).await;
        let valid = validate_collection(payload).inspect_err(|e| warn!("Rejected collection: {}", e))?;

        let mut data = self.data.write().await;
        let record = CollectionRecord {
            id: data.next_collection_id(),
            member_name: valid.member_name,
            amount: valid.amount,
            mode: valid.mode,
            date: Utc::now(),
        };
        data.collections.insert(0, record.clone());

        info!("Recorded collection {} of {:.2} from {}", record.id, record.amount, record.member_name);
        Ok(record)
    }

    /// Get all expenses, newest first
    pub async fn get_expenses(&self) -> Vec<ExpenseRecord> {
        self.latency.pause(LatencyKind::Standard).await;
        self.data.read().await.expenses.clone()
    }

    /// Record an expense dated now
    pub async fn add_expense(&self, payload: ExpensePayload) -> StoreResult<ExpenseRecord> {
        self.latency.pause(LatencyKind::Standard).await;
        let valid = validate_expense(payload).inspect_err(|e| warn!("Rejected expense: {}", e))?;

        let mut data = self.data.write().await;
        let record = ExpenseRecord {
            id: data.next_expense_id(),
            description: valid.description,
            amount: valid.amount,
            category: valid.category,
            date: Utc::now(),
        };
        data.expenses.insert(0, record.clone());

        info!("Recorded expense {} of {:.2}: {}", record.id, record.amount, record.description);
        Ok(record)
    }

    /// Top-level items visible to `role`; children come back unfiltered.
    /// Without a role every item is returned.
    pub async fn get_menu_items(&self, role: Option<Role>) -> Vec<MenuItem> {
        self.latency.pause(LatencyKind::Menu).await;
        self.data
            .read()
            .await
            .menu_items
            .iter()
            .filter(|item| item.is_visible_to(role))
            .cloned()
            .collect()
    }
}

fn member_not_found(id: &str) -> StoreError {
    warn!("Member not found: {}", id);
    StoreError::not_found("Member not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::{DateTime, NaiveDate};
    use shared::{ExpenseCategory, Gender, MemberGroup, PaymentMode};

    fn setup_test() -> StatsStore {
        StatsStore::from_config(&StoreConfig::for_tests())
    }

    fn setup_demo() -> StatsStore {
        StatsStore::new(StoreData::demo(Utc::now()), LatencyProfile::none())
    }

    fn member_payload(name: &str) -> MemberPayload {
        MemberPayload {
            name: Some(name.to_string()),
            gender: Some(Gender::Male),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1),
            anniversary: None,
            contact: Some("123".to_string()),
            address: Some("Pune".to_string()),
            group: Some(MemberGroup::Yoga),
            photo: None,
        }
    }

    fn collection_payload(name: &str, amount: f64) -> CollectionPayload {
        CollectionPayload {
            member_name: Some(name.to_string()),
            amount: Some(amount),
            ..CollectionPayload::default()
        }
    }

    fn assert_close(actual: DateTime<Utc>, expected: DateTime<Utc>) {
        let drift = (actual - expected).num_seconds().abs();
        assert!(drift <= 5, "{} is {}s away from {}", actual, drift, expected);
    }

    #[tokio::test]
    async fn test_login_is_case_insensitive() {
        let store = setup_test();

        let response = store.login("ADMIN", "password").await.expect("Login failed");
        assert_eq!(response.staff.id, "u_1");
        assert_eq!(response.staff.username, "admin");
        assert_eq!(response.staff.role, Role::Admin);
        assert_eq!(response.token, DEMO_TOKEN);

        // Surrounding whitespace in the username is ignored
        assert!(store.login("  trainer ", "trainer").await.is_ok());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let store = setup_test();

        let err = store.login("admin", "wrong").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
        assert_eq!(err.status(), 401);

        let err = store.login("nobody", "password").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);

        // Passwords are compared exactly
        assert!(store.login("admin", "PASSWORD").await.is_err());
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let store = setup_test();

        let profile = store.signup(" newcoach ", "secret1", Role::Staff).await.expect("Signup failed");
        assert_eq!(profile.username, "newcoach");
        assert_eq!(profile.role, Role::Staff);
        assert!(profile.id.starts_with("u_"));

        let response = store.login("NewCoach", "secret1").await.expect("Login failed");
        assert_eq!(response.staff.id, profile.id);
    }

    #[tokio::test]
    async fn test_signup_conflict() {
        let store = setup_test();

        let err = store.signup("admin", "x", Role::Staff).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.status(), 409);

        let err = store.signup("Trainer", "x", Role::Admin).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_signup_requires_username() {
        let store = setup_test();

        let err = store.signup("   ", "x", Role::Staff).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(store.snapshot().await.users.len(), 2);
    }

    #[tokio::test]
    async fn test_add_member() {
        let store = setup_demo();
        let before = Utc::now();

        let member = store.add_member(member_payload("  Kabir Das ")).await.expect("Failed to add member");

        assert_eq!(member.name, "Kabir Das");
        assert!(member.id.starts_with("m_"));
        assert_close(member.membership_expires_on, before + Duration::days(30));

        let members = store.get_members().await;
        assert_eq!(members.len(), 4);
        assert_eq!(members[0], member);
    }

    #[tokio::test]
    async fn test_add_member_validation() {
        let store = setup_test();

        let payload = MemberPayload {
            name: Some(String::new()),
            ..member_payload("ignored")
        };
        let err = store.add_member(payload).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(err.message(), "Missing required member fields");

        let payload = MemberPayload {
            contact: Some("  ".to_string()),
            ..member_payload("Kabir Das")
        };
        assert!(store.add_member(payload).await.is_err());

        let payload = MemberPayload {
            gender: None,
            ..member_payload("Kabir Das")
        };
        assert!(store.add_member(payload).await.is_err());

        assert!(store.get_members().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_member_by_id() {
        let store = setup_demo();

        let member = store.get_member_by_id("m_2").await.expect("Failed to get member");
        assert_eq!(member.name, "Ananya Rao");

        let err = store.get_member_by_id("m_404").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn test_update_member_replaces_all_fields() {
        let store = setup_demo();
        let existing = store.get_member_by_id("m_3").await.unwrap();

        let payload = MemberPayload {
            name: Some(" Vikram S. ".to_string()),
            gender: Some(Gender::Male),
            contact: Some("9000001122".to_string()),
            group: Some(MemberGroup::Weight),
            ..MemberPayload::default()
        };
        let updated = store.update_member("m_3", payload).await.expect("Failed to update member");

        assert_eq!(updated.id, "m_3");
        assert_eq!(updated.name, "Vikram S.");
        assert_eq!(updated.group, Some(MemberGroup::Weight));
        // Omitted fields are cleared rather than kept
        assert_eq!(updated.address, "");
        assert_eq!(updated.dob, None);
        assert_eq!(updated.anniversary, None);
        assert_eq!(updated.membership_expires_on, existing.membership_expires_on);

        assert_eq!(store.get_member_by_id("m_3").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_member_skips_required_field_checks() {
        let store = setup_demo();

        let updated = store
            .update_member("m_1", MemberPayload::default())
            .await
            .expect("Failed to update member");

        assert_eq!(updated.name, "");
        assert_eq!(updated.gender, None);
        assert_eq!(updated.group, None);
    }

    #[tokio::test]
    async fn test_update_nonexistent_member() {
        let store = setup_test();

        let err = store.update_member("m_404", member_payload("Nobody")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_member_twice() {
        let store = setup_demo();

        store.delete_member("m_1").await.expect("Failed to delete member");
        assert_eq!(store.get_members().await.len(), 2);

        let err = store.delete_member("m_1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(store.get_member_by_id("m_1").await.is_err());
    }

    #[tokio::test]
    async fn test_get_members_returns_independent_copies() {
        let store = setup_demo();

        let mut first = store.get_members().await;
        let second = store.get_members().await;
        assert_eq!(first, second);

        first[0].name = "Changed".to_string();
        first.clear();
        assert_eq!(store.get_members().await, second);
    }

    #[tokio::test]
    async fn test_search_members() {
        let store = setup_demo();

        let found = store.search_members("rao").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ananya Rao");

        let found = store.search_members("90000").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "m_3");

        assert_eq!(store.search_members("  ").await.len(), 3);
        assert!(store.search_members("zzz").await.is_empty());

        // Only blankness is judged on the trimmed query
        assert!(store.search_members("rao ").await.is_empty());
        assert_eq!(store.search_members("ananya ").await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_collection() {
        let store = setup_test();
        let stale_date = Utc::now() - Duration::days(90);

        let payload = CollectionPayload {
            date: Some(stale_date),
            ..collection_payload(" Rohan Mehta ", 2500.0)
        };
        let record = store.add_collection(payload).await.expect("Failed to add collection");

        assert_eq!(record.member_name, "Rohan Mehta");
        assert_eq!(record.mode, PaymentMode::Cash);
        assert!(record.id.starts_with("c_"));
        // The caller's date is ignored
        assert_close(record.date, Utc::now());

        let second = store
            .add_collection(CollectionPayload {
                mode: Some(PaymentMode::Upi),
                ..collection_payload("Ananya Rao", 2200.0)
            })
            .await
            .unwrap();

        let collections = store.get_collections().await;
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0], second);
        assert_eq!(collections[0].mode, PaymentMode::Upi);
    }

    #[tokio::test]
    async fn test_add_collection_validation() {
        let store = setup_test();

        let err = store
            .add_collection(CollectionPayload {
                member_name: Some("Rohan Mehta".to_string()),
                ..CollectionPayload::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(err.message(), "Invalid collection payload");

        assert!(store.add_collection(collection_payload("", 100.0)).await.is_err());
        assert!(store.get_collections().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_expense() {
        let store = setup_test();

        let record = store
            .add_expense(ExpensePayload {
                description: Some("Protein bars ".to_string()),
                amount: Some(640.0),
                ..ExpensePayload::default()
            })
            .await
            .expect("Failed to add expense");

        assert_eq!(record.description, "Protein bars");
        assert_eq!(record.category, ExpenseCategory::Other);
        assert!(record.id.starts_with("e_"));
        assert_eq!(store.get_expenses().await, vec![record]);

        let err = store
            .add_expense(ExpensePayload {
                description: Some("   ".to_string()),
                amount: Some(10.0),
                ..ExpensePayload::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Invalid expense payload");
    }

    #[tokio::test]
    async fn test_dashboard_reflects_new_records() {
        let store = setup_test();
        store.add_member(member_payload("Kabir Das")).await.unwrap();
        let collection = store.add_collection(collection_payload("Kabir Das", 1000.0)).await.unwrap();
        let expense = store
            .add_expense(ExpensePayload {
                description: Some("Towels".to_string()),
                amount: Some(300.0),
                category: Some(ExpenseCategory::Maintenance),
                ..ExpensePayload::default()
            })
            .await
            .unwrap();

        let stats = store.get_dashboard_stats().await;
        assert_eq!(stats.active_members, 1);
        assert_eq!(stats.active_memberships, 1);
        assert_eq!(stats.today_expiry, 0);

        // Windows measured at the record timestamps, independent of the wall clock
        let data = store.snapshot().await;
        let at_collection = compute_dashboard_stats(&data, &collection.date);
        assert_eq!(at_collection.today_collection, 1000.0);
        assert_eq!(at_collection.week_collection, 1000.0);
        assert_eq!(at_collection.pending_collection, 1500.0);

        let at_expense = compute_dashboard_stats(&data, &expense.date);
        assert_eq!(at_expense.month_expenses, 300.0);
    }

    #[tokio::test]
    async fn test_financial_report() {
        let store = setup_demo();

        let report = store.get_financial_report().await;
        assert_eq!(report.total_members, 3);
        assert_eq!(report.total_collections, 6500.0);
        assert_eq!(report.total_expenses, 12700.0);
        assert_eq!(report.net_profit, -6200.0);
    }

    #[tokio::test]
    async fn test_menu_items_for_staff() {
        let store = setup_test();

        let items = store.get_menu_items(Some(Role::Staff)).await;
        assert!(items.iter().all(|item| item.id != "settings"));
        assert_eq!(items.len(), 6);

        // Children are returned untouched
        let reports = items.iter().find(|item| item.id == "reports").unwrap();
        assert_eq!(reports.children.as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_menu_items_for_admin_and_anonymous() {
        let store = setup_test();

        let admin_items = store.get_menu_items(Some(Role::Admin)).await;
        assert_eq!(admin_items.len(), 7);
        let settings = admin_items.iter().find(|item| item.id == "settings").unwrap();
        assert_eq!(settings.children.as_ref().map(Vec::len), Some(2));

        assert_eq!(store.get_menu_items(None).await.len(), 7);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = setup_test();
        let other = store.clone();

        other.add_member(member_payload("Kabir Das")).await.unwrap();
        assert_eq!(store.get_members().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_applied() {
        let store = setup_test();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .add_collection(collection_payload(&format!("Member {}", i), 100.0))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let collections = store.get_collections().await;
        assert_eq!(collections.len(), 20);
        let mut ids: Vec<_> = collections.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_operations_wait_for_latency() {
        let store = StatsStore::from_config(&StoreConfig::default());

        let started = tokio::time::Instant::now();
        store.get_members().await;
        assert!(started.elapsed() >= std::time::Duration::from_millis(350));

        let started = tokio::time::Instant::now();
        store.get_menu_items(None).await;
        let elapsed = started.elapsed();
        assert!(elapsed >= std::time::Duration::from_millis(100));
        assert!(elapsed < std::time::Duration::from_millis(350));
    }
}
