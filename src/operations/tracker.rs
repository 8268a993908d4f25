use crate::db::store::BudgetStore;
use crate::errors::{BudgetError, Result};
use crate::models::budget::{BudgetCategory, BudgetItem, DEFAULT_CATEGORIES};
use crate::models::notification::Notification;
use crate::models::snapshot::Snapshot;
use crate::operations::notify::Notifier;
use crate::operations::snapshot::SnapshotStore;
use crate::operations::totals::{BudgetSummary, BudgetTotals, DEFAULT_MONTHLY_INCOME};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

pub struct BudgetTracker<S: BudgetStore, N: Notifier> {
    store: S,
    notifier: N,
    snapshots: Option<SnapshotStore>,
    categories: Vec<BudgetCategory>,
    state: LoadState,
    income: Decimal,
    live: bool,
}

impl<S: BudgetStore, N: Notifier> BudgetTracker<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            snapshots: None,
            categories: Vec::new(),
            state: LoadState::Loading,
            income: Decimal::from(DEFAULT_MONTHLY_INCOME),
            live: true,
        }
    }

    pub fn with_income(mut self, income: Decimal) -> Self {
        self.income = income;
        self
    }

    pub fn with_snapshots(mut self, snapshots: SnapshotStore) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn categories(&self) -> &[BudgetCategory] {
        &self.categories
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn totals(&self) -> BudgetTotals {
        BudgetTotals::compute(&self.categories)
    }

    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary::new(&self.categories, self.income)
    }

    pub fn item(&self, category_id: &str, item_id: &str) -> Option<&BudgetItem> {
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .and_then(|c| c.item(item_id))
    }

    pub fn find_by_name(&self, category_name: &str, item_name: &str) -> Option<(String, String)> {
        let category = self
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(category_name.trim()))?;
        let item = category
            .items
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(item_name.trim()))?;
        Some((category.id.clone(), item.id.clone()))
    }

    /// Always ends in [`LoadState::Ready`]; on failure the list is left empty.
    pub fn load(&mut self) -> Result<()> {
        self.state = LoadState::Loading;
        let result = self.fetch_or_seed();
        self.state = LoadState::Ready;

        match result {
            Ok(categories) => {
                if !self.live {
                    warn!("Budget loaded after tracker was closed; discarding");
                    return Ok(());
                }
                info!("Loaded {} budget categories", categories.len());
                self.categories = categories;
                Ok(())
            }
            Err(err) => {
                self.categories.clear();
                Err(self.fail(err))
            }
        }
    }

    fn fetch_or_seed(&mut self) -> Result<Vec<BudgetCategory>> {
        let user_id = self.store.current_user().ok_or(BudgetError::AuthRequired)?;

        let categories = self.fetch(&user_id)?;
        if !categories.is_empty() {
            return Ok(categories);
        }

        self.seed(&user_id)?;
        self.fetch(&user_id)
    }

    fn fetch(&self, user_id: &str) -> Result<Vec<BudgetCategory>> {
        let records = self
            .store
            .list_categories(user_id)
            .map_err(BudgetError::FetchFailed)?;
        Ok(records.into_iter().map(BudgetCategory::from).collect())
    }

    fn seed(&mut self, user_id: &str) -> Result<()> {
        info!("No budget found for user {}, creating the default one", user_id);
        let created = self
            .store
            .seed_defaults(user_id, DEFAULT_CATEGORIES)
            .map_err(|e| BudgetError::WriteFailed(format!("Failed to create initial budget: {}", e)))?;
        debug!("Seeded {} default categories", created);
        Ok(())
    }

    // Memory only changes once the store has accepted the write.
    pub fn update_item_amount(&mut self, category_id: &str, item_id: &str, new_amount: Decimal) -> Result<()> {
        let is_fixed = match self.item(category_id, item_id) {
            Some(item) => item.is_fixed,
            None => {
                return Err(self.fail(BudgetError::ValidationFailed(format!(
                    "Unknown budget item {}",
                    item_id
                ))));
            }
        };

        if is_fixed {
            debug!("Ignoring amount change for fixed item {}", item_id);
            return Ok(());
        }

        if new_amount < Decimal::ZERO {
            return Err(self.fail(BudgetError::ValidationFailed(
                "Amount cannot be negative".to_string(),
            )));
        }

        if let Err(e) = self.store.update_item_amount(item_id, new_amount) {
            return Err(self.fail(BudgetError::WriteFailed(e)));
        }

        if !self.live {
            warn!("Amount for item {} confirmed after tracker was closed; discarding", item_id);
            return Ok(());
        }

        if let Some(item) = self.item_mut(category_id, item_id) {
            item.actual_amount = new_amount;
        }
        info!("Updated item {} to {}", item_id, new_amount);
        self.notifier
            .notify(Notification::success("Success", "Budget amount updated"));
        Ok(())
    }

    pub fn toggle_fixed(&mut self, category_id: &str, item_id: &str) -> Result<()> {
        let is_fixed = match self.item(category_id, item_id) {
            Some(item) => !item.is_fixed,
            None => {
                return Err(self.fail(BudgetError::ValidationFailed(format!(
                    "Unknown budget item {}",
                    item_id
                ))));
            }
        };

        if let Err(e) = self.store.update_item_fixed(item_id, is_fixed) {
            return Err(self.fail(BudgetError::WriteFailed(e)));
        }

        if !self.live {
            return Ok(());
        }

        if let Some(item) = self.item_mut(category_id, item_id) {
            item.is_fixed = is_fixed;
        }
        let label = if is_fixed { "fixed" } else { "variable" };
        info!("Marked item {} as {}", item_id, label);
        self.notifier
            .notify(Notification::success("Success", format!("Item marked as {}", label)));
        Ok(())
    }

    pub fn snapshots(&self) -> Vec<&Snapshot> {
        self.snapshots
            .as_ref()
            .map(|store| store.list())
            .unwrap_or_default()
    }

    pub fn save_snapshot(&mut self, name: &str) -> Result<()> {
        let result = match self.snapshots.as_mut() {
            Some(store) => match store.save(name, &self.categories, Utc::now()) {
                Ok(snapshot) => {
                    let saved = snapshot.name.clone();
                    debug!("Wrote snapshot file {}", store.path().display());
                    Ok(saved)
                }
                Err(e) => Err(e),
            },
            None => Err(BudgetError::LocalStorageFailed(
                "No snapshot file configured".to_string(),
            )),
        };

        match result {
            Ok(saved) => {
                info!("Saved budget snapshot '{}'", saved);
                self.notifier
                    .notify(Notification::success("Success", format!("Budget '{}' saved", saved)));
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub fn select_snapshot(&mut self, name: &str) -> Result<()> {
        let data = self
            .snapshots
            .as_ref()
            .and_then(|store| store.get(name))
            .map(|snapshot| snapshot.data.clone());

        match data {
            Some(data) => {
                info!("Loaded budget snapshot '{}'", name.trim());
                self.categories = data;
                self.notifier
                    .notify(Notification::success("Success", format!("Loaded budget '{}'", name.trim())));
                Ok(())
            }
            None => Err(self.fail(BudgetError::ValidationFailed(format!(
                "No saved budget named '{}'",
                name.trim()
            )))),
        }
    }

    /// Writes confirmed after this are not applied.
    pub fn close(&mut self) {
        self.live = false;
    }

    fn item_mut(&mut self, category_id: &str, item_id: &str) -> Option<&mut BudgetItem> {
        self.categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .and_then(|c| c.item_mut(item_id))
    }

    fn fail(&mut self, err: BudgetError) -> BudgetError {
        match err {
            BudgetError::ValidationFailed(_) | BudgetError::AuthRequired => warn!("{}", err),
            _ => error!("{}", err),
        }
        self.notifier
            .notify(Notification::error(err.title(), err.to_string()));
        err
    }
}
