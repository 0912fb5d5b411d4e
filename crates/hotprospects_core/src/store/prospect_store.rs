//! Prospect store: collection ownership, persistence and change signals.
//!
//! # Responsibility
//! - Apply add/toggle/sort to the roster and save the full collection.
//! - Absorb load and save failures into `warn` diagnostics.
//! - Surface `NotFound` for stale ids as the only caller-visible failure.
//!
//! # Invariants
//! - Insertion order is the persisted order until a sort reorders it.
//! - Sorting is stable; equal keys keep their relative order.
//! - Saves run synchronously in mutation order, so an older snapshot never
//!   overwrites a newer one.
//! - Listeners fire once per mutation, after the save attempt returns.

use crate::model::prospect::{Prospect, ProspectId};
use crate::reminder::scheduler::ReminderScheduler;
use crate::repo::prospect_repo::ProspectRepository;
use crate::scan::code_parser::{parse_scan_payload, ParseError};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-visible store errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No prospect with this id is held by the store.
    NotFound(ProspectId),
    /// A prospect with this id is already held by the store.
    DuplicateId(ProspectId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "prospect not found: {id}"),
            Self::DuplicateId(id) => write!(f, "prospect already exists: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Contacted-state filter for roster views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProspectFilter {
    #[default]
    All,
    Contacted,
    Uncontacted,
}

impl ProspectFilter {
    pub fn matches(self, prospect: &Prospect) -> bool {
        match self {
            Self::All => true,
            Self::Contacted => prospect.is_contacted(),
            Self::Uncontacted => !prospect.is_contacted(),
        }
    }

    /// List title shown for this view.
    pub fn title(self) -> &'static str {
        match self {
            Self::All => "Everyone",
            Self::Contacted => "Connected People",
            Self::Uncontacted => "Unconnected People",
        }
    }

    /// Contacted state given to prospects scanned while this view is active.
    pub fn initial_contacted(self) -> bool {
        matches!(self, Self::Contacted)
    }
}

/// In-place reordering of the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending by name, byte-wise and case-sensitive.
    Name,
    /// Ascending by creation time: oldest first.
    Recency,
}

/// Result of a reminder request made through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// Request handed to the scheduler.
    Requested,
    /// Prospect is already contacted; nothing was requested.
    SkippedContacted,
}

/// Handle returned by `subscribe`, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn()>;

/// Owner of the prospect roster.
pub struct ProspectStore<R: ProspectRepository> {
    repo: R,
    prospects: Vec<Prospect>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<R: ProspectRepository> ProspectStore<R> {
    /// Creates an empty store. Call `load` to populate it.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            prospects: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Replaces the roster with the persisted collection.
    ///
    /// Missing or corrupt storage leaves the current roster untouched and is
    /// only logged; a first run without saved data is expected.
    pub fn load(&mut self) {
        match self.repo.load() {
            Ok(loaded) => {
                let loaded_count = loaded.len();
                let mut seen = HashSet::with_capacity(loaded_count);
                let prospects: Vec<Prospect> = loaded
                    .into_iter()
                    .filter(|prospect| seen.insert(prospect.id()))
                    .collect();
                let dropped = loaded_count - prospects.len();
                if dropped > 0 {
                    warn!(
                        "event=store_load module=store status=degraded reason=duplicate_ids dropped={}",
                        dropped
                    );
                }
                self.prospects = prospects;
                info!(
                    "event=store_load module=store status=ok count={}",
                    self.prospects.len()
                );
                self.notify();
            }
            Err(err) if err.is_missing() => {
                info!("event=store_load module=store status=empty reason=no_saved_data");
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error error_code={} error={}",
                    err.code(),
                    err
                );
            }
        }
    }

    /// Appends a prospect, persists and notifies.
    ///
    /// Duplicate names/emails are allowed; only a repeated id is rejected.
    pub fn add(&mut self, prospect: Prospect) -> StoreResult<ProspectId> {
        let id = prospect.id();
        if self.position(id).is_some() {
            return Err(StoreError::DuplicateId(id));
        }
        Ok(self.append(prospect))
    }

    /// Parses a scan payload and adds the resulting prospect.
    ///
    /// Malformed payloads add nothing and are logged. The new prospect starts
    /// contacted only when scanned from the contacted view.
    pub fn add_scanned(
        &mut self,
        raw: &str,
        filter: ProspectFilter,
    ) -> Result<ProspectId, ParseError> {
        let contact = parse_scan_payload(raw).map_err(|err| {
            info!(
                "event=scan_ingest module=store status=rejected error={}",
                err
            );
            err
        })?;

        let prospect = Prospect::new()
            .with_name(contact.name)
            .with_email(contact.email)
            .contacted_at_creation(filter.initial_contacted());
        Ok(self.append(prospect))
    }

    /// Flips the contacted state of one prospect and returns the new value.
    ///
    /// Unknown ids leave the roster untouched and skip persistence.
    pub fn toggle(&mut self, id: ProspectId) -> StoreResult<bool> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        let prospect = &mut self.prospects[index];
        prospect.toggle_contacted();
        let contacted = prospect.is_contacted();

        self.persist("toggle");
        self.notify();
        Ok(contacted)
    }

    /// Reorders the roster in place, persists and notifies.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Name => self.prospects.sort_by(|a, b| a.name().cmp(b.name())),
            SortOrder::Recency => self.prospects.sort_by_key(Prospect::created_at),
        }

        self.persist("sort");
        self.notify();
    }

    /// Prospects matching `filter`, in roster order.
    pub fn query(&self, filter: ProspectFilter) -> impl Iterator<Item = &Prospect> + '_ {
        self.prospects
            .iter()
            .filter(move |prospect| filter.matches(prospect))
    }

    pub fn get(&self, id: ProspectId) -> Option<&Prospect> {
        self.position(id).map(|index| &self.prospects[index])
    }

    pub fn prospects(&self) -> &[Prospect] {
        &self.prospects
    }

    pub fn len(&self) -> usize {
        self.prospects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prospects.is_empty()
    }

    /// Requests a follow-up reminder for an uncontacted prospect.
    ///
    /// Delivery is fire-and-forget; only an unknown id is reported.
    pub fn remind<S>(
        &self,
        id: ProspectId,
        scheduler: &S,
        delay: Duration,
    ) -> StoreResult<ReminderOutcome>
    where
        S: ReminderScheduler + ?Sized,
    {
        let prospect = self.get(id).ok_or(StoreError::NotFound(id))?;
        if prospect.is_contacted() {
            return Ok(ReminderOutcome::SkippedContacted);
        }

        scheduler.schedule_reminder(prospect, delay);
        Ok(ReminderOutcome::Requested)
    }

    /// Registers a listener fired after every mutation.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(candidate, _)| *candidate != id);
        self.listeners.len() != before
    }

    fn append(&mut self, prospect: Prospect) -> ProspectId {
        let id = prospect.id();
        self.prospects.push(prospect);
        self.persist("add");
        self.notify();
        id
    }

    fn position(&self, id: ProspectId) -> Option<usize> {
        self.prospects.iter().position(|prospect| prospect.id() == id)
    }

    fn persist(&self, operation: &'static str) {
        if let Err(err) = self.repo.save(&self.prospects) {
            warn!(
                "event=store_persist module=store status=degraded op={} error_code={} error={}",
                operation,
                err.code(),
                err
            );
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener();
        }
    }
}
