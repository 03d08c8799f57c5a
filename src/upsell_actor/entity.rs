//! [`ActorEntity`] implementation for the upsell widget.
//!
//! The widget is a small dependency graph recomputed on every event:
//!
//! ```text
//! settings ──> config ──(ids changed?)──> placeholders ──> batch ──> records
//!                                                                  ▲      │
//! cart lines ──────────────────────────────── overlay ─────────────┘      ▼
//!                                                     permissions ──> view
//! ```
//!
//! Only the batch and cart mutations suspend, and both run outside the actor.
//! Their results are applied against the state current at the time they arrive.

use super::events::UpsellEvent;
use crate::cart::{apply_change_result, plan_toggle, reconcile, ToggleOutcome, TogglePlan};
use crate::catalog::{load_all, placeholders};
use crate::config::{resolve, ResolvedConfig};
use crate::framework::{ActorEntity, Mailbox, Response};
use crate::host::{Host, Localizer, TransportError};
use crate::model::{
    CartChangeResult, CartLine, CartLineChange, CartMembership, CartPermissions, MerchandiseId,
    ProductRecord, Settings,
};
use crate::view::{select_view, View, ViewInput};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the host needs to render, published after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub config: ResolvedConfig,
    pub records: Vec<ProductRecord>,
    pub permissions: CartPermissions,
    /// True until the first batch settles.
    pub initial_loading: bool,
    /// Generation of the most recent batch.
    pub generation: u64,
    pub view: View,
}

impl WidgetSnapshot {
    /// True when no record is waiting for its catalog fetch.
    pub fn is_settled(&self) -> bool {
        !self.view.is_loading() && self.records.iter().all(|record| !record.loading)
    }

    pub fn record(&self, merchandise_id: &str) -> Option<&ProductRecord> {
        self.records
            .iter()
            .find(|record| record.merchandise_id().as_str() == merchandise_id)
    }
}

/// State of one mounted upsell widget.
pub struct UpsellWidget {
    localizer: Arc<dyn Localizer>,
    settings: Settings,
    config: ResolvedConfig,
    records: Vec<ProductRecord>,
    cart_lines: Vec<CartLine>,
    permissions: CartPermissions,
    generation: u64,
    initial_loading: bool,
}

impl UpsellWidget {
    pub fn new(localizer: Arc<dyn Localizer>, settings: Settings) -> Self {
        let config = resolve(&settings, localizer.as_ref());
        let initial_loading = !config.merchandise_ids.is_empty();
        let records = placeholders(&config.merchandise_ids);
        Self {
            localizer,
            settings,
            config,
            records,
            cart_lines: Vec::new(),
            permissions: CartPermissions::default(),
            generation: 0,
            initial_loading,
        }
    }

    /// Replaces the record list with fresh placeholders for `ids` and starts a new batch.
    ///
    /// Returns `false` when the widget is shutting down and no batch could be
    /// started; the current records and generation are then left alone.
    fn restart_batch(
        &mut self,
        ids: &[MerchandiseId],
        host: &Host,
        mailbox: &Mailbox<Self>,
    ) -> bool {
        let fresh = reconcile(&placeholders(ids), &self.cart_lines);

        if ids.is_empty() {
            self.generation += 1;
            debug!(generation = self.generation, "No products configured, skipping batch");
            self.records = fresh;
            self.initial_loading = false;
            return true;
        }

        let generation = self.generation + 1;
        let batch = ids.to_vec();
        let catalog = Arc::clone(&host.catalog);
        let localizer = Arc::clone(&self.localizer);
        let started = mailbox.spawn(async move {
            let records = load_all(&batch, catalog.as_ref(), localizer.as_ref()).await;
            UpsellEvent::BatchSettled { generation, records }
        });
        if !started {
            debug!(generation, "Widget shutting down, batch not started");
            return false;
        }

        info!(generation, count = ids.len(), "Loading products");
        self.generation = generation;
        self.records = fresh;
        true
    }

    fn on_settings(&mut self, settings: Settings, host: &Host, mailbox: &Mailbox<Self>) {
        let next = resolve(&settings, self.localizer.as_ref());
        if !next.products_differ(&self.config) {
            debug!("Product list unchanged");
        } else if !self.restart_batch(&next.merchandise_ids, host, mailbox) {
            debug!("Settings change ignored");
            return;
        }
        self.settings = settings;
        self.config = next;
    }

    fn on_batch_settled(&mut self, generation: u64, loaded: Vec<ProductRecord>) {
        if generation != self.generation {
            warn!(generation, current = self.generation, "Discarding stale batch");
            return;
        }

        // Keep whatever cart membership the records picked up while loading
        let mut membership: HashMap<MerchandiseId, CartMembership> = self
            .records
            .iter()
            .map(|record| (record.merchandise_id().clone(), record.membership.clone()))
            .collect();
        self.records = loaded
            .into_iter()
            .map(|mut record| {
                record.membership = membership.remove(record.merchandise_id()).unwrap_or_default();
                record
            })
            .collect();
        self.initial_loading = false;
        info!(generation, count = self.records.len(), "Products loaded");
    }

    fn on_toggle(
        &mut self,
        merchandise_id: MerchandiseId,
        checked: bool,
        respond_to: Response<ToggleOutcome>,
        host: &Host,
        mailbox: &Mailbox<Self>,
    ) {
        match plan_toggle(&self.records, &merchandise_id, checked, self.permissions) {
            TogglePlan::Skip(outcome) => {
                debug!(%merchandise_id, checked, ?outcome, "Toggle skipped");
                let _ = respond_to.send(outcome);
            }
            TogglePlan::Dispatch(change) => {
                debug!(%merchandise_id, ?change, "Applying cart change");
                let target = merchandise_id.clone();
                let cart = Arc::clone(&host.cart);
                let started = mailbox.spawn(async move {
                    let result = cart.apply_cart_lines_change(change.clone()).await;
                    UpsellEvent::MutationSettled {
                        merchandise_id,
                        change,
                        result,
                        respond_to,
                    }
                });
                if !started {
                    debug!(merchandise_id = %target, "Widget shutting down, cart change not sent");
                }
            }
        }
    }

    fn on_mutation_settled(
        &mut self,
        merchandise_id: MerchandiseId,
        change: CartLineChange,
        result: Result<CartChangeResult, TransportError>,
        respond_to: Response<ToggleOutcome>,
    ) {
        let outcome = match result {
            Ok(result) => {
                let (records, outcome) =
                    apply_change_result(&self.records, &merchandise_id, &change, &result);
                self.records = records;
                if result.is_success() {
                    info!(%merchandise_id, ?change, "Cart change applied");
                } else {
                    warn!(%merchandise_id, ?change, ?result, "Cart change rejected");
                }
                outcome
            }
            Err(error) => {
                warn!(%merchandise_id, ?change, %error, "Cart change failed");
                ToggleOutcome::Rejected
            }
        };
        let _ = respond_to.send(outcome);
    }
}

impl ActorEntity for UpsellWidget {
    type Event = UpsellEvent;
    type Snapshot = WidgetSnapshot;
    type Context = Host;

    fn snapshot(&self) -> WidgetSnapshot {
        let view = select_view(
            ViewInput {
                config: &self.config,
                records: &self.records,
                initial_loading: self.initial_loading,
                permissions: self.permissions,
            },
            self.localizer.as_ref(),
        );
        WidgetSnapshot {
            config: self.config.clone(),
            records: self.records.clone(),
            permissions: self.permissions,
            initial_loading: self.initial_loading,
            generation: self.generation,
            view,
        }
    }

    fn on_start(&mut self, host: &Host, mailbox: &Mailbox<Self>) {
        debug!(settings = ?self.settings, "Mounting widget");
        let ids = self.config.merchandise_ids.clone();
        self.restart_batch(&ids, host, mailbox);
    }

    fn handle_event(&mut self, event: UpsellEvent, host: &Host, mailbox: &Mailbox<Self>) {
        match event {
            UpsellEvent::SettingsChanged(settings) => self.on_settings(settings, host, mailbox),
            UpsellEvent::CartChanged(lines) => {
                self.cart_lines = lines;
                self.records = reconcile(&self.records, &self.cart_lines);
            }
            UpsellEvent::PermissionsChanged(permissions) => self.permissions = permissions,
            UpsellEvent::Toggle {
                merchandise_id,
                checked,
                respond_to,
            } => self.on_toggle(merchandise_id, checked, respond_to, host, mailbox),
            UpsellEvent::BatchSettled {
                generation,
                records,
            } => self.on_batch_settled(generation, records),
            UpsellEvent::MutationSettled {
                merchandise_id,
                change,
                result,
                respond_to,
            } => self.on_mutation_settled(merchandise_id, change, result, respond_to),
        }
    }
}
