//! # In-Memory Host
//!
//! Scriptable stand-ins for the checkout host, used by the demo binary and tests.
//!
//! - [`InMemoryCatalog`] answers catalog queries from a table of variant nodes.
//! - [`InMemoryCart`] keeps a list of cart lines and publishes every change on a
//!   watch channel, the way the host exposes its live cart.
//!
//! Both support *gates*: a gated call waits until the test opens the gate, which
//! makes the ordering of concurrent work deterministic.

use super::{CartMutator, CatalogQuery, TransportError};
use crate::model::{CartChangeResult, CartLine, CartLineChange, QueryResponse, VariantNode};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::{oneshot, watch};
use tracing::debug;

/// Releases one gated call when opened. Dropping it releases the call too.
pub struct Gate {
    release: oneshot::Sender<()>,
}

impl Gate {
    fn pair() -> (Self, oneshot::Receiver<()>) {
        let (release, wait) = oneshot::channel();
        (Self { release }, wait)
    }

    pub fn open(self) {
        let _ = self.release.send(());
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone)]
enum Answer {
    Respond(QueryResponse),
    Fail(String),
}

#[derive(Default)]
struct CatalogState {
    answers: HashMap<String, Answer>,
    gates: HashMap<String, VecDeque<oneshot::Receiver<()>>>,
    queried: Vec<String>,
}

/// Catalog answering from an in-memory table. Unknown ids resolve to `node: null`.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serves `node` for its own `id`.
    pub fn insert(&self, node: VariantNode) {
        let id = node.id.clone().unwrap_or_default();
        self.respond(id, QueryResponse::with_node(&node));
    }

    /// Serves a raw response for `id`.
    pub fn respond(&self, id: impl Into<String>, response: QueryResponse) {
        self.lock().answers.insert(id.into(), Answer::Respond(response));
    }

    /// Makes queries for `id` fail at the transport level.
    pub fn fail(&self, id: impl Into<String>, message: impl Into<String>) {
        self.lock().answers.insert(id.into(), Answer::Fail(message.into()));
    }

    /// Holds the next query for `id` until the returned gate is opened.
    pub fn gate(&self, id: impl Into<String>) -> Gate {
        let (gate, wait) = Gate::pair();
        self.lock().gates.entry(id.into()).or_default().push_back(wait);
        gate
    }

    /// Ids queried so far, in call order.
    pub fn queried(&self) -> Vec<String> {
        self.lock().queried.clone()
    }

    /// Number of queries issued for `id`.
    pub fn query_count(&self, id: &str) -> usize {
        self.lock().queried.iter().filter(|queried| *queried == id).count()
    }
}

#[async_trait]
impl CatalogQuery for InMemoryCatalog {
    async fn query(
        &self,
        _document: &str,
        variables: Value,
    ) -> Result<QueryResponse, TransportError> {
        let id = variables
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let gate = {
            let mut state = self.lock();
            state.queried.push(id.clone());
            state.gates.get_mut(&id).and_then(VecDeque::pop_front)
        };
        if let Some(wait) = gate {
            debug!(%id, "Catalog query gated");
            let _ = wait.await;
        }

        let answer = self.lock().answers.get(&id).cloned();
        match answer {
            Some(Answer::Respond(response)) => Ok(response),
            Some(Answer::Fail(message)) => Err(TransportError::Failed(message)),
            None => Ok(QueryResponse::not_found()),
        }
    }
}

// =============================================================================
// CART
// =============================================================================

#[derive(Debug, Clone)]
enum Override {
    Reject(String),
    Fail(String),
}

#[derive(Default)]
struct CartState {
    next_line: u32,
    report_line_ids: bool,
    overrides: VecDeque<Override>,
    gates: VecDeque<oneshot::Receiver<()>>,
    applied: Vec<CartLineChange>,
}

/// Cart holding its lines in memory.
pub struct InMemoryCart {
    state: Mutex<CartState>,
    lines: watch::Sender<Vec<CartLine>>,
}

impl Default for InMemoryCart {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCart {
    pub fn new() -> Self {
        let (lines, _) = watch::channel(Vec::new());
        Self {
            state: Mutex::new(CartState {
                next_line: 1,
                ..CartState::default()
            }),
            lines,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether successful adds report the new line id in their result.
    pub fn report_line_ids(&self, enabled: bool) {
        self.lock().report_line_ids = enabled;
    }

    /// Seeds the cart with an existing line.
    pub fn push_line(&self, line: CartLine) {
        self.lines.send_modify(|lines| lines.push(line));
    }

    /// The next change is answered with a non-success result.
    pub fn reject_next(&self, message: impl Into<String>) {
        self.lock().overrides.push_back(Override::Reject(message.into()));
    }

    /// The next change fails at the transport level.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().overrides.push_back(Override::Fail(message.into()));
    }

    /// Holds the next change until the returned gate is opened.
    pub fn gate_next(&self) -> Gate {
        let (gate, wait) = Gate::pair();
        self.lock().gates.push_back(wait);
        gate
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.borrow().clone()
    }

    /// Live view of the cart lines.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.lines.subscribe()
    }

    /// Changes received so far, in call order.
    pub fn applied(&self) -> Vec<CartLineChange> {
        self.lock().applied.clone()
    }

    fn apply(&self, change: &CartLineChange) -> CartChangeResult {
        match change {
            CartLineChange::AddCartLine { merchandise_id, .. } => {
                let line_id = {
                    let mut state = self.lock();
                    let line_id = format!("gid://shopify/CartLine/{}", state.next_line);
                    state.next_line += 1;
                    line_id
                };
                let line = CartLine::new(line_id.clone(), merchandise_id.clone());
                self.lines.send_modify(|lines| lines.push(line));
                let reported = self.lock().report_line_ids.then_some(line_id);
                CartChangeResult::Success { line_id: reported }
            }
            CartLineChange::RemoveCartLine { id, .. } => {
                let removed = self.lines.send_if_modified(|lines| {
                    let before = lines.len();
                    lines.retain(|line| line.id != *id);
                    lines.len() != before
                });
                if removed {
                    CartChangeResult::Success { line_id: None }
                } else {
                    CartChangeResult::Error {
                        message: format!("Cart line {id} not found"),
                    }
                }
            }
        }
    }
}

#[async_trait]
impl CartMutator for InMemoryCart {
    async fn apply_cart_lines_change(
        &self,
        change: CartLineChange,
    ) -> Result<CartChangeResult, TransportError> {
        let (gate, scripted) = {
            let mut state = self.lock();
            state.applied.push(change.clone());
            (state.gates.pop_front(), state.overrides.pop_front())
        };
        if let Some(wait) = gate {
            debug!(?change, "Cart change gated");
            let _ = wait.await;
        }

        match scripted {
            Some(Override::Reject(message)) => Ok(CartChangeResult::Error { message }),
            Some(Override::Fail(message)) => Err(TransportError::Failed(message)),
            None => Ok(self.apply(&change)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_catalog_answers_and_records_queries() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(VariantNode::new("v1").titled("Shirt"));
        catalog.fail("v2", "offline");

        let found = catalog.query("q", json!({"id": "v1"})).await.unwrap();
        assert_eq!(found, QueryResponse::with_node(&VariantNode::new("v1").titled("Shirt")));

        let failed = catalog.query("q", json!({"id": "v2"})).await;
        assert_eq!(failed, Err(TransportError::Failed("offline".into())));

        let missing = catalog.query("q", json!({"id": "v3"})).await.unwrap();
        assert_eq!(missing, QueryResponse::not_found());

        assert_eq!(catalog.queried(), vec!["v1", "v2", "v3"]);
        assert_eq!(catalog.query_count("v1"), 1);
    }

    #[tokio::test]
    async fn test_cart_add_remove_publishes_lines() {
        let cart = InMemoryCart::new();
        let mut lines = cart.subscribe();

        let added = cart
            .apply_cart_lines_change(CartLineChange::add("v1".into()))
            .await
            .unwrap();
        assert_eq!(added, CartChangeResult::Success { line_id: None });
        assert!(lines.has_changed().unwrap());
        let line_id = lines.borrow_and_update()[0].id.clone();

        let removed = cart
            .apply_cart_lines_change(CartLineChange::remove(line_id.clone()))
            .await
            .unwrap();
        assert!(removed.is_success());
        assert!(cart.lines().is_empty());

        let again = cart
            .apply_cart_lines_change(CartLineChange::remove(line_id))
            .await
            .unwrap();
        assert!(!again.is_success());
    }

    #[tokio::test]
    async fn test_cart_scripted_outcomes() {
        let cart = InMemoryCart::new();
        cart.report_line_ids(true);
        cart.reject_next("limit reached");
        cart.fail_next("offline");

        let rejected = cart
            .apply_cart_lines_change(CartLineChange::add("v1".into()))
            .await
            .unwrap();
        assert!(!rejected.is_success());

        let failed = cart.apply_cart_lines_change(CartLineChange::add("v1".into())).await;
        assert!(failed.is_err());

        let added = cart
            .apply_cart_lines_change(CartLineChange::add("v1".into()))
            .await
            .unwrap();
        assert_eq!(
            added,
            CartChangeResult::Success {
                line_id: Some("gid://shopify/CartLine/1".into())
            }
        );
        assert_eq!(cart.applied().len(), 3);
        assert_eq!(cart.lines().len(), 1);
    }
}
