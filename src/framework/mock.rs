//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_event`] or [`expect_snapshot`] to assert behavior.

use crate::framework::{ActorEntity, ActorRequest, ResourceClient, Response};
use tokio::sync::{mpsc, watch};

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// In unit tests we don't want to spin up a full `ResourceActor` if we are just
/// testing the *Client* logic (e.g., `UpsellClient`).
///
/// Instead, we create a "Mock Client". This client sends messages to a channel we
/// control (`receiver`). We can then inspect the messages arriving on that channel,
/// answer any responders they carry, and assert they are correct.
///
/// The client's watch channel is seeded with `initial` and never updated.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
    initial: T::Snapshot,
) -> (ResourceClient<T>, mpsc::Receiver<ActorRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_published, snapshots) = watch::channel(initial);
    (ResourceClient::new(sender, snapshots), receiver)
}

/// Helper to verify that the next message is an Event
pub async fn expect_event<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ActorRequest<T>>,
) -> Option<T::Event> {
    match receiver.recv().await {
        Some(ActorRequest::Event(event)) => Some(event),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ActorRequest<T>>,
) -> Option<Response<T::Snapshot>> {
    match receiver.recv().await {
        Some(ActorRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
