//! # Core Actor Framework
//!
//! This module defines the generic building blocks the widget runtime is made of.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait a piece of owned state implements to be driven by events.
//! - [`ResourceActor`]: The generic actor that owns the entity and runs its event loop.
//! - [`ResourceClient`]: The generic, cloneable client for talking to the actor.
//! - [`Mailbox`]: A weak handle the entity uses to run async work and receive its result later.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, ActorDropped).

use std::fmt::Debug;
use std::future::Future;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any state owner must implement to be driven by a [`ResourceActor`].
///
/// # Architecture Note
/// The actor loop is written *once* and works for any entity. The entity only
/// describes how a single event changes its state and what a snapshot of that
/// state looks like.
///
/// Handlers are synchronous on purpose: the entity never suspends while holding
/// its state. Anything that has to wait on I/O is handed to the [`Mailbox`],
/// which runs it in a separate task and feeds the outcome back as a new event.
///
/// # Context
/// The `Context` type is injected into every hook at `run()` time ("late binding"),
/// so dependencies can be wired after the actor has been constructed.
pub trait ActorEntity: Sized + Send + 'static {
    /// Messages the entity reacts to, both host-delivered and internal.
    type Event: Send + Debug + 'static;

    /// Read-only view of the state, published after every event that changes it.
    type Snapshot: Clone + PartialEq + Send + Sync + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync + 'static;

    /// Produce the current snapshot.
    fn snapshot(&self) -> Self::Snapshot;

    /// Called once before the first event is processed.
    fn on_start(&mut self, _ctx: &Self::Context, _mailbox: &Mailbox<Self>) {}

    /// Apply one event to the state.
    fn handle_event(&mut self, event: Self::Event, ctx: &Self::Context, mailbox: &Mailbox<Self>);
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<T>;

/// Message type sent to the actor.
///
/// - **Event**: Feed one event into [`ActorEntity::handle_event`].
/// - **Snapshot**: Read the state as of the moment the actor reaches this message.
///   Because the mailbox is FIFO, a snapshot request sent after an event always
///   observes that event.
pub enum ActorRequest<T: ActorEntity> {
    Event(T::Event),
    Snapshot { respond_to: Response<T::Snapshot> },
}

/// Weak handle to the actor's own channel.
///
/// Handed to the entity so it can start async work whose result comes back as an
/// event. It does not keep the actor alive: once every client is dropped and no
/// spawned work is pending, the channel closes and the loop exits.
pub struct Mailbox<T: ActorEntity> {
    sender: mpsc::WeakSender<ActorRequest<T>>,
}

impl<T: ActorEntity> Mailbox<T> {
    /// Runs `task` in its own Tokio task and delivers its output back to the actor.
    ///
    /// Returns `false` when the actor is already shutting down and the task was not started.
    pub fn spawn<F>(&self, task: F) -> bool
    where
        F: Future<Output = T::Event> + Send + 'static,
    {
        let Some(sender) = self.sender.upgrade() else {
            debug!("Mailbox closed, task not started");
            return false;
        };
        tokio::spawn(async move {
            let event = task.await;
            if sender.send(ActorRequest::Event(event)).await.is_err() {
                debug!("Actor gone before task result arrived");
            }
        });
        true
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns one entity.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the entity and the
/// receiver end of the channel, and processes messages *sequentially*. All state
/// changes happen here, so the entity needs no `Mutex` even though its async work
/// completes on other tasks.
pub struct ResourceActor<T: ActorEntity> {
    entity: T,
    receiver: mpsc::Receiver<ActorRequest<T>>,
    mailbox: Mailbox<T>,
    published: watch::Sender<T::Snapshot>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` around `entity` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `entity` - The initial state.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(entity: T, buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (published, snapshots) = watch::channel(entity.snapshot());
        let actor = Self {
            entity,
            receiver,
            mailbox: Mailbox {
                sender: sender.downgrade(),
            },
            published,
        };
        let client = ResourceClient::new(sender, snapshots);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies that were created *after* the actor was
    /// instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "UpsellWidget" instead of the full path)
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        self.entity.on_start(&context, &self.mailbox);
        self.publish();

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ActorRequest::Event(event) => {
                    debug!(entity_type, ?event, "Event");
                    self.entity.handle_event(event, &context, &self.mailbox);
                    if self.publish() {
                        debug!(entity_type, "Snapshot published");
                    }
                }
                ActorRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.entity.snapshot());
                }
            }
        }

        debug!(entity_type, final_state = ?self.entity.snapshot(), "Final state");
        info!(entity_type, "Shutdown");
    }

    /// Publishes the current snapshot if it differs by value from the last one.
    fn publish(&self) -> bool {
        let next = self.entity.snapshot();
        self.published.send_if_modified(move |current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        })
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Cheap to clone: it holds a channel sender and a watch receiver.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ActorRequest<T>>,
    snapshots: watch::Receiver<T::Snapshot>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshots: self.snapshots.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ActorRequest<T>>,
        snapshots: watch::Receiver<T::Snapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    /// Sends an event without waiting for it to be processed.
    pub async fn dispatch(&self, event: T::Event) -> Result<(), FrameworkError> {
        self.sender
            .send(ActorRequest::Event(event))
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Sends an event that carries its own responder and waits for the reply.
    pub async fn request<R>(
        &self,
        make_event: impl FnOnce(Response<R>) -> T::Event,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.dispatch(make_event(respond_to)).await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Reads the state after every previously sent message has been processed.
    pub async fn snapshot(&self) -> Result<T::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ActorRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// The most recently published snapshot, without a round trip.
    pub fn latest(&self) -> T::Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified every time the snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<T::Snapshot> {
        self.snapshots.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
