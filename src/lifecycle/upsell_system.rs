use crate::clients::UpsellClient;
use crate::host::{Host, Localizer};
use crate::model::{CartLine, Settings};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Runtime knobs for an [`UpsellSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemConfig {
    /// Capacity of the widget actor's channel. When it is full, client calls
    /// wait until there is space.
    pub mailbox_capacity: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self { mailbox_capacity: 32 }
    }
}

/// One mounted upsell widget and the tasks that feed it.
///
/// `UpsellSystem` is responsible for:
/// - **Lifecycle Management**: Starting the widget actor with the host injected as its context
/// - **Cart Following**: Forwarding every change of the host's live cart to the widget
/// - **Unmounting**: Stopping the forwarders and waiting for the actor to drain
///
/// # Example
///
/// ```ignore
/// let mut system = UpsellSystem::new(host, Arc::new(EnglishLocalizer), settings);
/// system.follow_cart(cart.subscribe());
/// system.client.update_permissions(CartPermissions::all()).await?;
///
/// let view = system.client.wait_until_settled().await?.view;
///
/// system.shutdown().await?;
/// ```
pub struct UpsellSystem {
    /// Client for interacting with the widget actor
    pub client: UpsellClient,

    /// Task handle of the widget actor
    actor: JoinHandle<()>,

    /// Tasks forwarding host snapshots into the actor
    forwarders: Vec<JoinHandle<()>>,
}

impl UpsellSystem {
    /// Mounts a widget with the default [`SystemConfig`].
    pub fn new(host: Host, localizer: Arc<dyn Localizer>, settings: Settings) -> Self {
        Self::with_config(SystemConfig::default(), host, localizer, settings)
    }

    /// Mounts a widget.
    ///
    /// The first batch of catalog fetches starts as soon as the actor runs.
    /// Must be called from within a Tokio runtime.
    pub fn with_config(
        config: SystemConfig,
        host: Host,
        localizer: Arc<dyn Localizer>,
        settings: Settings,
    ) -> Self {
        let (actor, client) =
            crate::upsell_actor::new(localizer, settings, config.mailbox_capacity);
        let actor = tokio::spawn(actor.run(host));
        info!(capacity = config.mailbox_capacity, "Upsell widget mounted");

        Self {
            client,
            actor,
            forwarders: Vec::new(),
        }
    }

    /// Forwards the current cart and every later change of it to the widget.
    pub fn follow_cart(&mut self, mut cart: watch::Receiver<Vec<CartLine>>) {
        let client = self.client.clone();
        let forwarder = tokio::spawn(async move {
            loop {
                let lines = cart.borrow_and_update().clone();
                if client.update_cart(lines).await.is_err() {
                    debug!("Widget gone, cart forwarder stopping");
                    break;
                }
                if cart.changed().await.is_err() {
                    debug!("Cart source closed");
                    break;
                }
            }
        });
        self.forwarders.push(forwarder);
    }

    /// Unmounts the widget.
    ///
    /// Stops the forwarders, drops the client and waits for the actor to exit.
    /// Work the widget started before this call still settles before the actor
    /// stops; nothing it would have published is observed afterwards.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Unmounting upsell widget...");

        for forwarder in &self.forwarders {
            forwarder.abort();
        }
        for forwarder in self.forwarders {
            if let Err(e) = forwarder.await {
                if !e.is_cancelled() {
                    error!("Cart forwarder failed: {:?}", e);
                    return Err(format!("Cart forwarder failed: {:?}", e));
                }
            }
        }

        // Dropping the last client closes the channel; the actor drains and exits
        drop(self.client);

        if let Err(e) = self.actor.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Upsell widget unmounted.");
        Ok(())
    }
}
