use crate::cart::ToggleOutcome;
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{CartLine, CartPermissions, MerchandiseId, Settings};
use crate::upsell_actor::{UpsellError, UpsellEvent, UpsellWidget, WidgetSnapshot};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for driving one mounted upsell widget.
///
/// The host pushes settings, cart and permission snapshots through it and
/// forwards the shopper's checkbox clicks.
#[derive(Clone)]
pub struct UpsellClient {
    inner: ResourceClient<UpsellWidget>,
}

impl UpsellClient {
    pub fn new(inner: ResourceClient<UpsellWidget>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, settings))]
    pub async fn update_settings(&self, settings: Settings) -> Result<(), UpsellError> {
        debug!(?settings, "update_settings called");
        self.inner
            .dispatch(UpsellEvent::SettingsChanged(settings))
            .await
            .map_err(Self::map_error)
    }

    /// Parses a raw settings object from the host and applies it.
    pub async fn update_settings_json(&self, json: &str) -> Result<(), UpsellError> {
        let settings = Settings::from_json(json)?;
        self.update_settings(settings).await
    }

    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn update_cart(&self, lines: Vec<CartLine>) -> Result<(), UpsellError> {
        self.inner
            .dispatch(UpsellEvent::CartChanged(lines))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_permissions(
        &self,
        permissions: CartPermissions,
    ) -> Result<(), UpsellError> {
        self.inner
            .dispatch(UpsellEvent::PermissionsChanged(permissions))
            .await
            .map_err(Self::map_error)
    }

    /// Checks (`checked = true`) or unchecks a product and waits for the host's answer.
    #[instrument(skip(self, merchandise_id), fields(merchandise_id = %merchandise_id))]
    pub async fn toggle(
        &self,
        merchandise_id: MerchandiseId,
        checked: bool,
    ) -> Result<ToggleOutcome, UpsellError> {
        info!("Sending toggle to actor");
        self.inner
            .request(|respond_to| UpsellEvent::Toggle {
                merchandise_id,
                checked,
                respond_to,
            })
            .await
            .map_err(Self::map_error)
    }

    /// Waits until no product is loading, then returns that snapshot.
    ///
    /// Commands sent before this call are applied first.
    pub async fn wait_until_settled(&self) -> Result<WidgetSnapshot, UpsellError> {
        let current = self.snapshot().await?;
        if current.is_settled() {
            return Ok(current);
        }
        let mut updates = self.subscribe();
        let settled = updates
            .wait_for(WidgetSnapshot::is_settled)
            .await
            .map_err(|e| UpsellError::ActorCommunicationError(e.to_string()))?;
        Ok(settled.clone())
    }
}

#[async_trait]
impl ActorClient<UpsellWidget> for UpsellClient {
    type Error = UpsellError;

    fn inner(&self) -> &ResourceClient<UpsellWidget> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        UpsellError::ActorCommunicationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_event, expect_snapshot};
    use crate::framework::ActorEntity;
    use crate::host::EnglishLocalizer;
    use std::sync::Arc;

    fn blank_snapshot() -> WidgetSnapshot {
        UpsellWidget::new(Arc::new(EnglishLocalizer), Settings::new()).snapshot()
    }

    fn mock() -> (
        UpsellClient,
        tokio::sync::mpsc::Receiver<crate::framework::ActorRequest<UpsellWidget>>,
    ) {
        let (inner, receiver) = create_mock_client::<UpsellWidget>(10, blank_snapshot());
        (UpsellClient::new(inner), receiver)
    }

    #[tokio::test]
    async fn test_toggle_sends_request_and_returns_outcome() {
        let (client, mut receiver) = mock();

        let handle = tokio::spawn(async move { client.toggle("gid://v/1".into(), true).await });

        match expect_event(&mut receiver).await {
            Some(UpsellEvent::Toggle {
                merchandise_id,
                checked,
                respond_to,
            }) => {
                assert_eq!(merchandise_id.as_str(), "gid://v/1");
                assert!(checked);
                respond_to.send(ToggleOutcome::Applied).unwrap();
            }
            other => panic!("Expected Toggle, got {other:?}"),
        }

        assert_eq!(handle.await.unwrap().unwrap(), ToggleOutcome::Applied);
    }

    #[tokio::test]
    async fn test_invalid_settings_json_is_not_sent() {
        let (client, mut receiver) = mock();

        let result = client.update_settings_json("[1, 2, 3]").await;

        assert!(matches!(result, Err(UpsellError::InvalidSettings(_))));
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_settings_json_is_forwarded() {
        let (client, mut receiver) = mock();

        client
            .update_settings_json(r#"{"upsell_product_1": "gid://v/1", "number_of_products": 2}"#)
            .await
            .unwrap();

        match expect_event(&mut receiver).await {
            Some(UpsellEvent::SettingsChanged(settings)) => {
                let product = settings.get("upsell_product_1").and_then(|v| v.as_text());
                let count = settings.get("number_of_products").and_then(|v| v.as_number());
                assert_eq!(product, Some("gid://v/1"));
                assert_eq!(count, Some(2.0));
            }
            other => panic!("Expected SettingsChanged, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wait_until_settled_returns_settled_snapshot() {
        let (client, mut receiver) = mock();

        let handle = tokio::spawn(async move { client.wait_until_settled().await });

        let respond_to = expect_snapshot(&mut receiver).await.expect("Expected Snapshot");
        respond_to.send(blank_snapshot()).unwrap();

        let snapshot = handle.await.unwrap().unwrap();
        assert!(snapshot.is_settled());
        assert!(snapshot.records.is_empty());
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let (client, receiver) = mock();
        drop(receiver);

        let result = client.update_cart(vec![CartLine::new("l1", "gid://v/1")]).await;

        assert!(matches!(result, Err(UpsellError::ActorCommunicationError(_))));
    }
}
