use super::{PushApiClient, PushSubscriptionService};
use crate::{
    error::Error,
    platform::{NotificationPermissions, PermissionState, PushRegistration},
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct PushSubscriptionServiceImpl {
    permissions: Arc<dyn NotificationPermissions>,
    registration: Arc<dyn PushRegistration>,
    api: Arc<dyn PushApiClient>,
}

impl PushSubscriptionServiceImpl {
    pub fn new(
        permissions: Arc<dyn NotificationPermissions>,
        registration: Arc<dyn PushRegistration>,
        api: Arc<dyn PushApiClient>,
    ) -> Self {
        Self {
            permissions,
            registration,
            api,
        }
    }

    async fn try_subscribe(&self) -> Result<bool, Error> {
        if self.request_permission().await != PermissionState::Granted {
            tracing::info!("permission not granted, not subscribing");
            return Ok(false);
        }

        if let Some(subscription) = self.registration.existing_subscription().await? {
            tracing::debug!(endpoint = subscription.endpoint, "already subscribed");
            return Ok(true);
        }

        self.registration.ensure_worker_active().await?;

        let server_key = self.api.public_key().await?;
        let subscription = self.registration.create_subscription(&server_key).await?;
        self.api.register(&subscription).await?;

        tracing::info!("subscribed");
        Ok(true)
    }
}

#[async_trait]
impl PushSubscriptionService for PushSubscriptionServiceImpl {
    async fn request_permission(&self) -> PermissionState {
        match self.permissions.state() {
            PermissionState::Default => {
                tracing::debug!("prompting for notification permission");
                self.permissions.prompt().await
            }
            decided => decided,
        }
    }

    #[tracing::instrument(name = "Push subscribe", skip_all)]
    async fn subscribe(&self) -> bool {
        match self.try_subscribe().await {
            Ok(subscribed) => subscribed,
            Err(err) => {
                tracing::warn!(%err, "subscribe failed");
                false
            }
        }
    }

    #[tracing::instrument(name = "Push unsubscribe", skip_all)]
    async fn unsubscribe(&self) -> bool {
        let subscription = match self.registration.existing_subscription().await {
            Ok(Some(subscription)) => subscription,
            Ok(None) => {
                tracing::debug!("no subscription to remove");
                return false;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to read subscription");
                return false;
            }
        };

        match self.registration.remove_subscription().await {
            Ok(true) => (),
            Ok(false) => return false,
            Err(err) => {
                tracing::warn!(%err, "failed to remove subscription");
                return false;
            }
        }

        // browser-side removal is authoritative, the server call is best-effort
        if let Err(err) = self.api.unregister(&subscription.endpoint).await {
            tracing::warn!(%err, "failed to unregister subscription server-side");
        }

        tracing::info!("unsubscribed");
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dto::output::{PushSubscription, PushSubscriptionKeys},
        platform::{MockNotificationPermissions, MockPushRegistration},
        service::push_subscription_service::MockPushApiClient,
    };

    #[tokio::test]
    async fn request_permission_decided_state_returned_without_prompt() {
        let mut permissions = MockNotificationPermissions::new();
        permissions
            .expect_state()
            .returning(|| PermissionState::Denied);
        permissions.expect_prompt().never();

        let service = create_service(
            permissions,
            MockPushRegistration::new(),
            MockPushApiClient::new(),
        );

        let state = service.request_permission().await;

        assert_eq!(state, PermissionState::Denied);
    }

    #[tokio::test]
    async fn request_permission_undecided_prompts_once() {
        let mut permissions = MockNotificationPermissions::new();
        permissions
            .expect_state()
            .returning(|| PermissionState::Default);
        permissions
            .expect_prompt()
            .once()
            .returning(|| PermissionState::Granted);

        let service = create_service(
            permissions,
            MockPushRegistration::new(),
            MockPushApiClient::new(),
        );

        let state = service.request_permission().await;

        assert_eq!(state, PermissionState::Granted);
    }

    #[tokio::test]
    async fn subscribe_permission_denied_returns_false() {
        let mut permissions = MockNotificationPermissions::new();
        permissions
            .expect_state()
            .returning(|| PermissionState::Denied);
        permissions.expect_prompt().never();

        let service = create_service(
            permissions,
            MockPushRegistration::new(),
            MockPushApiClient::new(),
        );

        assert!(!service.subscribe().await);
    }

    #[tokio::test]
    async fn subscribe_existing_subscription_is_noop_success() {
        let mut registration = MockPushRegistration::new();
        registration
            .expect_existing_subscription()
            .returning(|| Ok(Some(create_subscription())));
        registration.expect_create_subscription().never();

        let mut api = MockPushApiClient::new();
        api.expect_register().never();

        let service = create_service(create_granted_permissions(), registration, api);

        assert!(service.subscribe().await);
    }

    #[tokio::test]
    async fn subscribe_creates_and_registers_subscription() {
        let mut registration = MockPushRegistration::new();
        registration
            .expect_existing_subscription()
            .returning(|| Ok(None));
        registration
            .expect_ensure_worker_active()
            .once()
            .returning(|| Ok(()));
        registration
            .expect_create_subscription()
            .once()
            .withf(|server_key| server_key == "key")
            .returning(|_| Ok(create_subscription()));

        let mut api = MockPushApiClient::new();
        api.expect_public_key()
            .once()
            .returning(|| Ok("key".to_string()));
        api.expect_register()
            .once()
            .withf(|subscription| subscription.endpoint == "https://push.example/abc")
            .returning(|_| Ok(()));

        let service = create_service(create_granted_permissions(), registration, api);

        assert!(service.subscribe().await);
    }

    #[tokio::test]
    async fn subscribe_registration_failure_returns_false() {
        let mut registration = MockPushRegistration::new();
        registration
            .expect_existing_subscription()
            .returning(|| Ok(None));
        registration
            .expect_ensure_worker_active()
            .returning(|| Ok(()));
        registration
            .expect_create_subscription()
            .returning(|_| Ok(create_subscription()));

        let mut api = MockPushApiClient::new();
        api.expect_public_key().returning(|| Ok("key".to_string()));
        api.expect_register()
            .returning(|_| Err(Error::ServerRejected("503 Service Unavailable".to_string())));

        let service = create_service(create_granted_permissions(), registration, api);

        assert!(!service.subscribe().await);
    }

    #[tokio::test]
    async fn unsubscribe_without_subscription_returns_false() {
        let mut registration = MockPushRegistration::new();
        registration
            .expect_existing_subscription()
            .returning(|| Ok(None));
        registration.expect_remove_subscription().never();

        let service = create_service(
            MockNotificationPermissions::new(),
            registration,
            MockPushApiClient::new(),
        );

        assert!(!service.unsubscribe().await);
    }

    #[tokio::test]
    async fn unsubscribe_removes_and_unregisters() {
        let mut registration = MockPushRegistration::new();
        registration
            .expect_existing_subscription()
            .returning(|| Ok(Some(create_subscription())));
        registration
            .expect_remove_subscription()
            .once()
            .returning(|| Ok(true));

        let mut api = MockPushApiClient::new();
        api.expect_unregister()
            .once()
            .withf(|endpoint| endpoint == "https://push.example/abc")
            .returning(|_| Ok(()));

        let service = create_service(MockNotificationPermissions::new(), registration, api);

        assert!(service.unsubscribe().await);
    }

    #[tokio::test]
    async fn unsubscribe_server_failure_still_returns_true() {
        let mut registration = MockPushRegistration::new();
        registration
            .expect_existing_subscription()
            .returning(|| Ok(Some(create_subscription())));
        registration
            .expect_remove_subscription()
            .returning(|| Ok(true));

        let mut api = MockPushApiClient::new();
        api.expect_unregister()
            .returning(|_| Err(Error::ServerRejected("500 Internal Server Error".to_string())));

        let service = create_service(MockNotificationPermissions::new(), registration, api);

        assert!(service.unsubscribe().await);
    }

    fn create_granted_permissions() -> MockNotificationPermissions {
        let mut permissions = MockNotificationPermissions::new();
        permissions
            .expect_state()
            .returning(|| PermissionState::Granted);
        permissions
    }

    fn create_subscription() -> PushSubscription {
        PushSubscription {
            endpoint: "https://push.example/abc".to_string(),
            keys: PushSubscriptionKeys {
                p256dh: "p256dh-key".to_string(),
                auth: "auth-secret".to_string(),
            },
        }
    }

    fn create_service(
        permissions: MockNotificationPermissions,
        registration: MockPushRegistration,
        api: MockPushApiClient,
    ) -> PushSubscriptionServiceImpl {
        PushSubscriptionServiceImpl::new(Arc::new(permissions), Arc::new(registration), Arc::new(api))
    }
}
