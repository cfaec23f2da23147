use super::DispatchService;
use crate::{
    dto::{
        input::DeliveryStatus,
        output::{SendNotificationRequest, TestDeliveryRequest},
    },
    error::{reject_failed, Error},
    platform::CredentialProvider,
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct DispatchServiceImpl {
    api_url: String,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl DispatchServiceImpl {
    pub fn new(
        api_url: String,
        client: reqwest::Client,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            api_url,
            client,
            credentials,
        }
    }

    fn bearer_token(&self) -> Result<String, Error> {
        self.credentials
            .bearer_token()
            .ok_or(Error::MissingCredential)
    }
}

#[async_trait]
impl DispatchService for DispatchServiceImpl {
    #[tracing::instrument(name = "Dispatch", skip_all, fields(recipients = request.recipients.len()))]
    async fn send(&self, request: SendNotificationRequest) -> Result<(), Error> {
        tracing::info!("sending notification");

        let response = self
            .client
            .post(format!("{}/api/v1/notifications/send", self.api_url))
            .bearer_auth(self.bearer_token()?)
            .json(&request)
            .send()
            .await?;
        reject_failed(response)?;

        tracing::info!("notification accepted");
        Ok(())
    }

    #[tracing::instrument(name = "Dispatch test", skip_all, fields(username))]
    async fn send_test(&self, username: &str) -> Result<(), Error> {
        let request = TestDeliveryRequest {
            username: username.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/api/v1/notifications/test", self.api_url))
            .bearer_auth(self.bearer_token()?)
            .json(&request)
            .send()
            .await?;
        reject_failed(response)?;

        tracing::info!("test delivery accepted");
        Ok(())
    }

    async fn status(&self) -> Result<DeliveryStatus, Error> {
        let response = self
            .client
            .get(format!("{}/api/v1/notifications/status", self.api_url))
            .bearer_auth(self.bearer_token()?)
            .send()
            .await?;
        let response = reject_failed(response)?;

        let status = response.json().await?;
        Ok(status)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{dto::input::NotificationKind, platform::MockCredentialProvider};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn send_test_server_rejection_propagated_with_status_text() {
        let address = spawn_one_shot_server(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let service = DispatchServiceImpl::new(
            format!("http://{address}"),
            reqwest::Client::new(),
            Arc::new(create_credentials()),
        );

        let result = service.send_test("anders").await;

        match result {
            Err(Error::ServerRejected(status)) => {
                assert_eq!(status, "503 Service Unavailable");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_deserialized_from_accepted_response() {
        let body = r#"{"activeSubscribers":3,"isUserOnline":true}"#;
        let address = spawn_one_shot_server(&format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len(),
        ))
        .await;

        let service = DispatchServiceImpl::new(
            format!("http://{address}"),
            reqwest::Client::new(),
            Arc::new(create_credentials()),
        );

        let status = service.status().await.unwrap();

        assert_eq!(status.active_subscribers, 3);
        assert!(status.is_user_online);
    }

    #[tokio::test]
    async fn send_without_credential_fails() {
        let mut credentials = MockCredentialProvider::new();
        credentials.expect_bearer_token().returning(|| None);

        let service = DispatchServiceImpl::new(
            "https://club.example".to_string(),
            reqwest::Client::new(),
            Arc::new(credentials),
        );

        let result = service
            .send(SendNotificationRequest {
                recipients: vec!["anders".to_string()],
                title: "T".to_string(),
                message: "M".to_string(),
                kind: NotificationKind::Info,
                route: None,
                link: None,
                data: None,
            })
            .await;

        assert!(matches!(result, Err(Error::MissingCredential)));
    }

    #[tokio::test]
    async fn status_without_credential_fails() {
        let mut credentials = MockCredentialProvider::new();
        credentials.expect_bearer_token().returning(|| None);

        let service = DispatchServiceImpl::new(
            "https://club.example".to_string(),
            reqwest::Client::new(),
            Arc::new(credentials),
        );

        let result = service.status().await;

        assert!(matches!(result, Err(Error::MissingCredential)));
    }

    fn create_credentials() -> MockCredentialProvider {
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_bearer_token()
            .returning(|| Some("secret".to_string()));
        credentials
    }

    /// Serves one connection with a canned response, then drains the socket.
    async fn spawn_one_shot_server(response: &str) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let response = response.to_string();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = [0u8; 1024];
            let _ = socket.read(&mut buffer).await;
            let _ = socket.write_all(response.as_bytes()).await;
            while let Ok(read) = socket.read(&mut buffer).await {
                if read == 0 {
                    break;
                }
            }
        });

        address
    }
}
