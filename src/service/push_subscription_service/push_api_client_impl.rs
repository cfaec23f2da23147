use super::PushApiClient;
use crate::{
    dto::output::{PushSubscription, UnregisterPushRequest},
    error::{reject_failed, Error},
    platform::CredentialProvider,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

pub struct PushApiClientImpl {
    api_url: String,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicKeyResponse {
    public_key: String,
}

impl PushApiClientImpl {
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
impl PushApiClient for PushApiClientImpl {
    async fn public_key(&self) -> Result<String, Error> {
        let response = self
            .client
            .get(format!("{}/api/v1/push/public-key", self.api_url))
            .bearer_auth(self.bearer_token()?)
            .send()
            .await?;
        let response = reject_failed(response)?;

        let body: PublicKeyResponse = response.json().await?;
        Ok(body.public_key)
    }

    #[tracing::instrument(name = "Push register", skip_all)]
    async fn register(&self, subscription: &PushSubscription) -> Result<(), Error> {
        let response = self
            .client
            .post(format!("{}/api/v1/push/subscriptions", self.api_url))
            .bearer_auth(self.bearer_token()?)
            .json(subscription)
            .send()
            .await?;
        reject_failed(response)?;

        tracing::info!("subscription registered");
        Ok(())
    }

    #[tracing::instrument(name = "Push unregister", skip_all)]
    async fn unregister(&self, endpoint: &str) -> Result<(), Error> {
        let request = UnregisterPushRequest {
            endpoint: endpoint.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/api/v1/push/subscriptions/delete", self.api_url))
            .bearer_auth(self.bearer_token()?)
            .json(&request)
            .send()
            .await?;
        reject_failed(response)?;

        tracing::info!("subscription unregistered");
        Ok(())
    }
}
