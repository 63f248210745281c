use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::{
    client::{error::ClientError, request::Mutation},
    models::{Collection, CollectionType},
};

/// Where the gateway lives. Handed to whatever owns the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Reply to a login call. No `token` means the credentials were refused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginReply {
    pub token: Option<String>,
    pub username: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VerifyReply {
    #[serde(default)]
    pub valid: bool,
    pub username: Option<String>,
    pub error: Option<String>,
}

/// Client side of the gateway contract.
///
/// Mutations return nothing: the gateway's answer to a write is not state.
/// Callers invalidate and re-read every collection after a successful write.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn fetch(&self, collection: CollectionType) -> Result<Collection, ClientError>;

    async fn login(&self, username: &str, password: &str) -> Result<LoginReply, ClientError>;

    async fn verify(&self, token: &str) -> Result<VerifyReply, ClientError>;

    async fn send(&self, mutation: &Mutation, token: Option<&str>) -> Result<(), ClientError>;
}

#[async_trait]
impl<G: GatewayClient + ?Sized> GatewayClient for Arc<G> {
    async fn fetch(&self, collection: CollectionType) -> Result<Collection, ClientError> {
        (**self).fetch(collection).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginReply, ClientError> {
        (**self).login(username, password).await
    }

    async fn verify(&self, token: &str) -> Result<VerifyReply, ClientError> {
        (**self).verify(token).await
    }

    async fn send(&self, mutation: &Mutation, token: Option<&str>) -> Result<(), ClientError> {
        (**self).send(mutation, token).await
    }
}

/// `reqwest` implementation talking to a live gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: GatewayConfig,
    http: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn post_action<T>(&self, body: serde_json::Value) -> Result<T, ClientError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let res = self
            .http
            .post(&self.config.base_url)
            .json(&body)
            .send()
            .await?;

        // 4xx replies still carry a JSON body the caller inspects for
        // `token` / `valid`; only server faults are transport failures.
        if res.status().is_server_error() {
            return Err(status_error(res).await);
        }

        res.json::<T>()
            .await
            .map_err(|e| ClientError::Decode(format!("Invalid JSON response: {}", e)))
    }
}

async fn status_error(res: Response) -> ClientError {
    let status = res.status();
    let message = res.text().await.unwrap_or_default();
    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl GatewayClient for HttpGateway {
    async fn fetch(&self, collection: CollectionType) -> Result<Collection, ClientError> {
        let res = self
            .http
            .get(&self.config.base_url)
            .query(&[("type", collection.as_str())])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(status_error(res).await);
        }

        let bytes = res.bytes().await?;
        Collection::decode(collection, &bytes)
            .map_err(|e| ClientError::Decode(format!("Invalid {} payload: {}", collection, e)))
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginReply, ClientError> {
        self.post_action(json!({
            "action": "login",
            "username": username,
            "password": password,
        }))
        .await
    }

    async fn verify(&self, token: &str) -> Result<VerifyReply, ClientError> {
        self.post_action(json!({ "action": "verify", "token": token }))
            .await
    }

    async fn send(&self, mutation: &Mutation, token: Option<&str>) -> Result<(), ClientError> {
        let mut req = self
            .http
            .request(mutation.method(), &self.config.base_url)
            .query(&mutation.query());

        if let Some(body) = mutation.body() {
            req = req.json(&body);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let res = req.send().await?;
        if !res.status().is_success() {
            return Err(status_error(res).await);
        }

        Ok(())
    }
}
