use std::{sync::Arc, time::Duration};

use api_types::{
    Envelope, EnvelopeStatus,
    budget::{BudgetSave, BudgetYear, BudgetYears},
};
use engine::RemoteId;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::{BudgetApi, ClientError, TokenProvider};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    token: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Builds a client for `base_url` (e.g. `http://127.0.0.1:3000/api/`).
    ///
    /// Every request is aborted after `timeout`.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        token: impl TokenProvider + 'static,
    ) -> Result<Self, ClientError> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        // Relative joins drop the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            base_url,
            http,
            token: Arc::new(token),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidUrl(format!("{path}: {err}")))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Sends `req` and checks the status code and the envelope's `success`
    /// flag. Returns the raw body of an accepted response.
    async fn send_checked(
        &self,
        label: &str,
        req: RequestBuilder,
    ) -> Result<Vec<u8>, ClientError> {
        let res = self.authorize(req).send().await.map_err(|err| {
            tracing::error!("{label}: request failed: {err}");
            ClientError::from(err)
        })?;

        let status = res.status();
        let body = res.bytes().await.map_err(ClientError::from)?.to_vec();

        if !status.is_success() {
            let message = serde_json::from_slice::<EnvelopeStatus>(&body)
                .ok()
                .and_then(|status| status.message)
                .unwrap_or_else(|| "unknown error".to_string());
            tracing::warn!("{label}: {status}: {message}");
            return Err(ClientError::from_status(status.as_u16(), message));
        }

        let head: EnvelopeStatus = serde_json::from_slice(&body).map_err(|err| {
            tracing::error!("{label}: malformed envelope: {err}");
            ClientError::Decode(err.to_string())
        })?;
        if !head.success {
            let message = head
                .message
                .unwrap_or_else(|| "request rejected".to_string());
            tracing::warn!("{label}: rejected: {message}");
            return Err(ClientError::Rejected(message));
        }
        Ok(body)
    }

    /// Like [`send_checked`](Self::send_checked), then decodes `data`.
    async fn send<T: DeserializeOwned>(
        &self,
        label: &str,
        req: RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.send_checked(label, req).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|err| {
            tracing::error!("{label}: payload does not match schema: {err}");
            ClientError::Decode(err.to_string())
        })?;
        Ok(envelope.data)
    }
}

impl BudgetApi for Client {
    async fn budget_get(&self, year: i32) -> Result<BudgetYear, ClientError> {
        let endpoint = self.endpoint(&format!("budget/{year}"))?;
        self.send("budget_get", self.http.get(endpoint)).await
    }

    async fn budget_years(&self) -> Result<BudgetYears, ClientError> {
        let endpoint = self.endpoint("budget/years")?;
        self.send("budget_years", self.http.get(endpoint)).await
    }

    async fn budget_save(&self, payload: &BudgetSave) -> Result<(), ClientError> {
        let endpoint = self.endpoint("budget")?;
        self.send_checked("budget_save", self.http.put(endpoint).json(payload)).await?;
        Ok(())
    }

    async fn budget_delete(&self, year: i32) -> Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("budget/{year}"))?;
        self.send_checked("budget_delete", self.http.delete(endpoint)).await?;
        Ok(())
    }

    async fn budget_item_delete(&self, id: RemoteId) -> Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("budget-item/{id}"))?;
        self.send_checked("budget_item_delete", self.http.delete(endpoint)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticToken;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = Client::new("http://127.0.0.1:3000/api", DEFAULT_TIMEOUT, StaticToken::none())
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:3000/api/");
        assert_eq!(
            client.endpoint("budget/2025").unwrap().as_str(),
            "http://127.0.0.1:3000/api/budget/2025"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            Client::new("not a url", DEFAULT_TIMEOUT, StaticToken::none()),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            Client::new("mailto:someone@example.com", DEFAULT_TIMEOUT, StaticToken::none()),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
