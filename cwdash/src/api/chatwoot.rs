use async_trait::async_trait;
use log::debug;
use reqwest::{Client, header};

use crate::config::DashboardConfig;
use crate::error::ApiError;
use crate::models::ConversationPage;

#[async_trait]
pub trait ChatwootApi: Send + Sync {
    async fn list_conversations(
        &self,
        account_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<ConversationPage, ApiError>;
}

pub struct ChatwootClient {
    client: Client,
    base_url: String,
}

impl ChatwootClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let mut token = header::HeaderValue::from_str(&config.credential)?;
        token.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, token);

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn conversations_url(&self, account_id: u64) -> String {
        format!(
            "{}/api/v1/accounts/{}/conversations",
            self.base_url, account_id
        )
    }
}

#[async_trait]
impl ChatwootApi for ChatwootClient {
    async fn list_conversations(
        &self,
        account_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<ConversationPage, ApiError> {
        let url = self.conversations_url(account_id);
        debug!("GET {} page={} per_page={}", url, page, per_page);

        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversations_url_trims_trailing_slash() {
        let config = DashboardConfig {
            base_url: "https://helpdesk.example.com/".to_string(),
            credential: "secret".to_string(),
            ..DashboardConfig::default()
        };
        let client = ChatwootClient::new(&config).unwrap();

        assert_eq!(
            client.conversations_url(3),
            "https://helpdesk.example.com/api/v1/accounts/3/conversations"
        );
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let config = DashboardConfig {
            credential: "bad\ntoken".to_string(),
            ..DashboardConfig::default()
        };

        assert!(matches!(
            ChatwootClient::new(&config),
            Err(ApiError::InvalidCredential(_))
        ));
    }
}
