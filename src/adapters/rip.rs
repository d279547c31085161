use crate::config::toml_config::RipConfig;
use crate::domain::ports::JobSubmitter;
use crate::utils::error::{Result, SheetError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// RIP 控制器：工作 XML 以 URL 編碼的查詢參數送出
pub struct RipClient {
    client: Client,
    endpoint: String,
    query_param: String,
}

impl RipClient {
    pub fn new(endpoint: impl Into<String>, query_param: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            query_param: query_param.into(),
        })
    }

    /// 未設定 controller_url 時回傳 `None`
    pub fn from_config(config: &RipConfig) -> Result<Option<Self>> {
        config
            .controller_url
            .as_ref()
            .map(|url| {
                Self::new(
                    url.clone(),
                    config.query_param.clone(),
                    Duration::from_secs(config.timeout_seconds),
                )
            })
            .transpose()
    }
}

#[async_trait]
impl JobSubmitter for RipClient {
    async fn submit(&self, job_xml: &str) -> Result<()> {
        tracing::debug!("Submitting job ({} bytes) to {}", job_xml.len(), self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(self.query_param.as_str(), job_xml)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("RIP response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::SubmissionError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
