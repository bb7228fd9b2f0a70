use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{DuplicateReply, FormRecord, SubmitReply};
use crate::processing::ReferenceData;
use crate::remote::{EndpointConfig, RegistryEndpoint};
use crate::utils::FormError;

/// reqwest-backed client for the spreadsheet script endpoint.
#[derive(Debug, Clone)]
pub struct ScriptClient {
    http: reqwest::Client,
    config: EndpointConfig,
}

impl ScriptClient {
    pub fn new(config: EndpointConfig) -> Result<Self, FormError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| FormError::Http {
            endpoint: "client_init".to_string(),
            source: e,
        })?;

        Ok(ScriptClient { http, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FormError> {
        debug!("GET {} ({})", self.config.script_url, endpoint);

        let resp = self
            .http
            .get(self.config.script_url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| FormError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FormError::Api {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| FormError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

impl RegistryEndpoint for ScriptClient {
    async fn check_duplicate(&self, passport_number: &str) -> Result<bool, FormError> {
        let reply: DuplicateReply = self
            .get_json(
                "checkDuplicate",
                &[("action", "checkDuplicate"), ("passportNumber", passport_number)],
            )
            .await?;
        Ok(reply.is_duplicate)
    }

    async fn company_data(&self) -> Result<ReferenceData, FormError> {
        let rows: Vec<Vec<Value>> = self
            .get_json("getCompanyData", &[("action", "getCompanyData")])
            .await?;
        ReferenceData::from_rows(rows)
    }

    async fn submit(&self, record: &FormRecord) -> Result<SubmitReply, FormError> {
        let data = record.to_json()?;
        self.get_json("submit", &[("data", data.as_str())]).await
    }
}
