//! Cursor-following pagination over the IPAM listing API.
//!
//! Each page is a JSON object with a `results` array and a nullable `next`
//! URL. Pages are requested strictly in sequence and items are concatenated
//! in server order. Any page failure aborts the whole collection.

use crate::domain::model::Record;
use crate::utils::error::{ExportError, Result};
use reqwest::Client;

const RESULTS_KEY: &str = "results";
const NEXT_KEY: &str = "next";

pub struct PageCollector<'a> {
    client: &'a Client,
    token: &'a str,
}

impl<'a> PageCollector<'a> {
    pub fn new(client: &'a Client, token: &'a str) -> Self {
        Self { client, token }
    }

    pub async fn collect(&self, start_url: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut next = Some(start_url.to_string());
        let mut pages = 0usize;

        while let Some(url) = next {
            tracing::debug!("Requesting page: {}", url);
            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("Token {}", self.token))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ExportError::ProcessingError {
                    message: format!("API returned status {} for {}", status, url),
                });
            }

            let page: serde_json::Value = response.json().await?;
            let items = page
                .get(RESULTS_KEY)
                .and_then(|v| v.as_array())
                .ok_or_else(|| ExportError::ProcessingError {
                    message: format!("page response missing '{}' array: {}", RESULTS_KEY, url),
                })?;

            for item in items {
                match item {
                    serde_json::Value::Object(data) => records.push(Record { data: data.clone() }),
                    other => {
                        // A page whose results hold anything but objects is as
                        // malformed as one missing the results key.
                        return Err(ExportError::ProcessingError {
                            message: format!("non-object item in '{}' from {}: {}", RESULTS_KEY, url, other),
                        });
                    }
                }
            }
            pages += 1;

            next = match page.get(NEXT_KEY) {
                Some(serde_json::Value::String(url)) => Some(url.clone()),
                _ => None,
            };
        }

        tracing::debug!("Collected {} records over {} pages", records.len(), pages);
        Ok(records)
    }
}
