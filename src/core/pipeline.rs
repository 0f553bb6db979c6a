use crate::core::collector::PageCollector;
use crate::core::flatten::flatten;
use crate::core::table::build_table;
use crate::core::{Collection, ConfigProvider, KindTable, Pipeline, ResourceKind, Storage};
use crate::mail;
use crate::report::xlsx;
use crate::utils::error::{ExportError, Result};
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ExportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ExportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
        if config.insecure() {
            tracing::warn!("⚠️ TLS certificate verification is disabled (--insecure)");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build()?;

        Ok(Self {
            storage,
            config,
            client,
        })
    }

    fn listing_url(&self, kind: ResourceKind) -> String {
        format!(
            "{}/{}",
            self.config.api_url().trim_end_matches('/'),
            kind.api_path()
        )
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ExportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Collection>> {
        let collector = PageCollector::new(&self.client, self.config.api_token());
        let mut collections = Vec::new();

        for kind in ResourceKind::ALL {
            let url = self.listing_url(kind);
            tracing::debug!("Collecting {} from {}", kind.title(), url);

            // One kind failing must not block the other kind's export.
            match collector.collect(&url).await {
                Ok(records) => {
                    tracing::info!("📡 {}: collected {} records", kind.title(), records.len());
                    collections.push(Collection { kind, records });
                }
                Err(e) => {
                    tracing::warn!("⚠️ {}: collection failed, skipping: {}", kind.title(), e);
                }
            }
        }

        Ok(collections)
    }

    async fn transform(&self, data: Vec<Collection>) -> Result<Vec<KindTable>> {
        let mut tables = Vec::new();

        for collection in data {
            let rows: Vec<_> = collection
                .records
                .iter()
                .map(|record| flatten(record, collection.kind))
                .collect();
            let table = build_table(collection.kind, &rows);
            tracing::info!(
                "🔧 {}: {} rows, {} columns",
                collection.kind.title(),
                table.rows.len(),
                table.columns.len()
            );
            tables.push(KindTable {
                kind: collection.kind,
                table,
            });
        }

        Ok(tables)
    }

    async fn load(&self, tables: Vec<KindTable>) -> Result<Vec<String>> {
        let stamp = chrono::Local::now().format("%Y-%m-%d").to_string();
        let mut files = Vec::new();

        for KindTable { kind, table } in tables {
            let bytes = xlsx::generate(kind.title(), &table)?;
            let filename = format!("{}_{}.xlsx", kind.file_stem(), stamp);
            self.storage.write_file(&filename, &bytes).await?;
            tracing::info!("📁 Wrote {} ({} rows)", filename, table.rows.len());
            files.push(filename);
        }

        Ok(files)
    }

    async fn deliver(&self, files: &[String]) -> Result<()> {
        if files.is_empty() {
            return Err(ExportError::ProcessingError {
                message: "no output files were produced".to_string(),
            });
        }

        if self.config.skip_email() {
            tracing::info!("✉️ Email delivery skipped (--skip-email)");
            return Ok(());
        }

        let mut attachments = Vec::new();
        for filename in files {
            let bytes = self.storage.read_file(filename).await?;
            attachments.push(mail::MailAttachment {
                filename: filename.clone(),
                bytes,
            });
        }

        let stamp = chrono::Local::now().format("%Y-%m-%d");
        let subject = format!("IPAM export {}", stamp);
        let body = format!("Attached: {}\n", files.join(", "));
        let message = mail::compose(
            self.config.mail_from(),
            self.config.mail_to(),
            &subject,
            body,
            attachments,
        )?;

        mail::send(self.config.smtp_host(), self.config.smtp_port(), &message)?;
        tracing::info!("✉️ Report emailed to {}", self.config.mail_to());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ExportError;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ExportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_url: String,
        skip_email: bool,
    }

    impl MockConfig {
        fn new(api_url: String) -> Self {
            Self {
                api_url,
                skip_email: true,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_url(&self) -> &str {
            &self.api_url
        }

        fn api_token(&self) -> &str {
            "test-token"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn insecure(&self) -> bool {
            false
        }

        fn smtp_host(&self) -> &str {
            "localhost"
        }

        fn smtp_port(&self) -> u16 {
            25
        }

        fn mail_from(&self) -> &str {
            "exports@example.net"
        }

        fn mail_to(&self) -> &str {
            "noc@example.net"
        }

        fn skip_email(&self) -> bool {
            self.skip_email
        }
    }

    fn range_body() -> serde_json::Value {
        json!({
            "count": 1,
            "next": null,
            "results": [{
                "id": 1,
                "display": "10.0.0.1-254/24",
                "status": {"value": "active", "label": "Active"},
                "custom_fields": {"vlan": 100}
            }]
        })
    }

    fn address_body() -> serde_json::Value {
        json!({
            "count": 1,
            "next": null,
            "results": [{
                "id": 9,
                "address": "192.0.2.10/24",
                "status": {"value": "active", "label": "Active"}
            }]
        })
    }

    #[tokio::test]
    async fn test_extract_both_kinds() {
        let server = MockServer::start();
        let ranges = server.mock(|when, then| {
            when.method(GET)
                .path("/api/ipam/ip-ranges/")
                .header("Authorization", "Token test-token");
            then.status(200).json_body(range_body());
        });
        let addresses = server.mock(|when, then| {
            when.method(GET).path("/api/ipam/ip-addresses/");
            then.status(200).json_body(address_body());
        });

        let pipeline =
            ExportPipeline::new(MockStorage::new(), MockConfig::new(server.url("/api"))).unwrap();
        let collections = pipeline.extract().await.unwrap();

        ranges.assert();
        addresses.assert();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].kind, ResourceKind::Ranges);
        assert_eq!(collections[1].kind, ResourceKind::Addresses);
    }

    #[tokio::test]
    async fn test_extract_one_kind_failing_keeps_the_other() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/ipam/ip-ranges/");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/ipam/ip-addresses/");
            then.status(200).json_body(address_body());
        });

        let pipeline =
            ExportPipeline::new(MockStorage::new(), MockConfig::new(server.url("/api"))).unwrap();
        let collections = pipeline.extract().await.unwrap();

        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].kind, ResourceKind::Addresses);
        assert_eq!(collections[0].records.len(), 1);
    }

    #[tokio::test]
    async fn test_transform_reconciles_custom_field_columns() {
        let pipeline = ExportPipeline::new(
            MockStorage::new(),
            MockConfig::new("http://unused".to_string()),
        )
        .unwrap();

        let records = [
            json!({"id": 1, "custom_fields": {"vlan": 100}}),
            json!({"id": 2, "custom_fields": {"circuit_id": "C7"}}),
        ]
        .into_iter()
        .map(|v| match v {
            serde_json::Value::Object(data) => crate::core::Record { data },
            _ => unreachable!(),
        })
        .collect();

        let tables = pipeline
            .transform(vec![Collection {
                kind: ResourceKind::Ranges,
                records,
            }])
            .await
            .unwrap();

        assert_eq!(tables.len(), 1);
        let table = &tables[0].table;
        assert!(table.columns.iter().any(|c| c == "CF: vlan"));
        assert!(table.columns.iter().any(|c| c == "CF: circuit_id"));
        assert_eq!(table.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_load_writes_one_workbook_per_kind() {
        let storage = MockStorage::new();
        let pipeline = ExportPipeline::new(
            storage.clone(),
            MockConfig::new("http://unused".to_string()),
        )
        .unwrap();

        let tables = vec![
            KindTable {
                kind: ResourceKind::Ranges,
                table: build_table(ResourceKind::Ranges, &[]),
            },
            KindTable {
                kind: ResourceKind::Addresses,
                table: build_table(ResourceKind::Addresses, &[]),
            },
        ];

        let files = pipeline.load(tables).await.unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].starts_with("ip_ranges_"));
        assert!(files[1].starts_with("ip_addresses_"));
        for file in &files {
            let bytes = storage.get_file(file).await.unwrap();
            assert!(bytes.starts_with(b"PK"));
        }
    }

    #[tokio::test]
    async fn test_deliver_fails_with_no_files() {
        let pipeline = ExportPipeline::new(
            MockStorage::new(),
            MockConfig::new("http://unused".to_string()),
        )
        .unwrap();

        let result = pipeline.deliver(&[]).await;
        assert!(matches!(result, Err(ExportError::ProcessingError { .. })));
    }

    #[tokio::test]
    async fn test_deliver_skip_email() {
        let storage = MockStorage::new();
        storage.write_file("ip_ranges_x.xlsx", b"PK").await.unwrap();

        let pipeline = ExportPipeline::new(
            storage,
            MockConfig::new("http://unused".to_string()),
        )
        .unwrap();

        let result = pipeline.deliver(&["ip_ranges_x.xlsx".to_string()]).await;
        assert!(result.is_ok());
    }
}
