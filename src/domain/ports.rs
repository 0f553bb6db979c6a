use crate::domain::model::{Collection, KindTable};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn api_token(&self) -> &str;
    fn output_path(&self) -> &str;
    fn insecure(&self) -> bool;
    fn smtp_host(&self) -> &str;
    fn smtp_port(&self) -> u16;
    fn mail_from(&self) -> &str;
    fn mail_to(&self) -> &str;
    fn skip_email(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Collection>>;
    async fn transform(&self, data: Vec<Collection>) -> Result<Vec<KindTable>>;
    async fn load(&self, tables: Vec<KindTable>) -> Result<Vec<String>>;
    async fn deliver(&self, files: &[String]) -> Result<()>;
}
