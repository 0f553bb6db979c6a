pub mod storage;

use crate::core::ConfigProvider;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_port, validate_url, Validate,
};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ipam-xls-export")]
#[command(about = "Export IP ranges and IP addresses from a NetBox-style IPAM to xlsx and email them")]
pub struct CliConfig {
    /// API root of the source of truth, e.g. https://netbox.example.net/api
    #[arg(long, env = "NETBOX_URL")]
    pub api_url: String,

    #[arg(long, env = "NETBOX_TOKEN", hide_env_values = true)]
    pub api_token: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, env = "SMTP_HOST", default_value = "localhost")]
    pub smtp_host: String,

    #[arg(long, default_value = "25")]
    pub smtp_port: u16,

    #[arg(long, default_value = "ipam-exports@example.net")]
    pub mail_from: String,

    #[arg(long, default_value = "noc@example.net")]
    pub mail_to: String,

    #[arg(long, help = "Disable TLS certificate verification for the API")]
    pub insecure: bool,

    #[arg(long, help = "Write files but do not send email")]
    pub skip_email: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn api_token(&self) -> &str {
        &self.api_token
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn insecure(&self) -> bool {
        self.insecure
    }

    fn smtp_host(&self) -> &str {
        &self.smtp_host
    }

    fn smtp_port(&self) -> u16 {
        self.smtp_port
    }

    fn mail_from(&self) -> &str {
        &self.mail_from
    }

    fn mail_to(&self) -> &str {
        &self.mail_to
    }

    fn skip_email(&self) -> bool {
        self.skip_email
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_non_empty_string("api_token", &self.api_token)?;
        validate_path("output_path", &self.output_path)?;
        if !self.skip_email {
            validate_non_empty_string("smtp_host", &self.smtp_host)?;
            validate_port("smtp_port", self.smtp_port)?;
            validate_non_empty_string("mail_from", &self.mail_from)?;
            validate_non_empty_string("mail_to", &self.mail_to)?;
        }
        Ok(())
    }
}
