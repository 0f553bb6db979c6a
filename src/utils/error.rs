use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Column index out of range: {0}")]
    ColumnIndexError(#[from] std::num::TryFromIntError),

    #[error("Invalid mail address: {0}")]
    MailAddressError(#[from] lettre::address::AddressError),

    #[error("Invalid attachment content type: {0}")]
    ContentTypeError(#[from] lettre::message::header::ContentTypeErr),

    #[error("Mail composition failed: {0}")]
    MailBuildError(#[from] lettre::error::Error),

    #[error("Mail delivery failed: {0}")]
    MailSendError(#[from] lettre::transport::smtp::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, ExportError>;
