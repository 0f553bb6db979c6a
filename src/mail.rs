//! SMTP delivery of the generated report files.
//!
//! One message, every produced workbook attached, sent through a plain relay
//! (no auth, no TLS negotiation). A send failure is terminal for the run.

use crate::utils::error::Result;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, Message, MultiPart, SinglePart};
use lettre::{SmtpTransport, Transport};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub fn compose(
    from: &str,
    to: &str,
    subject: &str,
    body: String,
    attachments: Vec<MailAttachment>,
) -> Result<Message> {
    let content_type = ContentType::parse(XLSX_MIME)?;

    let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(body));
    for attachment in attachments {
        parts = parts.singlepart(
            Attachment::new(attachment.filename).body(attachment.bytes, content_type.clone()),
        );
    }

    let message = Message::builder()
        .from(from.parse::<Mailbox>()?)
        .to(to.parse::<Mailbox>()?)
        .subject(subject)
        .multipart(parts)?;

    Ok(message)
}

pub fn send(host: &str, port: u16, message: &Message) -> Result<()> {
    let mailer = SmtpTransport::builder_dangerous(host).port(port).build();
    mailer.send(message)?;
    Ok(())
}
