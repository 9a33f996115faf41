//! Campaign message composition
//!
//! Builds one multipart MIME message per recipient: an HTML body part,
//! plus a base64 attachment part when the campaign carries a file. The
//! campaign fields go in verbatim; header encoding is lettre's job.

use lettre::message::header::{ContentDisposition, ContentTransferEncoding, ContentType};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::state::session::Campaign;
use crate::utils::errors::DispatchResult;

/// Compose the campaign message addressed to a single recipient
pub fn compose(campaign: &Campaign, recipient: &str) -> DispatchResult<Message> {
    // The display name goes in unparsed, so names lettre's mailbox
    // grammar rejects ("Doe, John") still compose.
    let from = Mailbox::new(Some(campaign.from_name.clone()), campaign.from_email.parse()?);
    let reply_to: Mailbox = campaign.reply_to.parse()?;
    let to: Mailbox = recipient.parse()?;

    let mut parts = MultiPart::mixed().singlepart(
        SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(campaign.body_html.clone()),
    );

    if let Some(attachment) = &campaign.attachment {
        // The preset header pins base64; left to sniff the content,
        // lettre sends ASCII files as 7bit.
        parts = parts.singlepart(
            SinglePart::builder()
                .header(ContentType::parse("application/octet-stream")?)
                .header(ContentDisposition::attachment(&attachment.filename))
                .header(ContentTransferEncoding::Base64)
                .body(attachment.content.clone()),
        );
    }

    let message = Message::builder()
        .from(from)
        .reply_to(reply_to)
        .to(to)
        .subject(campaign.subject.clone())
        .multipart(parts)?;

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::ResolvedAttachment;
    use crate::utils::errors::DispatchError;

    fn campaign(attachment: Option<ResolvedAttachment>) -> Campaign {
        Campaign {
            from_name: "Ada Lovelace".to_string(),
            from_email: "ada@example.com".to_string(),
            reply_to: "replies@example.com".to_string(),
            subject: "Monthly update".to_string(),
            body_html: "<p>Hello there</p>".to_string(),
            recipients: vec!["someone@example.com".to_string()],
            attachment,
        }
    }

    fn rendered(campaign: &Campaign, recipient: &str) -> String {
        let message = compose(campaign, recipient).unwrap();
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    #[test]
    fn test_headers_carry_campaign_fields() {
        let text = rendered(&campaign(None), "someone@example.com");

        assert!(text.contains("From: \"Ada Lovelace\" <ada@example.com>")
            || text.contains("From: Ada Lovelace <ada@example.com>"));
        assert!(text.contains("Reply-To: replies@example.com"));
        assert!(text.contains("To: someone@example.com"));
        assert!(text.contains("Subject: Monthly update"));
    }

    #[test]
    fn test_body_is_html_part() {
        let text = rendered(&campaign(None), "someone@example.com");

        assert!(text.contains("Content-Type: multipart/mixed"));
        assert!(text.contains("Content-Type: text/html"));
        assert!(text.contains("<p>Hello there</p>"));
        assert!(!text.contains("Content-Disposition: attachment"));
    }

    #[test]
    fn test_attachment_is_separate_base64_part() {
        let with_file = campaign(Some(ResolvedAttachment {
            filename: "report.txt".to_string(),
            content: b"hello world".to_vec(),
        }));
        let text = rendered(&with_file, "someone@example.com");

        assert!(text.contains("Content-Disposition: attachment"));
        assert!(text.contains("filename=\"report.txt\""));
        assert!(text.contains("Content-Type: application/octet-stream"));
        assert!(text.contains("Content-Transfer-Encoding: base64"));
        // "hello world" in base64, never raw, even though it is plain ASCII
        assert!(text.contains("aGVsbG8gd29ybGQ="));
        assert!(!text.contains("hello world"));
        // the HTML part still precedes the attachment
        assert!(text.find("<p>Hello there</p>").unwrap() < text.find("aGVsbG8gd29ybGQ=").unwrap());
    }

    #[test]
    fn test_from_name_with_comma_still_composes() {
        let mut inc = campaign(None);
        inc.from_name = "Acme, Inc.".to_string();
        let text = rendered(&inc, "someone@example.com");

        // the name is quoted or RFC 2047 encoded, never dropped
        assert!(text.contains("\"Acme, Inc.\"") || text.contains("=?utf-8?b?QWNtZSwgSW5jLg==?="));
        assert!(text.contains("<ada@example.com>"));
        assert!(text.contains("To: someone@example.com"));
    }

    #[test]
    fn test_unparsable_recipient_is_an_address_error() {
        let err = compose(&campaign(None), "spaces in local@example.com").unwrap_err();
        assert!(matches!(err, DispatchError::Address(_)));
    }

    #[test]
    fn test_each_recipient_gets_own_to_header() {
        let base = campaign(None);
        let first = rendered(&base, "a@example.com");
        let second = rendered(&base, "b@example.com");

        assert!(first.contains("To: a@example.com"));
        assert!(!first.contains("To: b@example.com"));
        assert!(second.contains("To: b@example.com"));
    }
}
