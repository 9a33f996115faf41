//! Wizard reply texts
//!
//! Every message the bot sends lives here so handlers, transitions and
//! tests share one vocabulary.

pub const WELCOME: &str = "Welcome to MailBuddy! Please enter your serial code to proceed.";

pub const ASK_CODE: &str = "Please enter your serial code to proceed.";

pub const CODE_REJECTED: &str = "Invalid serial code. Please try again.";

pub const ASK_FROM_NAME: &str =
    "Serial code validated! Let's set up your email. What is the 'From Name'?";

pub const EMPTY_FROM_NAME: &str = "The 'From Name' cannot be empty. Please try again.";

pub const ASK_FROM_EMAIL: &str = "Got it! What is the 'From Email'?";

pub const INVALID_EMAIL: &str = "Invalid email format. Please try again.";

pub const ASK_REPLY_TO: &str = "Great! What is the 'Reply To' email?";

pub const ASK_SUBJECT: &str = "Awesome! What is the email subject?";

pub const ASK_BODY: &str = "Got it! Please provide the HTML body of the email.";

pub const ASK_ATTACHMENT: &str =
    "Almost done! Do you have any attachments? If yes, send the file. Otherwise, type 'skip'.";

pub const ATTACHMENT_OR_SKIP: &str = "Invalid input. Please send a file or type 'skip'.";

pub const ASK_RECIPIENTS: &str =
    "Almost done! Send the recipient emails as a comma-separated list.";

pub const EMPTY_RECIPIENTS: &str =
    "I couldn't find any addresses in that list. Please send comma-separated emails.";

pub const RESOLVE_FAILED: &str =
    "Couldn't download that file. Please send it again, or type 'skip'.";

pub const CANCELLED: &str = "Operation canceled.";

pub const NO_SESSION: &str = "No campaign in progress. Send /start to begin.";

pub const SESSION_EXPIRED: &str = "Your session timed out. Send /start to begin again.";

pub const WIZARD_FAILED: &str = "Something went wrong. Send /start to begin again.";

pub const PRIVATE_ONLY: &str =
    "MailBuddy only works in a private chat. Please message me directly.";

pub const SINGLE_SENT: &str = "Email sent successfully!";

pub const HELP: &str = "MailBuddy walks you through composing an email campaign step by step.\n\n\
/start - begin a new campaign (restarts any campaign in progress)\n\
/cancel - abandon the campaign in progress\n\
/help - show this message\n\n\
You will need a valid serial code to use the wizard.";

pub fn too_many_recipients(count: usize, max: usize) -> String {
    format!("That list has {count} addresses; the limit is {max}. Please trim it and try again.")
}

pub fn single_failed(detail: &str) -> String {
    format!("Error sending email: {detail}")
}

pub fn bulk_sent(sent: usize) -> String {
    format!("All {sent} emails sent successfully!")
}

pub fn bulk_aborted(sent: usize, total: usize, detail: &str) -> String {
    format!(
        "Stopped after {sent} of {total} emails: {detail}. The remaining emails were not attempted."
    )
}

pub fn bulk_partial(sent: usize, failed: usize) -> String {
    format!("Finished: {sent} emails sent, {failed} failed.")
}
