//! Mail composition and dispatch module
//!
//! Everything between a completed campaign and the SMTP wire: message
//! assembly, the relay transport seam, and the fan-out engine.

pub mod composer;
pub mod dispatch;
pub mod transport;

pub use dispatch::{DispatchEngine, DispatchOutcome, DispatchPolicy, DispatchReport};
pub use transport::{MailTransport, SmtpRelayTransport};
