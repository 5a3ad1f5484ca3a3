//! Non-fatal diagnostics collected during parsing and routing.
//!
//! Every diagnostic this design produces is a warning: a skipped line,
//! an unroutable net. Conditions severe enough to abort a session go
//! through [`crate::Error`] instead and never reach this type.

use std::fmt;

/// A single non-fatal issue: a skipped line, an unroutable net.
///
/// Diagnostics are emitted through `tracing` at the point they occur
/// *and* collected here, so a caller that isn't scraping logs (a test,
/// a library consumer) can still see what happened.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub net_name: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn warn(net_name: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            net_name: net_name.map(str::to_owned),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.net_name {
            Some(name) => write!(f, "[{name}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
