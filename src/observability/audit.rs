//! Per-request audit logging.
//!
//! One line per served request, attributing it to the resolved caller:
//!
//! ```text
//! user=alice@example.com, node=laptop, path=/photos/a.jpg, range=bytes=0-1023
//! ```
//!
//! The `range` field only appears when the request carried a Range header.

use std::fmt;

use crate::http::request::RequestContext;
use crate::identity::CallerIdentity;

/// Tracing target for audit lines.
pub const AUDIT_TARGET: &str = "audit";

/// A single audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry<'a> {
    pub user: &'a str,
    pub node: &'a str,
    pub path: &'a str,
    pub range: Option<&'a str>,
}

impl<'a> AuditEntry<'a> {
    pub fn new(who: &'a CallerIdentity, ctx: &'a RequestContext) -> Self {
        Self {
            user: &who.login_name,
            node: who.node_label(),
            path: &ctx.target,
            range: ctx.range.as_deref(),
        }
    }
}

impl fmt::Display for AuditEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user={}, node={}, path={}", self.user, self.node, self.path)?;
        if let Some(range) = self.range {
            write!(f, ", range={}", range)?;
        }
        Ok(())
    }
}

/// Emit the audit line for a request.
pub fn log_request(who: &CallerIdentity, ctx: &RequestContext) {
    let entry = AuditEntry::new(who, ctx);
    tracing::info!(target: AUDIT_TARGET, "{}", entry);
}
