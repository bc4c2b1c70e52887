//! Per-call context handed from inbound adapters to domain services.

use super::UserId;

/// The authenticated caller a "my profile" operation acts for.
///
/// Inbound adapters build this from their session mechanism; the domain
/// trusts it and never authenticates on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    caller: UserId,
}

impl RequestContext {
    pub fn for_caller(caller: UserId) -> Self {
        Self { caller }
    }

    pub fn caller(&self) -> &UserId {
        &self.caller
    }
}
