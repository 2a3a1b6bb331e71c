//! Allow-list permission check for admin-only commands.

use std::collections::HashSet;

use crate::commands::Command;

/// Identifiers allowed to run admin-only commands.
///
/// Built once from the configuration. Empty identifiers are dropped so that a
/// message without a sender can never match.
#[derive(Debug, Clone, Default)]
pub struct Permissions {
    /// Owner of the bot
    owner_id: Option<String>,
    /// Administrators of the bot
    admin_ids: HashSet<String>,
}

impl Permissions {
    /// Creates a new [`Permissions`].
    ///
    /// # Arguments
    ///
    /// * `owner_id` - Identifier of the owner, if any
    /// * `admin_ids` - Identifiers of the administrators
    pub fn new(owner_id: Option<String>, admin_ids: impl IntoIterator<Item = String>) -> Self {
        Permissions {
            owner_id: owner_id.filter(|id| !id.is_empty()),
            admin_ids: admin_ids.into_iter().filter(|id| !id.is_empty()).collect(),
        }
    }

    /// Returns `true` if the caller is the owner or an administrator.
    pub fn is_privileged(&self, caller_id: &str) -> bool {
        if caller_id.is_empty() {
            return false;
        }

        self.owner_id.as_deref() == Some(caller_id) || self.admin_ids.contains(caller_id)
    }

    /// Returns `true` if the caller may run the command.
    pub fn is_authorized(&self, command: &dyn Command, caller_id: &str) -> bool {
        !command.admin_only() || self.is_privileged(caller_id)
    }
}
