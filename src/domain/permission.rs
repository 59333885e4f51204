//! Host permissions and the user's answer to the permission prompt.

use crate::domain::Mode;

/// Host permissions the plugin relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Outbound HTTP requests.
    WebAccess,
    /// Reading documents from the host filesystem.
    FullHdAccess,
}

impl Permission {
    /// Permissions a dispatch in `mode` needs.
    #[must_use]
    pub const fn required_for(mode: Mode) -> &'static [Self] {
        match mode {
            Mode::Stock | Mode::News => &[Self::WebAccess],
            Mode::Document => &[Self::WebAccess, Self::FullHdAccess],
        }
    }
}

/// Where the permission prompt stands.
///
/// The host silently drops calls it has not been allowed to make, so a
/// dispatch must never be sent while its permissions are unanswered or
/// refused: its settlement would never arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PermissionState {
    /// Nothing was requested; calls go through as-is.
    #[default]
    Unrequested,
    /// The prompt is shown and the user has not answered yet.
    Pending,
    /// The user answered; `denied` is empty when everything was granted.
    Answered { denied: Vec<Permission> },
}

impl PermissionState {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// First permission `mode` needs that the user refused.
    ///
    /// ```
    /// use finassist::domain::{Mode, Permission, PermissionState};
    ///
    /// let state = PermissionState::Answered { denied: vec![Permission::FullHdAccess] };
    /// assert_eq!(state.refused_for(Mode::Stock), None);
    /// assert_eq!(state.refused_for(Mode::Document), Some(Permission::FullHdAccess));
    /// ```
    #[must_use]
    pub fn refused_for(&self, mode: Mode) -> Option<Permission> {
        match self {
            Self::Answered { denied } => Permission::required_for(mode)
                .iter()
                .copied()
                .find(|p| denied.contains(p)),
            Self::Unrequested | Self::Pending => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_access_refusal_blocks_every_mode() {
        let state = PermissionState::Answered { denied: vec![Permission::WebAccess] };
        for mode in Mode::ALL {
            assert_eq!(state.refused_for(mode), Some(Permission::WebAccess));
        }
    }

    #[test]
    fn unanswered_prompt_refuses_nothing() {
        assert_eq!(PermissionState::Pending.refused_for(Mode::Document), None);
        assert!(PermissionState::Pending.is_pending());
        assert_eq!(
            PermissionState::Answered { denied: vec![] }.refused_for(Mode::Document),
            None
        );
    }
}
