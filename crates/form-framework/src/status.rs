//! # Form Status
//!
//! Every control and every group carries a [`FormStatus`]. A control moves between
//! states through [`StatusEvent`]s; a group derives its status from its children
//! with [`FormStatus::aggregate`].
//!
//! ```text
//!              Validated{errors}            ValidationStarted
//!   VALID <-------------------> INVALID     VALID ----------> PENDING
//!     ^                                       PENDING --ValidationSettled--> VALID | INVALID
//!     |  Enabled{..}
//!  DISABLED <---- Disabled (from any state)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Validity classification of a control or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormStatus {
    #[default]
    Valid,
    Invalid,
    Pending,
    Disabled,
}

/// Something that happened to a control and may change its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// Synchronous validators ran.
    Validated { has_errors: bool },
    /// A deferred validation began; only a sync-valid control waits on it.
    ValidationStarted,
    /// A deferred validation finished.
    ValidationSettled { has_errors: bool },
    Disabled,
    /// The control was re-enabled and revalidated.
    Enabled { has_errors: bool },
}

impl FormStatus {
    /// Applies `event` to the current status.
    ///
    /// A disabled control ignores everything but [`StatusEvent::Enabled`].
    /// `ValidationSettled` is ignored unless the control is pending.
    pub fn next(self, event: StatusEvent) -> FormStatus {
        use FormStatus::*;
        match (self, event) {
            (_, StatusEvent::Disabled) => Disabled,
            (Disabled, StatusEvent::Enabled { has_errors }) => Self::from_errors(has_errors),
            (Disabled, _) => Disabled,
            (_, StatusEvent::Enabled { has_errors }) => Self::from_errors(has_errors),
            (_, StatusEvent::Validated { has_errors }) => Self::from_errors(has_errors),
            (Valid, StatusEvent::ValidationStarted) => Pending,
            (current, StatusEvent::ValidationStarted) => current,
            (Pending, StatusEvent::ValidationSettled { has_errors }) => Self::from_errors(has_errors),
            (current, StatusEvent::ValidationSettled { .. }) => current,
        }
    }

    fn from_errors(has_errors: bool) -> FormStatus {
        if has_errors {
            FormStatus::Invalid
        } else {
            FormStatus::Valid
        }
    }

    /// Derives a group status from its own errors and its children's statuses.
    ///
    /// Disabled children do not count. A group whose children are all disabled is
    /// itself disabled.
    pub fn aggregate(group_has_errors: bool, children: impl IntoIterator<Item = FormStatus>) -> FormStatus {
        let mut any_enabled = false;
        let mut any_invalid = false;
        let mut any_pending = false;
        let mut any_child = false;
        for status in children {
            any_child = true;
            match status {
                FormStatus::Disabled => {}
                FormStatus::Invalid => {
                    any_enabled = true;
                    any_invalid = true;
                }
                FormStatus::Pending => {
                    any_enabled = true;
                    any_pending = true;
                }
                FormStatus::Valid => any_enabled = true,
            }
        }

        if any_child && !any_enabled {
            FormStatus::Disabled
        } else if group_has_errors || any_invalid {
            FormStatus::Invalid
        } else if any_pending {
            FormStatus::Pending
        } else {
            FormStatus::Valid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Valid => "VALID",
            FormStatus::Invalid => "INVALID",
            FormStatus::Pending => "PENDING",
            FormStatus::Disabled => "DISABLED",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FormStatus::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FormStatus::Invalid)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FormStatus::Pending)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, FormStatus::Disabled)
    }
}

impl Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
