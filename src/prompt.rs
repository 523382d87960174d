//! Alert and confirmation dialogs.
//!
//! Pages never talk to a user directly; they go through a [`Prompt`]. The demo
//! binary uses [`LogPrompt`], tests use
//! [`RecordingPrompt`](crate::mock::RecordingPrompt).

use tracing::info;

pub trait Prompt: Send + Sync {
    /// Asks a yes/no question. Blocks until answered.
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}

/// Writes dialogs to the log and answers every confirmation with `auto_confirm`.
#[derive(Debug, Clone, Copy)]
pub struct LogPrompt {
    auto_confirm: bool,
}

impl LogPrompt {
    pub fn new(auto_confirm: bool) -> Self {
        Self { auto_confirm }
    }
}

impl Default for LogPrompt {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Prompt for LogPrompt {
    fn confirm(&self, message: &str) -> bool {
        info!(answer = self.auto_confirm, "Confirm: {}", message);
        self.auto_confirm
    }

    fn alert(&self, message: &str) {
        info!("Alert: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_prompt_answers_configured_value() {
        assert!(LogPrompt::default().confirm("Delete?"));
        assert!(!LogPrompt::new(false).confirm("Delete?"));
    }
}
