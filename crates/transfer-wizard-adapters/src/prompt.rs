use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use transfer_wizard_core::{FeeDeadline, FeeDeadlineChoice, FeeDeadlinePort};

/// Fee/deadline dialog that replays scripted answers. Cancels once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFeeDeadlinePrompt {
    inner: Arc<Mutex<PromptScript>>,
}

#[derive(Debug, Default)]
struct PromptScript {
    answers: VecDeque<FeeDeadlineChoice>,
    opened: usize,
}

impl ScriptedFeeDeadlinePrompt {
    pub fn confirming(fee_nqt: i64, deadline_minutes: u16) -> Self {
        let prompt = Self::default();
        prompt.push(FeeDeadlineChoice::Confirmed(FeeDeadline {
            fee_nqt,
            deadline_minutes,
        }));
        prompt
    }

    pub fn cancelling() -> Self {
        let prompt = Self::default();
        prompt.push(FeeDeadlineChoice::Cancelled);
        prompt
    }

    pub fn push(&self, choice: FeeDeadlineChoice) {
        match self.inner.lock() {
            Ok(mut g) => g.answers.push_back(choice),
            Err(e) => tracing::error!(error = %e, "prompt script lock poisoned"),
        }
    }

    /// How many times the dialog has been shown.
    pub fn opened(&self) -> usize {
        self.inner.lock().map(|g| g.opened).unwrap_or_default()
    }
}

impl FeeDeadlinePort for ScriptedFeeDeadlinePrompt {
    fn open(&self) -> FeeDeadlineChoice {
        let mut g = match self.inner.lock() {
            Ok(g) => g,
            Err(e) => {
                tracing::error!(error = %e, "prompt script lock poisoned");
                return FeeDeadlineChoice::Cancelled;
            }
        };
        g.opened += 1;
        g.answers.pop_front().unwrap_or(FeeDeadlineChoice::Cancelled)
    }
}
