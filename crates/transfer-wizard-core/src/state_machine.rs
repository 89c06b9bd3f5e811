use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Editing,
    SenderChecking,
    AwaitingFeeDeadline,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    RequestSubmit,
    SenderVerified,
    SenderRejected,
    FeeDeadlineConfirmed,
    FeeDeadlineCancelled,
    ServiceAccepted,
    ServiceRejected,
    Resume,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: SubmitState,
    pub to: SubmitState,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal submit transition: {from:?} --{action:?}-->")]
pub struct TransitionError {
    pub from: SubmitState,
    pub action: SubmitAction,
}

pub fn submit_transition(
    state: SubmitState,
    action: SubmitAction,
) -> Result<(SubmitState, StateTransition), TransitionError> {
    use SubmitAction as A;
    use SubmitState as S;

    let (to, reason) = match (state, action) {
        (S::Editing, A::RequestSubmit) => (S::SenderChecking, "submit_requested"),
        (S::SenderChecking, A::SenderVerified) => (S::AwaitingFeeDeadline, "sender_verified"),
        (S::SenderChecking, A::SenderRejected) => (S::Failed, "sender_rejected"),
        (S::AwaitingFeeDeadline, A::FeeDeadlineConfirmed) => {
            (S::Submitting, "fee_deadline_confirmed")
        }
        (S::AwaitingFeeDeadline, A::FeeDeadlineCancelled) => {
            (S::Editing, "fee_deadline_cancelled")
        }
        (S::Submitting, A::ServiceAccepted) => (S::Succeeded, "service_accepted"),
        (S::Submitting, A::ServiceRejected) => (S::Failed, "service_rejected"),
        (S::Failed, A::Resume) => (S::Editing, "resumed"),
        (from, action) => return Err(TransitionError { from, action }),
    };
    Ok((
        to,
        StateTransition {
            from: state,
            to,
            reason,
        },
    ))
}
