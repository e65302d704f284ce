//! Press-and-hold kill switch gating the workspace lockdown behind external confirmation.
//!
//! The controller only holds state transitions. The caller owns the hold timer: it starts one when
//! [`KillSwitchController::start_arming`] hands out an [`ArmingTicket`], cancels it on release, and
//! reports the threshold through [`KillSwitchController::request_confirmation`] with that ticket.
//! A ticket names exactly one arming session, so a timer that outlives its session cannot move the
//! machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KillSwitchState {
    #[default]
    Inactive,
    Arming,
    AwaitingConfirmation,
    Active,
}

impl KillSwitchState {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Arming => "arming",
            Self::AwaitingConfirmation => "awaiting-confirmation",
            Self::Active => "active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Identifies the single live arming session.
pub struct ArmingTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of a raw press on the kill switch control.
pub enum PressOutcome {
    /// Arming began; the caller should start a hold timer for this ticket.
    StartedArming(ArmingTicket),
    /// A hold is already in progress; no second timer may start.
    AlreadyArming,
    /// The switch was active and has been reset (press-to-disarm).
    Reset,
    /// Waiting on the confirmation gate; presses are ignored.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillSwitchController {
    state: KillSwitchState,
    locked_down: bool,
    live_ticket: Option<ArmingTicket>,
    issued_tickets: u64,
    hold_threshold: Duration,
}

impl Default for KillSwitchController {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_KILL_SWITCH_HOLD_MS))
    }
}

impl KillSwitchController {
    pub fn new(hold_threshold: Duration) -> Self {
        Self {
            state: KillSwitchState::Inactive,
            locked_down: false,
            live_ticket: None,
            issued_tickets: 0,
            hold_threshold,
        }
    }

    pub fn state(&self) -> KillSwitchState {
        self.state
    }

    pub fn is_locked_down(&self) -> bool {
        self.locked_down
    }

    pub fn live_ticket(&self) -> Option<ArmingTicket> {
        self.live_ticket
    }

    pub fn hold_threshold(&self) -> Duration {
        self.hold_threshold
    }

    /// Begins a hold from `Inactive`. Returns `None` from every other state.
    pub fn start_arming(&mut self) -> Option<ArmingTicket> {
        if self.state != KillSwitchState::Inactive {
            return None;
        }
        self.issued_tickets = self.issued_tickets.wrapping_add(1);
        let ticket = ArmingTicket(self.issued_tickets);
        self.state = KillSwitchState::Arming;
        self.live_ticket = Some(ticket);
        Some(ticket)
    }

    pub fn press(&mut self) -> PressOutcome {
        match self.state {
            KillSwitchState::Inactive => match self.start_arming() {
                Some(ticket) => PressOutcome::StartedArming(ticket),
                None => PressOutcome::Ignored,
            },
            KillSwitchState::Arming => PressOutcome::AlreadyArming,
            KillSwitchState::AwaitingConfirmation => PressOutcome::Ignored,
            KillSwitchState::Active => {
                self.reset();
                PressOutcome::Reset
            }
        }
    }

    /// Release before the threshold. No-op outside `Arming`.
    pub fn cancel_arming(&mut self) -> bool {
        if self.state != KillSwitchState::Arming {
            return false;
        }
        self.to_inactive();
        true
    }

    /// Threshold reached for `ticket`. Stale tickets and repeated signals are ignored.
    pub fn request_confirmation(&mut self, ticket: ArmingTicket) -> bool {
        if self.state != KillSwitchState::Arming || self.live_ticket != Some(ticket) {
            return false;
        }
        self.state = KillSwitchState::AwaitingConfirmation;
        self.live_ticket = None;
        true
    }

    /// Confirmation gate reported success. The only path to `Active`.
    pub fn confirm(&mut self) -> bool {
        if self.state != KillSwitchState::AwaitingConfirmation {
            return false;
        }
        self.state = KillSwitchState::Active;
        self.locked_down = true;
        true
    }

    /// Confirmation gate was dismissed.
    pub fn dismiss(&mut self) -> bool {
        if self.state != KillSwitchState::AwaitingConfirmation {
            return false;
        }
        self.to_inactive();
        true
    }

    /// Returns to baseline from any non-inactive state and clears the lockdown flag.
    pub fn reset(&mut self) -> bool {
        if self.state == KillSwitchState::Inactive {
            return false;
        }
        self.to_inactive();
        true
    }

    fn to_inactive(&mut self) {
        self.state = KillSwitchState::Inactive;
        self.locked_down = false;
        self.live_ticket = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Maps elapsed hold time onto the partial-progress indicator.
pub struct HoldProgress {
    threshold: Duration,
}

impl HoldProgress {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    /// Fraction of the hold completed, in `0.0..=1.0`.
    pub fn fraction(&self, elapsed: Duration) -> f64 {
        if self.threshold.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.threshold.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.threshold
    }
}
