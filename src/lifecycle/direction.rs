use std::fmt;

use super::waiter::Expectation;
use crate::external::Action;
use crate::inventory::InstanceStatus;

/// One transition of an instance: issue `action`, then wait for `expect`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub expect: Expectation,
}

/// Which way a run moves the fleet through the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// ACTIVE instances are paused, then locked
    PauseLock,
    /// PAUSED instances are unlocked, then unpaused
    UnlockUnpause,
}

impl Direction {
    /// Status that makes an instance eligible for this run
    pub fn trigger(&self) -> InstanceStatus {
        match self {
            Direction::PauseLock => InstanceStatus::Active,
            Direction::UnlockUnpause => InstanceStatus::Paused,
        }
    }

    /// Primary then secondary step. A locked instance cannot be unpaused,
    /// so the reverse direction unlocks first.
    pub fn steps(&self) -> [Step; 2] {
        match self {
            Direction::PauseLock => [
                Step {
                    action: Action::Pause,
                    expect: Expectation::Status(InstanceStatus::Paused),
                },
                Step {
                    action: Action::Lock,
                    expect: Expectation::Locked(true),
                },
            ],
            Direction::UnlockUnpause => [
                Step {
                    action: Action::Unlock,
                    expect: Expectation::Locked(false),
                },
                Step {
                    action: Action::Unpause,
                    expect: Expectation::Status(InstanceStatus::Active),
                },
            ],
        }
    }

    pub fn confirmation_prompt(&self) -> &'static str {
        match self {
            Direction::PauseLock => {
                "Do you want to continue pausing and locking ACTIVE instances? (yes/no): "
            }
            Direction::UnlockUnpause => {
                "Do you want to continue unlocking and unpausing paused instances? (yes/no): "
            }
        }
    }

    /// Lowercase trigger wording for progress lines ("Found 2 active instances")
    pub fn trigger_adjective(&self) -> &'static str {
        match self {
            Direction::PauseLock => "active",
            Direction::UnlockUnpause => "paused",
        }
    }

    pub fn completion_message(&self) -> &'static str {
        match self {
            Direction::PauseLock => "All active instances have been paused and locked.",
            Direction::UnlockUnpause => "All pause-locked instances have been processed.",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::PauseLock => f.write_str("pause-lock"),
            Direction::UnlockUnpause => f.write_str("unlock-unpause"),
        }
    }
}
