//! Valve operations and their pulse recipes.
//!
//! The Mertik Maxitrol GV60 is commanded by closing combinations of its
//! three wall-switch contacts for a fixed time.  Each [`Operation`] maps to
//! a [`Recipe`]: an ordered list of steps, each setting a group of relay
//! contacts and then holding for the duration the valve electronics expect.
//!
//! The recipes are protocol data, not configuration.  Note the deliberate
//! asymmetry in the final steps — `on` releases only contacts 1 and 3, and
//! the flame steps release a single contact.  That matches the GV60
//! wall-switch wiring behaviour and must not be "normalised".

use core::time::Duration;

// ───────────────────────────────────────────────────────────────
// Channels and contact states
// ───────────────────────────────────────────────────────────────

/// One of the three relay channels, wired to the matching GV60 contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Ch1,
    Ch2,
    Ch3,
}

/// Logical state of a relay contact.
///
/// `Closed` drives the output to logic 0 (relay energised, contact made);
/// `Open` drives it to logic 1.  All outputs rest at `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Closed,
    Open,
}

impl Contact {
    /// The GPIO logic level for this contact state.
    pub const fn level(self) -> u8 {
        match self {
            Self::Closed => 0,
            Self::Open => 1,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Steps and recipes
// ───────────────────────────────────────────────────────────────

/// One timed stage of a recipe: set every listed contact, then hold.
///
/// Assignments are applied back-to-back before the hold timer starts; a
/// zero hold means the step completes immediately (used for the release
/// stage at the end of each recipe).
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub assignments: &'static [(Channel, Contact)],
    pub hold: Duration,
}

/// An immutable, ordered pulse sequence implementing one operation.
#[derive(Debug, Clone, Copy)]
pub struct Recipe {
    pub steps: &'static [Step],
}

impl Recipe {
    /// Total number of contact assignments across all steps.
    pub fn assignment_count(&self) -> usize {
        self.steps.iter().map(|s| s.assignments.len()).sum()
    }
}

use Channel::{Ch1, Ch2, Ch3};
use Contact::{Closed, Open};

// OFF: close contacts 1 & 2 & 3 for 1 second, then release all three.
static OFF: Recipe = Recipe {
    steps: &[
        Step {
            assignments: &[(Ch1, Closed), (Ch2, Closed), (Ch3, Closed)],
            hold: Duration::from_secs(1),
        },
        Step {
            assignments: &[(Ch1, Open), (Ch2, Open), (Ch3, Open)],
            hold: Duration::ZERO,
        },
    ],
};

// ON (ignition): close contacts 1 & 3 for 1 second.  Contact 2 is driven
// open up front and left alone afterwards.
static ON: Recipe = Recipe {
    steps: &[
        Step {
            assignments: &[(Ch1, Closed), (Ch2, Open), (Ch3, Closed)],
            hold: Duration::from_secs(1),
        },
        Step {
            assignments: &[(Ch1, Open), (Ch3, Open)],
            hold: Duration::ZERO,
        },
    ],
};

// FLAME UP: close contact 1.  Min-to-full flame takes the motor about
// 12 seconds, so each request nudges it one 2-second increment.
static FLAME_UP: Recipe = Recipe {
    steps: &[
        Step {
            assignments: &[(Ch1, Closed), (Ch2, Open), (Ch3, Open)],
            hold: Duration::from_secs(2),
        },
        Step {
            assignments: &[(Ch1, Open)],
            hold: Duration::ZERO,
        },
    ],
};

// FLAME DOWN: close contact 3, same 2-second increment as flame up.
static FLAME_DOWN: Recipe = Recipe {
    steps: &[
        Step {
            assignments: &[(Ch1, Open), (Ch2, Open), (Ch3, Closed)],
            hold: Duration::from_secs(2),
        },
        Step {
            assignments: &[(Ch3, Open)],
            hold: Duration::ZERO,
        },
    ],
};

// ───────────────────────────────────────────────────────────────
// Operations
// ───────────────────────────────────────────────────────────────

/// The four supported valve operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Off,
    On,
    FlameUp,
    FlameDown,
}

/// Every operation, in the order the help text lists them.
pub const OPERATIONS: [Operation; 4] = [
    Operation::Off,
    Operation::On,
    Operation::FlameUp,
    Operation::FlameDown,
];

impl Operation {
    /// Wire name, as used in route paths and response tokens.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::FlameUp => "flameup",
            Self::FlameDown => "flamedown",
        }
    }

    /// HTTP route for this operation.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Off => "/off",
            Self::On => "/on",
            Self::FlameUp => "/flameup",
            Self::FlameDown => "/flamedown",
        }
    }

    /// Resolve a request path to an operation.  Exact match only; anything
    /// else is left to the HTTP layer's not-found handling.
    pub fn from_path(path: &str) -> Option<Self> {
        OPERATIONS.into_iter().find(|op| op.path() == path)
    }

    /// Response body for a completed, fault-free run.
    pub const fn ok_token(self) -> &'static str {
        match self {
            Self::Off => "off_ok",
            Self::On => "on_ok",
            Self::FlameUp => "flameup_ok",
            Self::FlameDown => "flamedown_ok",
        }
    }

    /// Response body when the sequencer rejects the request as busy.
    pub const fn busy_token(self) -> &'static str {
        match self {
            Self::Off => "off_busy",
            Self::On => "on_busy",
            Self::FlameUp => "flameup_busy",
            Self::FlameDown => "flamedown_busy",
        }
    }

    /// Response body when the run completed but a relay write failed.
    pub const fn fault_token(self) -> &'static str {
        match self {
            Self::Off => "off_fault",
            Self::On => "on_fault",
            Self::FlameUp => "flameup_fault",
            Self::FlameDown => "flamedown_fault",
        }
    }

    /// The pulse recipe this operation executes.
    pub const fn recipe(self) -> &'static Recipe {
        match self {
            Self::Off => &OFF,
            Self::On => &ON,
            Self::FlameUp => &FLAME_UP,
            Self::FlameDown => &FLAME_DOWN,
        }
    }
}
