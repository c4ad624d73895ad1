/// Below this many seconds the clock is urgent.
pub const URGENT_BELOW_SECS: u64 = 3600;
/// Below this many seconds (and not urgent) the clock is a warning.
pub const WARNING_BELOW_SECS: u64 = 3 * 3600;

/// Visual classification of the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Normal,
    Warning,
    Urgent,
}

impl Tier {
    pub fn for_remaining(remaining: u64) -> Self {
        if remaining < URGENT_BELOW_SECS {
            Tier::Urgent
        } else if remaining < WARNING_BELOW_SECS {
            Tier::Warning
        } else {
            Tier::Normal
        }
    }
}

/// Status line shown under the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    TimeUp,
    Submitted,
}

impl Status {
    pub fn text(&self) -> &'static str {
        match self {
            Status::InProgress => "In Progress",
            Status::TimeUp => "Time Up",
            Status::Submitted => "Submitted",
        }
    }
}
