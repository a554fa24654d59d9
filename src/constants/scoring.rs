/// Starting ELO for a member's first point-earning event
pub const INITIAL_ELO: f64 = 1000.0;

/// Points granted per qualifying text message
pub const TEXT_MESSAGE_POINTS: f64 = 0.5;

/// Seconds of voice presence per scoring unit (one 5-minute block)
pub const VOICE_UNIT_SECONDS: u64 = 300;

/// Points per unit in operation channels
pub const OPERATION_RATE: f64 = 2.5;

/// Points per unit in roam channels
pub const ROAM_RATE: f64 = 1.0;

/// Points per unit in any other voice channel
pub const DEFAULT_VOICE_RATE: f64 = 1.0;

/// Full days of inactivity tolerated before decay applies
pub const DECAY_GRACE_DAYS: i64 = 2;

/// Base penalty for the decay curve
pub const DECAY_BASE_LOSS: f64 = 100.0;

/// Growth factor of the penalty per day of inactivity
pub const DECAY_GROWTH: f64 = 1.5;

/// How often the inactivity sweep runs
pub const DECAY_SWEEP_INTERVAL_SECONDS: u64 = 24 * 60 * 60;

/// Expected format for absence request dates
pub const ABSENCE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Role that exempts a member from earning and losing points
pub const DEFAULT_EXEMPT_ROLE: &str = "Shade";
