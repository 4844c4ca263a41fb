use thiserror::Error;

/// Session lengths offered by the duration selector, in minutes
pub const ALLOWED_MINUTES: [u32; 9] = [1, 2, 3, 5, 10, 15, 20, 30, 60];

pub const DEFAULT_MINUTES: u32 = 1;
pub const DEFAULT_INACTIVITY_LIMIT_SECS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported session length: {0} minutes (choose one of 1, 2, 3, 5, 10, 15, 20, 30, 60)")]
    UnsupportedDuration(u32),
    #[error("inactivity limit must be at least one second")]
    ZeroInactivityLimit,
    #[error("session duration must be at least one second")]
    ZeroDuration,
    #[error("cannot change the session length while a session is {0}")]
    SessionActive(SessionState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Succeeded | SessionState::Failed)
    }
}

/// Immutable per-session settings. Replaced wholesale, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    duration_secs: u32,
    inactivity_limit_secs: u32,
}

impl SessionConfig {
    /// Build a config from raw seconds. Used for the allowed set and for tests
    /// that need short sessions.
    pub fn new(duration_secs: u32, inactivity_limit_secs: u32) -> Result<Self, ConfigError> {
        if duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if inactivity_limit_secs == 0 {
            return Err(ConfigError::ZeroInactivityLimit);
        }
        Ok(Self {
            duration_secs,
            inactivity_limit_secs,
        })
    }

    pub fn from_minutes(minutes: u32, inactivity_limit_secs: u32) -> Result<Self, ConfigError> {
        validate_minutes(minutes)?;
        Self::new(minutes * 60, inactivity_limit_secs)
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_secs / 60
    }

    pub fn inactivity_limit_secs(&self) -> u32 {
        self.inactivity_limit_secs
    }

    pub fn with_minutes(&self, minutes: u32) -> Result<Self, ConfigError> {
        Self::from_minutes(minutes, self.inactivity_limit_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_MINUTES * 60,
            inactivity_limit_secs: DEFAULT_INACTIVITY_LIMIT_SECS,
        }
    }
}

pub fn validate_minutes(minutes: u32) -> Result<u32, ConfigError> {
    if ALLOWED_MINUTES.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(ConfigError::UnsupportedDuration(minutes))
    }
}

/// Next allowed length after `minutes`, wrapping around. Unknown values snap to the first entry.
pub fn next_minutes(minutes: u32) -> u32 {
    match ALLOWED_MINUTES.iter().position(|&m| m == minutes) {
        Some(idx) => ALLOWED_MINUTES[(idx + 1) % ALLOWED_MINUTES.len()],
        None => ALLOWED_MINUTES[0],
    }
}

pub fn prev_minutes(minutes: u32) -> u32 {
    match ALLOWED_MINUTES.iter().position(|&m| m == minutes) {
        Some(0) => ALLOWED_MINUTES[ALLOWED_MINUTES.len() - 1],
        Some(idx) => ALLOWED_MINUTES[idx - 1],
        None => ALLOWED_MINUTES[0],
    }
}

/// Snapshot for the progress indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub elapsed_secs: u32,
    pub duration_secs: u32,
}

impl Progress {
    pub fn ratio(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        (self.elapsed_secs as f64 / self.duration_secs as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_config_is_one_minute_five_seconds() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.duration_secs(), 60);
        assert_eq!(cfg.duration_minutes(), 1);
        assert_eq!(cfg.inactivity_limit_secs(), 5);
    }

    #[test]
    fn from_minutes_accepts_every_allowed_length() {
        for m in ALLOWED_MINUTES {
            let cfg = SessionConfig::from_minutes(m, 5).unwrap();
            assert_eq!(cfg.duration_secs(), m * 60);
        }
    }

    #[test]
    fn from_minutes_rejects_unlisted_lengths() {
        assert_matches!(
            SessionConfig::from_minutes(4, 5),
            Err(ConfigError::UnsupportedDuration(4))
        );
        assert_matches!(
            SessionConfig::from_minutes(0, 5),
            Err(ConfigError::UnsupportedDuration(0))
        );
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert_matches!(SessionConfig::new(0, 5), Err(ConfigError::ZeroDuration));
        assert_matches!(
            SessionConfig::new(60, 0),
            Err(ConfigError::ZeroInactivityLimit)
        );
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(next_minutes(1), 2);
        assert_eq!(next_minutes(60), 1);
        assert_eq!(prev_minutes(1), 60);
        assert_eq!(prev_minutes(10), 5);
        assert_eq!(next_minutes(7), 1);
    }

    #[test]
    fn progress_ratio_is_clamped() {
        let p = Progress {
            elapsed_secs: 30,
            duration_secs: 60,
        };
        assert_eq!(p.ratio(), 0.5);
        let empty = Progress {
            elapsed_secs: 0,
            duration_secs: 0,
        };
        assert_eq!(empty.ratio(), 0.0);
    }

    #[test]
    fn state_display_and_terminal_flags() {
        assert_eq!(SessionState::Running.to_string(), "Running");
        assert!(SessionState::Failed.is_terminal());
        assert!(SessionState::Succeeded.is_terminal());
        assert!(!SessionState::Idle.is_terminal());
    }
}
