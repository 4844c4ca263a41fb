/// Messages delivered to the notification sink when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Success { minutes: u32 },
    Failure { minutes: u32, seconds: u32 },
}

impl Notification {
    pub fn failure_after(elapsed_secs: u32) -> Self {
        Notification::Failure {
            minutes: elapsed_secs / 60,
            seconds: elapsed_secs % 60,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notification::Success { .. } => "Success",
            Notification::Failure { .. } => "Fail",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notification::Success { minutes } => format!(
                "You managed to type without significant interruption for {} minutes",
                minutes
            ),
            Notification::Failure { minutes, seconds } => format!(
                "You only managed to type without significant interruption for {} minutes and {} seconds",
                minutes, seconds
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_splits_minutes_and_seconds() {
        assert_eq!(
            Notification::failure_after(125),
            Notification::Failure {
                minutes: 2,
                seconds: 5
            }
        );
        assert_eq!(
            Notification::failure_after(5),
            Notification::Failure {
                minutes: 0,
                seconds: 5
            }
        );
    }

    #[test]
    fn titles() {
        assert_eq!(Notification::Success { minutes: 1 }.title(), "Success");
        assert_eq!(Notification::failure_after(3).title(), "Fail");
    }

    #[test]
    fn messages() {
        assert_eq!(
            Notification::Success { minutes: 10 }.message(),
            "You managed to type without significant interruption for 10 minutes"
        );
        assert_eq!(
            Notification::failure_after(65).message(),
            "You only managed to type without significant interruption for 1 minutes and 5 seconds"
        );
    }
}
