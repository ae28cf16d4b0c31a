use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Live,
}

impl Countdown {
    pub fn until(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        let distance = (target - now).num_milliseconds();
        if distance < 0 {
            return Countdown::Live;
        }
        let total_secs = distance / 1000;
        Countdown::Remaining {
            days: total_secs / 86_400,
            hours: total_secs % 86_400 / 3_600,
            minutes: total_secs % 3_600 / 60,
            seconds: total_secs % 60,
        }
    }

    /// Days, hours, minutes and seconds, each padded to two digits.
    pub fn digits(&self) -> Option<[String; 4]> {
        match *self {
            Countdown::Remaining { days, hours, minutes, seconds } => Some([
                format!("{days:02}"),
                format!("{hours:02}"),
                format!("{minutes:02}"),
                format!("{seconds:02}"),
            ]),
            Countdown::Live => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn target() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 15, 20, 0, 0).unwrap()
    }

    #[test]
    fn splits_remaining_time() {
        let now = target() - Duration::seconds(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5);
        assert_eq!(
            Countdown::until(now, target()),
            Countdown::Remaining { days: 2, hours: 3, minutes: 4, seconds: 5 }
        );
    }

    #[test]
    fn digits_are_zero_padded() {
        let now = target() - Duration::seconds(65);
        let digits = Countdown::until(now, target()).digits().unwrap();
        assert_eq!(digits, ["00", "00", "01", "05"].map(String::from));
    }

    #[test]
    fn sub_second_remainder_rounds_down() {
        let now = target() - Duration::milliseconds(999);
        assert_eq!(Countdown::until(now, target()).digits().unwrap()[3], "00");
    }

    #[test]
    fn past_target_is_live() {
        assert_eq!(Countdown::until(target(), target()).digits().unwrap()[0], "00");
        assert_eq!(Countdown::until(target() + Duration::seconds(1), target()), Countdown::Live);
        assert!(Countdown::Live.digits().is_none());
    }
}
