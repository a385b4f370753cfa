use chrono::NaiveDate;

/// Last day a completion was credited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastCompletion {
    #[default]
    Unset,
    Day(NaiveDate),
    /// A stored value that is not a readable day; it matches neither today nor yesterday
    Unrecognized,
}

impl LastCompletion {
    pub fn day(self) -> Option<NaiveDate> {
        match self {
            Self::Day(day) => Some(day),
            Self::Unset | Self::Unrecognized => None,
        }
    }
}

impl From<Option<NaiveDate>> for LastCompletion {
    fn from(day: Option<NaiveDate>) -> Self {
        day.map_or(Self::Unset, Self::Day)
    }
}

/// Consecutive days with at least one completed task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streak {
    pub count: u32,
    pub last_completion: LastCompletion,
}

/// What a completion did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    /// Today was already credited
    AlreadyCounted,
    /// Yesterday (or never) was the last completion day
    Extended,
    /// There was a gap; the count starts over at 1
    Restarted,
}

impl Streak {
    pub fn new(count: u32, last_completion: impl Into<LastCompletion>) -> Self {
        Self {
            count,
            last_completion: last_completion.into(),
        }
    }

    /// Pure transition from `(last_completion, today)`
    pub fn advance(self, today: NaiveDate) -> (Self, StreakUpdate) {
        let yesterday = today.pred_opt();

        match self.last_completion {
            LastCompletion::Day(last) if last == today => (self, StreakUpdate::AlreadyCounted),
            LastCompletion::Unset => (
                Self::new(self.count.saturating_add(1), Some(today)),
                StreakUpdate::Extended,
            ),
            LastCompletion::Day(last) if Some(last) == yesterday => (
                Self::new(self.count.saturating_add(1), Some(today)),
                StreakUpdate::Extended,
            ),
            LastCompletion::Day(_) | LastCompletion::Unrecognized => {
                (Self::new(1, Some(today)), StreakUpdate::Restarted)
            }
        }
    }

    /// Credit today, in place
    pub fn record_completion(&mut self, today: NaiveDate) -> StreakUpdate {
        let (next, update) = self.advance(today);
        *self = next;
        update
    }

    /// Whether the streak is still alive as of `today` (credited today or yesterday)
    pub fn is_active(&self, today: NaiveDate) -> bool {
        match self.last_completion.day() {
            Some(last) => last == today || Some(last) == today.pred_opt(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_yesterday_extends() {
        let mut streak = Streak::new(4, Some(today() - Duration::days(1)));
        let update = streak.record_completion(today());

        assert_eq!(update, StreakUpdate::Extended);
        assert_eq!(streak, Streak::new(5, Some(today())));
    }

    #[test]
    fn test_same_day_is_noop() {
        let mut streak = Streak::new(3, Some(today()));
        assert_eq!(streak.record_completion(today()), StreakUpdate::AlreadyCounted);
        assert_eq!(streak.record_completion(today()), StreakUpdate::AlreadyCounted);
        assert_eq!(streak, Streak::new(3, Some(today())));
    }

    #[test]
    fn test_gap_resets_to_one() {
        let mut streak = Streak::new(12, Some(today() - Duration::days(5)));
        assert_eq!(streak.record_completion(today()), StreakUpdate::Restarted);
        assert_eq!(streak, Streak::new(1, Some(today())));
    }

    #[test]
    fn test_first_completion_counts() {
        let mut streak = Streak::default();
        streak.record_completion(today());
        assert_eq!(streak, Streak::new(1, Some(today())));
    }

    #[test]
    fn test_future_date_is_treated_as_gap() {
        let mut streak = Streak::new(7, Some(today() + Duration::days(1)));
        assert_eq!(streak.record_completion(today()), StreakUpdate::Restarted);
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn test_unrecognized_last_day_restarts() {
        let mut streak = Streak::new(5, LastCompletion::Unrecognized);
        assert_eq!(streak.record_completion(today()), StreakUpdate::Restarted);
        assert_eq!(streak, Streak::new(1, Some(today())));
        assert!(!Streak::new(5, LastCompletion::Unrecognized).is_active(today()));
    }

    #[test]
    fn test_is_active() {
        assert!(Streak::new(2, Some(today())).is_active(today()));
        assert!(Streak::new(2, Some(today() - Duration::days(1))).is_active(today()));
        assert!(!Streak::new(2, Some(today() - Duration::days(2))).is_active(today()));
        assert!(!Streak::default().is_active(today()));
    }
}
