//! Advance-booking policy

use chrono::{Days, NaiveDate};

use crate::domain::{DomainError, DomainResult};

/// Lead-time rule applied to create, amend and cancel.
///
/// With `advance_booking_days = N > 0`, the check-in date must be at least
/// `N` days after today. Zero disables the rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingPolicy {
    pub advance_booking_days: u32,
}

impl BookingPolicy {
    pub fn new(advance_booking_days: u32) -> Self {
        Self {
            advance_booking_days,
        }
    }

    pub fn check_lead_time(&self, check_in: NaiveDate, today: NaiveDate, action: &str) -> DomainResult<()> {
        if self.advance_booking_days == 0 {
            return Ok(());
        }
        let days = self.advance_booking_days;
        // No representable check-in lies past an overflowing cutoff.
        let allowed = today
            .checked_add_days(Days::new(u64::from(days)))
            .is_some_and(|earliest| check_in >= earliest);
        if !allowed {
            return Err(DomainError::Forbidden(format!(
                "Cannot {} bookings within {} days of check-in",
                action, days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn disabled_policy_accepts_past_dates() {
        let policy = BookingPolicy::default();
        assert!(policy
            .check_lead_time(date("2020-01-01"), date("2026-01-01"), "create")
            .is_ok());
    }

    #[test]
    fn check_in_exactly_n_days_ahead_is_allowed() {
        let policy = BookingPolicy::new(3);
        assert!(policy
            .check_lead_time(date("2026-01-04"), date("2026-01-01"), "create")
            .is_ok());
    }

    #[test]
    fn check_in_inside_window_is_forbidden() {
        let policy = BookingPolicy::new(3);
        let err = policy
            .check_lead_time(date("2026-01-03"), date("2026-01-01"), "update")
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(err.to_string().contains("within 3 days"));
    }

    #[test]
    fn extreme_dates_do_not_overflow() {
        let policy = BookingPolicy::new(3);
        let today = date("2026-01-01");
        let err = policy
            .check_lead_time(NaiveDate::MIN, today, "create")
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(policy.check_lead_time(NaiveDate::MAX, today, "create").is_ok());
        assert!(policy
            .check_lead_time(NaiveDate::MAX, NaiveDate::MAX, "update")
            .is_err());
    }
}
