//! Donation eligibility helper.
//!
//! A donor is considered eligible again 90 days after their last donation.
//! This is a pure advisory helper for clients and profile screens: the
//! donor matcher only checks the `is_available` flag and never consults
//! the last donation date. Availability and eligibility are tracked
//! independently.

use chrono::NaiveDate;

/// Minimum gap between donations, in days.
pub const DONATION_GAP_DAYS: i64 = 90;

/// Whether a donor with the given last donation date may donate on `today`.
///
/// A donor with no recorded donation is always eligible.
pub fn can_donate(last_donation: Option<NaiveDate>, today: NaiveDate) -> bool {
    match last_donation {
        None => true,
        Some(last) => (today - last).num_days() >= DONATION_GAP_DAYS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn never_donated_is_eligible() {
        assert!(can_donate(None, date(2026, 1, 1)));
    }

    #[test]
    fn ninety_day_boundary() {
        let last = date(2026, 1, 1);
        assert!(!can_donate(Some(last), date(2026, 3, 31))); // day 89
        assert!(can_donate(Some(last), date(2026, 4, 1))); // day 90
        assert!(can_donate(Some(last), date(2026, 6, 1)));
    }

    #[test]
    fn donation_today_is_not_eligible() {
        let today = date(2026, 5, 10);
        assert!(!can_donate(Some(today), today));
    }
}
