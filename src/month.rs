//! Month-end arithmetic: the last day, last weekday (Monday-Friday), and
//! last occurrence of a given day of the week within a date's month.
//!
//! Everything here is a pure function of its inputs; no operation can fail
//! once it holds a valid [`CalendarDate`] and [`Weekday`].

use crate::consts::{DAYS_IN_WEEK, DECEMBER, JANUARY, MIN_DAY};
use crate::types::{days_in_month, Weekday};
use crate::CalendarDate;

/// Month offsets for Sakamoto's day-of-week method.
const MONTH_OFFSETS: [u32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

/// Day of the week of a (year, month, day) triple, numbered 1 (Sunday)
/// through 7 (Saturday).
const fn weekday_number(year: u16, month: u8, day: u8) -> u8 {
    // Sakamoto's method: January and February count as months of the
    // previous year, and the raw result is 0=Sunday..6=Saturday.
    let y = if month < 3 {
        (year - 1) as u32
    } else {
        year as u32
    };
    let dow =
        (y + y / 4 - y / 100 + y / 400 + MONTH_OFFSETS[(month - 1) as usize] + day as u32) % 7;
    (dow + 1) as u8
}

/// The 1st of the month after (year, month), rolling the year forward
/// past December. Numeric components only, so December of `MAX_YEAR`
/// needs no representable successor year.
const fn first_of_next_month(year: u16, month: u8) -> (u16, u8, u8) {
    if month == DECEMBER {
        (year + 1, JANUARY, MIN_DAY)
    } else {
        (year, month + 1, MIN_DAY)
    }
}

impl CalendarDate {
    /// Day of the week this date falls on.
    pub fn weekday(&self) -> Weekday {
        match Weekday::from_number(weekday_number(self.year(), self.month(), self.day())) {
            Ok(weekday) => weekday,
            // weekday_number is always in 1..=7
            Err(_) => unreachable!(),
        }
    }

    /// The last day of this date's month (the 28th, 29th, 30th, or 31st,
    /// depending on the month and leap-year status).
    pub fn last_day_of_month(&self) -> Self {
        self.with_day(days_in_month(self.year(), self.month()))
    }

    /// The last weekday (Monday-Friday) of this date's month.
    ///
    /// Holidays are never consulted: a weekday that happens to be a public
    /// holiday is still returned.
    pub fn last_weekday_of_month(&self) -> Self {
        let last = self.last_day_of_month();
        let day = match last.weekday() {
            Weekday::Sunday => last.day() - 2,
            Weekday::Saturday => last.day() - 1,
            _ => last.day(),
        };
        last.with_day(day)
    }

    /// The last occurrence of `weekday` within this date's month.
    ///
    /// Computed in closed form from the day of the week of the 1st of the
    /// following month rather than by scanning backward day by day.
    pub fn last_occurrence_of(&self, weekday: Weekday) -> Self {
        let (next_year, next_month, first) = first_of_next_month(self.year(), self.month());
        let w = weekday_number(next_year, next_month, first);

        // (13 - n) % 7 turns the Sunday=1 numbering into a backward
        // distance from the month boundary; adding the boundary's own
        // weekday and stepping off the 1st gives an offset in 1..=7, so
        // the result always lands inside this month, on `weekday`.
        let k = (13 - weekday.number()) % DAYS_IN_WEEK;
        let offset = ((k + w) % DAYS_IN_WEEK) + 1;

        self.with_day(days_in_month(self.year(), self.month()) + 1 - offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_weekday_known_dates() {
        assert_eq!(date("2000-01-01").weekday(), Weekday::Saturday);
        assert_eq!(date("2012-01-01").weekday(), Weekday::Sunday);
        assert_eq!(date("1900-01-01").weekday(), Weekday::Monday);
        assert_eq!(date("2024-02-29").weekday(), Weekday::Thursday);
        assert_eq!(date("2011-12-31").weekday(), Weekday::Saturday);
    }

    #[test]
    fn test_month_end_table() {
        // (input, last day, last weekday, last Wednesday) for a full year
        // of months, including leap February and a December rollover.
        let cases = [
            ("12/1/2011", "2011-12-31", "2011-12-30", "2011-12-28"),
            ("1/1/2012", "2012-01-31", "2012-01-31", "2012-01-25"),
            ("2/1/2012", "2012-02-29", "2012-02-29", "2012-02-29"),
            ("3/1/2012", "2012-03-31", "2012-03-30", "2012-03-28"),
            ("4/1/2012", "2012-04-30", "2012-04-30", "2012-04-25"),
            ("5/1/2012", "2012-05-31", "2012-05-31", "2012-05-30"),
            ("6/1/2012", "2012-06-30", "2012-06-29", "2012-06-27"),
            ("7/1/2012", "2012-07-31", "2012-07-31", "2012-07-25"),
            ("8/1/2012", "2012-08-31", "2012-08-31", "2012-08-29"),
            ("9/1/2012", "2012-09-30", "2012-09-28", "2012-09-26"),
            ("10/1/2012", "2012-10-31", "2012-10-31", "2012-10-31"),
            ("11/1/2012", "2012-11-30", "2012-11-30", "2012-11-28"),
            ("12/1/2012", "2012-12-31", "2012-12-31", "2012-12-26"),
        ];

        for (input, last_day, last_weekday, last_wednesday) in cases {
            let d = date(input);
            assert_eq!(
                d.last_day_of_month().to_string(),
                last_day,
                "last day of month for {input}"
            );
            assert_eq!(
                d.last_weekday_of_month().to_string(),
                last_weekday,
                "last weekday of month for {input}"
            );
            assert_eq!(
                d.last_occurrence_of(Weekday::Wednesday).to_string(),
                last_wednesday,
                "last Wednesday of month for {input}"
            );
        }
    }

    #[test]
    fn test_last_day_of_month_lengths() {
        let expected = [0u8, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12u8 {
            let d = CalendarDate::new(2023, month, 1).unwrap();
            assert_eq!(d.last_day_of_month().day(), expected[month as usize]);
        }
        // Leap February
        let d = CalendarDate::new(2024, 2, 15).unwrap();
        assert_eq!(d.last_day_of_month().to_ymd(), (2024, 2, 29));
    }

    #[test]
    fn test_last_weekday_is_never_weekend() {
        for year in [1900u16, 2000, 2011, 2012, 2023, 2024] {
            for month in 1..=12u8 {
                let d = CalendarDate::new(year, month, 1).unwrap();
                let last_weekday = d.last_weekday_of_month();
                assert!(
                    !last_weekday.weekday().is_weekend(),
                    "{last_weekday} is a {}",
                    last_weekday.weekday()
                );
                // Never adjusted by more than the weekend's two days
                assert!(last_weekday.day() + 2 >= d.last_day_of_month().day());
            }
        }
    }

    #[test]
    fn test_last_occurrence_all_weekdays_all_months() {
        // Leap and non-leap years, century and non-century
        for year in [1900u16, 2000, 2011, 2012, 2023, 2024] {
            for month in 1..=12u8 {
                let d = CalendarDate::new(year, month, 1).unwrap();
                let month_len = days_in_month(year, month);
                for n in 1..=DAYS_IN_WEEK {
                    let target = Weekday::from_number(n).unwrap();
                    let result = d.last_occurrence_of(target);
                    assert_eq!(
                        (result.year(), result.month()),
                        (year, month),
                        "result left the month for {year}-{month:02} {target}"
                    );
                    assert_eq!(result.weekday(), target);
                    assert!(
                        result.day() + DAYS_IN_WEEK > month_len,
                        "a later {target} exists in {year}-{month:02}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_last_occurrence_matches_last_day() {
        // Asking for the weekday the month ends on returns the last day itself
        for year in [2011u16, 2012, 2024] {
            for month in 1..=12u8 {
                let d = CalendarDate::new(year, month, 1).unwrap();
                let last_day = d.last_day_of_month();
                assert_eq!(d.last_occurrence_of(last_day.weekday()), last_day);
            }
        }
    }

    #[test]
    fn test_result_independent_of_input_day() {
        let first = date("2012-09-01");
        let mid = date("2012-09-17");
        let last = date("2012-09-30");
        for n in 1..=DAYS_IN_WEEK {
            let target = Weekday::from_number(n).unwrap();
            assert_eq!(
                first.last_occurrence_of(target),
                mid.last_occurrence_of(target)
            );
            assert_eq!(
                first.last_occurrence_of(target),
                last.last_occurrence_of(target)
            );
        }
        assert_eq!(first.last_day_of_month(), mid.last_day_of_month());
        assert_eq!(first.last_weekday_of_month(), last.last_weekday_of_month());
    }

    #[test]
    fn test_december_rollover() {
        // The computation pivots on January 1st of the following year
        let d = date("2011-12-15");
        assert_eq!(d.last_occurrence_of(Weekday::Saturday).to_ymd(), (2011, 12, 31));
        assert_eq!(d.last_occurrence_of(Weekday::Sunday).to_ymd(), (2011, 12, 25));
        assert_eq!(d.last_occurrence_of(Weekday::Friday).to_ymd(), (2011, 12, 30));
    }

    #[test]
    fn test_december_of_max_year() {
        // The pivot month is numeric only, so December 9999 still works
        let d = CalendarDate::new(9999, 12, 1).unwrap();
        assert_eq!(d.last_day_of_month().to_ymd(), (9999, 12, 31));
        let result = d.last_occurrence_of(Weekday::Friday);
        assert_eq!((result.year(), result.month()), (9999, 12));
        assert_eq!(result.weekday(), Weekday::Friday);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let d = date("2012-02-01");
        let _ = d.last_day_of_month();
        let _ = d.last_weekday_of_month();
        let _ = d.last_occurrence_of(Weekday::Monday);
        assert_eq!(d.to_ymd(), (2012, 2, 1));
    }
}
