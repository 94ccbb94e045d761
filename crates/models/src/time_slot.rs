use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveTime, ParseError, TimeDelta, TimeZone, Timelike,
};
use chrono_tz::Tz;
use serde::Serialize;

/// Zone every stored and compared booking time is normalized to
pub const CANONICAL_TZ: Tz = chrono_tz::Asia::Bangkok;

/// First bookable hour of the day, in the canonical zone
pub const OPENING_HOUR: u32 = 10;

/// Number of one-hour slots per day (10:00 to 22:00)
pub const SLOTS_PER_DAY: u32 = 12;

/// Parses an RFC3339 timestamp and moves it into the canonical zone
pub fn parse_booking_date_time(raw: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim())?;
    Ok(to_canonical(parsed))
}

/// Re-expresses an instant in the canonical zone without changing it
pub fn to_canonical<T: TimeZone>(date_time: DateTime<T>) -> DateTime<FixedOffset> {
    date_time.with_timezone(&CANONICAL_TZ).fixed_offset()
}

/// Parses a calendar date in `YYYY-MM-DD` form
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
}

/// A one-hour window, starting on the hour in the canonical zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeSlot {
    start: DateTime<FixedOffset>,
}

impl TimeSlot {
    pub const LENGTH: TimeDelta = TimeDelta::hours(1);

    /// The slot a booking at `date_time` occupies
    pub fn containing<T: TimeZone>(date_time: DateTime<T>) -> Self {
        let local = to_canonical(date_time);
        let into_hour = TimeDelta::seconds(i64::from(local.minute() * 60 + local.second()))
            + TimeDelta::nanoseconds(i64::from(local.nanosecond()));

        Self {
            start: local - into_hour,
        }
    }

    /// All bookable slots of `date`, in chronological order
    pub fn for_date(date: NaiveDate) -> Vec<Self> {
        (OPENING_HOUR..OPENING_HOUR + SLOTS_PER_DAY)
            .filter_map(|hour| {
                let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
                let start = CANONICAL_TZ
                    .from_local_datetime(&date.and_time(time))
                    .earliest()?;
                Some(Self {
                    start: start.fixed_offset(),
                })
            })
            .collect()
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.start + Self::LENGTH
    }

    /// Whether `date_time` falls in `[start, start + 1h)`
    pub fn contains<T: TimeZone>(&self, date_time: &DateTime<T>) -> bool {
        let instant = date_time.fixed_offset();
        self.start <= instant && instant < self.end()
    }

    /// Two bookings overlap when they fall in the same slot
    pub fn overlaps<A: TimeZone, B: TimeZone>(a: DateTime<A>, b: DateTime<B>) -> bool {
        Self::containing(a) == Self::containing(b)
    }

    /// Whether the slot lies within opening hours
    pub fn is_bookable(&self) -> bool {
        (OPENING_HOUR..OPENING_HOUR + SLOTS_PER_DAY).contains(&self.start.hour())
    }

    /// `HH:MM` label of the slot start
    pub fn label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_booking_date_time_moves_to_bangkok() {
        let parsed = parse_booking_date_time("2025-06-01T18:00:00Z").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 7 * 3600);
        assert_eq!(parsed.to_rfc3339(), "2025-06-02T01:00:00+07:00");

        // Same instant regardless of the zone it arrived in
        let other = parse_booking_date_time("2025-06-02T03:00:00+09:00").unwrap();
        assert_eq!(parsed, other);
    }

    #[test]
    fn test_parse_booking_date_time_rejects_garbage() {
        assert!(parse_booking_date_time("tomorrow at six").is_err());
        assert!(parse_booking_date_time("2025-06-01 18:00").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(parse_date("01/06/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_slots_for_date_cover_opening_hours() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let slots = TimeSlot::for_date(date);

        assert_eq!(slots.len(), SLOTS_PER_DAY as usize);
        assert_eq!(slots.first().unwrap().label(), "10:00");
        assert_eq!(slots.last().unwrap().label(), "21:00");
        assert_eq!(slots.last().unwrap().end().format("%H:%M").to_string(), "22:00");
        assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_containing_truncates_to_the_hour() {
        let booking = parse_booking_date_time("2025-06-01T18:45:30+07:00").unwrap();
        let slot = TimeSlot::containing(booking);

        assert_eq!(slot.label(), "18:00");
        assert!(slot.contains(&booking));
        assert!(!slot.contains(&slot.end()));
        assert!(slot.contains(&slot.start()));
    }

    #[test]
    fn test_containing_uses_canonical_zone() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 1, 11, 30, 0).unwrap();
        assert_eq!(TimeSlot::containing(utc).label(), "18:00");
    }

    #[test]
    fn test_is_bookable_follows_opening_hours() {
        let slot_at = |raw: &str| TimeSlot::containing(parse_booking_date_time(raw).unwrap());

        assert!(slot_at("2025-06-01T10:00:00+07:00").is_bookable());
        assert!(slot_at("2025-06-01T21:59:59+07:00").is_bookable());
        assert!(!slot_at("2025-06-01T09:59:59+07:00").is_bookable());
        assert!(!slot_at("2025-06-01T22:00:00+07:00").is_bookable());
        // 01:00 in Bangkok
        assert!(!slot_at("2025-06-01T18:00:00Z").is_bookable());

        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(TimeSlot::for_date(date).iter().all(TimeSlot::is_bookable));
    }

    #[test]
    fn test_overlaps() {
        let a = parse_booking_date_time("2025-06-01T18:00:00+07:00").unwrap();
        let b = parse_booking_date_time("2025-06-01T18:59:59+07:00").unwrap();
        let c = parse_booking_date_time("2025-06-01T19:00:00+07:00").unwrap();

        assert!(TimeSlot::overlaps(a, b));
        assert!(!TimeSlot::overlaps(b, c));
    }
}
