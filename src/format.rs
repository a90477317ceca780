use chrono::{DateTime, Local};

/// Renders a moment as `DD/MM/YYYY HH:MM`: zero-padded day, month, hour and
/// minute on a 24-hour local wall clock. Every timestamp shown on screen or
/// recorded in the movement history goes through here.
pub fn format_timestamp(moment: &DateTime<Local>) -> String {
    moment.format("%d/%m/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("fixed test time resolves in the local zone")
    }

    #[test]
    fn pads_day_month_hour_and_minute() {
        assert_eq!(format_timestamp(&at(2026, 3, 7, 9, 5)), "07/03/2026 09:05");
    }

    #[test]
    fn keeps_the_twenty_four_hour_clock() {
        assert_eq!(format_timestamp(&at(2025, 12, 31, 23, 59)), "31/12/2025 23:59");
    }

    #[test]
    fn same_moment_formats_identically() {
        let moment = at(2026, 8, 21, 14, 30);
        assert_eq!(format_timestamp(&moment), format_timestamp(&moment));
    }
}
