pub fn time_to_string(time: chrono::Duration) -> String {
    match time.num_seconds() {
        i64::MIN..=59 => {
            let second_suffix = if time.num_seconds() == 1 { "" } else { "s" };
            format!("{} second{}", time.num_seconds().max(0), second_suffix)
        }
        60..=3599 => {
            let minute_suffix = if time.num_minutes() == 1 { "" } else { "s" };
            format!("{} minute{}", time.num_minutes(), minute_suffix)
        }
        3600..=86399 => {
            let hour_suffix = if time.num_hours() == 1 { "" } else { "s" };
            format!("{} hour{}", time.num_hours(), hour_suffix)
        }
        _ => {
            let day_suffix = if time.num_days() == 1 { "" } else { "s" };
            format!("{} day{}", time.num_days(), day_suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::time_to_string;

    #[test]
    fn picks_the_largest_whole_unit() {
        assert_eq!(time_to_string(Duration::seconds(1)), "1 second");
        assert_eq!(time_to_string(Duration::seconds(42)), "42 seconds");
        assert_eq!(time_to_string(Duration::seconds(60)), "1 minute");
        assert_eq!(time_to_string(Duration::seconds(7200)), "2 hours");
        assert_eq!(time_to_string(Duration::days(3)), "3 days");
    }

    #[test]
    fn clock_skew_never_goes_negative() {
        assert_eq!(time_to_string(Duration::seconds(-5)), "0 seconds");
    }
}
