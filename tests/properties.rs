use calendar_delta::{CalendarDelta, Date, DateTime, DeltaConfig, Weekday};
use proptest::prelude::*;

const SPAN: i64 = 1_000_000_000;

prop_compose! {
    fn relative_config()(
        years in -5_000_i64..5_000,
        months in -SPAN..SPAN,
        days in -SPAN..SPAN,
        hours in -SPAN..SPAN,
        minutes in -SPAN..SPAN,
        seconds in -SPAN..SPAN,
        microseconds in -SPAN..SPAN,
    ) -> DeltaConfig {
        DeltaConfig {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            microseconds,
            ..DeltaConfig::default()
        }
    }
}

prop_compose! {
    fn any_config()(
        relative in relative_config(),
        year in proptest::option::of(-10_i64..20_000),
        month in proptest::option::of(-2_i64..20),
        day in proptest::option::of(-2_i64..40),
        weekday in proptest::option::of(-2_i64..10),
        hour in proptest::option::of(-2_i64..30),
        minute in proptest::option::of(-2_i64..70),
        millisecond in proptest::option::of(-2_i64..2_000),
        microsecond in proptest::option::of(-2_i64..2_000_000),
    ) -> DeltaConfig {
        DeltaConfig {
            year,
            month,
            day,
            weekday,
            hour,
            minute,
            millisecond,
            microsecond,
            ..relative
        }
    }
}

prop_compose! {
    fn any_date()(year in 1_i64..=9_999, month in 1_i64..=12, day in 1_i64..=28) -> Date {
        Date::new(year, month, day).unwrap()
    }
}

proptest! {
    #[test]
    fn normalized_fields_stay_in_range(config in any_config()) {
        let delta = CalendarDelta::new(config);
        prop_assert!(delta.months().abs() <= 11);
        prop_assert!(delta.hours().abs() <= 23);
        prop_assert!(delta.minutes().abs() <= 59);
        prop_assert!(delta.seconds().abs() <= 59);
        prop_assert!(delta.microseconds().abs() <= 999_999);

        prop_assert!(delta.year().is_none_or(|y| (1..=9_999).contains(&y)));
        prop_assert!(delta.month().is_none_or(|m| (1..=12).contains(&m)));
        prop_assert!(delta.day().is_none_or(|d| (1..=31).contains(&d)));
        prop_assert!(delta.hour().is_none_or(|h| h <= 23));
        prop_assert!(delta.minute().is_none_or(|m| m <= 59));
        prop_assert!(delta.microsecond().is_none_or(|us| us <= 999_999));
    }

    #[test]
    fn normalization_is_idempotent(config in any_config()) {
        let delta = CalendarDelta::new(config);
        let again = CalendarDelta::new(DeltaConfig::from(delta));
        prop_assert_eq!(again, delta);
        prop_assert_eq!(again.hash_value(), delta.hash_value());
    }

    #[test]
    fn same_sign_inputs_keep_their_sign(seconds in 0_i64..SPAN, negative in any::<bool>()) {
        let seconds = if negative { -seconds } else { seconds };
        let delta = CalendarDelta::new(DeltaConfig { seconds, ..DeltaConfig::default() });
        for part in [delta.days(), delta.hours(), delta.minutes(), delta.seconds()] {
            prop_assert!(part == 0 || part.signum() == seconds.signum());
        }
    }

    #[test]
    fn equal_deltas_hash_equally(hours in -SPAN..SPAN) {
        let from_hours = CalendarDelta::new(DeltaConfig { hours, ..DeltaConfig::default() });
        let from_minutes = CalendarDelta::new(DeltaConfig {
            minutes: hours * 60,
            ..DeltaConfig::default()
        });
        prop_assert_eq!(from_hours, from_minutes);
        prop_assert_eq!(from_hours.hash_value(), from_minutes.hash_value());
    }

    #[test]
    fn doubling_matches_self_addition(config in any_config()) {
        let delta = CalendarDelta::new(config);
        prop_assert_eq!(delta * 2, delta + delta);
    }

    #[test]
    fn zero_is_additive_identity(config in any_config()) {
        let delta = CalendarDelta::new(config);
        prop_assert_eq!(delta + CalendarDelta::zero(), delta);
        prop_assert_eq!(CalendarDelta::zero() + delta, delta);
        prop_assert_eq!(delta + 0, delta);
        prop_assert_eq!(delta.checked_add(0.0).unwrap().into_delta(), Some(delta));
        prop_assert_eq!(-(-delta), delta);
    }

    #[test]
    fn self_subtraction_clears_relative_part(config in any_config()) {
        let delta = CalendarDelta::new(config);
        let difference = delta - delta;
        prop_assert_eq!(
            [difference.years(), difference.months(), difference.days(), difference.hours(),
             difference.minutes(), difference.seconds(), difference.microseconds()],
            [0; 7]
        );
        prop_assert_eq!(difference.weekday(), delta.weekday());
        prop_assert_eq!(difference.day(), delta.day());
    }

    #[test]
    fn weekday_only_moves_forward(base in any_date(), index in 0_u8..7) {
        prop_assume!(base < Date::new(9_999, 12, 24).unwrap());
        let target = Weekday::from_index(index).unwrap();
        let delta = CalendarDelta::new(DeltaConfig {
            weekday: Some(i64::from(index)),
            ..DeltaConfig::default()
        });

        let moved = delta.apply_to(base).unwrap();
        prop_assert_eq!(moved.weekday(), target);
        prop_assert!(moved.date() >= base);
        let ahead = i64::from(base.weekday().days_until(target));
        let expected = CalendarDelta::new(DeltaConfig { days: ahead, ..DeltaConfig::default() })
            .apply_to(base)
            .unwrap();
        prop_assert_eq!(moved, expected);
    }

    #[test]
    fn exact_offsets_round_trip(base in any_date(), hours in -10_000_i64..10_000) {
        prop_assume!(base > Date::new(2, 1, 1).unwrap() && base < Date::new(9_998, 1, 1).unwrap());
        let delta = CalendarDelta::new(DeltaConfig { hours, ..DeltaConfig::default() });
        let start = DateTime::midnight(base);
        let there = delta.apply_to(start.clone()).unwrap();
        prop_assert_eq!(delta.subtract_from(there).unwrap(), start);
    }

    #[test]
    fn applied_dates_are_clamped_to_month_length(base in any_date(), months in -600_i64..600, day in 1_i64..=31) {
        let delta = CalendarDelta::new(DeltaConfig {
            months,
            day: Some(day),
            ..DeltaConfig::default()
        });
        let moved = delta.apply_to(base).unwrap();
        prop_assert!(moved.day() <= moved.date().days_in_month());
        prop_assert!(i64::from(moved.day()) <= day);
    }
}
