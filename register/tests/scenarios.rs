use chrono::{Datelike, NaiveDate};
use register::dates::age_at_death;
use register::systems::{
    aggregate, build_month_grid, filter_and_sort, upcoming_anniversaries, FilterCriteria, SortKey,
};
use register::DeathRecord;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn record(id: &str, death: &str, birth: Option<&str>) -> DeathRecord {
    let mut r = DeathRecord::new(id, format!("Member {id}"), death);
    r.date_of_birth = birth.map(str::to_string);
    r
}

/// A spread of deaths across several years and every month.
fn congregation() -> Vec<DeathRecord> {
    let mut records = Vec::new();
    for i in 0..48u32 {
        let year = 2015 + (i % 10) as i32;
        let month = i % 12 + 1;
        let day = (i * 7) % 28 + 1;
        let birth_year = 1920 + (i % 30) as i32 * 2;
        records.push(record(
            &format!("m{i}"),
            &format!("{year}-{month:02}-{day:02}"),
            Some(&format!("{birth_year}-{:02}-15", (i * 5) % 12 + 1)),
        ));
    }
    records
}

#[test]
fn age_is_decremented_before_the_birthday() {
    let r = record("a", "2024-03-15", Some("1950-03-20"));
    assert_eq!(r.age_at_death(), Some(73));
}

#[test]
fn age_never_exceeds_plain_year_difference() {
    for r in congregation() {
        let death = r.death_date().unwrap();
        let birth = r.birth_date().unwrap();
        let age = age_at_death(Some(birth), death).unwrap() as i32;
        let diff = death.year() - birth.year();
        if (death.month(), death.day()) < (birth.month(), birth.day()) {
            assert_eq!(age, diff - 1);
        } else {
            assert_eq!(age, diff);
        }
    }
}

#[test]
fn empty_register_aggregates_to_zero() {
    let stats = aggregate(&[], d(2024, 1, 1));
    assert_eq!(stats.total, 0);
    assert_eq!(stats.yoy_delta, 0);
    assert!(stats.bins.iter().all(|b| b.count == 0 && b.percentage == 0));
}

#[test]
fn bin_percentages_close_to_one_hundred() {
    let stats = aggregate(&congregation(), d(2024, 12, 31));
    let sum: u32 = stats.bins.iter().map(|b| b.percentage).sum();
    assert!((97..=103).contains(&sum), "percentages summed to {sum}");

    let shares: u32 = stats.bins.iter().map(|b| b.share_of_total).sum();
    assert!((97..=103).contains(&shares), "shares summed to {shares}");
}

#[test]
fn unknown_ages_shrink_share_of_total_only() {
    let mut records = congregation();
    for i in 0..16 {
        records.push(record(&format!("u{i}"), "2020-01-01", None));
    }
    let stats = aggregate(&records, d(2024, 12, 31));
    assert_eq!(stats.total, 64);
    assert_eq!(stats.known_age, 48);

    // Percentages are relative to known ages and still close to 100.
    let pct: u32 = stats.bins.iter().map(|b| b.percentage).sum();
    assert!((97..=103).contains(&pct), "percentages summed to {pct}");

    // Shares of the whole register fall short by the unknown fraction (25%).
    let shares: u32 = stats.bins.iter().map(|b| b.share_of_total).sum();
    assert!((72..=78).contains(&shares), "shares summed to {shares}");
}

#[test]
fn year_end_anniversary_counts_next_year() {
    let records = vec![record("a", "2019-01-02", None)];
    let upcoming = upcoming_anniversaries(&records, d(2024, 12, 28), 30, 5);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].occurrence, d(2025, 1, 2));
    assert_eq!(upcoming[0].years_ago, 6);
}

#[test]
fn leap_day_death_shows_on_feb_28() {
    let records = vec![record("leap", "1996-02-29", None)];
    let grid = build_month_grid(&records, d(2025, 2, 1), d(2025, 2, 1));
    let day = grid.iter().find(|c| c.day == 28).unwrap();
    assert_eq!(day.memorials.len(), 1);
    assert_eq!(day.memorials[0].record.id.as_str(), "leap");
}

#[test]
fn every_month_grid_is_complete() {
    let records = congregation();
    for year in [2023, 2024] {
        for month in 1..=12 {
            let grid = build_month_grid(&records, d(year, month, 1), d(2024, 6, 1));
            assert_eq!(grid.len(), d(year, month, 1).num_days_in_month() as usize);
            for (i, cell) in grid.iter().enumerate() {
                assert_eq!(cell.day as usize, i + 1);
                assert_eq!(cell.date.month(), month);
            }
        }
    }
}

#[test]
fn upcoming_feed_stays_inside_window_and_sorted() {
    let records = congregation();
    let mut today = d(2024, 1, 1);
    while today.year() == 2024 {
        let feed = upcoming_anniversaries(&records, today, 30, 48);
        for entry in &feed {
            assert!(entry.occurrence >= today);
            assert!(entry.days_until <= 30);
        }
        assert!(feed.windows(2).all(|w| w[0].occurrence <= w[1].occurrence));
        today = today.succ_opt().unwrap();
    }
}

#[test]
fn computations_are_repeatable_and_leave_input_alone() {
    let records = congregation();
    let snapshot = records.clone();
    let today = d(2024, 5, 5);

    assert_eq!(aggregate(&records, today), aggregate(&records, today));
    assert_eq!(
        build_month_grid(&records, today, today),
        build_month_grid(&records, today, today)
    );
    assert_eq!(
        upcoming_anniversaries(&records, today, 30, 5),
        upcoming_anniversaries(&records, today, 30, 5)
    );
    let criteria = FilterCriteria {
        sort_key: SortKey::Name,
        ..Default::default()
    };
    assert_eq!(
        filter_and_sort(&records, &criteria),
        filter_and_sort(&records, &criteria)
    );
    assert_eq!(records, snapshot);
}
