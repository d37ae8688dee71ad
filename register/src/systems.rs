//! Analytic passes over a death register
//!
//! Each pass takes the record list plus the reporting context and returns
//! plain data. Nothing is kept between calls.

pub mod anniversary;
pub mod calendar;
pub mod cohort;
pub mod filter;

pub use anniversary::{upcoming_anniversaries, MemorialTone, UpcomingAnniversary};
pub use calendar::{build_month_grid, build_month_view, CalendarDay, Memorial, MonthView};
pub use cohort::{aggregate, aggregate_with_window, AgeBand, AgeBin, MonthlyTrend, Stats, TrendWindow};
pub use filter::{available_years, filter_and_sort, FilterCriteria, SortKey};
