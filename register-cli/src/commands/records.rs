use register::systems::{self, FilterCriteria};
use register::DeathRecord;

use crate::state::{AppState, RecordList, RecordRow};

pub fn list_records(state: &AppState, criteria: &FilterCriteria) -> RecordList {
    let rows: Vec<RecordRow> = systems::filter_and_sort(&state.records, criteria)
        .into_iter()
        .map(|record| build_row(state, record))
        .collect();

    RecordList {
        count: rows.len(),
        available_years: systems::available_years(&state.records),
        rows,
    }
}

fn build_row(state: &AppState, record: &DeathRecord) -> RecordRow {
    RecordRow {
        id: record.id.to_string(),
        member_name: record.member_name.clone(),
        date_of_death: record.date_of_death.clone(),
        age_at_death: record.age_at_death(),
        years_ago: record
            .death_date()
            .map(|death| register::dates::years_ago(death, state.today)),
        funeral_date: record.funeral_date.clone(),
        family_notified: record.family_notified,
    }
}
