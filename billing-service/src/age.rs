use chrono::{Datelike, NaiveDate};

/// Age in whole years at `reference`: the year difference, minus one when
/// the anniversary has not yet occurred that year.
pub fn age_on(birth_date: NaiveDate, reference: NaiveDate) -> i32 {
    let years = reference.year() - birth_date.year();
    if (reference.month(), reference.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}
