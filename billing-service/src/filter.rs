//! Search-and-filter predicate shared by every list page
//!
//! A record is kept when it passes both tests:
//! - the filter is `"all"` or equals the record's discriminant (status or type)
//! - the search text is empty or, lowercased, is a substring of one of the
//!   record's designated fields, lowercased
//!
//! Results keep input order, so filtering twice with the same query gives the
//! same list as filtering once.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Invoice, Patient, Procedure, ProcedureType, Surgery};

/// Filter value that disables the discriminant test
pub const ALL_FILTER: &str = "all";

/// Entity that can be matched by free-text search and a discriminant filter
pub trait Searchable {
    /// Fields the search text is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// Whether the record's discriminant equals a non-`"all"` filter value
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Page view state: current search text and filter selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring; empty matches everything
    #[serde(default)]
    pub search: String,
    /// `all` or a status/type value
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    ALL_FILTER.to_string()
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: default_filter(),
        }
    }
}

impl ListQuery {
    pub fn new(search: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            filter: filter.into(),
        }
    }

    pub fn search(search: impl Into<String>) -> Self {
        Self::new(search, ALL_FILTER)
    }

    pub fn filter(filter: impl Into<String>) -> Self {
        Self::new(String::new(), filter)
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        let passes_filter = self.filter == ALL_FILTER || record.matches_filter(&self.filter);
        passes_filter && matches_search(&self.search.to_lowercase(), record)
    }

    /// Borrowing filter over a list
    pub fn apply<'a, T: Searchable>(&self, records: &'a [T]) -> Vec<&'a T> {
        let needle = self.search.to_lowercase();
        records
            .iter()
            .filter(|record| {
                (self.filter == ALL_FILTER || record.matches_filter(&self.filter))
                    && matches_search(&needle, *record)
            })
            .collect()
    }

    /// Owning filter over a list
    pub fn apply_cloned<T: Searchable + Clone>(&self, records: &[T]) -> Vec<T> {
        self.apply(records).into_iter().cloned().collect()
    }
}

fn matches_search<T: Searchable>(needle: &str, record: &T) -> bool {
    needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

impl ProcedureType {
    /// Key used by the procedure type selector (`surgery`, `consultation`, `exam`)
    pub fn filter_key(self) -> &'static str {
        match self {
            ProcedureType::Surgery => "surgery",
            ProcedureType::Consultation => "consultation",
            ProcedureType::Exam => "exam",
        }
    }
}

impl Searchable for Procedure {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str(), self.category.as_str()]
    }

    // accepts both the selector keys and the type labels
    fn matches_filter(&self, filter: &str) -> bool {
        self.procedure_type.filter_key() == filter || self.procedure_type.label() == filter
    }
}

impl Searchable for Surgery {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient_name.as_str(), self.procedure.as_str(), self.surgeon.as_str()]
    }

    fn matches_filter(&self, filter: &str) -> bool {
        self.status.label() == filter
    }
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient_name.as_str(), self.procedure.as_str(), self.id.as_str()]
    }

    fn matches_filter(&self, filter: &str) -> bool {
        self.status.label() == filter
    }
}

impl Searchable for Patient {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.id.as_str()]
    }

    fn matches_filter(&self, filter: &str) -> bool {
        self.status.label() == filter
    }
}
