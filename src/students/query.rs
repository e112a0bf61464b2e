//! Query Builder
//!
//! Turns the raw `GET /students` query string into a [`StudentQuery`]. Every
//! parameter is optional; an `id` short-circuits all others, the remaining
//! filters are ANDed together and a sort is applied once after filtering.

use super::types::{StudentId, StudentRecord};
use serde::Deserialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Raw query parameters, kept as strings so that parsing rules live here
/// rather than in the extractor.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StudentQueryParams {
    pub id: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub active: Option<String>,
    pub course: Option<String>,
    pub age: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid age filter: '{0}' is not a non-negative integer")]
    InvalidAge(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudentQuery {
    ById(StudentId),
    Find(FindQuery),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentFilter {
    Active(bool),
    Course(String),
    MaxAge(u32),
}

impl StudentFilter {
    pub fn matches(&self, record: &StudentRecord) -> bool {
        match self {
            StudentFilter::Active(active) => record.active == *active,
            StudentFilter::Course(course) => record.course == *course,
            StudentFilter::MaxAge(max_age) => record.age <= *max_age,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Age,
    Course,
}

impl SortField {
    /// Unknown field names yield `None`, which means "no sort".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(SortField::Name),
            "age" => Some(SortField::Age),
            "course" => Some(SortField::Course),
            _ => None,
        }
    }

    fn compare(&self, a: &StudentRecord, b: &StudentRecord) -> Ordering {
        match self {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Age => a.age.cmp(&b.age),
            SortField::Course => a.course.cmp(&b.course),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

/// Filter predicates plus an optional sort, executed by a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filters: Vec<StudentFilter>,
    pub sort: Option<SortSpec>,
}

impl FindQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: StudentFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = Some(SortSpec { field, order });
        self
    }

    pub fn matches(&self, record: &StudentRecord) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// Filters `records` (taken in natural order) and sorts the survivors.
    /// The sort is stable, so equal keys keep their natural order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<StudentRecord>
    where
        I: IntoIterator<Item = &'a StudentRecord>,
    {
        let mut results: Vec<StudentRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        if let Some(sort) = self.sort {
            results.sort_by(|a, b| {
                let ordering = sort.field.compare(a, b);
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        results
    }
}

impl StudentQuery {
    pub fn from_params(params: &StudentQueryParams) -> Result<Self, QueryError> {
        if let Some(id) = non_empty(&params.id) {
            return Ok(StudentQuery::ById(StudentId::from(id)));
        }

        let mut query = FindQuery::new();

        // Presence alone enables the filter; only the literal "true" means active.
        if let Some(active) = &params.active {
            query = query.with_filter(StudentFilter::Active(active == "true"));
        }

        if let Some(course) = non_empty(&params.course) {
            query = query.with_filter(StudentFilter::Course(course.to_string()));
        }

        if let Some(age) = non_empty(&params.age) {
            let max_age = age
                .trim()
                .parse::<u32>()
                .map_err(|_| QueryError::InvalidAge(age.to_string()))?;
            query = query.with_filter(StudentFilter::MaxAge(max_age));
        }

        if let Some(field) = non_empty(&params.sort).and_then(SortField::parse) {
            query = query.sorted_by(field, SortOrder::parse(params.order.as_deref()));
        }

        Ok(StudentQuery::Find(query))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
