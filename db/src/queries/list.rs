//! Listings and counts.
//!
//! A listing filters a collection, sorts the matches stably and slices one
//! page out of the result. Counting applies the same steps and returns the
//! length of the page.

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::Serialize;

use super::filter::Filter;
use super::QueryError;
use crate::store::RecordStore;
use crate::value::Record;

/// Page size used when only `page` is given.
pub const DEFAULT_PER_PAGE: usize = 25;

/// Sort direction of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` in any case is descending; everything else is ascending.
    pub fn parse(order: &str) -> Self {
        if order.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Paging and sorting of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: i64, per_page: i64) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    /// `(offset, limit)` of the page, or `None` when no paging was requested.
    ///
    /// Paging needs a page: without one the whole filtered set is returned,
    /// even when a page size is given. A missing page size defaults to
    /// [`DEFAULT_PER_PAGE`]. Negative values count as 0.
    pub fn window(&self) -> Option<(usize, usize)> {
        let page = non_negative(self.page?);
        let per_page = self
            .per_page
            .map(non_negative)
            .unwrap_or(DEFAULT_PER_PAGE);
        Some((page.saturating_mul(per_page), per_page))
    }
}

fn non_negative(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// Filter, sort and paginate a collection.
pub fn list<'a>(
    store: &'a RecordStore,
    collection: &str,
    params: &ListParams,
    filter: &Filter,
) -> Result<Vec<&'a Record>, QueryError> {
    let records = store
        .collection(collection)
        .ok_or_else(|| QueryError::unknown_collection(collection))?;

    let mut matches: Vec<&Record> = records.iter().filter(|r| filter.matches(r)).collect();
    if let Some(field) = &params.sort_field {
        sort_records(&mut matches, field, params.sort_order);
    }
    Ok(paginate(matches, params))
}

/// Number of records [`list`] would return for the same arguments.
pub fn count(
    store: &RecordStore,
    collection: &str,
    params: &ListParams,
    filter: &Filter,
) -> Result<usize, QueryError> {
    let records = store
        .collection(collection)
        .ok_or_else(|| QueryError::unknown_collection(collection))?;
    let total = records.iter().filter(|r| filter.matches(r)).count();
    Ok(match params.window() {
        Some((offset, limit)) => total.saturating_sub(offset).min(limit),
        None => total,
    })
}

/// Stable sort by one field. Ascending order puts records without the field
/// first; descending order is its exact reverse except for ties.
pub fn sort_records(records: &mut [&Record], field: &str, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = match (a.get(field), b.get(field)) {
            (Some(x), Some(y)) => x.sort_cmp(y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Slice the page selected by `params` out of `items`.
pub fn paginate<T>(items: Vec<T>, params: &ListParams) -> Vec<T> {
    match params.window() {
        Some((offset, limit)) => items.into_iter().skip(offset).take(limit).collect(),
        None => items,
    }
}
