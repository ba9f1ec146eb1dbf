//! Request pagination, sorting, and response metadata.
//!
//! List endpoints translate their `page`, `page_size`, and `sort` query
//! parameters into a [`Filters`] value. Validation happens through the
//! request's [`Validator`](crate::validator::Validator); once validated, the
//! filters yield safe `LIMIT`/`OFFSET`/`ORDER BY` inputs for the query.
//!
//! The sort safe list is the injection fence: user-supplied sort values are
//! only ever interpolated into SQL after a membership check against the
//! endpoint's declared column names. [`Filters::sort_column`] panics on a
//! value outside the list because reaching it with an unvalidated sort is a
//! bug in the calling handler, not bad user input.

use serde::Serialize;
use utoipa::ToSchema;

use crate::validator::Validator;

#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safe_list: Vec<&'static str>,
}

impl Filters {
    /// The bare column name for `ORDER BY`, with any leading `-` stripped.
    ///
    /// # Panics
    ///
    /// Panics when the stripped value is not in the safe list. Callers must
    /// have already run [`validate_filters`].
    pub fn sort_column(&self) -> &str {
        let column = self.sort.strip_prefix('-').unwrap_or(&self.sort);
        for safe in &self.sort_safe_list {
            if column == *safe {
                return column;
            }
        }
        panic!("unsafe sort parameter: {}", self.sort);
    }

    /// `DESC` when the sort value carries a leading `-`, `ASC` otherwise.
    pub fn sort_direction(&self) -> &'static str {
        if self.sort.starts_with('-') { "DESC" } else { "ASC" }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Checks page, page size, and sort independently; every violated constraint
/// records exactly one error, and none of the checks short-circuit.
pub fn validate_filters(v: &mut Validator, filters: &Filters) {
    v.check(filters.page > 0, "page", "must be greater than zero");
    v.check(
        filters.page <= 10_000_000,
        "page",
        "must be a maximum of 10 million",
    );
    v.check(
        filters.page_size > 0,
        "page_size",
        "must be greater than zero",
    );
    v.check(
        filters.page_size <= 100,
        "page_size",
        "must be a maximum of 100",
    );

    let column = filters.sort.strip_prefix('-').unwrap_or(&filters.sort);
    v.check(
        filters.sort_safe_list.contains(&column),
        "sort",
        "invalid sort value",
    );
}

/// Pagination metadata included alongside list responses.
///
/// Derived, never stored. Zero fields are omitted from the JSON body so an
/// empty result set serializes as `{}`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Metadata {
    #[serde(skip_serializing_if = "is_zero")]
    pub current_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub first_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub last_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Computes response metadata for a page of results. Pure; returns the
/// all-zero value when there are no records at all.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records == 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(page: i64, page_size: i64, sort: &str, safe: Vec<&'static str>) -> Filters {
        Filters {
            page,
            page_size,
            sort: sort.to_string(),
            sort_safe_list: safe,
        }
    }

    #[test]
    fn test_validate_filters_happy_path() {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters(2, 3, "id", vec!["id"]));
        assert!(v.valid());
    }

    #[test]
    fn test_validate_filters_boundaries_inclusive() {
        for (page, page_size) in [(1, 1), (10_000_000, 100)] {
            let mut v = Validator::new();
            validate_filters(&mut v, &filters(page, page_size, "id", vec!["id"]));
            assert!(v.valid(), "page={page} page_size={page_size}");
        }
    }

    #[test]
    fn test_validate_filters_descending_sort_allowed() {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters(1, 20, "-year", vec!["id", "year"]));
        assert!(v.valid());
    }

    #[test]
    fn test_validate_filters_sad_paths() {
        struct Case {
            name: &'static str,
            error_count: usize,
            filters: Filters,
        }

        let cases = [
            Case {
                name: "page too small",
                error_count: 1,
                filters: filters(-2, 3, "id", vec!["id"]),
            },
            Case {
                name: "page size too small",
                error_count: 1,
                filters: filters(2, -3, "id", vec!["id"]),
            },
            Case {
                name: "bad sort param",
                error_count: 1,
                filters: filters(2, 3, "id", vec!["accepted"]),
            },
            Case {
                name: "page too big",
                error_count: 1,
                filters: filters(100_000_000, 3, "id", vec!["id"]),
            },
            Case {
                name: "page size too big",
                error_count: 1,
                filters: filters(1, 3000, "id", vec!["id"]),
            },
            Case {
                name: "two params wrong",
                error_count: 2,
                filters: filters(-1, 3000, "id", vec!["id"]),
            },
            Case {
                name: "all params wrong",
                error_count: 3,
                filters: filters(-1, 3000, "id", vec!["accepted"]),
            },
        ];

        for case in cases {
            let mut v = Validator::new();
            validate_filters(&mut v, &case.filters);
            assert!(!v.valid(), "{}: expected errors", case.name);
            assert_eq!(
                v.errors.len(),
                case.error_count,
                "{}: wrong error count",
                case.name
            );
        }
    }

    #[test]
    fn test_sort_column_safe_value() {
        let f = filters(1, 20, "safe", vec!["safe"]);
        assert_eq!(f.sort_column(), "safe");
    }

    #[test]
    fn test_sort_column_strips_descending_prefix() {
        let f = filters(1, 20, "-runtime", vec!["runtime"]);
        assert_eq!(f.sort_column(), "runtime");
    }

    #[test]
    #[should_panic(expected = "unsafe sort parameter")]
    fn test_sort_column_unsafe_value_panics() {
        let f = filters(1, 20, "unsafe", vec!["safe"]);
        f.sort_column();
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(
            filters(1, 20, "runtime", vec!["runtime"]).sort_direction(),
            "ASC"
        );
        assert_eq!(
            filters(1, 20, "-runtime", vec!["runtime"]).sort_direction(),
            "DESC"
        );
    }

    #[test]
    fn test_limit() {
        assert_eq!(filters(2, 3, "id", vec!["id"]).limit(), 3);
    }

    #[test]
    fn test_offset() {
        assert_eq!(filters(4, 5, "id", vec!["id"]).offset(), 15);
        assert_eq!(filters(1, 20, "id", vec!["id"]).offset(), 0);
    }

    #[test]
    fn test_calculate_metadata_empty() {
        assert_eq!(calculate_metadata(0, 4, 5), Metadata::default());
    }

    #[test]
    fn test_calculate_metadata_filled() {
        let got = calculate_metadata(10, 2, 5);
        let want = Metadata {
            current_page: 2,
            page_size: 5,
            first_page: 1,
            last_page: 2,
            total_records: 10,
        };
        assert_eq!(got, want);
    }

    #[test]
    fn test_calculate_metadata_rounds_last_page_up() {
        assert_eq!(calculate_metadata(11, 1, 5).last_page, 3);
        assert_eq!(calculate_metadata(10, 1, 5).last_page, 2);
        assert_eq!(calculate_metadata(1, 1, 5).last_page, 1);
    }

    #[test]
    fn test_empty_metadata_serializes_as_empty_object() {
        let body = serde_json::to_string(&Metadata::default()).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn test_metadata_serializes_snake_case_fields() {
        let body = serde_json::to_string(&calculate_metadata(10, 2, 5)).unwrap();
        assert!(body.contains(r#""current_page":2"#));
        assert!(body.contains(r#""page_size":5"#));
        assert!(body.contains(r#""first_page":1"#));
        assert!(body.contains(r#""last_page":2"#));
        assert!(body.contains(r#""total_records":10"#));
    }
}
