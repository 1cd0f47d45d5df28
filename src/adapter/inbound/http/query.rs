//! Query-string parsing for report and snapshot endpoints.
//!
//! Parameters arrive as raw strings so malformed values surface through the
//! JSON error envelope instead of axum's plain-text rejection.

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::domain::{AdGroupId, DateRange};

use super::error::ApiError;

/// `?from&to&adGroupId` for report endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(alias = "ad_group_id")]
    pub ad_group_id: Option<String>,
}

/// `?date` or `?from&to` for snapshot runs.
#[derive(Debug, Default, Deserialize)]
pub struct RunParams {
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

fn date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| DateRange::parse_date(field, s))
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

impl RangeParams {
    /// Resolve into a range, defaulting to the `default_days` ending `today`.
    ///
    /// A lone `from` runs through `today`; a lone `to` reaches back
    /// `default_days`.
    ///
    /// # Errors
    /// Returns a bad request for malformed dates, an inverted range or an
    /// empty ad group id.
    pub fn resolve(
        &self,
        today: NaiveDate,
        default_days: u32,
    ) -> Result<(DateRange, Option<AdGroupId>), ApiError> {
        let from = date("from", self.from.as_deref())?;
        let to = date("to", self.to.as_deref())?;

        let range = DateRange::with_defaults(from, to, today, default_days)
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        let ad_group = self
            .ad_group_id
            .as_deref()
            .map(AdGroupId::parse)
            .transpose()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        Ok((range, ad_group))
    }
}

impl RunParams {
    /// Resolve the snapshot range; defaults to yesterday.
    ///
    /// # Errors
    /// Returns a bad request when `date` is combined with `from`/`to`, when
    /// only one bound is given, or for malformed dates.
    pub fn resolve(&self, today: NaiveDate) -> Result<DateRange, ApiError> {
        let day = date("date", self.date.as_deref())?;
        let from = date("from", self.from.as_deref())?;
        let to = date("to", self.to.as_deref())?;

        match (day, from, to) {
            (Some(day), None, None) => Ok(DateRange::single(day)),
            (Some(_), _, _) => Err(ApiError::bad_request(
                "use either date or from/to, not both",
            )),
            (None, Some(from), Some(to)) => {
                DateRange::new(from, to).map_err(|e| ApiError::bad_request(e.to_string()))
            }
            (None, None, None) => Ok(DateRange::single(today - Duration::days(1))),
            (None, _, _) => Err(ApiError::bad_request("from and to must be given together")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn params(from: Option<&str>, to: Option<&str>) -> RangeParams {
        RangeParams {
            from: from.map(String::from),
            to: to.map(String::from),
            ad_group_id: None,
        }
    }

    #[test]
    fn missing_bounds_default_to_trailing_window() {
        let (range, group) = params(None, None).resolve(jan(31), 30).unwrap();
        assert_eq!(range.from(), jan(2));
        assert_eq!(range.to(), jan(31));
        assert!(group.is_none());
    }

    #[test]
    fn inverted_range_is_bad_request() {
        let err = params(Some("2024-01-10"), Some("2024-01-01"))
            .resolve(jan(31), 30)
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_date_is_bad_request() {
        let err = params(Some("01/10/2024"), None)
            .resolve(jan(31), 30)
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blank_ad_group_is_bad_request() {
        let mut p = params(None, None);
        p.ad_group_id = Some("  ".into());
        assert!(p.resolve(jan(31), 30).is_err());
    }

    #[test]
    fn run_defaults_to_yesterday() {
        let range = RunParams::default().resolve(jan(11)).unwrap();
        assert_eq!(range, DateRange::single(jan(10)));
    }

    #[test]
    fn run_rejects_date_with_bounds() {
        let p = RunParams {
            date: Some("2024-01-10".into()),
            from: Some("2024-01-01".into()),
            to: None,
        };
        assert!(p.resolve(jan(11)).is_err());
    }
}
