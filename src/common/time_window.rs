// src/common/time_window.rs

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::error::AppError;

/// Janela de tempo semiaberta `[start, end)`, sempre em UTC.
///
/// O mês civil vai de `dia 1 00:00:00` até `dia 1 do mês seguinte 00:00:00`
/// (exclusivo), então o último minuto do mês não se perde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Janela do mês civil que contém `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let first = first_of_month(date);
        let next = first + Months::new(1);
        Self {
            start: first.and_time(NaiveTime::MIN).and_utc(),
            end: next.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    pub fn current_month() -> Self {
        Self::month_of(Utc::now().date_naive())
    }

    /// Os últimos `months` meses civis, terminando no mês de `date` (inclusive).
    pub fn trailing_months(date: NaiveDate, months: u32) -> Self {
        let current = Self::month_of(date);
        let first = first_of_month(date) - Months::new(months.saturating_sub(1));
        Self {
            start: first.and_time(NaiveTime::MIN).and_utc(),
            end: current.end,
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    pub fn month_start(&self) -> NaiveDate {
        first_of_month(self.start.date_naive())
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Aceita `YYYY-MM` ou `YYYY-MM-DD` e normaliza para o dia 1.
pub fn parse_month(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(first_of_month(date));
    }
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()
}

// `?month=YYYY-MM`; sem o parâmetro vale o mês corrente
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    pub month: Option<String>,
}

impl MonthQuery {
    pub fn resolve(&self) -> Result<NaiveDate, AppError> {
        match self.month.as_deref() {
            Some(raw) => parse_month(raw).ok_or_else(|| AppError::InvalidMonth(raw.to_string())),
            None => Ok(TimeWindow::current_month().month_start()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn month_window_is_half_open() {
        let window = TimeWindow::month_of(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());

        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let window = TimeWindow::month_of(NaiveDate::from_ymd_opt(2023, 12, 5).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn trailing_window_covers_whole_months() {
        let window = TimeWindow::trailing_months(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), 12);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_month_formats() {
        let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_month("2024-03"), Some(march));
        assert_eq!(parse_month("2024-03-19"), Some(march));
        assert_eq!(parse_month(" 2024-03 "), Some(march));
        assert_eq!(parse_month("março"), None);
        assert_eq!(parse_month("2024-13"), None);
    }

    #[test]
    fn month_query_defaults_to_current_month() {
        let current = MonthQuery::default().resolve().unwrap();
        assert_eq!(current, TimeWindow::current_month().month_start());

        let query = MonthQuery { month: Some("2024-02".into()) };
        assert_eq!(query.resolve().unwrap(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

        let query = MonthQuery { month: Some("fev".into()) };
        assert!(matches!(query.resolve(), Err(AppError::InvalidMonth(_))));
    }
}
