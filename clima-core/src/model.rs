use serde::{Deserialize, Serialize};

/// Raw form input, exactly as typed by the user.
///
/// `date` is expected to look like "YYYY-MM-DD" and `time` like "HH:MM",
/// but only presence is enforced; the store matches on the literal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    pub date: String,
    pub time: String,
}

impl QueryInput {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self { date: date.into(), time: time.into() }
    }

    /// Both fields non-empty, i.e. the form may be submitted to the store.
    pub fn is_complete(&self) -> bool {
        !self.date.is_empty() && !self.time.is_empty()
    }
}

/// One matching document's readings. A field the document lacks reads as 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature: f64,
    pub humidity: f64,
}

/// Integer-truncated rendering of a [`WeatherRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRow {
    pub temperature: i64,
    pub humidity: i64,
}

impl From<&WeatherRecord> for DisplayRow {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            temperature: record.temperature as i64,
            humidity: record.humidity as i64,
        }
    }
}

/// One display row per record, in store order.
pub fn display_rows(records: &[WeatherRecord]) -> Vec<DisplayRow> {
    records.iter().map(DisplayRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_complete_only_with_both_fields() {
        assert!(QueryInput::new("2024-01-01", "10:00").is_complete());
        assert!(!QueryInput::new("", "10:00").is_complete());
        assert!(!QueryInput::new("2024-01-01", "").is_complete());
        assert!(!QueryInput::default().is_complete());
    }

    #[test]
    fn rows_truncate_toward_zero() {
        let records = [
            WeatherRecord { temperature: 23.7, humidity: 55.2 },
            WeatherRecord { temperature: -3.9, humidity: 0.4 },
        ];

        let rows = display_rows(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], DisplayRow { temperature: 23, humidity: 55 });
        assert_eq!(rows[1], DisplayRow { temperature: -3, humidity: 0 });
    }

    #[test]
    fn rows_preserve_store_order() {
        let records = [
            WeatherRecord { temperature: 1.0, humidity: 10.0 },
            WeatherRecord { temperature: 2.0, humidity: 20.0 },
            WeatherRecord { temperature: 3.0, humidity: 30.0 },
        ];

        let rows = display_rows(&records);

        let temps: Vec<i64> = rows.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![1, 2, 3]);
    }

    #[test]
    fn no_records_no_rows() {
        assert!(display_rows(&[]).is_empty());
    }
}
