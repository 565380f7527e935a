//! SQL Server value mappings.
//!
//! This module converts tiberius column data into `serde_json` values so
//! every row can be materialized as a column-name-keyed map regardless of
//! the column types the query produced.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Number, Value as JsonValue};
use tiberius::{ColumnData, FromSql, Row};

use crate::models::query::Row as JsonRow;

/// Materialize a result row as a mapping from column name to JSON value.
pub fn row_to_json(row: &Row) -> JsonRow {
    let mut map = JsonRow::new();
    for (column, data) in row.cells() {
        map.insert(column.name().to_string(), column_data_to_json(data));
    }
    map
}

/// Convert a single cell into a JSON value.
///
/// Binary data is base64 encoded; date and time types render through their
/// chrono conversions. Anything the driver cannot decode becomes null.
fn column_data_to_json(data: &ColumnData<'static>) -> JsonValue {
    match data {
        ColumnData::Bit(v) => v.map(JsonValue::Bool).unwrap_or(JsonValue::Null),
        ColumnData::U8(v) => v.map(|n| JsonValue::Number(n.into())).unwrap_or(JsonValue::Null),
        ColumnData::I16(v) => v.map(|n| JsonValue::Number(n.into())).unwrap_or(JsonValue::Null),
        ColumnData::I32(v) => v.map(|n| JsonValue::Number(n.into())).unwrap_or(JsonValue::Null),
        ColumnData::I64(v) => v.map(|n| JsonValue::Number(n.into())).unwrap_or(JsonValue::Null),
        ColumnData::F32(v) => float_to_json(v.map(f64::from)),
        ColumnData::F64(v) => float_to_json(*v),
        ColumnData::Numeric(v) => float_to_json(v.map(f64::from)),
        ColumnData::String(v) => v
            .as_ref()
            .map(|s| JsonValue::String(s.to_string()))
            .unwrap_or(JsonValue::Null),
        ColumnData::Guid(v) => v
            .map(|g| JsonValue::String(g.to_string()))
            .unwrap_or(JsonValue::Null),
        ColumnData::Binary(v) => v
            .as_ref()
            .map(|b| JsonValue::String(STANDARD.encode(b.as_ref())))
            .unwrap_or(JsonValue::Null),
        ColumnData::Xml(v) => v
            .as_ref()
            .map(|x| JsonValue::String(x.to_string()))
            .unwrap_or(JsonValue::Null),
        ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
            from_sql_string::<NaiveDateTime>(data)
        }
        ColumnData::Date(_) => from_sql_string::<NaiveDate>(data),
        ColumnData::Time(_) => from_sql_string::<NaiveTime>(data),
        ColumnData::DateTimeOffset(_) => from_sql_string::<DateTime<Utc>>(data),
        #[allow(unreachable_patterns)]
        _ => JsonValue::Null,
    }
}

fn float_to_json(value: Option<f64>) -> JsonValue {
    value
        .and_then(Number::from_f64)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

fn from_sql_string<'a, T>(data: &'a ColumnData<'static>) -> JsonValue
where
    T: FromSql<'a> + ToString,
{
    T::from_sql(data)
        .ok()
        .flatten()
        .map(|v| JsonValue::String(v.to_string()))
        .unwrap_or(JsonValue::Null)
}
