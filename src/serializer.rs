//! Result rows to [`DataRow`]s.
//!
//! Each column is decoded by the function registered for its database type
//! name (`UUID`, `INT4`, ...), matched case-insensitively. Unregistered
//! types fall back to the raw column bytes: UTF-8 becomes a string, anything
//! else a `\x`-prefixed hex string as `bytea` prints it.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::postgres::{PgRow, PgValueFormat};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use uuid::Uuid;

use crate::ast::{DataRow, Value};
use crate::error::AssemblyResult;

/// Reads column `index` of a row.
pub type Decoder = fn(&PgRow, usize) -> Result<Value, sqlx::Error>;

#[derive(Debug, Clone)]
pub struct RowSerializer {
    decoders: HashMap<String, Decoder>,
}

impl Default for RowSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSerializer {
    /// Serializer with the built-in decoders registered.
    pub fn new() -> Self {
        let mut serializer = Self::empty();
        serializer.register("UUID", decode_uuid);
        serializer.register("BOOL", decode_bool);
        for name in ["INT2", "INT4", "INT8"] {
            serializer.register(name, decode_int);
        }
        for name in ["FLOAT4", "FLOAT8"] {
            serializer.register(name, decode_float);
        }
        serializer.register("TIMESTAMPTZ", decode_timestamp);
        serializer.register("TIMESTAMP", decode_naive_timestamp);
        serializer.register("DATE", decode_date);
        serializer.register("TIME", decode_time);
        for name in ["JSON", "JSONB"] {
            serializer.register(name, decode_json);
        }
        serializer
    }

    /// Serializer that reads every column through the raw fallback.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register (or replace) the decoder for a type name.
    pub fn register(&mut self, type_name: impl Into<String>, decoder: Decoder) {
        self.decoders.insert(type_name.into().to_uppercase(), decoder);
    }

    pub fn has_decoder(&self, type_name: &str) -> bool {
        self.decoders.contains_key(&type_name.to_uppercase())
    }

    fn decoder(&self, type_name: &str) -> Decoder {
        self.decoders
            .get(&type_name.to_uppercase())
            .copied()
            .unwrap_or(decode_text)
    }

    pub fn to_row(&self, row: &PgRow) -> AssemblyResult<DataRow> {
        let mut data = DataRow::new();
        for (i, column) in row.columns().iter().enumerate() {
            let decode = self.decoder(column.type_info().name());
            data.insert(column.name(), decode(row, i)?);
        }
        Ok(data)
    }
}

fn decode_text(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(i)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let text = match raw.format() {
        PgValueFormat::Text => raw.as_str().map_err(sqlx::Error::Decode)?.to_string(),
        PgValueFormat::Binary => bytes_to_text(raw.as_bytes().map_err(sqlx::Error::Decode)?),
    };
    Ok(Value::String(text))
}

fn bytes_to_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let mut hex = String::with_capacity(2 + bytes.len() * 2);
            hex.push_str("\\x");
            for byte in bytes {
                hex.push_str(&format!("{:02x}", byte));
            }
            hex
        }
    }
}

fn decode_uuid(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    Ok(row.try_get::<Option<Uuid>, _>(i)?.into())
}

fn decode_bool(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    Ok(row.try_get::<Option<bool>, _>(i)?.into())
}

fn decode_int(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    // INT2 and INT4 do not decode into i64 directly
    let value = match row.columns()[i].type_info().name() {
        "INT2" => row.try_get::<Option<i16>, _>(i)?.map(i64::from),
        "INT4" => row.try_get::<Option<i32>, _>(i)?.map(i64::from),
        _ => row.try_get::<Option<i64>, _>(i)?,
    };
    Ok(value.into())
}

fn decode_float(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    let value = match row.columns()[i].type_info().name() {
        "FLOAT4" => row.try_get::<Option<f32>, _>(i)?.map(f64::from),
        _ => row.try_get::<Option<f64>, _>(i)?,
    };
    Ok(value.into())
}

fn decode_timestamp(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    Ok(row.try_get::<Option<DateTime<Utc>>, _>(i)?.into())
}

fn decode_naive_timestamp(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    Ok(row
        .try_get::<Option<NaiveDateTime>, _>(i)?
        .map(|ts| ts.and_utc())
        .into())
}

fn decode_date(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    Ok(row
        .try_get::<Option<NaiveDate>, _>(i)?
        .map(|date| date.to_string())
        .into())
}

fn decode_time(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    Ok(row
        .try_get::<Option<NaiveTime>, _>(i)?
        .map(|time| time.to_string())
        .into())
}

fn decode_json(row: &PgRow, i: usize) -> Result<Value, sqlx::Error> {
    Ok(row.try_get::<Option<serde_json::Value>, _>(i)?.into())
}
