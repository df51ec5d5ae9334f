//! Table-rows response envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::codec::rows::{decode_record_rows_with_options, decode_rows_with_options};
use crate::codec::{Decode, DecodeOptions};
use crate::error::RowsError;
use crate::model::{Record, TypeDescriptor};

/// How the node was asked to render `rows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowFormat {
    /// Rows are JSON objects.
    #[default]
    Json,
    /// Rows are hex strings of the packed binary form.
    Binary,
}

/// Body of a table-rows query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetTableRowsResponse {
    #[serde(default)]
    pub more: bool,
    #[serde(default)]
    pub rows: JsonValue,
}

impl GetTableRowsResponse {
    /// Parses the envelope from a JSON body.
    pub fn from_json(body: &str) -> Result<Self, RowsError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Deserializes JSON-rendered rows. A missing `rows` is an empty set.
    pub fn json_to_structs<T: DeserializeOwned>(&self) -> Result<Vec<T>, RowsError> {
        if self.rows.is_null() {
            return Ok(Vec::new());
        }
        Ok(Vec::<T>::deserialize(&self.rows)?)
    }

    /// Decodes hex-rendered rows as `T`, appending them to `out`.
    pub fn binary_to_structs<T: Decode>(&self, out: &mut Vec<T>) -> Result<(), RowsError> {
        self.binary_to_structs_with_options(DecodeOptions::default(), out)
    }

    pub fn binary_to_structs_with_options<T: Decode>(
        &self,
        options: DecodeOptions,
        out: &mut Vec<T>,
    ) -> Result<(), RowsError> {
        let rows = self.hex_rows()?;
        decode_rows_with_options(&rows, options, out)?;
        Ok(())
    }

    /// Decodes hex-rendered rows against `descriptor`, appending them to `out`.
    pub fn binary_to_records(
        &self,
        descriptor: &TypeDescriptor,
        out: &mut Vec<Record>,
    ) -> Result<(), RowsError> {
        let rows = self.hex_rows()?;
        decode_record_rows_with_options(&rows, descriptor, DecodeOptions::default(), out)?;
        Ok(())
    }

    /// Decodes rows in whichever `format` the query asked for.
    pub fn rows_to_structs<T>(&self, format: RowFormat, out: &mut Vec<T>) -> Result<(), RowsError>
    where
        T: Decode + DeserializeOwned,
    {
        match format {
            RowFormat::Json => {
                out.extend(self.json_to_structs::<T>()?);
                Ok(())
            }
            RowFormat::Binary => self.binary_to_structs(out),
        }
    }

    fn hex_rows(&self) -> Result<Vec<String>, RowsError> {
        if self.rows.is_null() {
            return Ok(Vec::new());
        }
        Ok(Vec::<String>::deserialize(&self.rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_struct;
    use crate::error::DecodeError;
    use crate::model::{Name, PrimitiveKind, Value};

    binary_struct! {
        #[derive(Debug, Clone, PartialEq, Deserialize)]
        struct Account {
            owner: Name,
            balance: u64,
        }
    }

    #[test]
    fn test_binary_rows() {
        let response = GetTableRowsResponse::from_json(
            r#"{"rows":["0000000000ea30550100000000000000","0000000000ea30550200000000000000"],"more":true}"#,
        )
        .unwrap();
        assert!(response.more);

        let mut out: Vec<Account> = Vec::new();
        response.rows_to_structs(RowFormat::Binary, &mut out).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].owner.to_string(), "eosio");
        assert_eq!(out[1].balance, 2);
    }

    #[test]
    fn test_json_rows() {
        let response = GetTableRowsResponse::from_json(
            r#"{"rows":[{"owner":"eosio","balance":7}],"more":false}"#,
        )
        .unwrap();
        let mut out: Vec<Account> = Vec::new();
        response.rows_to_structs(RowFormat::Json, &mut out).unwrap();
        assert_eq!(out, [Account { owner: "eosio".parse().unwrap(), balance: 7 }]);
    }

    #[test]
    fn test_binary_rows_require_strings() {
        let response = GetTableRowsResponse::from_json(r#"{"rows":[{"owner":"eosio"}]}"#).unwrap();
        let mut out: Vec<Account> = Vec::new();
        let err = response.binary_to_structs(&mut out).unwrap_err();
        assert!(matches!(err, RowsError::Json(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_failing_row_surfaces_index() {
        let response = GetTableRowsResponse::from_json(
            r#"{"rows":["0000000000ea30550100000000000000","0000000000ea3055"]}"#,
        )
        .unwrap();
        let mut out: Vec<Account> = Vec::new();
        match response.binary_to_structs(&mut out) {
            Err(RowsError::Row(err)) => {
                assert_eq!(err.row, 1);
                assert!(matches!(err.source, DecodeError::UnexpectedEndOfBuffer { context: "balance", .. }));
            }
            other => panic!("expected row error, got {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_rows_empty_in_both_formats() {
        let response = GetTableRowsResponse::from_json(r#"{"more":false}"#).unwrap();
        for format in [RowFormat::Json, RowFormat::Binary] {
            let mut out: Vec<Account> = Vec::new();
            response.rows_to_structs(format, &mut out).unwrap();
            assert!(out.is_empty(), "{:?}", format);
        }
        assert!(response.json_to_structs::<Account>().unwrap().is_empty());
    }

    #[test]
    fn test_records_and_missing_rows() {
        let descriptor = TypeDescriptor::builder("counter")
            .field("value", PrimitiveKind::U32)
            .build();

        let empty = GetTableRowsResponse::from_json("{}").unwrap();
        let mut out = Vec::new();
        empty.binary_to_records(&descriptor, &mut out).unwrap();
        assert!(out.is_empty() && !empty.more);

        let response = GetTableRowsResponse::from_json(r#"{"rows":["2a000000"]}"#).unwrap();
        response.binary_to_records(&descriptor, &mut out).unwrap();
        assert_eq!(out[0].get("value"), Some(&Value::U32(42)));
    }
}
