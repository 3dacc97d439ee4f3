//! JSON wire format of a sheet document.
//!
//! ```json
//! {
//!   "total": 2, "limit": 2, "offset": 0,
//!   "data": [{"Timestamp": "...", "Prompt": "..."}],
//!   ":type": "sheet", ":sheetname": "data",
//!   ":colWidths": [50, 50], ":columns": ["Timestamp", "Prompt"]
//! }
//! ```
//!
//! Older writers only sent `{"data": [...]}`; every other field is optional
//! on decode.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use dasheet_core::{
    types::{DEFAULT_SHEET_NAME, DOCUMENT_TYPE},
    Metadata, Row, Sheet,
};

#[derive(Serialize)]
struct WireSheetOut<'a> {
    total: usize,
    limit: usize,
    offset: usize,
    data: &'a [Row],
    #[serde(rename = ":type")]
    document_type: &'a str,
    #[serde(rename = ":sheetname")]
    sheet_name: &'a str,
    #[serde(rename = ":colWidths")]
    column_widths: &'a [u32],
    #[serde(rename = ":columns", skip_serializing_if = "no_columns")]
    column_keys: &'a [String],
}

#[derive(Deserialize)]
struct WireSheetIn {
    #[serde(default)]
    total: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: usize,
    #[serde(default)]
    data: Vec<IndexMap<String, Value>>,
    #[serde(rename = ":type", default)]
    document_type: Option<String>,
    #[serde(rename = ":sheetname", default)]
    sheet_name: Option<String>,
    #[serde(rename = ":colWidths", default)]
    column_widths: Vec<u32>,
    #[serde(rename = ":columns", default)]
    column_keys: Vec<String>,
}

fn no_columns(keys: &&[String]) -> bool {
    keys.is_empty()
}

/// Serialize a sheet to the upload body.
pub fn encode(sheet: &Sheet) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&WireSheetOut {
        total: sheet.total,
        limit: sheet.limit,
        offset: sheet.offset,
        data: &sheet.data,
        document_type: &sheet.metadata.document_type,
        sheet_name: &sheet.metadata.sheet_name,
        column_widths: &sheet.metadata.column_widths,
        column_keys: &sheet.metadata.column_keys,
    })
}

/// Parse a fetched document, filling defaults for absent metadata.
pub fn decode(body: &[u8]) -> Result<Sheet, serde_json::Error> {
    let wire: WireSheetIn = serde_json::from_slice(body)?;
    let data: Vec<Row> = wire
        .data
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(k, v)| (k, cell_to_string(v)))
                .collect()
        })
        .collect();
    let len = data.len();
    Ok(Sheet {
        total: wire.total.unwrap_or(len),
        limit: wire.limit.unwrap_or(len),
        offset: wire.offset,
        data,
        metadata: Metadata {
            document_type: wire
                .document_type
                .unwrap_or_else(|| DOCUMENT_TYPE.to_string()),
            sheet_name: wire
                .sheet_name
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            column_widths: wire.column_widths,
            column_keys: wire.column_keys,
        },
    })
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encode_uses_prefixed_metadata_keys() {
        let mut row = Row::new();
        row.insert("A".into(), "1".into());
        let mut meta = Metadata::default();
        meta.column_widths = vec![50];
        meta.column_keys = vec!["A".into()];
        let sheet = Sheet::from_rows(vec![row], meta);

        let json: Value = serde_json::from_slice(&encode(&sheet).unwrap()).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["limit"], 1);
        assert_eq!(json["offset"], 0);
        assert_eq!(json[":type"], "sheet");
        assert_eq!(json[":sheetname"], "data");
        assert_eq!(json[":colWidths"], serde_json::json!([50]));
        assert_eq!(json[":columns"], serde_json::json!(["A"]));
        assert_eq!(json["data"][0]["A"], "1");
    }

    #[test]
    fn encode_omits_empty_columns() {
        let json: Value =
            serde_json::from_slice(&encode(&Sheet::empty("data")).unwrap()).unwrap();
        assert!(json.get(":columns").is_none());
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[test]
    fn decode_defaults_missing_metadata() {
        let sheet = decode(br#"{"data":[{"A":"x"}]}"#).unwrap();
        assert_eq!(sheet.total, 1);
        assert_eq!(sheet.limit, 1);
        assert_eq!(sheet.metadata.document_type, "sheet");
        assert_eq!(sheet.metadata.sheet_name, "data");
        assert!(sheet.metadata.column_widths.is_empty());
        assert!(sheet.metadata.column_keys.is_empty());
    }

    #[test]
    fn decode_keeps_column_order_and_stringifies_cells() {
        let sheet = decode(br#"{"data":[{"Z":1,"A":null,"M":true,"B":"b"}]}"#).unwrap();
        let row = &sheet.data[0];
        assert_eq!(
            row.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Z", "A", "M", "B"]
        );
        assert_eq!(row["Z"], "1");
        assert_eq!(row["A"], "");
        assert_eq!(row["M"], "true");
    }

    #[test]
    fn decode_reads_prefixed_metadata() {
        let body = br#"{"total":0,"limit":0,"offset":0,"data":[],
            ":type":"sheet",":sheetname":"log",":colWidths":[80,40],":columns":["A","B"]}"#;
        let sheet = decode(body).unwrap();
        assert_eq!(sheet.metadata.sheet_name, "log");
        assert_eq!(sheet.metadata.column_widths, vec![80, 40]);
        assert_eq!(sheet.metadata.column_keys, vec!["A", "B"]);
    }

    #[test]
    fn decode_rejects_non_documents() {
        assert!(decode(br#""just a string""#).is_err());
        assert!(decode(br#"{"data":"not rows"}"#).is_err());
        assert!(decode(b"not json").is_err());
    }
}
