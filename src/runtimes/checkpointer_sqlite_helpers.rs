//! JSON (de)serialization helpers shared by the SQLite checkpointer.
//!
//! Every persisted column round-trips through `serde_json`; these helpers
//! attach the field name to serde errors so a failure in `load_latest` or
//! `list_steps` points at the exact column that produced bad JSON.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::checkpointer_sqlite::SQLiteCheckpointerError;

pub(crate) fn serialize_json<T: Serialize>(
    value: &T,
    field: &'static str,
) -> Result<String, SQLiteCheckpointerError> {
    serde_json::to_string(value)
        .map_err(|e| SQLiteCheckpointerError::Other(format!("serialize {field}: {e}")))
}

pub(crate) fn deserialize_json<T: DeserializeOwned>(
    payload: &str,
    field: &'static str,
) -> Result<T, SQLiteCheckpointerError> {
    serde_json::from_str(payload)
        .map_err(|e| SQLiteCheckpointerError::Other(format!("deserialize {field}: {e}")))
}

pub(crate) fn deserialize_json_value<T: DeserializeOwned>(
    value: Value,
    field: &'static str,
) -> Result<T, SQLiteCheckpointerError> {
    serde_json::from_value(value)
        .map_err(|e| SQLiteCheckpointerError::Other(format!("deserialize {field}: {e}")))
}

pub(crate) fn require_json_field(
    value: Option<String>,
    field: &'static str,
) -> Result<String, SQLiteCheckpointerError> {
    value.ok_or(SQLiteCheckpointerError::Missing(field))
}
