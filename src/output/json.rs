use serde::Serialize;
use serde_json::{json, Value};

use crate::error::TaskboardError;

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskboardError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

/// Success envelope around any serializable payload.
pub fn success_of<T: Serialize>(data: &T) -> Result<Value, TaskboardError> {
    let data = serde_json::to_value(data).map_err(|e| TaskboardError::internal(e.to_string()))?;
    Ok(success(data))
}

pub fn print(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("{value}"),
    }
}
