//! JSON output

use crate::error::Result;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Serialize `value`, pretty-printed or on one line.
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

/// Write `value` to a file, followed by a newline.
pub fn write_json(path: &Path, value: &Value, pretty: bool) -> Result<()> {
    let text = to_json_string(value, pretty)?;
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{}", text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_and_pretty() {
        let value = json!([{"x": 1}]);
        assert_eq!(to_json_string(&value, false).unwrap(), r#"[{"x":1}]"#);
        assert!(to_json_string(&value, true).unwrap().contains("\n"));
    }

    #[test]
    fn test_write_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let value = json!({"north": {"q1": 1.5}});
        write_json(&path, &value, true).unwrap();
        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, value);
    }
}
