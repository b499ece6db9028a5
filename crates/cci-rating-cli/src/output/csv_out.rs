use serde_json::Value;
use std::io;

/// Write the output as CSV.
///
/// An analysis envelope whose result carries a schedule emits the
/// schedule rows; arrays emit one record per element; anything else
/// degrades to field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            match result {
                Value::Object(fields) => {
                    if let Some(Value::Array(rows)) = fields.get("schedule") {
                        write_rows(&mut writer, rows);
                    } else {
                        write_pairs(&mut writer, fields);
                    }
                }
                Value::Array(rows) => write_rows(&mut writer, rows),
                _ => {
                    let _ = writer.write_record([&cell(result)]);
                }
            }
        }
        Value::Array(rows) => write_rows(&mut writer, rows),
        _ => {
            let _ = writer.write_record([&cell(value)]);
        }
    }

    let _ = writer.flush();
}

fn write_pairs(writer: &mut csv::Writer<io::StdoutLock<'_>>, fields: &serde_json::Map<String, Value>) {
    let _ = writer.write_record(["field", "value"]);
    for (key, val) in fields {
        let _ = writer.write_record([key.as_str(), &cell(val)]);
    }
}

fn write_rows(writer: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if rows.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = writer.write_record(&headers);
        for row in rows {
            if let Value::Object(map) = row {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(cell).unwrap_or_default())
                    .collect();
                let _ = writer.write_record(&record);
            }
        }
    } else {
        for row in rows {
            let _ = writer.write_record([&cell(row)]);
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
