use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render the output as tables.
///
/// An analysis envelope gets a summary table of the scalar result
/// fields, a pillar table when the result carries one, then warnings
/// and the methodology line. Bare arrays (schedules) render row-wise.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if map.contains_key("result") => print_envelope(map),
        Value::Object(_) => print_field_table(value),
        Value::Array(rows) => print_rows(rows),
        _ => println!("{value}"),
    }
}

fn print_envelope(envelope: &serde_json::Map<String, Value>) {
    let result = &envelope["result"];

    if let Value::Object(fields) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in fields {
            match (key.as_str(), val) {
                // The schedule is too wide for the summary table.
                ("schedule", Value::Array(rows)) => {
                    builder.push_record([key.as_str(), &format!("{} periods", rows.len())]);
                }
                ("pillars", _) => {}
                _ => builder.push_record([key.as_str(), &scalar(val)]),
            }
        }
        println!("{}", Table::from(builder));

        if let Some(Value::Array(pillars)) = fields.get("pillars") {
            println!("\nPillars:");
            print_pillar_table(pillars);
        }
    } else {
        print_field_table(result);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for warning in warnings {
                if let Value::String(text) = warning {
                    println!("  - {text}");
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}

fn print_pillar_table(pillars: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Pillar", "Score", "Groups"]);
    for pillar in pillars {
        if let Value::Object(map) = pillar {
            let groups = match map.get("groups") {
                Some(Value::Array(groups)) => groups
                    .iter()
                    .filter_map(|g| {
                        let name = g.get("name")?.as_str()?;
                        let score = g.get("score")?;
                        Some(format!("{name}={}", scalar(score)))
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => String::new(),
            };
            builder.push_record([
                &scalar(map.get("pillar").unwrap_or(&Value::Null)),
                &scalar(map.get("score").unwrap_or(&Value::Null)),
                &groups,
            ]);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_field_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &scalar(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);
        for row in rows {
            if let Value::Object(map) = row {
                let cells: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(scalar).unwrap_or_default())
                    .collect();
                builder.push_record(cells);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for row in rows {
            println!("{}", scalar(row));
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
