use serde_json::Value;

/// Print just the headline answer.
///
/// Looks for the most decision-relevant fields first, then falls back
/// to the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|map| map.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "final_grade",
        "final_score",
        "credit_spread",
        "nominal_rate",
        "macaulay_duration_years",
        "score",
    ];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", bare(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{key}: {}", bare(val));
            return;
        }
    }

    println!("{}", bare(result));
}

fn bare(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
