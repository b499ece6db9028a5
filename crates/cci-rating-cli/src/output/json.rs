use serde_json::Value;

/// Pretty-print the full value as JSON.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("could not render JSON: {e}"),
    }
}
