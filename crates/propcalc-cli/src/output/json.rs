use serde_json::Value;

/// JSON to stdout: indented for a terminal, one line when piped so the
/// calculator screens can read a single record per call.
pub fn print_json(value: &Value) {
    let pretty = atty::is(atty::Stream::Stdout);
    match render(value, pretty) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn render(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_piped_output_is_single_line() {
        let value = json!({ "result": { "monthly_emi": "3471.29" }, "warnings": [] });
        let compact = render(&value, false).unwrap();
        assert!(!compact.contains('\n'));
        assert!(render(&value, true).unwrap().contains('\n'));
    }
}
