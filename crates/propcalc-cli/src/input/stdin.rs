use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Parameters piped on stdin, or `None` when stdin is a terminal or empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    log::debug!("read {} bytes of parameters from stdin", buffer.len());
    parse_piped(&buffer)
}

/// JSON when the document opens with `{` or `[`, YAML otherwise.
fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|e| format!("Invalid JSON on stdin: {e}"))?
    } else {
        serde_yaml::from_str(trimmed).map_err(|e| format!("Invalid YAML on stdin: {e}"))?
    };
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use propcalc_core::loan::LoanParameters;
    use rust_decimal::Decimal;

    #[test]
    fn test_blank_input_falls_back_to_flags() {
        let parsed: Option<LoanParameters> = parse_piped("  \n").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_json_and_yaml_both_accepted() {
        let json: Option<LoanParameters> = parse_piped(
            r#"{"property_value": "500000", "down_payment_percentage": "20",
                "loan_term_years": 20, "annual_interest_rate_percent": "8.5"}"#,
        )
        .unwrap();
        let yaml: Option<LoanParameters> = parse_piped(
            "property_value: '500000'\ndown_payment_percentage: '20'\nloan_term_years: 20\nannual_interest_rate_percent: '8.5'\n",
        )
        .unwrap();
        let (json, yaml) = (json.unwrap(), yaml.unwrap());
        assert_eq!(json.property_value, yaml.property_value);
        assert_eq!(yaml.loan_term_years, 20);
        assert_eq!(yaml.maintenance_rate_percent, Decimal::ZERO);
    }

    #[test]
    fn test_malformed_json_reported() {
        let parsed: Result<Option<LoanParameters>, _> = parse_piped("{ not json");
        assert!(parsed.unwrap_err().to_string().contains("Invalid JSON"));
    }
}
