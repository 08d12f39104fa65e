use serde_json::Value;

use super::scalar_text;

/// Headline figures, most specific first. Display strings win over raw
/// decimals so the answer reads like the app shows it.
const PRIORITY_KEYS: [&str; 8] = [
    "formatted",
    "monthly_emi",
    "max_loan_amount",
    "return_on_investment_percent",
    "max_monthly_saving",
    "emi_range",
    "total_monthly_payment",
    "loan_amount",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Projection output nests the figures one level down
    let search_in = result_obj
        .get("metrics")
        .filter(|m| m.is_object())
        .unwrap_or(result_obj);

    if let Value::Object(map) = search_in {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", scalar_text(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    // Series: print the last point, the end of the charted window
    if let Value::Array(items) = search_in {
        if let Some(last) = items.last() {
            println!("{}", scalar_text(last));
            return;
        }
    }

    println!("{}", scalar_text(search_in));
}
