//! Invoice parsing: preprocess → few-shot LLM extraction → field-by-field
//! validation. The model's reply is untrusted; every field is coerced locally
//! with a safe default, and the confidence score is computed here — never
//! taken from the model.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::invoice::prompts::INVOICE_SYSTEM;
use crate::llm_client::{strip_json_fences, ChatModel, ChatParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub price: f64,
}

/// Flat record produced for every invoice. All fields default to empty/zero;
/// `confidence` reflects how many fields were actually extracted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub vendor_name: String,
    pub invoice_number: String,
    pub date: String,
    pub total_amount: f64,
    pub line_items: Vec<LineItem>,
    pub customer_info: String,
    pub confidence: f64,
}

static HORIZONTAL_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid whitespace regex"));
static JSON_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON-object regex"));
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("valid amount regex"));

/// Parses unstructured invoice text into an `InvoiceRecord`. Never fails:
/// transport errors and unparseable replies yield an all-default record at
/// confidence 0.0.
pub async fn parse_invoice(invoice_text: &str, llm: &dyn ChatModel) -> InvoiceRecord {
    let cleaned = preprocess(invoice_text);

    let raw = match llm
        .chat(INVOICE_SYSTEM, &cleaned, ChatParams::with_max_tokens(800))
        .await
    {
        Ok(reply) => extract_json(&reply),
        Err(e) => {
            warn!("invoice parsing failed: {e}");
            Value::Null
        }
    };

    let mut record = validate(&raw);
    record.confidence = score_confidence(&record);
    record
}

/// Normalizes line endings, collapses horizontal whitespace runs, and folds
/// foreign currency symbols to `$` so the few-shot examples stay applicable.
fn preprocess(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = HORIZONTAL_WS_RE.replace_all(&text, " ");
    text.replace(['£', '€', '¥'], "$").trim().to_string()
}

/// Parses the reply as JSON, stripping code fences first and falling back to
/// the first `{...}` block when the model wrapped the object in prose.
fn extract_json(reply: &str) -> Value {
    let stripped = strip_json_fences(reply);
    if let Ok(value) = serde_json::from_str(stripped) {
        return value;
    }
    if let Some(m) = JSON_OBJECT_RE.find(reply) {
        if let Ok(value) = serde_json::from_str(m.as_str()) {
            return value;
        }
    }
    warn!("invoice reply was not valid JSON");
    Value::Null
}

/// Coerces the untrusted JSON into the record shape, one field at a time.
fn validate(raw: &Value) -> InvoiceRecord {
    let mut record = InvoiceRecord::default();

    if let Some(vendor) = string_field(raw, "vendor_name") {
        record.vendor_name = vendor;
    }
    if let Some(number) = string_field(raw, "invoice_number") {
        record.invoice_number = number;
    }
    if let Some(date) = string_field(raw, "date") {
        record.date = normalize_date(&date);
    }
    if let Some(total) = raw.get("total_amount") {
        record.total_amount = extract_amount(total);
    }
    if let Some(Value::Array(items)) = raw.get("line_items") {
        record.line_items = validate_line_items(items);
    }
    if let Some(customer) = string_field(raw, "customer_info") {
        record.customer_info = customer;
    }

    record
}

/// Reads a field as trimmed text; numbers are accepted too (invoice numbers
/// come back as bare integers often enough).
fn string_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn validate_line_items(items: &[Value]) -> Vec<LineItem> {
    items
        .iter()
        .filter_map(|item| {
            if !item.is_object() {
                return None;
            }
            Some(LineItem {
                description: string_field(item, "description").unwrap_or_default(),
                quantity: item
                    .get("quantity")
                    .and_then(Value::as_u64)
                    .map(|q| q as u32)
                    .unwrap_or(1),
                price: item.get("price").map(extract_amount).unwrap_or(0.0),
            })
        })
        .collect()
}

/// Normalizes the common date layouts to `YYYY-MM-DD`. Anything that does not
/// match — or names an impossible day — passes through unchanged.
fn normalize_date(date_str: &str) -> String {
    static YMD_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(\d{4})[-/](\d{1,2})[-/](\d{1,2})").expect("valid regex"));
    static MDY_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(\d{1,2})[-/](\d{1,2})[-/](\d{4})").expect("valid regex"));

    let ymd = YMD_RE
        .captures(date_str)
        .map(|c| (c[1].to_string(), c[2].to_string(), c[3].to_string()));
    let mdy = MDY_RE
        .captures(date_str)
        .map(|c| (c[3].to_string(), c[1].to_string(), c[2].to_string()));

    if let Some((year, month, day)) = ymd.or(mdy) {
        if let (Ok(y), Ok(m), Ok(d)) = (year.parse(), month.parse(), day.parse()) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return date.format("%Y-%m-%d").to_string();
            }
        }
    }

    date_str.to_string()
}

/// Coerces a JSON number or a currency string ("$1,200.00") into an amount.
/// Unrecognized values become 0.0.
fn extract_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let cleaned = s.replace(['$', '£', '€', '¥', ','], "");
            AMOUNT_RE
                .find(&cleaned)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Deterministic confidence from field presence. Weights sum to 1.0; a record
/// with every field populated earns a completeness bonus, capped at 1.0.
fn score_confidence(record: &InvoiceRecord) -> f64 {
    let mut confidence: f64 = 0.0;

    if !record.vendor_name.is_empty() {
        confidence += 0.25;
    }
    if !record.invoice_number.is_empty() {
        confidence += 0.2;
    }
    if !record.date.is_empty() {
        confidence += 0.15;
    }
    if record.total_amount > 0.0 {
        confidence += 0.25;
    }
    if !record.line_items.is_empty() {
        confidence += 0.15;
    }

    let complete = !record.vendor_name.is_empty()
        && !record.invoice_number.is_empty()
        && !record.date.is_empty()
        && record.total_amount > 0.0
        && !record.line_items.is_empty();
    if complete {
        confidence = (confidence + 0.1).min(1.0);
    }

    (confidence * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedChat;
    use serde_json::json;

    const FULL_REPLY: &str = r#"{
        "vendor_name": "TechCorp Solutions",
        "invoice_number": "12345",
        "date": "2024-01-15",
        "total_amount": 1200.00,
        "line_items": [
            {"description": "Software License", "quantity": 2, "price": 500.00},
            {"description": "Support Services", "quantity": 1, "price": 200.00}
        ],
        "customer_info": "Client Company"
    }"#;

    #[test]
    fn test_preprocess_folds_currency_and_whitespace() {
        let cleaned = preprocess("Total:\t €1.200,00\r\nDue soon");
        assert_eq!(cleaned, "Total: $1.200,00\nDue soon");
    }

    #[test]
    fn test_normalize_date_layouts() {
        assert_eq!(normalize_date("2024-3-5"), "2024-03-05");
        assert_eq!(normalize_date("2024/03/15"), "2024-03-15");
        assert_eq!(normalize_date("3/15/2024"), "2024-03-15");
        assert_eq!(normalize_date("03-15-2024"), "2024-03-15");
    }

    #[test]
    fn test_normalize_date_rejects_impossible_days() {
        // 2024-02-31 does not exist; the raw string passes through.
        assert_eq!(normalize_date("2024-02-31"), "2024-02-31");
        assert_eq!(normalize_date("March 15, 2024"), "March 15, 2024");
    }

    #[test]
    fn test_extract_amount_variants() {
        assert_eq!(extract_amount(&json!(1200.5)), 1200.5);
        assert_eq!(extract_amount(&json!("$1,200.00")), 1200.0);
        assert_eq!(extract_amount(&json!("€89.00")), 89.0);
        assert_eq!(extract_amount(&json!("no amount here")), 0.0);
        assert_eq!(extract_amount(&json!(null)), 0.0);
    }

    #[test]
    fn test_validate_line_items_defaults() {
        let items = vec![
            json!({"description": "Setup", "quantity": 3, "price": "$50.00"}),
            json!({"description": "Extras"}),
            json!("not an object"),
        ];
        let validated = validate_line_items(&items);
        assert_eq!(validated.len(), 2);
        assert_eq!(validated[0].quantity, 3);
        assert_eq!(validated[0].price, 50.0);
        assert_eq!(validated[1].quantity, 1);
        assert_eq!(validated[1].price, 0.0);
    }

    #[test]
    fn test_score_confidence_complete_record() {
        let record = validate(&serde_json::from_str(FULL_REPLY).unwrap());
        assert_eq!(score_confidence(&record), 1.0);
    }

    #[test]
    fn test_score_confidence_partial_record() {
        let record = validate(&json!({"vendor_name": "ABC", "total_amount": 10.0}));
        assert_eq!(score_confidence(&record), 0.5);
    }

    #[test]
    fn test_score_confidence_empty_record() {
        assert_eq!(score_confidence(&InvoiceRecord::default()), 0.0);
    }

    #[test]
    fn test_extract_json_with_fences_and_prose() {
        let fenced = format!("```json\n{FULL_REPLY}\n```");
        assert!(extract_json(&fenced).is_object());

        let prose = format!("Here is the parsed invoice:\n{FULL_REPLY}\nLet me know!");
        assert!(extract_json(&prose).is_object());

        assert!(extract_json("sorry, I cannot parse this").is_null());
    }

    #[tokio::test]
    async fn test_parse_invoice_full_reply() {
        let llm = ScriptedChat::replies([FULL_REPLY]);
        let record = parse_invoice("INVOICE #12345 ...", &llm).await;

        assert_eq!(record.vendor_name, "TechCorp Solutions");
        assert_eq!(record.invoice_number, "12345");
        assert_eq!(record.date, "2024-01-15");
        assert_eq!(record.total_amount, 1200.0);
        assert_eq!(record.line_items.len(), 2);
        assert_eq!(record.customer_info, "Client Company");
        assert_eq!(record.confidence, 1.0);
    }

    #[tokio::test]
    async fn test_parse_invoice_service_failure_yields_default() {
        let llm = ScriptedChat::always_failing("connection refused");
        let record = parse_invoice("INVOICE #12345 ...", &llm).await;

        assert!(record.vendor_name.is_empty());
        assert!(record.line_items.is_empty());
        assert_eq!(record.total_amount, 0.0);
        assert_eq!(record.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_parse_invoice_numeric_invoice_number_is_coerced() {
        let llm = ScriptedChat::replies([r#"{"invoice_number": 98765, "date": "1/5/2024"}"#]);
        let record = parse_invoice("INVOICE ...", &llm).await;

        assert_eq!(record.invoice_number, "98765");
        assert_eq!(record.date, "2024-01-05");
        assert_eq!(record.confidence, 0.35);
    }
}
