use serde::{Deserialize, Serialize};

/// Form fields sent alongside the image. All flags travel as the strings
/// `"true"` / `"false"` in the multipart body.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOptions {
    pub skip_items: bool,
    pub clean_text: bool,
    pub concurrent: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skip_items: true,
            clean_text: true,
            concurrent: true,
        }
    }
}

impl ScanOptions {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("skip_items", self.skip_items.to_string()),
            ("clean_text", self.clean_text.to_string()),
            ("concurrent", self.concurrent.to_string()),
        ]
    }
}

/// Top-level backend response. Exactly one of `data.invoice` (with
/// `success=true`) or `error` (with `success=false`) is populated.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanResponse {
    pub success: bool,
    pub data: Option<ScanData>,
    pub error: Option<String>,
    pub performance: Option<Performance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanData {
    #[serde(rename = "type")]
    pub kind: String,
    pub invoice: Option<Invoice>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    #[serde(rename = "seller_name")]
    pub merchant: Option<String>,
    #[serde(rename = "total_amount")]
    pub total: Option<f64>,
    /// Combined date-time string, e.g. "2025-12-22 16:00:23".
    pub invoice_date: Option<String>,
    #[serde(rename = "raw_text")]
    pub remarks: Option<String>,
}

impl Invoice {
    /// Date part of `invoice_date`: the first 10 characters ("2025-12-22").
    pub fn date(&self) -> Option<&str> {
        self.invoice_date.as_deref().and_then(|d| d.get(..10))
    }

    /// Time part of `invoice_date`: everything past offset 11 ("16:00:23"),
    /// absent when the string carries no time component.
    pub fn time(&self) -> Option<&str> {
        self.invoice_date
            .as_deref()
            .filter(|d| d.len() > 11)
            .and_then(|d| d.get(11..))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Performance {
    pub ocr: Option<f64>,
    pub parse: Option<f64>,
    pub total: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice_with_date(date: Option<&str>) -> Invoice {
        Invoice {
            merchant: Some("星巴克".to_string()),
            total: Some(45.5),
            invoice_date: date.map(|d| d.to_string()),
            remarks: None,
        }
    }

    #[test]
    fn test_date_time_split() {
        let invoice = invoice_with_date(Some("2025-12-22 16:00:23"));
        assert_eq!(invoice.date(), Some("2025-12-22"));
        assert_eq!(invoice.time(), Some("16:00:23"));
    }

    #[test]
    fn test_date_only_has_no_time() {
        let invoice = invoice_with_date(Some("2025-12-22"));
        assert_eq!(invoice.date(), Some("2025-12-22"));
        assert_eq!(invoice.time(), None);
    }

    #[test]
    fn test_missing_invoice_date() {
        let invoice = invoice_with_date(None);
        assert_eq!(invoice.date(), None);
        assert_eq!(invoice.time(), None);
    }

    #[test]
    fn test_decode_success_response() {
        let body = r#"{
            "success": true,
            "data": {
                "type": "invoice",
                "invoice": {
                    "seller_name": "Starbucks",
                    "total_amount": 45.5,
                    "invoice_date": "2025-12-22 16:00:23",
                    "raw_text": "..."
                },
                "confidence": 0.93
            },
            "error": null,
            "performance": {"ocr": 1.2, "parse": 0.9, "total": 2.1}
        }"#;

        let resp: ScanResponse = serde_json::from_str(body).unwrap();
        assert!(resp.success);
        let invoice = resp.data.unwrap().invoice.unwrap();
        assert_eq!(invoice.merchant.as_deref(), Some("Starbucks"));
        assert_eq!(invoice.total, Some(45.5));
        assert_eq!(resp.performance.unwrap().total, Some(2.1));
    }

    #[test]
    fn test_decode_failure_response() {
        let body = r#"{"success": false, "data": null, "error": "无法识别账单", "performance": null}"#;
        let resp: ScanResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.error.as_deref(), Some("无法识别账单"));
    }

    #[test]
    fn test_option_form_fields() {
        let options = ScanOptions::default();
        let fields = options.form_fields();
        assert_eq!(
            fields,
            vec![
                ("skip_items", "true".to_string()),
                ("clean_text", "true".to_string()),
                ("concurrent", "true".to_string()),
            ]
        );

        let options = ScanOptions {
            skip_items: false,
            ..ScanOptions::default()
        };
        assert_eq!(options.form_fields()[0].1, "false");
    }
}
