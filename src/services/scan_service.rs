use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::scan::{ScanOptions, ScanResponse};

const SCAN_PATH: &str = "/scan/fast";

/// HTTP client for the OCR+parsing backend. Owns no shared state; writing
/// results into the cross-process store is the recognition service's job.
#[derive(Debug, Clone)]
pub struct ScanClient {
    http: reqwest::Client,
    scan_url: String,
}

impl ScanClient {
    /// The backend sits behind a tunnel that misbehaves under transparent
    /// proxying, so ambient proxy configuration is disabled outright.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            scan_url: format!("{}{}", base_url.trim_end_matches('/'), SCAN_PATH),
        })
    }

    /// Uploads JPEG bytes and returns the decoded backend response. A
    /// well-formed response with `success=false` is returned as data, not
    /// mapped to an error.
    pub async fn scan_bill(
        &self,
        image: Vec<u8>,
        options: &ScanOptions,
    ) -> Result<ScanResponse, AppError> {
        debug!("uploading {} bytes to {}", image.len(), self.scan_url);

        let file = Part::bytes(image)
            .file_name("bill.jpg")
            .mime_str("image/jpeg")?;
        let mut form = Form::new().part("file", file);
        for (name, value) in options.form_fields() {
            form = form.text(name, value);
        }

        let started = std::time::Instant::now();
        let response = self.http.post(&self.scan_url).multipart(form).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AppError::Protocol(format!("HTTP {}", status.as_u16())));
        }

        let body = response.text().await?;
        let scan: ScanResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Protocol(format!("bad response body: {e}")))?;

        info!(
            "scan response received in {:.1}s (success={})",
            started.elapsed().as_secs_f64(),
            scan.success
        );
        Ok(scan)
    }
}
