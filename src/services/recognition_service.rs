use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::data::store::SharedStore;
use crate::error::AppError;
use crate::models::record::ExpenseRecord;
use crate::models::scan::{ScanOptions, ScanResponse};
use crate::services::scan_service::ScanClient;

/// Dispatches a scan and returns before any network I/O happens.
///
/// The image comes from `inline_image` when given, otherwise from the shared
/// image slot. An `analyzing` record is written synchronously so a consumer
/// that starts polling right away sees it; the upload and the terminal record
/// write continue on a spawned task. After the hand-off the only observable
/// effect is the record in the store — nobody consumes the task's output.
pub fn start_recognition(
    store: &SharedStore,
    client: &ScanClient,
    inline_image: Option<Vec<u8>>,
    options: ScanOptions,
) -> Result<JoinHandle<()>, AppError> {
    let image = match inline_image.or_else(|| store.load_image()) {
        Some(image) => image,
        None => {
            // fail fast, no network call without an input
            let record = ExpenseRecord::error(AppError::MissingImage.to_string());
            if let Err(e) = store.save_record(&record) {
                error!("failed to write missing-image record: {e}");
            }
            return Err(AppError::MissingImage);
        }
    };

    store.save_record(&ExpenseRecord::analyzing())?;
    info!("scan dispatched ({} bytes), continuing in background", image.len());

    let store = store.clone();
    let client = client.clone();
    let handle = tokio::spawn(async move {
        let record = match client.scan_bill(image, &options).await {
            Ok(response) => record_from_response(response),
            Err(e) => {
                error!("scan failed: {e}");
                ExpenseRecord::error(e.to_string())
            }
        };
        if let Err(e) = store.save_record(&record) {
            error!("failed to write scan result: {e}");
        }
        // input consumed, best-effort cleanup
        store.clear_image();
    });
    Ok(handle)
}

/// Folds every outcome into the two terminal record shapes: a recognized
/// invoice becomes `completed`, everything else becomes `error` with a
/// user-facing message in the merchant field.
fn record_from_response(response: ScanResponse) -> ExpenseRecord {
    if let Some(perf) = &response.performance {
        info!(
            "backend timings: ocr={:.1}s parse={:.1}s total={:.1}s",
            perf.ocr.unwrap_or(0.0),
            perf.parse.unwrap_or(0.0),
            perf.total.unwrap_or(0.0)
        );
    }

    if response.success {
        if let Some(invoice) = response.data.and_then(|d| d.invoice) {
            let merchant = invoice.merchant.unwrap_or_else(|| "未知商家".to_string());
            let amount = invoice.total.unwrap_or(0.0);
            info!("recognized: {merchant} ¥{amount:.2}");
            return ExpenseRecord::completed(merchant, amount);
        }
    }

    let message = response.error.unwrap_or_else(|| "识别失败".to_string());
    ExpenseRecord::error(message)
}
