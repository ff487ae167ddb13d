use serde::{Deserialize, Serialize};

/// Scan status carried in the shared record. `Analyzing` is written before
/// the network call starts; the other two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Analyzing,
    Completed,
    Error,
}

impl ScanStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analyzing => write!(f, "analyzing"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for ScanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analyzing" => Ok(Self::Analyzing),
            "completed" => Ok(Self::Completed),
            "error" => Ok(Self::Error),
            _ => Err(format!("unknown scan status: {s}")),
        }
    }
}

/// The single-slot record exchanged between the producer and consumer
/// processes. When `status` is `Error`, the merchant field carries the
/// user-facing error message and `amount` is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub status: ScanStatus,
    pub merchant: String,
    pub amount: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ExpenseRecord {
    pub fn analyzing() -> Self {
        Self {
            status: ScanStatus::Analyzing,
            merchant: String::new(),
            amount: 0.0,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn completed(merchant: impl Into<String>, amount: f64) -> Self {
        Self {
            status: ScanStatus::Completed,
            merchant: merchant.into(),
            amount,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ScanStatus::Error,
            merchant: message.into(),
            amount: 0.0,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Currency rendering used by every result surface.
pub fn format_amount(amount: f64) -> String {
    format!("¥{amount:.2}")
}
