use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Transfer state reported by object storage while an upload is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    pub bytes_transferred: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    pub fn new(bytes_transferred: u64, total_bytes: u64) -> Self {
        Self {
            bytes_transferred,
            total_bytes,
        }
    }

    /// Whole percentage in 0..=100. An empty upload counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }

        let transferred = self.bytes_transferred.min(self.total_bytes) as f64;
        ((transferred / self.total_bytes as f64) * 100.0).round() as u8
    }
}

/// Invoked by storage implementations as bytes are handed to the transport
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::UploadProgress;

    #[test]
    fn percent_rounds_to_nearest_whole_number() {
        assert_eq!(UploadProgress::new(0, 3).percent(), 0);
        assert_eq!(UploadProgress::new(1, 3).percent(), 33);
        assert_eq!(UploadProgress::new(2, 3).percent(), 67);
        assert_eq!(UploadProgress::new(3, 3).percent(), 100);
    }

    #[test]
    fn percent_is_clamped_and_handles_empty_uploads() {
        assert_eq!(UploadProgress::new(10, 5).percent(), 100);
        assert_eq!(UploadProgress::new(0, 0).percent(), 100);
    }
}
