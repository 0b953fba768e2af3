use serde::{Deserialize, Serialize};
use std::sync::mpsc::SyncSender;

/// One record per root candidate examined by a search: what was tried,
/// the running best and the work done so far. Serializable so an outer
/// layer can forward records across a worker or process boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProgress {
    pub move_number: usize,
    pub total_moves: usize,
    pub move_text: String,
    pub best_text: String,
    pub score: i32,
    pub boards_evaluated: u64,
}

/// Destination for progress records, registered before a search starts.
/// Publication is a notification only: no control flows back into the
/// engine, and implementations must never block it.
pub trait ProgressSink {
    fn publish(&mut self, progress: &SearchProgress);
}

/// A bounded channel as a sink: when the receiver lags or is gone, the
/// record is dropped rather than awaited.
impl ProgressSink for SyncSender<SearchProgress> {
    fn publish(&mut self, progress: &SearchProgress) {
        let _ = self.try_send(progress.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_full_channel_drops_instead_of_blocking() {
        let (tx, rx) = mpsc::sync_channel(1);
        let mut sink = tx;
        let record = SearchProgress {
            move_number: 1,
            total_moves: 3,
            move_text: "e4".to_string(),
            best_text: "e4".to_string(),
            score: 12,
            boards_evaluated: 100,
        };

        // Capacity one: the second and third publishes are dropped.
        sink.publish(&record);
        sink.publish(&record);
        sink.publish(&record);

        assert_eq!(rx.recv().unwrap().move_number, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_disconnected_receiver_is_harmless() {
        let (tx, rx) = mpsc::sync_channel::<SearchProgress>(1);
        drop(rx);
        let mut sink = tx;
        sink.publish(&SearchProgress {
            move_number: 1,
            total_moves: 1,
            move_text: "--".to_string(),
            best_text: "--".to_string(),
            score: 0,
            boards_evaluated: 0,
        });
    }
}
