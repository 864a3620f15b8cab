pub mod error;
pub mod history;
pub mod images;
pub mod models;
pub mod stats;

pub use error::{Result, StoreError};
pub use history::{HistoryStore, HISTORY_CAP};
pub use images::ImageStore;
pub use models::{GenerationRecord, PromptCount, RecentPrompt, StatsSummary};
pub use stats::summarize;
