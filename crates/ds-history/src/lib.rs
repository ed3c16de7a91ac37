//! Record of documentation runs: the source before and after insertion.

pub mod file;
pub mod memory;
pub mod record;
pub mod traits;

pub use file::FileHistoryStore;
pub use memory::MemoryHistoryStore;
pub use record::HistoryRecord;
pub use traits::HistoryStore;
