pub mod activity;
pub mod entries;
pub mod inventory;

pub use activity::ActivityLog;
pub use entries::Entries;
pub use inventory::Store;
