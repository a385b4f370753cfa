pub mod codec;
pub mod files;
pub mod import;
pub mod store;

pub use codec::{save_state, start_session};
pub use files::{
    atomic_write, config_file, ensure_data_dir, get_data_dir, init_local_dir, read_file,
    report_file, store_dir,
};
pub use import::{import_browser_dump, ImportSummary};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
