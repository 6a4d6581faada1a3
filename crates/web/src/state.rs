use std::sync::Arc;

use storage::{AdminKeys, MediaStore, RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub records: RecordStore,
    pub media: Arc<dyn MediaStore>,
    pub admin_keys: AdminKeys,
}

impl AppState {
    pub fn new(records: RecordStore, media: Arc<dyn MediaStore>, admin_keys: AdminKeys) -> Self {
        Self {
            records,
            media,
            admin_keys,
        }
    }
}
