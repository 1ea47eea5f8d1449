//! StoragePoolStatus value object

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StoragePoolStatus {
    #[default]
    Up,
    Maintenance,
    Disabled,
    /// Removed from inventory; backing cleanup may still be pending
    Removed,
}

impl fmt::Display for StoragePoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoragePoolStatus::Up => write!(f, "Up"),
            StoragePoolStatus::Maintenance => write!(f, "Maintenance"),
            StoragePoolStatus::Disabled => write!(f, "Disabled"),
            StoragePoolStatus::Removed => write!(f, "Removed"),
        }
    }
}
