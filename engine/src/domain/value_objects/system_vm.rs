//! System VM type and state value objects

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemVmType {
    ConsoleProxy,
    SecondaryStorageVm,
}

impl fmt::Display for SystemVmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemVmType::ConsoleProxy => write!(f, "consoleproxy"),
            SystemVmType::SecondaryStorageVm => write!(f, "secondarystoragevm"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SystemVmState {
    Starting,
    #[default]
    Running,
    Stopped,
    Destroyed,
}

impl SystemVmState {
    pub fn can_destroy(&self) -> bool {
        !matches!(self, SystemVmState::Destroyed)
    }
}

impl fmt::Display for SystemVmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemVmState::Starting => write!(f, "Starting"),
            SystemVmState::Running => write!(f, "Running"),
            SystemVmState::Stopped => write!(f, "Stopped"),
            SystemVmState::Destroyed => write!(f, "Destroyed"),
        }
    }
}
