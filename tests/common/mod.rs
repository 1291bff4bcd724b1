#![allow(dead_code)]

#[allow(unused_imports)]
pub use ram_test_utils::builders::{GoSourceBuilder, go_test_builder};
#[allow(unused_imports)]
pub use ram_test_utils::fake_executor::RecordingExecutor;
#[allow(unused_imports)]
pub use ram_test_utils::{init_tracing, with_timeout};

use ram::types::{Operation, WatchEvent};

pub fn write_event(path: &str) -> WatchEvent {
    WatchEvent::new(path, Operation::WRITE)
}

pub fn create_event(path: &str) -> WatchEvent {
    WatchEvent::new(path, Operation::CREATE)
}
