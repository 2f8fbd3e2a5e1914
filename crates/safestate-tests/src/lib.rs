pub mod fixtures;
pub mod test_env;

// Re-export key testing utilities
pub use fixtures::{PIPELINE, PRINTER_SCANNER, TEXTBOOK, fixture_path, load_fixture};
pub use test_env::{CommandRun, TestEnvironment};
