//! Resume analyser shell: the form controller, the host page it drives and a
//! command-line adapter.
pub mod platform;

pub use platform::app::run_app;
pub use platform::cli::Cli;
pub use platform::config::{load_config, read_config, AnalyserConfig, ConfigError, CONFIG_FILENAME};
pub use platform::controller::{AttachError, FormController};
pub use platform::ui::page::{ElementId, ElementState, HeadlessPage, Page, PageCommand};
