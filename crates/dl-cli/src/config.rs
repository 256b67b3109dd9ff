use std::path::PathBuf;

use dl_compiler::OutputFormat;

pub const DEFAULT_DATA_PATH: &str = "./data";
pub const DEFAULT_OUTPUT_DIR: &str = "./generated";

/// Settings for one compile run, passed explicitly to every stage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory scanned for list files
    pub data_path: PathBuf,
    /// Directory receiving `<group>.list` files
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Report failing lists and continue instead of stopping at the first
    pub keep_going: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::default(),
            keep_going: false,
        }
    }
}
