use std::path::PathBuf;

/// Path the Load and Refresh commands read from.
pub const DEFAULT_DATA_PATH: &str = "./data.csv";

/// A `sensor_value` mean strictly above this asks for calibration.
pub const CALIBRATION_THRESHOLD: f64 = 50.0;

/// The two fixed values the viewer works with. The application always runs
/// with [`ViewerConfig::default`]; tests point it at temporary files.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub data_path: PathBuf,
    pub calibration_threshold: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            calibration_threshold: CALIBRATION_THRESHOLD,
        }
    }
}
