use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::model::Dataset;
use crate::data::predict::SENSOR_COLUMN;
use crate::data::series;
use crate::error::ViewerError;
use crate::worker::{Operation, TaskRunner, WorkerMessage};

/// Upper bound on worker messages handled in one frame.
const MAX_MESSAGES_PER_FRAME: usize = 64;

pub const PREDICTION_PLACEHOLDER: &str = "Prediction: N/A";
pub const CHART_TITLE: &str = "Sensor Value Over Time";
pub const CHART_TITLE_NO_COLUMNS: &str = "No data or required columns for plotting";
pub const CHART_TITLE_ERROR: &str = "Error: Could not plot data";

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Where the dataset lifecycle currently is.
///
/// `Empty → Loading → {Loaded, LoadFailed}`, `Loaded → Predicting → Loaded`,
/// and `Loaded | LoadFailed → Loading` for refresh or reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loading,
    Loaded,
    LoadFailed,
    Predicting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Error,
    Warning,
}

/// A modal message box waiting to be dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: "Error".into(),
            message: message.into(),
        }
    }

    fn warning(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// What the chart panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    /// `[seconds since epoch, sensor_value]`, ordered by time.
    pub points: Vec<[f64; 2]>,
}

impl Chart {
    fn empty(title: &str) -> Self {
        Self {
            title: title.into(),
            points: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Only the UI thread touches this. Workers report through the
/// [`TaskRunner`] channel and [`AppState::process_worker_messages`] applies
/// their results, which makes it the single writer of the dataset.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded dataset (None until the first successful load).
    pub dataset: Option<Dataset>,

    pub phase: Phase,

    /// Plain-text rendering of `dataset`.
    pub table_text: String,

    /// Text of the prediction label.
    pub prediction_label: String,

    pub chart: Chart,

    /// Append-only log pane contents.
    pub log_lines: Vec<String>,

    /// Modal dialog currently shown, if any.
    pub dialog: Option<Dialog>,

    runner: TaskRunner,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let mut state = Self {
            config,
            dataset: None,
            phase: Phase::Empty,
            table_text: String::new(),
            prediction_label: PREDICTION_PLACEHOLDER.into(),
            chart: Chart::empty(CHART_TITLE),
            log_lines: Vec::new(),
            dialog: None,
            runner: TaskRunner::new(),
        };
        state.log("Application started. Please load a CSV file.");
        state
    }

    /// Let workers wake the UI when they post results.
    pub fn attach_context(&mut self, ctx: egui::Context) {
        self.runner.attach_context(ctx);
    }

    // ---- Control enablement ----

    /// An operation is running on a worker; every trigger is rejected.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Predicting)
    }

    pub fn can_load(&self) -> bool {
        !self.is_busy()
    }

    pub fn can_predict(&self) -> bool {
        self.phase == Phase::Loaded
    }

    pub fn can_refresh(&self) -> bool {
        self.phase == Phase::Loaded
    }

    // ---- Commands ----

    /// Load Data button.
    pub fn start_load(&mut self) {
        if !self.can_load() {
            log::debug!("load ignored while {:?}", self.phase);
            return;
        }
        self.log("Attempting to load data...");
        self.begin_load(Operation::Load);
    }

    /// Refresh button: reload the same file from a loaded state.
    pub fn start_refresh(&mut self) {
        if !self.can_refresh() {
            log::debug!("refresh ignored while {:?}", self.phase);
            return;
        }
        self.log("Refreshing data...");
        self.begin_load(Operation::Refresh);
    }

    /// Predict button.
    pub fn start_predict(&mut self) {
        if self.is_busy() {
            log::debug!("predict ignored while {:?}", self.phase);
            return;
        }
        let Some(dataset) = &self.dataset else {
            self.dialog = Some(Dialog::warning(
                "No Data",
                "Please load data first before predicting.",
            ));
            self.log_warn("Prediction failed: No data loaded.");
            return;
        };
        if !self.can_predict() {
            log::debug!("predict needs a successful load, phase is {:?}", self.phase);
            return;
        }

        let snapshot = dataset.clone();
        self.log("Computing prediction...");
        self.phase = Phase::Predicting;
        if let Err(e) = self
            .runner
            .spawn_predict(snapshot, self.config.calibration_threshold)
        {
            self.fail_predict(&e);
        }
    }

    fn begin_load(&mut self, op: Operation) {
        self.phase = Phase::Loading;
        if let Err(e) = self.runner.spawn_load(op, self.config.data_path.clone()) {
            self.fail_load(&e);
        }
    }

    /// Dismiss the open dialog (OK button).
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    // ---- Worker results ----

    /// Drain pending worker messages and apply them. Called once per frame;
    /// returns `true` if anything changed.
    pub fn process_worker_messages(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_MESSAGES_PER_FRAME {
            let Some(msg) = self.runner.try_recv() else {
                break;
            };
            changed = true;
            self.apply(msg);
        }
        changed
    }

    fn apply(&mut self, msg: WorkerMessage) {
        match msg {
            WorkerMessage::Log(line) => self.log(line),
            WorkerMessage::DatasetLoaded { op, result } => match result {
                Ok(dataset) => self.install_dataset(op, dataset),
                Err(e) => self.fail_load(&e),
            },
            WorkerMessage::PredictionReady(result) => match result {
                Ok(outcome) => {
                    self.prediction_label = format!("Prediction: {}", outcome.prediction);
                    self.log("Prediction complete.");
                    self.phase = Phase::Loaded;
                }
                Err(e) => self.fail_predict(&e),
            },
            WorkerMessage::Aborted(op) => {
                let err = ViewerError::Worker(format!("{op:?} stopped unexpectedly"));
                match (op, self.phase) {
                    (Operation::Predict, Phase::Predicting) => self.fail_predict(&err),
                    (Operation::Load | Operation::Refresh, Phase::Loading) => self.fail_load(&err),
                    // Spawn failures are already reported by the caller.
                    _ => log::debug!("ignoring abort of {op:?} while {:?}", self.phase),
                }
            }
        }
    }

    fn install_dataset(&mut self, op: Operation, dataset: Dataset) {
        log::info!(
            "{op:?}: {} rows with columns {:?}",
            dataset.len(),
            dataset.columns
        );
        self.table_text = dataset.to_table_string();
        self.dataset = Some(dataset);
        self.phase = Phase::Loaded;
        self.log("Data loaded successfully.");
        self.replot();
    }

    fn fail_load(&mut self, err: &ViewerError) {
        let (dialog, line) = match err {
            ViewerError::FileNotFound(path) => (
                err.to_string(),
                format!("Error: File not found at {}", path.display()),
            ),
            ViewerError::EmptyData => (err.to_string(), "Error: CSV file is empty.".into()),
            other => (
                format!("An error occurred: {other}"),
                format!("Error loading data: {other}"),
            ),
        };
        self.dialog = Some(Dialog::error(dialog));
        self.log_error(line);
        self.phase = Phase::LoadFailed;
    }

    fn fail_predict(&mut self, err: &ViewerError) {
        let line = match err {
            ViewerError::MissingColumn(_) => {
                self.dialog = Some(Dialog::error(err.to_string()));
                format!("Prediction failed: '{SENSOR_COLUMN}' column missing.")
            }
            other => {
                self.dialog = Some(Dialog::error(format!(
                    "An error occurred during prediction: {other}"
                )));
                format!("Error during prediction: {other}")
            }
        };
        self.log_error(line);
        self.phase = if self.dataset.is_some() {
            Phase::Loaded
        } else {
            Phase::Empty
        };
    }

    /// Rebuild the chart from the current dataset.
    pub fn replot(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.chart = Chart::empty(CHART_TITLE_NO_COLUMNS);
            return;
        };
        match series::build_series(dataset) {
            Ok(Some(points)) => {
                self.chart = Chart {
                    title: CHART_TITLE.into(),
                    points,
                };
                self.log("Plot updated successfully.");
            }
            Ok(None) => {
                self.chart = Chart::empty(CHART_TITLE_NO_COLUMNS);
            }
            Err(e) => {
                self.chart = Chart::empty(CHART_TITLE_ERROR);
                self.log_error(format!("Error plotting data: {e}"));
            }
        }
    }

    // ---- Log pane ----

    fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{line}");
        self.log_lines.push(line);
    }

    fn log_warn(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::warn!("{line}");
        self.log_lines.push(line);
    }

    fn log_error(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::error!("{line}");
        self.log_lines.push(line);
    }
}
