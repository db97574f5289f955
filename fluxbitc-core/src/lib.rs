//! Core library for burning timecode and metadata overlays onto proxy video.
//!
//! All media work is delegated to ffprobe and ffmpeg. This crate loads the
//! preset configuration, derives template data from the probed stream,
//! renders the preset into a `drawtext` filter chain and assembles and runs
//! the single ffmpeg command.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use fluxbitc_core::config::Config;
//! use fluxbitc_core::external::{CommandFfprobeExecutor, EncodeSettings, ProcessRunner};
//! use fluxbitc_core::{EncodeJob, execute_plan, prepare_encode};
//! use std::path::{Path, PathBuf};
//!
//! let config = Config::load(Path::new("config.json")).unwrap();
//! let job = EncodeJob {
//!     input: PathBuf::from("A001_C002.mov"),
//!     output: PathBuf::from("A001_C002_proxy.mov"),
//!     preset: "default".to_string(),
//!     data: vec!["vendor=ACME".to_string()],
//!     settings: EncodeSettings::default(),
//! };
//!
//! let probe = CommandFfprobeExecutor::new(config.path.ffprobe.clone());
//! let plan = prepare_encode(&config, &job, &probe, chrono::Utc::now()).unwrap();
//! let outcome = execute_plan(&plan, &ProcessRunner).unwrap();
//! std::process::exit(outcome.exit_code());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod metadata;
pub mod overlay;
pub mod pipeline;
pub mod userdata;
pub mod utils;

// Re-exports for public API
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use pipeline::{EncodeJob, EncodeOutcome, EncodePlan, execute_plan, prepare_encode};
pub use userdata::UserData;
pub use utils::{format_elapsed, format_file_size, format_probe_duration};
