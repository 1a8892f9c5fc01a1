#![forbid(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod ingest;
pub mod model;
pub mod navigator;
pub mod scale;
pub mod scene;
pub mod scenes;
pub mod surface;

pub use error::{ScrollyError, ScrollyResult};
pub use ingest::{RawRecord, dataset_from_json, dataset_from_raw};
pub use model::{Dataset, Metric, RegionSummary, Row, Summaries};
pub use navigator::{Chrome, ControlState, Navigator, NextLabel};
pub use scene::{RegistryBuilder, Scene, SceneDescriptor, SceneRegistry};
pub use scenes::standard_registry;
pub use surface::{AxisOrient, Recorder, Surface, SurfaceOp, TextAnchor, Tick};
