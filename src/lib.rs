//! estat_rs
//!
//! A small Rust library for retrieving official statistics for a municipality
//! from the e-Stat API (`getStatsData`) and reducing them to readable form.
//! Pairs with the `estat` CLI.
//!
//! ### Features
//! - Build `getStatsData` requests from layered configuration
//! - Fetch and validate responses, with API-reported errors kept separate from
//!   transport failures
//! - Tolerate the response's single-object-or-array node shapes everywhere
//! - Resolve category/area/time codes to their display names
//! - Reduce each response to its latest observation and render a summary
//!
//! ### Example
//! ```no_run
//! use estat_rs::config::{ConfigLayer, SeriesSpec, SettingsBuilder};
//! use estat_rs::{Client, pipeline, storage};
//!
//! let settings = SettingsBuilder::new()
//!     .merge(ConfigLayer {
//!         app_id: Some("YOUR_APP_ID".into()),
//!         area_code: Some("13101".into()),
//!         stats_data: Some(vec![
//!             SeriesSpec::new("0000020201").category("A1101").time_from("2000100000"),
//!         ]),
//!         ..Default::default()
//!     })
//!     .build()?;
//! let out = pipeline::run(&Client::new()?, &settings)?;
//! let dir = storage::create_timestamp_folder(settings.output_dir())?;
//! storage::write_outputs(&dir, &out)?;
//! print!("{}", out.summary);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod latest;
pub mod models;
pub mod pipeline;
pub mod request;
pub mod resolve;
pub mod schema;
pub mod storage;
pub mod summary;

pub use api::{Client, Fetch};
pub use error::EstatError;
pub use latest::{LatestView, to_latest_view};
pub use models::{ApiEnvelope, Flag, Lang, Observation, StatsQuery};
pub use resolve::{
    AreaLabel, CategoryInfo, resolve_area_label, resolve_category, resolve_time_label,
};
