//! Run every configured series through build → fetch → latest, in order.

use crate::api::Fetch;
use crate::config::Settings;
use crate::error::Result;
use crate::latest::{LatestView, to_latest_view};
use crate::models::ApiEnvelope;
use crate::request::request_for;
use crate::resolve::resolve_category;
use crate::summary::render_latest_summary;
use log::info;
use serde::Serialize;

/// Everything one run produces. `raw[i]` and `latest[i]` belong to
/// `settings.series()[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub raw: Vec<ApiEnvelope>,
    pub latest: Vec<LatestView>,
    pub summary: String,
}

/// Fetch all series one after another.
///
/// Fail-fast: the first request or fetch error is returned immediately, no
/// further series are requested, and results gathered so far are dropped.
pub fn run<F: Fetch + ?Sized>(fetcher: &F, settings: &Settings) -> Result<PipelineOutput> {
    let series = settings.series();
    info!(
        "fetching {} series for area {}",
        series.len(),
        settings.area_code()
    );

    let mut raw = Vec::with_capacity(series.len());
    for spec in series {
        info!("statsDataId {}: start", spec.statistics_id);
        let request = request_for(settings, spec)?;
        let envelope = fetcher.fetch(&request)?;

        if let Some(cat) = resolve_category(&envelope) {
            let names: Vec<&str> = cat.classes.iter().map(|c| c.name.as_str()).collect();
            info!("category {:?}: {}", cat.name, names.join(", "));
        }
        info!(
            "statsDataId {}: {} observations",
            spec.statistics_id,
            envelope.observation_count()
        );
        raw.push(envelope);
    }

    let latest: Vec<LatestView> = raw.iter().map(to_latest_view).collect();
    let summary = render_latest_summary(&latest);
    Ok(PipelineOutput {
        raw,
        latest,
        summary,
    })
}
