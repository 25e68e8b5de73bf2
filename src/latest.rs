//! Reduce a response to its most recent observation.

use crate::models::{ApiEnvelope, Observation};
use crate::schema::OneOrMany;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// An envelope whose observation node holds at most one value: the one with
/// the highest time code. Serializes exactly like an [`ApiEnvelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatestView(ApiEnvelope);

impl LatestView {
    pub fn envelope(&self) -> &ApiEnvelope {
        &self.0
    }

    pub fn into_envelope(self) -> ApiEnvelope {
        self.0
    }

    pub fn observation(&self) -> Option<&Observation> {
        self.0.observations().and_then(OneOrMany::first)
    }
}

impl AsRef<ApiEnvelope> for LatestView {
    fn as_ref(&self) -> &ApiEnvelope {
        &self.0
    }
}

/// Derive the latest view of `envelope` without touching the input.
///
/// Observations are ordered by numeric time code, descending, with a stable
/// sort, so among equal time codes the first one in the response wins.
/// Non-numeric time codes rank below all numeric ones. `RESULT_INF` counts are
/// rewritten to 1/1/1. A response with no observations (absent node or empty
/// array) comes back as an equal copy.
pub fn to_latest_view(envelope: &ApiEnvelope) -> LatestView {
    let mut out = envelope.clone();

    let Some(data) = out.body.data.as_mut() else {
        return LatestView(out);
    };
    let Some(values) = data.data_inf.as_mut().and_then(|d| d.values.as_mut()) else {
        return LatestView(out);
    };
    if values.is_empty() {
        return LatestView(out);
    }

    let mut sorted = std::mem::take(values).into_vec();
    sorted.sort_by_key(|o| Reverse(o.time_key()));
    sorted.truncate(1);
    *values = OneOrMany::Many(sorted);

    if let Some(meta) = data.result_meta.as_mut() {
        meta.total = Some(1);
        meta.from = Some(1);
        meta.to = Some(1);
    }
    LatestView(out)
}
