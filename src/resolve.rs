//! Turn coded axis values into display names using the response's own
//! `CLASS_INF` metadata.
//!
//! Every lookup here is total: a missing axis, an empty axis, or an unknown
//! code yields `None` (or the code itself for time labels), never an error.

use crate::models::{ApiEnvelope, ClassAxis, ClassEntry};
use crate::schema::find_first;
use serde::{Deserialize, Serialize};

pub const CATEGORY_AXIS: &str = "cat01";
pub const AREA_AXIS: &str = "area";
pub const TIME_AXIS: &str = "time";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryClass {
    pub code: String,
    pub name: String,
    pub level: String,
    pub unit: Option<String>,
}

/// The `cat01` axis, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    pub classes: Vec<CategoryClass>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaLabel {
    pub code: String,
    pub name: String,
    pub level: String,
    pub parent_code: Option<String>,
}

/// Axis with id `axis_id`, provided it has at least one entry.
pub fn find_axis<'a>(envelope: &'a ApiEnvelope, axis_id: &str) -> Option<&'a ClassAxis> {
    find_first(envelope.classifications(), |a| a.id == axis_id)
        .filter(|a| !a.entries().is_empty())
}

/// Entry with `code` on axis `axis_id`.
pub fn find_entry<'a>(
    envelope: &'a ApiEnvelope,
    axis_id: &str,
    code: &str,
) -> Option<&'a ClassEntry> {
    find_axis(envelope, axis_id).and_then(|a| find_first(a.entries(), |e| e.code == code))
}

pub fn resolve_category(envelope: &ApiEnvelope) -> Option<CategoryInfo> {
    let axis = find_axis(envelope, CATEGORY_AXIS)?;
    Some(CategoryInfo {
        id: axis.id.clone(),
        name: axis.name.clone(),
        classes: axis
            .entries()
            .iter()
            .map(|e| CategoryClass {
                code: e.code.clone(),
                name: e.name.clone(),
                level: e.level.clone(),
                unit: e.unit.clone(),
            })
            .collect(),
    })
}

/// The area the response was filtered to. A municipal query carries one
/// area entry; with several, the first is reported.
pub fn resolve_area_label(envelope: &ApiEnvelope) -> Option<AreaLabel> {
    let entry = find_axis(envelope, AREA_AXIS)?.entries().first()?;
    Some(AreaLabel {
        code: entry.code.clone(),
        name: entry.name.clone(),
        level: entry.level.clone(),
        parent_code: entry.parent_code.clone(),
    })
}

/// Display name for `time_code`, or `time_code` itself when it can't be
/// resolved (including an entry whose name is blank).
pub fn resolve_time_label(envelope: &ApiEnvelope, time_code: &str) -> String {
    resolve_code_label(envelope, TIME_AXIS, time_code)
}

/// Same as [`resolve_time_label`] for any axis.
pub fn resolve_code_label(envelope: &ApiEnvelope, axis_id: &str, code: &str) -> String {
    find_entry(envelope, axis_id, code)
        .map(|e| e.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(code)
        .to_string()
}
