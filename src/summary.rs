//! Plain-text reports over fetched responses.
//!
//! Missing strings print as `N/A`. A dataset without a `cat01` axis simply
//! has no category lines.

use crate::latest::LatestView;
use crate::models::{ApiEnvelope, TableInfo};
use crate::resolve::{
    CATEGORY_AXIS, resolve_area_label, resolve_category, resolve_time_label,
};

const NA: &str = "N/A";

fn or_na(s: Option<&str>) -> &str {
    s.filter(|s| !s.is_empty()).unwrap_or(NA)
}

fn table_id(table: Option<&TableInfo>) -> &str {
    or_na(table.map(|t| t.id.as_str()))
}

/// Overview of full responses: table metadata, the category axis, and the
/// number of observations per dataset.
pub fn render_overview(results: &[ApiEnvelope]) -> String {
    let mut lines = vec!["Fetched datasets:".to_string()];

    for (i, env) in results.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("Dataset {}:", i + 1));

        if let Some(t) = env.table_info() {
            lines.push(format!("- Statistics ID: {}", table_id(Some(t))));
            lines.push(format!("- Statistics name: {}", or_na(t.statistics_name())));
            lines.push(format!("- Title: {}", or_na(t.title())));
            lines.push(format!("- Main category: {}", or_na(t.main_category())));
            lines.push(format!("- Sub category: {}", or_na(t.sub_category())));
            if let Some(tab) = t.tabulation_category() {
                lines.push(format!("- Tabulation category: {}", tab));
            }
        }

        if let Some(cat) = resolve_category(env) {
            lines.push(String::new());
            lines.push("Category:".to_string());
            lines.push(format!("- Category ID: {}", cat.id));
            lines.push(format!("- Category name: {}", cat.name));
            if !cat.classes.is_empty() {
                lines.push(String::new());
                lines.push("Category classes:".to_string());
                for c in &cat.classes {
                    lines.push(format!("  * Code: {}", c.code));
                    lines.push(format!("    Name: {}", c.name));
                    lines.push(format!("    Unit: {}", c.unit.as_deref().unwrap_or("unspecified")));
                }
            }
        }

        lines.push(String::new());
        lines.push(format!("- Observations: {}", env.observation_count()));
    }

    lines.join("\n") + "\n"
}

/// Summary of latest views. The area block is taken from the first view;
/// views without an observation are skipped but keep their dataset number.
/// The data item is the category class the observation is coded with, or the
/// first class when that code is missing from `CLASS_INF`.
pub fn render_latest_summary(views: &[LatestView]) -> String {
    let mut lines = vec!["Latest data:".to_string()];

    if let Some(area) = views.first().and_then(|v| resolve_area_label(v.envelope())) {
        lines.push(String::new());
        lines.push("Area:".to_string());
        lines.push(format!("- Code: {}", or_na(Some(area.code.as_str()))));
        lines.push(format!("- Name: {}", or_na(Some(area.name.as_str()))));
        lines.push(format!("- Level: {}", or_na(Some(area.level.as_str()))));
        if let Some(parent) = area.parent_code.as_deref().filter(|p| !p.is_empty()) {
            lines.push(format!("- Parent code: {}", parent));
        }
    }

    for (i, view) in views.iter().enumerate() {
        let Some(obs) = view.observation() else {
            continue;
        };
        let env = view.envelope();
        let table = env.table_info();

        lines.push(String::new());
        lines.push(format!("Dataset {}:", i + 1));
        lines.push(format!("- Statistics ID: {}", table_id(table)));
        lines.push(format!(
            "- Statistics name: {}",
            or_na(table.and_then(TableInfo::statistics_name))
        ));
        lines.push(format!(
            "- Main category: {}",
            or_na(table.and_then(TableInfo::main_category))
        ));
        lines.push(format!(
            "- Sub category: {}",
            or_na(table.and_then(TableInfo::sub_category))
        ));

        if let Some(class) = resolve_category(env).and_then(|c| {
            let own = obs.code(CATEGORY_AXIS);
            let pos = c.classes.iter().position(|k| Some(k.code.as_str()) == own);
            c.classes.into_iter().nth(pos.unwrap_or(0))
        }) {
            lines.push(format!(
                "- Data item: {} ({})",
                class.name,
                class.unit.as_deref().unwrap_or("no unit")
            ));
        }

        lines.push(format!("- Time: {}", resolve_time_label(env, &obs.time)));
        let value = format!("{} {}", obs.value, obs.unit.as_deref().unwrap_or(""));
        lines.push(format!("- Value: {}", value.trim_end()));
    }

    lines.join("\n") + "\n"
}
