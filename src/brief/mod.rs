use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::template::var;

/// Marker substituted for brief placeholders when a refine call has no
/// original brief, so the model is not misled by blank values.
pub const UNAVAILABLE: &str = "(not provided)";

/// Campaign parameters collected from the user; the input to `generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Brief {
    pub product_name: String,
    pub product_category: String,
    pub product_features: String,
    pub target_audience: String,
    pub marketing_goals: Vec<String>,
    pub kpi_metrics: Vec<String>,
    pub budget: String,
    pub platforms: Vec<String>,
    pub event_duration: String,
    pub prizes: Option<String>,
    pub brand_tone: Option<String>,
    pub additional_info: Option<String>,
    pub reference_links: Option<String>,
}

impl Brief {
    /// Reads a brief from TOML or JSON, picked by file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs_err::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON brief {}", path.display())),
            _ => toml::from_str(&text)
                .with_context(|| format!("invalid TOML brief {}", path.display())),
        }
    }

    /// Placeholder bindings for the user-input and feedback templates.
    pub fn variables(&self) -> Vec<(String, String)> {
        vec![
            var("productCategory", self.product_category.clone()),
            var("productName", self.product_name.clone()),
            var("productFeatures", self.product_features.clone()),
            var("kpiMetrics", self.kpi_metrics.join(", ")),
            var("targetAudience", self.target_audience.clone()),
            var("budget", self.budget.clone()),
            var("eventDuration", self.event_duration.clone()),
        ]
    }

    /// The same binding keys with every value forced to the explicit
    /// unavailable marker.
    pub fn unavailable_variables() -> Vec<(String, String)> {
        Brief::default()
            .variables()
            .into_iter()
            .map(|(name, _)| (name, UNAVAILABLE.to_string()))
            .collect()
    }
}
