use serde::{Deserialize, Serialize};

use crate::error::CloudError;

/// Runtime configuration for one layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Clear space kept around every word and inside the canvas border.
    pub buffer: f64,
    /// Font size of the lightest word under the default weight resolver.
    pub min_font_size: f64,
    /// Font size of a word whose weight equals `weight_scale`.
    pub max_font_size: f64,
    /// Weight that maps to `max_font_size`.
    pub weight_scale: f64,
    /// Font used by the default weight resolver.
    pub font_name: String,
    /// Draw white instead of black text with the default resolver.
    pub dark_appearance: bool,
    /// Enlarge the canvas until every word is placed.
    pub grow_to_fit: bool,
    /// While growing, give up on a word as soon as a free candidate crosses
    /// the border instead of searching the periphery.
    pub tight_packing: bool,
    /// Fraction added to each side by the default growth function.
    pub growth_factor: f64,
    /// Upper bound on growth steps, preflight and runtime counted separately.
    pub max_growth_iterations: usize,
    /// Upper bound on candidate points tried for a single word.
    pub max_placement_steps: usize,
    /// Seed for the placement function's randomness. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Record the placement path over the final canvas in the result.
    pub debug: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            buffer: 10.0,
            min_font_size: 10.0,
            max_font_size: 60.0,
            weight_scale: 10.0,
            font_name: "TrebuchetMS-Bold".to_string(),
            dark_appearance: false,
            grow_to_fit: true,
            tight_packing: true,
            growth_factor: 0.1,
            max_growth_iterations: 500,
            max_placement_steps: 250_000,
            seed: None,
            debug: false,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, CloudError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, CloudError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), CloudError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CloudError::Config(format!("{name} must be positive, got {v}")))
            }
        };
        if !self.buffer.is_finite() || self.buffer < 0.0 {
            return Err(CloudError::Config(format!(
                "buffer must be non-negative, got {}",
                self.buffer
            )));
        }
        positive("min_font_size", self.min_font_size)?;
        positive("max_font_size", self.max_font_size)?;
        positive("weight_scale", self.weight_scale)?;
        positive("growth_factor", self.growth_factor)?;
        if self.max_font_size < self.min_font_size {
            return Err(CloudError::Config(format!(
                "max_font_size {} is below min_font_size {}",
                self.max_font_size, self.min_font_size
            )));
        }
        if self.font_name.is_empty() {
            return Err(CloudError::Config("font_name is empty".into()));
        }
        if self.max_growth_iterations == 0 || self.max_placement_steps == 0 {
            return Err(CloudError::Config(
                "iteration limits must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = LayoutConfig::from_json(r#"{"buffer": 4, "grow_to_fit": false, "seed": 7}"#).unwrap();
        assert_eq!(cfg.buffer, 4.0);
        assert!(!cfg.grow_to_fit);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.max_font_size, 60.0);
    }

    #[test]
    fn rejects_inverted_font_range() {
        let err = LayoutConfig::from_json(r#"{"min_font_size": 30, "max_font_size": 20}"#).unwrap_err();
        assert!(matches!(err, CloudError::Config(_)));
    }

    #[test]
    fn json_roundtrip_keeps_fields() {
        let cfg = LayoutConfig {
            debug: true,
            seed: Some(11),
            ..LayoutConfig::default()
        };
        let back = LayoutConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
