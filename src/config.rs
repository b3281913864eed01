//! Showcase configuration.
//!
//! Every section is optional; missing keys fall back to the defaults the page
//! script shipped with.
//!
//! ```toml
//! [reveal]
//! threshold = 0.1
//! card_stagger_ms = 150
//! timeline_stagger_ms = 200
//!
//! [reveal.root_margin]
//! bottom = -50.0
//!
//! [counter]
//! element_id = "counter"
//! target = 100
//! duration_ms = 2000
//! start_delay_ms = 800
//!
//! [parallax]
//! speed = 0.5
//! fade_rate = 1.5
//!
//! [scroll]
//! header_offset = 0.0
//! smooth_duration_ms = 400
//!
//! [resize]
//! debounce_ms = 250
//!
//! [cta]
//! press_ms = 150
//!
//! [frame]
//! interval_ms = 16
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShowcaseError};
use crate::types::{Margins, Millis};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub parallax: ParallaxConfig,
    pub scroll: ScrollConfig,
    pub resize: ResizeConfig,
    pub cta: CtaConfig,
    pub frame: FrameConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be inside the root before it counts.
    pub threshold: f32,
    pub root_margin: Margins,
    pub card_stagger_ms: Millis,
    pub timeline_stagger_ms: Millis,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margins::bottom(-50.0),
            card_stagger_ms: 150,
            timeline_stagger_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub element_id: String,
    pub target: u32,
    pub duration_ms: Millis,
    pub start_delay_ms: Millis,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            element_id: "counter".to_string(),
            target: 100,
            duration_ms: 2000,
            start_delay_ms: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub speed: f32,
    pub fade_rate: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { speed: 0.5, fade_rate: 1.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Subtracted from anchor targets (fixed header height).
    pub header_offset: f32,
    pub smooth_duration_ms: Millis,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { header_offset: 0.0, smooth_duration_ms: 400 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub debounce_ms: Millis,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CtaConfig {
    pub press_ms: Millis,
}

impl Default for CtaConfig {
    fn default() -> Self {
        Self { press_ms: 150 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub interval_ms: Millis,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { interval_ms: 16 }
    }
}

impl ShowcaseConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ShowcaseConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.reveal.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ShowcaseError::InvalidConfig(format!(
                "reveal.threshold must be within 0..=1, got {threshold}"
            )));
        }
        if self.frame.interval_ms == 0 {
            return Err(ShowcaseError::InvalidConfig(
                "frame.interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_script() {
        let config = ShowcaseConfig::default();

        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.root_margin, Margins::bottom(-50.0));
        assert_eq!(config.reveal.card_stagger_ms, 150);
        assert_eq!(config.reveal.timeline_stagger_ms, 200);
        assert_eq!(config.counter.target, 100);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.counter.start_delay_ms, 800);
        assert_eq!(config.resize.debounce_ms, 250);
        assert_eq!(config.cta.press_ms, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ShowcaseConfig::from_toml_str(
            r#"
            [reveal]
            card_stagger_ms = 90

            [scroll]
            header_offset = 80.0
            "#,
        )
        .unwrap();

        assert_eq!(config.reveal.card_stagger_ms, 90);
        assert_eq!(config.reveal.timeline_stagger_ms, 200);
        assert_eq!(config.scroll.header_offset, 80.0);
        assert_eq!(config.counter, CounterConfig::default());
    }

    #[test]
    fn test_root_margin_from_toml() {
        let config = ShowcaseConfig::from_toml_str(
            r#"
            [reveal.root_margin]
            top = 10.0
            bottom = -120.0
            "#,
        )
        .unwrap();

        assert_eq!(config.reveal.root_margin, Margins::new(10.0, 0.0, -120.0, 0.0));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = ShowcaseConfig::from_toml_str("[reveal]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, ShowcaseError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_frame_interval_rejected() {
        let err = ShowcaseConfig::from_toml_str("[frame]\ninterval_ms = 0\n").unwrap_err();
        assert!(matches!(err, ShowcaseError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = ShowcaseConfig::from_toml_str("[reveal\n").unwrap_err();
        assert!(matches!(err, ShowcaseError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ShowcaseConfig::load("/nonexistent/showcase.toml").unwrap_err();
        assert!(matches!(err, ShowcaseError::Io(_)));
    }
}
