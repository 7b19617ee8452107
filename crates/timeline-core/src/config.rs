//! Typed configuration for the timeline controllers
//!
//! There is no external configuration surface: the browser adapter installs
//! `TimelineConfig::default()`, whose values match the observed behavior of
//! the timeline script. The types exist so every constant has one home and
//! so that embedding hosts and tests can override individual values.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{TimelineError, TimelineResult};
use crate::style::Transition;

/// Selectors and names used to find elements and mark state in the host document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Selector for timeline items
    pub item: String,
    /// Class marking an item as laid out on the left
    pub left_class: String,
    /// Selector for an item's marker, relative to the item
    pub marker: String,
    /// Selector for an item's card, relative to the item
    pub card: String,
    /// Selector for the timeline container
    pub container: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            item: ".timeline-item".to_string(),
            left_class: "left".to_string(),
            marker: ".timeline-marker".to_string(),
            card: ".timeline-card".to_string(),
            container: ".timeline-enhanced".to_string(),
        }
    }
}

/// Reveal scheduling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the item's area that must be visible
    pub threshold: f64,
    /// Pixels by which the viewport's bottom edge is pulled up
    pub bottom_margin: f64,
    /// Delay added per position in a visibility batch
    #[serde(with = "crate::style::duration_ms")]
    pub stagger_step: Duration,
    /// Initial horizontal offset magnitude in px
    pub offset: f64,
    /// Transition installed on every item
    pub transition: Transition,
    /// Class added to a revealed item's marker
    pub marker_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            bottom_margin: 100.0,
            stagger_step: Duration::from_millis(100),
            offset: 50.0,
            transition: Transition::uniform(
                ["opacity", "transform"],
                Duration::from_millis(800),
                "ease",
            ),
            marker_class: "timeline-marker-animate".to_string(),
        }
    }
}

/// Pointer tilt parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Pointer offset (px) per degree of rotation
    pub divisor: f64,
    /// Upward lift in px
    pub lift: f64,
    /// Perspective depth in px
    pub perspective: f64,
    /// Scale while hovered
    pub scale: f64,
    /// Transition installed on pointer enter
    pub transition: Transition,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            divisor: 20.0,
            lift: 5.0,
            perspective: 1000.0,
            scale: 1.02,
            transition: Transition::uniform(
                ["transform", "box-shadow"],
                Duration::from_millis(300),
                "ease",
            ),
        }
    }
}

/// Selection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Class marking the active card
    pub active_class: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            active_class: "timeline-active".to_string(),
        }
    }
}

/// Progress publishing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Custom property set on the container
    pub property: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            property: "--timeline-progress".to_string(),
        }
    }
}

/// Complete configuration for all four controllers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub selectors: Selectors,
    pub reveal: RevealConfig,
    pub tilt: TiltConfig,
    pub selection: SelectionConfig,
    pub progress: ProgressConfig,
}

impl TimelineConfig {
    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json(json: &str) -> TimelineResult<Self> {
        let config: TimelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the controllers misbehave
    pub fn validate(&self) -> TimelineResult<()> {
        let s = &self.selectors;
        for (field, value) in [
            ("selectors.item", &s.item),
            ("selectors.left_class", &s.left_class),
            ("selectors.marker", &s.marker),
            ("selectors.card", &s.card),
            ("selectors.container", &s.container),
            ("reveal.marker_class", &self.reveal.marker_class),
            ("selection.active_class", &self.selection.active_class),
        ] {
            require_non_empty(field, value)?;
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(TimelineError::invalid_config(
                "reveal.threshold",
                format!("must be within [0, 1] (got {})", self.reveal.threshold),
            ));
        }
        if !self.reveal.bottom_margin.is_finite() || !self.reveal.offset.is_finite() {
            return Err(TimelineError::invalid_config(
                "reveal",
                "margin and offset must be finite",
            ));
        }

        require_positive("tilt.divisor", self.tilt.divisor)?;
        require_positive("tilt.perspective", self.tilt.perspective)?;
        require_positive("tilt.scale", self.tilt.scale)?;
        if !self.tilt.lift.is_finite() {
            return Err(TimelineError::invalid_config("tilt.lift", "must be finite"));
        }

        if !self.progress.property.starts_with("--") {
            return Err(TimelineError::invalid_config(
                "progress.property",
                format!("custom property must start with `--` (got {:?})", self.progress.property),
            ));
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> TimelineResult<()> {
    if value.trim().is_empty() {
        return Err(TimelineError::invalid_config(field, "must not be empty"));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> TimelineResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(TimelineError::invalid_config(
            field,
            format!("must be positive (got {value})"),
        ));
    }
    Ok(())
}
