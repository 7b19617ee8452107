//! CSS transform, transition and cursor values written by the controllers
//!
//! Values are kept structured so that tests can assert on numbers, and are
//! rendered to CSS text only at the host boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Pointer-derived 3-D tilt applied to a hovered card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tilt {
    /// Upward lift in px
    pub lift: f64,
    /// Perspective depth in px
    pub perspective: f64,
    /// Rotation about the X axis in degrees
    pub rotate_x: f64,
    /// Rotation about the Y axis in degrees
    pub rotate_y: f64,
    /// Uniform scale factor
    pub scale: f64,
}

/// A transform a controller may apply to an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// Horizontal offset in px
    TranslateX(f64),
    /// Lift, perspective, rotations and scale
    Tilt(Tilt),
}

impl Transform {
    /// The resting position of a revealed item
    pub const IDENTITY_OFFSET: Transform = Transform::TranslateX(0.0);

    /// Render as a CSS `transform` value
    pub fn to_css(&self) -> String {
        match self {
            Transform::TranslateX(px) => format!("translateX({px}px)"),
            Transform::Tilt(tilt) => format!(
                "translateY({}px) perspective({}px) rotateX({}deg) rotateY({}deg) scale({})",
                -tilt.lift, tilt.perspective, tilt.rotate_x, tilt.rotate_y, tilt.scale
            ),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// One animated property in a transition list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionProperty {
    /// CSS property name, e.g. `opacity`
    pub property: String,
    /// Transition duration
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    /// CSS easing keyword or function
    pub easing: String,
}

impl TransitionProperty {
    pub fn new(property: impl Into<String>, duration: Duration, easing: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            duration,
            easing: easing.into(),
        }
    }
}

/// A CSS `transition` declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transition {
    pub properties: Vec<TransitionProperty>,
}

impl Transition {
    /// Same duration and easing for each named property
    pub fn uniform<I, S>(properties: I, duration: Duration, easing: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|p| TransitionProperty::new(p, duration, easing))
                .collect(),
        }
    }

    /// Render as a CSS `transition` value
    pub fn to_css(&self) -> String {
        self.properties
            .iter()
            .map(|p| {
                format!(
                    "{} {}s {}",
                    p.property,
                    p.duration.as_secs_f64(),
                    p.easing
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Cursor shown over an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    Pointer,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Pointer => "pointer",
        }
    }
}

/// Durations are stored as whole milliseconds in config files
pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_css() {
        assert_eq!(Transform::TranslateX(-50.0).to_css(), "translateX(-50px)");
        assert_eq!(Transform::TranslateX(50.0).to_css(), "translateX(50px)");
        assert_eq!(Transform::IDENTITY_OFFSET.to_css(), "translateX(0px)");
    }

    #[test]
    fn test_tilt_css() {
        let transform = Transform::Tilt(Tilt {
            lift: 5.0,
            perspective: 1000.0,
            rotate_x: -1.25,
            rotate_y: -2.5,
            scale: 1.02,
        });
        assert_eq!(
            transform.to_css(),
            "translateY(-5px) perspective(1000px) rotateX(-1.25deg) rotateY(-2.5deg) scale(1.02)"
        );
    }

    #[test]
    fn test_transition_css() {
        let transition = Transition::uniform(["opacity", "transform"], Duration::from_millis(800), "ease");
        assert_eq!(transition.to_css(), "opacity 0.8s ease, transform 0.8s ease");

        let transition = Transition::uniform(["transform", "box-shadow"], Duration::from_millis(300), "ease");
        assert_eq!(transition.to_css(), "transform 0.3s ease, box-shadow 0.3s ease");
    }

    #[test]
    fn test_empty_transition() {
        assert_eq!(Transition::default().to_css(), "");
    }
}
