use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::AdjustmentKind;

/// Discriminant of [`Feature`], used wherever the configuration payload is
/// not needed (events, control bookkeeping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    RemoveBackground,
    ChangeBackground,
    Adjust,
}

impl FeatureKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::RemoveBackground => "remove_background",
            Self::ChangeBackground => "change_background",
            Self::Adjust => "adjust",
        }
    }
}

impl Display for FeatureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One capability of the workflow together with its authoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feature {
    RemoveBackground(RemoveBackgroundConfig),
    ChangeBackground(ChangeBackgroundConfig),
    Adjust(AdjustConfig),
}

impl Feature {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::RemoveBackground(_) => FeatureKind::RemoveBackground,
            Self::ChangeBackground(_) => FeatureKind::ChangeBackground,
            Self::Adjust(_) => FeatureKind::Adjust,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::RemoveBackground(config) => &config.label,
            Self::ChangeBackground(config) => &config.label,
            Self::Adjust(config) => &config.label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveBackgroundConfig {
    #[serde(default = "default_remove_background_label")]
    pub label: String,
}

impl Default for RemoveBackgroundConfig {
    fn default() -> Self {
        Self {
            label: default_remove_background_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeBackgroundConfig {
    #[serde(default = "default_change_background_label")]
    pub label: String,
    /// Background choices in tray order; the first one is the default.
    #[serde(default)]
    pub backgrounds: Vec<String>,
}

impl ChangeBackgroundConfig {
    pub fn default_background(&self) -> Option<&str> {
        self.backgrounds.first().map(String::as_str)
    }
}

impl Default for ChangeBackgroundConfig {
    fn default() -> Self {
        Self {
            label: default_change_background_label(),
            backgrounds: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustConfig {
    #[serde(default = "default_adjust_label")]
    pub label: String,
    #[serde(default = "default_sliders")]
    pub sliders: Vec<SliderConfig>,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            label: default_adjust_label(),
            sliders: default_sliders(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderConfig {
    pub kind: AdjustmentKind,
    pub label: String,
}

fn default_remove_background_label() -> String {
    "Remove background".to_string()
}

fn default_change_background_label() -> String {
    "Change background".to_string()
}

fn default_adjust_label() -> String {
    "Adjust".to_string()
}

fn default_sliders() -> Vec<SliderConfig> {
    vec![
        SliderConfig {
            kind: AdjustmentKind::Hue,
            label: "Hue".to_string(),
        },
        SliderConfig {
            kind: AdjustmentKind::Saturation,
            label: "Saturation".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_deserialize_from_tagged_json() {
        let features: Vec<Feature> = serde_json::from_str(
            r#"[
                {"kind": "remove_background"},
                {"kind": "change_background", "backgrounds": ["https://a.example/bg1.png"]},
                {"kind": "adjust", "label": "Tweak"}
            ]"#,
        )
        .expect("features");

        let kinds: Vec<FeatureKind> = features.iter().map(Feature::kind).collect();
        assert_eq!(
            kinds,
            vec![
                FeatureKind::RemoveBackground,
                FeatureKind::ChangeBackground,
                FeatureKind::Adjust
            ]
        );
        assert_eq!(features[0].label(), "Remove background");
        assert_eq!(features[2].label(), "Tweak");
        match &features[1] {
            Feature::ChangeBackground(config) => {
                assert_eq!(config.default_background(), Some("https://a.example/bg1.png"));
            }
            other => panic!("unexpected feature {other:?}"),
        }
    }

    #[test]
    fn adjust_defaults_to_hue_and_saturation_sliders() {
        let kinds: Vec<AdjustmentKind> = AdjustConfig::default()
            .sliders
            .iter()
            .map(|slider| slider.kind)
            .collect();
        assert_eq!(kinds, AdjustmentKind::ALL.to_vec());
    }
}
