use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Cosmetic adjustments the surface can apply as visual filters. Variant
/// order is the order fragments appear in a rendered filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Hue,
    Saturation,
}

impl AdjustmentKind {
    pub const ALL: [AdjustmentKind; 2] = [AdjustmentKind::Hue, AdjustmentKind::Saturation];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hue => "hue",
            Self::Saturation => "saturation",
        }
    }

    /// Inclusive slider range, hue in degrees and saturation in percent.
    pub fn range(self) -> (f32, f32) {
        match self {
            Self::Hue => (-180.0, 180.0),
            Self::Saturation => (0.0, 300.0),
        }
    }

    /// Resting slider position.
    pub fn neutral_value(self) -> f32 {
        match self {
            Self::Hue => 0.0,
            Self::Saturation => 100.0,
        }
    }

    pub fn filter_fragment(self, value: f32) -> String {
        match self {
            Self::Hue => format!("hue-rotate({value}deg)"),
            Self::Saturation => format!("saturate({value}%)"),
        }
    }

    pub fn validate(self, value: f32) -> Result<(), DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NonFiniteAdjustment(self));
        }
        let (min, max) = self.range();
        if value < min || value > max {
            return Err(DomainError::AdjustmentOutOfRange {
                kind: self,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

impl Display for AdjustmentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Adjustments touched so far, at most one value per kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentStack {
    values: BTreeMap<AdjustmentKind, f32>,
}

impl AdjustmentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `kind` to `value`, replacing any earlier value for that kind.
    pub fn set(&mut self, kind: AdjustmentKind, value: f32) -> Result<(), DomainError> {
        kind.validate(value)?;
        self.values.insert(kind, value);
        Ok(())
    }

    pub fn get(&self, kind: AdjustmentKind) -> Option<f32> {
        self.values.get(&kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn values(&self) -> &BTreeMap<AdjustmentKind, f32> {
        &self.values
    }

    pub fn fragments(&self) -> impl Iterator<Item = String> + '_ {
        self.values
            .iter()
            .map(|(kind, value)| kind.filter_fragment(*value))
    }

    /// The stack rendered as a single filter declaration, empty when untouched.
    pub fn css_filter(&self) -> String {
        self.fragments().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_substitute_value_into_template() {
        assert_eq!(AdjustmentKind::Hue.filter_fragment(-45.0), "hue-rotate(-45deg)");
        assert_eq!(
            AdjustmentKind::Saturation.filter_fragment(150.5),
            "saturate(150.5%)"
        );
    }

    #[test]
    fn retouching_a_kind_replaces_its_fragment() {
        let mut stack = AdjustmentStack::new();
        stack.set(AdjustmentKind::Hue, 30.0).expect("hue");
        stack.set(AdjustmentKind::Hue, 90.0).expect("hue");

        let fragments: Vec<String> = stack.fragments().collect();
        assert_eq!(fragments, vec!["hue-rotate(90deg)".to_string()]);
    }

    #[test]
    fn filter_order_is_stable_per_kind() {
        let mut stack = AdjustmentStack::new();
        stack.set(AdjustmentKind::Saturation, 200.0).expect("saturation");
        stack.set(AdjustmentKind::Hue, 10.0).expect("hue");

        assert_eq!(stack.css_filter(), "hue-rotate(10deg) saturate(200%)");
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut stack = AdjustmentStack::new();
        assert!(matches!(
            stack.set(AdjustmentKind::Hue, f32::NAN),
            Err(DomainError::NonFiniteAdjustment(AdjustmentKind::Hue))
        ));
        assert!(matches!(
            stack.set(AdjustmentKind::Saturation, 301.0),
            Err(DomainError::AdjustmentOutOfRange { .. })
        ));
        assert!(stack.is_empty());
    }

    #[test]
    fn empty_stack_renders_no_filter() {
        assert_eq!(AdjustmentStack::new().css_filter(), "");
    }
}
