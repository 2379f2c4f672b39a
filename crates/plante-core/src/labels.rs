use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlanteError, Result};

/// Tags of the field tray layout, indexed by rank - 1.
const FIELD_LABELS: [&str; 24] = [
    "U1", "U6", "U5", "R1", "U10", "G3", "R7", "R3", "G4", "U7", "U3", "R5", "U4", "R4", "G2",
    "U9", "R8", "U8", "R10", "R9", "G1", "R6", "R2", "U2",
];

/// Number of ranks covered by the alphabetic preset (`A1` .. `X24`).
const ALPHABETIC_LEN: usize = 24;

/// Selectable rank-to-tag presets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelPreset {
    /// Field tray layout (`U1`, `U6`, `U5`, `R1`, ...).
    #[default]
    Field,
    /// Letter plus rank: `A1`, `B2`, `C3`, ...
    Alphabetic,
    /// Explicit labels; rank n uses element n - 1.
    Custom(Vec<String>),
}

impl fmt::Display for LabelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => write!(f, "Field"),
            Self::Alphabetic => write!(f, "Alphabetic"),
            Self::Custom(labels) => write!(f, "Custom ({} labels)", labels.len()),
        }
    }
}

impl LabelPreset {
    /// Build the mapping this preset describes, rejecting duplicate or empty tags.
    pub fn mapping(&self) -> Result<LabelMapping> {
        let labels: Vec<String> = match self {
            Self::Field => FIELD_LABELS.iter().map(|s| s.to_string()).collect(),
            Self::Alphabetic => (1..=ALPHABETIC_LEN)
                .map(|rank| format!("{}{}", (b'A' + (rank - 1) as u8) as char, rank))
                .collect(),
            Self::Custom(labels) => labels.clone(),
        };
        LabelMapping::new(labels)
    }

    /// Build the mapping and check it covers ranks `1..=max_regions`.
    pub fn mapping_for(&self, max_regions: usize) -> Result<LabelMapping> {
        let mapping = self.mapping()?;
        mapping.ensure_covers(max_regions)?;
        Ok(mapping)
    }
}

/// Injective mapping from rank (1-based) to a short tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMapping {
    labels: Vec<String>,
}

impl LabelMapping {
    pub fn new(labels: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(PlanteError::EmptyLabel(i + 1));
            }
            if !seen.insert(label.as_str()) {
                return Err(PlanteError::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self { labels })
    }

    /// Highest rank with a label.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn ensure_covers(&self, max_rank: usize) -> Result<()> {
        if max_rank > self.labels.len() {
            return Err(PlanteError::IncompleteLabelMapping {
                covered: self.labels.len(),
                required: max_rank,
            });
        }
        Ok(())
    }

    pub fn get(&self, rank: usize) -> Option<&str> {
        rank.checked_sub(1)
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    pub fn label(&self, rank: usize) -> Result<&str> {
        self.get(rank).ok_or(PlanteError::MissingLabel { rank })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_preset_matches_tray_layout() {
        let mapping = LabelPreset::Field.mapping().unwrap();
        assert_eq!(mapping.len(), 24);
        assert_eq!(mapping.get(1), Some("U1"));
        assert_eq!(mapping.get(5), Some("U10"));
        assert_eq!(mapping.get(24), Some("U2"));
    }

    #[test]
    fn alphabetic_preset_pairs_letter_and_rank() {
        let mapping = LabelPreset::Alphabetic.mapping().unwrap();
        assert_eq!(mapping.get(1), Some("A1"));
        assert_eq!(mapping.get(5), Some("E5"));
        assert_eq!(mapping.get(24), Some("X24"));
    }

    #[test]
    fn rank_zero_and_out_of_range_have_no_label() {
        let mapping = LabelPreset::Field.mapping().unwrap();
        assert_eq!(mapping.get(0), None);
        assert!(matches!(
            mapping.label(25),
            Err(PlanteError::MissingLabel { rank: 25 })
        ));
    }

    #[test]
    fn completeness_is_checked_against_max_regions() {
        assert!(LabelPreset::Field.mapping_for(24).is_ok());
        let err = LabelPreset::Field.mapping_for(30).unwrap_err();
        assert!(matches!(
            err,
            PlanteError::IncompleteLabelMapping {
                covered: 24,
                required: 30
            }
        ));
    }

    #[test]
    fn custom_labels_must_be_unique_and_non_empty() {
        let dup = LabelPreset::Custom(vec!["a".into(), "b".into(), "a".into()]);
        assert!(matches!(dup.mapping(), Err(PlanteError::DuplicateLabel(l)) if l == "a"));

        let blank = LabelPreset::Custom(vec!["a".into(), " ".into()]);
        assert!(matches!(blank.mapping(), Err(PlanteError::EmptyLabel(2))));
    }
}
