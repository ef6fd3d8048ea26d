//! Cell occupants and the validated tile-type table

use serde::{Deserialize, Serialize};

use crate::core::config::TileType;
use crate::core::error::{Result, SchellingError};
use crate::core::types::{TileTypeId, EMPTY_LABEL};

/// What a cell holds. Every cell holds exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Vacant,
    Occupied(TileTypeId),
}

impl Occupant {
    #[inline]
    pub fn is_vacant(self) -> bool {
        matches!(self, Occupant::Vacant)
    }

    #[inline]
    pub fn tile_type(self) -> Option<TileTypeId> {
        match self {
            Occupant::Vacant => None,
            Occupant::Occupied(id) => Some(id),
        }
    }
}

/// Validated tile types, split into the vacancy weight and the occupied
/// types addressed by `TileTypeId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    vacancy_weight: u32,
    types: Vec<TileType>,
}

impl Palette {
    /// Validate a tile-type list.
    ///
    /// Requires exactly one `empty` entry, unique non-empty labels,
    /// `preference` and `dissimilarity_tolerance` inside `[0, 1]`, and a
    /// positive total weight.
    pub fn new(tile_types: &[TileType]) -> Result<Self> {
        let mut vacancy_weight = None;
        let mut types: Vec<TileType> = Vec::new();

        for tile_type in tile_types {
            if tile_type.label.is_empty() {
                return Err(invalid("tile type with blank label"));
            }
            check_unit_range(tile_type, "preference", tile_type.preference)?;
            check_unit_range(tile_type, "dissimilarity_tolerance", tile_type.dissimilarity_tolerance)?;

            if tile_type.is_empty_label() {
                if vacancy_weight.is_some() {
                    return Err(invalid(format!("more than one '{}' tile type", EMPTY_LABEL)));
                }
                vacancy_weight = Some(tile_type.weight);
            } else {
                if types.iter().any(|t| t.label == tile_type.label) {
                    return Err(invalid(format!("duplicate label '{}'", tile_type.label)));
                }
                types.push(tile_type.clone());
            }
        }

        let vacancy_weight =
            vacancy_weight.ok_or_else(|| invalid(format!("no '{}' tile type supplied", EMPTY_LABEL)))?;

        if types.len() > u16::MAX as usize {
            return Err(invalid(format!("too many tile types ({})", types.len())));
        }

        let total: u64 = vacancy_weight as u64 + types.iter().map(|t| t.weight as u64).sum::<u64>();
        if total == 0 {
            return Err(invalid("all tile type weights are zero"));
        }

        Ok(Self { vacancy_weight, types })
    }

    pub fn vacancy_weight(&self) -> u32 {
        self.vacancy_weight
    }

    /// Occupied tile types, indexed by `TileTypeId`
    pub fn types(&self) -> &[TileType] {
        &self.types
    }

    #[inline]
    pub fn get(&self, id: TileTypeId) -> &TileType {
        &self.types[id.index()]
    }

    /// Ids of all occupied tile types, in declaration order
    pub fn ids(&self) -> impl Iterator<Item = TileTypeId> + '_ {
        (0..self.types.len()).map(|i| TileTypeId(i as u16))
    }

    pub fn label(&self, occupant: Occupant) -> &str {
        match occupant {
            Occupant::Vacant => EMPTY_LABEL,
            Occupant::Occupied(id) => &self.get(id).label,
        }
    }

    /// Resolve a label to an occupant, `"empty"` meaning vacancy
    pub fn occupant_for(&self, label: &str) -> Option<Occupant> {
        if label == EMPTY_LABEL {
            return Some(Occupant::Vacant);
        }
        self.types
            .iter()
            .position(|t| t.label == label)
            .map(|i| Occupant::Occupied(TileTypeId(i as u16)))
    }

    /// Flattened weighted bucket: each entry repeated `weight` times.
    ///
    /// Vacancy comes first, then occupied types in declaration order.
    pub fn bucket(&self) -> Vec<Occupant> {
        let mut bucket = Vec::new();
        bucket.extend(std::iter::repeat(Occupant::Vacant).take(self.vacancy_weight as usize));
        for id in self.ids() {
            let weight = self.get(id).weight as usize;
            bucket.extend(std::iter::repeat(Occupant::Occupied(id)).take(weight));
        }
        bucket
    }
}

fn invalid(msg: impl Into<String>) -> SchellingError {
    SchellingError::InvalidConfig(msg.into())
}

fn check_unit_range(tile_type: &TileType, field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!(
            "'{}' {} must lie in [0, 1], got {}",
            tile_type.label, field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_colors() -> Vec<TileType> {
        vec![
            TileType::empty(1),
            TileType::new("red", 0.3, 0.5, 2),
            TileType::new("blue", 0.3, 0.5, 3),
        ]
    }

    #[test]
    fn test_palette_splits_vacancy() {
        let palette = Palette::new(&two_colors()).unwrap();
        assert_eq!(palette.vacancy_weight(), 1);
        assert_eq!(palette.types().len(), 2);
        assert_eq!(palette.label(Occupant::Vacant), "empty");
        assert_eq!(palette.label(Occupant::Occupied(TileTypeId(1))), "blue");
    }

    #[test]
    fn test_bucket_repeats_by_weight() {
        let bucket = Palette::new(&two_colors()).unwrap().bucket();
        assert_eq!(bucket.len(), 6);
        assert_eq!(bucket.iter().filter(|o| o.is_vacant()).count(), 1);
        assert_eq!(
            bucket.iter().filter(|o| **o == Occupant::Occupied(TileTypeId(1))).count(),
            3
        );
    }

    #[test]
    fn test_missing_empty_rejected() {
        let types = vec![TileType::new("red", 0.3, 0.5, 2)];
        assert!(matches!(Palette::new(&types), Err(SchellingError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_empty_rejected() {
        let mut types = two_colors();
        types.push(TileType::empty(4));
        assert!(matches!(Palette::new(&types), Err(SchellingError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut types = two_colors();
        types.push(TileType::new("red", 0.1, 0.1, 1));
        assert!(matches!(Palette::new(&types), Err(SchellingError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let types = vec![TileType::empty(0), TileType::new("red", 0.3, 0.5, 0)];
        assert!(matches!(Palette::new(&types), Err(SchellingError::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_range_parameters_rejected() {
        let types = vec![TileType::empty(1), TileType::new("red", 1.5, 0.5, 1)];
        assert!(Palette::new(&types).is_err());
        let types = vec![TileType::empty(1), TileType::new("red", 0.5, -0.1, 1)];
        assert!(Palette::new(&types).is_err());
        let types = vec![TileType::empty(1), TileType::new("red", f64::NAN, 0.5, 1)];
        assert!(Palette::new(&types).is_err());
    }

    #[test]
    fn test_empty_weight_zero_is_allowed() {
        let types = vec![TileType::empty(0), TileType::new("red", 0.3, 0.5, 1)];
        let palette = Palette::new(&types).unwrap();
        assert!(palette.bucket().iter().all(|o| !o.is_vacant()));
    }

    #[test]
    fn test_occupant_for_label() {
        let palette = Palette::new(&two_colors()).unwrap();
        assert_eq!(palette.occupant_for("empty"), Some(Occupant::Vacant));
        assert_eq!(palette.occupant_for("red"), Some(Occupant::Occupied(TileTypeId(0))));
        assert_eq!(palette.occupant_for("green"), None);
    }
}
