//! Reproducible specification for an icon sheet.
//!
//! An [`IconSpec`] captures everything needed to recreate a sheet of icons:
//! the master seed, tile size, grid size and icon class. Two identical specs
//! fed to the same build produce byte-identical pixels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::IconError;

/// Smallest supported tile edge, in pixels.
pub const MIN_DIMENSION: usize = 8;
/// Largest supported tile edge, in pixels.
///
/// Rasterizing costs one nearest-point search over the traced path for every
/// pixel, so render time grows with the cube of the edge. A 256px blade takes
/// well under a second in a release build.
pub const MAX_DIMENSION: usize = 256;
/// Largest supported number of tiles per side.
pub const MAX_TILE_DIMENSION: usize = 16;

/// What kind of icon each tile shows.
///
/// `Any` and `AnyWeapon` are wildcards: every tile picks one of the concrete
/// classes in [`pool`](Self::pool) independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconClass {
    #[default]
    Potions,
    Blades,
    Spears,
    Any,
    AnyWeapon,
}

impl IconClass {
    /// Every class, in display order.
    pub const ALL: [IconClass; 5] = [
        IconClass::Potions,
        IconClass::Blades,
        IconClass::Spears,
        IconClass::Any,
        IconClass::AnyWeapon,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            IconClass::Potions => "potions",
            IconClass::Blades => "blades",
            IconClass::Spears => "spears",
            IconClass::Any => "any",
            IconClass::AnyWeapon => "anyweapon",
        }
    }

    /// Names of every class.
    pub fn list_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.name()).collect()
    }

    /// The concrete classes this class resolves to.
    ///
    /// A concrete class resolves to itself.
    pub fn pool(self) -> &'static [IconClass] {
        match self {
            IconClass::Potions => &[IconClass::Potions],
            IconClass::Blades => &[IconClass::Blades],
            IconClass::Spears => &[IconClass::Spears],
            IconClass::Any => &[IconClass::Potions, IconClass::Blades, IconClass::Spears],
            IconClass::AnyWeapon => &[IconClass::Blades, IconClass::Spears],
        }
    }

    /// Whether tiles of this class choose their class per tile.
    pub fn is_wildcard(self) -> bool {
        self.pool().len() > 1
    }
}

impl fmt::Display for IconClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IconClass {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| IconError::UnknownIconClass(s.to_string()))
    }
}

fn default_dimension() -> usize {
    32
}

fn default_tile_dimension() -> usize {
    1
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Reproducible description of an icon sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    pub seed: String,
    /// Edge length of one tile in pixels.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Number of tiles per side.
    #[serde(default = "default_tile_dimension")]
    pub tile_dimension: usize,
    #[serde(default)]
    pub icon_class: IconClass,
    /// Style overrides handed to every generator; unknown keys are ignored.
    #[serde(default = "empty_params")]
    pub params: Value,
}

impl IconSpec {
    /// A single 32px potion for `seed`.
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            dimension: default_dimension(),
            tile_dimension: default_tile_dimension(),
            icon_class: IconClass::default(),
            params: empty_params(),
        }
    }

    /// Parses a spec from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, IconError> {
        let spec: IconSpec =
            serde_json::from_str(json).map_err(|e| IconError::InvalidSpec(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String, IconError> {
        serde_json::to_string_pretty(self).map_err(|e| IconError::InvalidSpec(e.to_string()))
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_tile_dimension(mut self, tile_dimension: usize) -> Self {
        self.tile_dimension = tile_dimension;
        self
    }

    pub fn with_class(mut self, icon_class: IconClass) -> Self {
        self.icon_class = icon_class;
        self
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Edge length of the whole sheet in pixels.
    ///
    /// Returns `IconError::InvalidDimensions` on overflow.
    pub fn canvas_size(&self) -> Result<usize, IconError> {
        self.dimension
            .checked_mul(self.tile_dimension)
            .ok_or(IconError::InvalidDimensions)
    }

    /// Checks that the tile size and grid size are in range and that the
    /// sheet's RGBA buffer size does not overflow.
    pub fn validate(&self) -> Result<(), IconError> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&self.dimension) {
            return Err(IconError::InvalidDimension {
                dimension: self.dimension,
                min: MIN_DIMENSION,
                max: MAX_DIMENSION,
            });
        }
        if !(1..=MAX_TILE_DIMENSION).contains(&self.tile_dimension) {
            return Err(IconError::InvalidTileDimension {
                tile_dimension: self.tile_dimension,
                max: MAX_TILE_DIMENSION,
            });
        }
        let side = self.canvas_size()?;
        side.checked_mul(side)
            .and_then(|n| n.checked_mul(4))
            .ok_or(IconError::InvalidDimensions)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let s = IconSpec::new("abc");
        assert_eq!(s.seed, "abc");
        assert_eq!(s.dimension, 32);
        assert_eq!(s.tile_dimension, 1);
        assert_eq!(s.icon_class, IconClass::Potions);
    }

    #[test]
    fn json_round_trip() {
        let original = IconSpec::new("round")
            .with_dimension(64)
            .with_tile_dimension(3)
            .with_class(IconClass::AnyWeapon);
        let json = serde_json::to_string(&original).unwrap();
        let restored: IconSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn json_round_trip_with_params() {
        let original = IconSpec::new("styled").with_params(serde_json::json!({
            "glass_alpha": 0.5,
            "stopper_light": [10, 20, 30]
        }));
        let json = original.to_json().unwrap();
        assert_eq!(IconSpec::from_json(&json).unwrap(), original);
    }

    #[test]
    fn from_json_validates() {
        let r = IconSpec::from_json(r#"{"seed":"x","dimension":4}"#);
        assert!(matches!(r, Err(IconError::InvalidDimension { .. })));
        let r = IconSpec::from_json("not json");
        assert!(matches!(r, Err(IconError::InvalidSpec(_))));
    }

    #[test]
    fn json_uses_lowercase_class_names() {
        let s = IconSpec::new("x").with_class(IconClass::AnyWeapon);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["icon_class"], "anyweapon");
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let s: IconSpec = serde_json::from_str(r#"{"seed":"only"}"#).unwrap();
        assert_eq!(s, IconSpec::new("only"));
    }

    #[test]
    fn json_rejects_unknown_class() {
        let r: Result<IconSpec, _> = serde_json::from_str(r#"{"seed":"x","icon_class":"wands"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn class_names_parse_back() {
        for class in IconClass::ALL {
            assert_eq!(class.name().parse::<IconClass>().unwrap(), class);
            assert_eq!(class.to_string(), class.name());
        }
        assert_eq!(" Blades ".parse::<IconClass>().unwrap(), IconClass::Blades);
    }

    #[test]
    fn unknown_class_is_an_error() {
        let err = "wands".parse::<IconClass>().unwrap_err();
        assert!(matches!(err, IconError::UnknownIconClass(ref s) if s == "wands"));
    }

    #[test]
    fn pools() {
        assert_eq!(IconClass::Potions.pool(), &[IconClass::Potions]);
        assert_eq!(IconClass::Any.pool().len(), 3);
        assert_eq!(IconClass::AnyWeapon.pool(), &[IconClass::Blades, IconClass::Spears]);
        assert!(IconClass::Any.is_wildcard());
        assert!(!IconClass::Spears.is_wildcard());
    }

    #[test]
    fn list_names_is_complete() {
        assert_eq!(
            IconClass::list_names(),
            vec!["potions", "blades", "spears", "any", "anyweapon"]
        );
    }

    #[test]
    fn validate_accepts_defaults_and_limits() {
        assert!(IconSpec::new("a").validate().is_ok());
        assert!(IconSpec::new("a").with_dimension(8).validate().is_ok());
        assert!(IconSpec::new("a")
            .with_dimension(MAX_DIMENSION)
            .with_tile_dimension(MAX_TILE_DIMENSION)
            .validate()
            .is_ok());
    }

    #[test]
    fn validate_rejects_small_and_large_dimensions() {
        assert!(matches!(
            IconSpec::new("a").with_dimension(7).validate(),
            Err(IconError::InvalidDimension { dimension: 7, .. })
        ));
        assert!(IconSpec::new("a").with_dimension(0).validate().is_err());
        assert!(IconSpec::new("a").with_dimension(MAX_DIMENSION + 1).validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_grid() {
        assert!(matches!(
            IconSpec::new("a").with_tile_dimension(0).validate(),
            Err(IconError::InvalidTileDimension { tile_dimension: 0, .. })
        ));
        assert!(IconSpec::new("a").with_tile_dimension(17).validate().is_err());
    }

    #[test]
    fn canvas_size_multiplies() {
        let s = IconSpec::new("a").with_dimension(16).with_tile_dimension(4);
        assert_eq!(s.canvas_size().unwrap(), 64);
    }
}
