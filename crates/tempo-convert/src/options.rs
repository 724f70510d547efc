//! Conversion options value type

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// What happens to a scene object once it has been converted into an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Convert and destroy the original object
    #[default]
    ConvertAndDestroy,
    /// Convert and keep the original object linked to the new entity
    ConvertAndInjectGameObject,
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionMode::ConvertAndDestroy => write!(f, "convert_and_destroy"),
            ConversionMode::ConvertAndInjectGameObject => {
                write!(f, "convert_and_inject_game_object")
            }
        }
    }
}

/// Options handed to the conversion pipeline for one conversion request.
///
/// Two values are equal iff both fields are equal, and equal values hash
/// equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub mode: ConversionMode,
    /// Also convert engine-side components that have no pure ECS counterpart
    pub convert_hybrid_components: bool,
}

static DEFAULT_OPTIONS: ConversionOptions = ConversionOptions::DEFAULT;

impl ConversionOptions {
    /// Default-valued options: destroy originals, skip hybrid components
    pub const DEFAULT: ConversionOptions = ConversionOptions {
        mode: ConversionMode::ConvertAndDestroy,
        convert_hybrid_components: false,
    };

    pub fn new(mode: ConversionMode, convert_hybrid_components: bool) -> Self {
        Self {
            mode,
            convert_hybrid_components,
        }
    }

    /// The process-wide shared default instance
    pub fn shared_default() -> &'static ConversionOptions {
        &DEFAULT_OPTIONS
    }

    pub fn with_mode(mut self, mode: ConversionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_hybrid_components(mut self, convert: bool) -> Self {
        self.convert_hybrid_components = convert;
        self
    }

    /// Compare against a value of unknown type. Anything that is not a
    /// `ConversionOptions` compares unequal.
    pub fn eq_any(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<ConversionOptions>()
            .is_some_and(|o| o == self)
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(options: &ConversionOptions) -> u64 {
        let mut hasher = DefaultHasher::new();
        options.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_default_values() {
        let options = ConversionOptions::default();
        assert_eq!(options.mode, ConversionMode::ConvertAndDestroy);
        assert!(!options.convert_hybrid_components);
        assert_eq!(options, ConversionOptions::DEFAULT);
        assert_eq!(*ConversionOptions::shared_default(), options);
    }

    #[test]
    fn test_shared_default_is_one_instance() {
        let a = ConversionOptions::shared_default();
        let b = ConversionOptions::shared_default();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_equal_fields_equal_hash() {
        let modes = [ConversionMode::ConvertAndDestroy, ConversionMode::ConvertAndInjectGameObject];
        for mode in modes {
            for hybrid in [false, true] {
                let a = ConversionOptions::new(mode, hybrid);
                let b = ConversionOptions::default().with_mode(mode).with_hybrid_components(hybrid);
                assert_eq!(a, b);
                assert_eq!(b, a);
                assert_eq!(hash_of(&a), hash_of(&b));
            }
        }
    }

    #[test]
    fn test_any_differing_field_is_unequal() {
        let base = ConversionOptions::default();
        assert_ne!(base, base.with_mode(ConversionMode::ConvertAndInjectGameObject));
        assert_ne!(base, base.with_hybrid_components(true));
        assert_ne!(
            base,
            ConversionOptions::new(ConversionMode::ConvertAndInjectGameObject, true)
        );
    }

    #[test]
    fn test_eq_any_rejects_other_types() {
        let options = ConversionOptions::default();
        assert!(options.eq_any(&ConversionOptions::DEFAULT));
        assert!(!options.eq_any(&ConversionMode::ConvertAndDestroy));
        assert!(!options.eq_any(&"options"));
        assert!(!options.eq_any(&options.with_hybrid_components(true)));
    }

    #[test]
    fn test_toml_roundtrip_with_missing_fields() {
        let parsed: ConversionOptions = toml::from_str("convert_hybrid_components = true").unwrap();
        assert_eq!(parsed.mode, ConversionMode::ConvertAndDestroy);
        assert!(parsed.convert_hybrid_components);

        let parsed: ConversionOptions =
            toml::from_str("mode = \"convert_and_inject_game_object\"").unwrap();
        assert_eq!(parsed.mode, ConversionMode::ConvertAndInjectGameObject);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(ConversionMode::ConvertAndDestroy.to_string(), "convert_and_destroy");
    }
}
