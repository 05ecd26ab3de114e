//! Tunable parameters for generation and mutation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::object::ObjectKind;

/// What a mutation step does to one existing object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifyDecision {
    /// Carry the object over, keeping its name when still available.
    Keep,
    /// Carry the object over under a freshly issued name.
    Rename,
    /// Drop the object from the new configuration.
    Delete,
}

/// Generation and mutation odds for one object kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindPolicy {
    /// Relative weight when choosing the kind of a new object.
    pub weight: u32,
    /// Probability that a mutation step deletes an object of this kind.
    pub delete_probability: f64,
    /// Probability that a mutation step renames an object of this kind.
    pub rename_probability: f64,
}

impl Default for KindPolicy {
    fn default() -> Self {
        Self {
            weight: 1,
            delete_probability: 0.2,
            rename_probability: 0.2,
        }
    }
}

impl KindPolicy {
    /// Decide the fate of one object. Always consumes exactly one draw from
    /// `rng`, whatever the outcome.
    pub fn decide<R: Rng + ?Sized>(&self, rng: &mut R) -> ModifyDecision {
        let roll: f64 = rng.gen();
        if roll < self.delete_probability {
            ModifyDecision::Delete
        } else if roll < self.delete_probability + self.rename_probability {
            ModifyDecision::Rename
        } else {
            ModifyDecision::Keep
        }
    }

    fn validate(&self, kind: &str) -> Result<()> {
        for (field, p) in [
            ("delete_probability", self.delete_probability),
            ("rename_probability", self.rename_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GenError::InvalidConfig(format!(
                    "{kind}.{field} must be within [0, 1], got {p}"
                )));
            }
        }
        if self.delete_probability + self.rename_probability > 1.0 {
            return Err(GenError::InvalidConfig(format!(
                "{kind}: delete_probability + rename_probability exceeds 1"
            )));
        }
        Ok(())
    }
}

/// Configuration for the generator.
///
/// Every field has a default, so a TOML file only needs the keys it wants
/// to change:
///
/// ```
/// use stress_gen::GeneratorConfig;
///
/// let config = GeneratorConfig::from_toml_str(r#"
///     max_objects = 3
///
///     [output]
///     delete_probability = 0.5
/// "#).unwrap();
/// assert_eq!(config.max_objects, 3);
/// assert_eq!(config.output.delete_probability, 0.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fewest objects in a freshly generated configuration.
    pub min_objects: usize,
    /// Most objects in a freshly generated configuration.
    pub max_objects: usize,
    /// Probability, after each addition, that a mutation step appends
    /// another brand-new object. Zero disables additions.
    pub new_object_probability: f64,
    /// Most brand-new objects a single mutation step may append.
    pub max_new_objects: usize,
    /// Odds for input variables.
    pub variable: KindPolicy,
    /// Odds for output values.
    pub output: KindPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_objects: 1,
            max_objects: 8,
            new_object_probability: 0.0,
            max_new_objects: 2,
            variable: KindPolicy::default(),
            output: KindPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| GenError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| GenError::InvalidConfig(e.to_string()))
    }

    /// The odds for a given object kind.
    pub fn policy(&self, kind: ObjectKind) -> &KindPolicy {
        match kind {
            ObjectKind::Variable => &self.variable,
            ObjectKind::Output => &self.output,
        }
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.min_objects > self.max_objects {
            return Err(GenError::InvalidConfig(format!(
                "min_objects ({}) exceeds max_objects ({})",
                self.min_objects, self.max_objects
            )));
        }
        self.variable.validate("variable")?;
        self.output.validate("output")?;
        if !(0.0..=1.0).contains(&self.new_object_probability) {
            return Err(GenError::InvalidConfig(format!(
                "new_object_probability must be within [0, 1], got {}",
                self.new_object_probability
            )));
        }
        if self.total_weight() == 0 && (self.max_objects > 0 || self.new_object_probability > 0.0) {
            return Err(GenError::InvalidConfig(
                "at least one object kind needs a non-zero weight".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn total_weight(&self) -> u64 {
        u64::from(self.variable.weight) + u64::from(self.output.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::new_rand;

    #[test]
    fn default_config() {
        let c = GeneratorConfig::default();
        assert_eq!(c.min_objects, 1);
        assert_eq!(c.max_objects, 8);
        assert_eq!(c.new_object_probability, 0.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = GeneratorConfig::from_toml_str("min_objects = 2\n").unwrap();
        assert_eq!(c.min_objects, 2);
        assert_eq!(c.max_objects, 8);
        assert_eq!(c.variable, KindPolicy::default());
    }

    #[test]
    fn toml_roundtrip() {
        let mut c = GeneratorConfig::default();
        c.output.weight = 5;
        let text = c.to_toml_string().unwrap();
        assert_eq!(GeneratorConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn reject_inverted_range() {
        let err = GeneratorConfig::from_toml_str("min_objects = 9\nmax_objects = 2\n").unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig(_)));
    }

    #[test]
    fn reject_bad_probability() {
        let mut c = GeneratorConfig::default();
        c.variable.delete_probability = 1.5;
        assert!(c.validate().is_err());

        let mut c = GeneratorConfig::default();
        c.output.delete_probability = 0.7;
        c.output.rename_probability = 0.7;
        assert!(c.validate().is_err());

        let mut c = GeneratorConfig::default();
        c.new_object_probability = -0.1;
        assert!(c.validate().is_err());
    }

    #[test]
    fn reject_zero_weights() {
        let mut c = GeneratorConfig::default();
        c.variable.weight = 0;
        c.output.weight = 0;
        assert!(c.validate().is_err());

        c.min_objects = 0;
        c.max_objects = 0;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn reject_malformed_toml() {
        let err = GeneratorConfig::from_toml_str("max_objects = \"many\"").unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig(_)));
    }

    #[test]
    fn decide_extremes() {
        let mut rng = new_rand(1);
        let always_delete = KindPolicy {
            weight: 1,
            delete_probability: 1.0,
            rename_probability: 0.0,
        };
        let always_keep = KindPolicy {
            weight: 1,
            delete_probability: 0.0,
            rename_probability: 0.0,
        };
        let always_rename = KindPolicy {
            weight: 1,
            delete_probability: 0.0,
            rename_probability: 1.0,
        };
        for _ in 0..100 {
            assert_eq!(always_delete.decide(&mut rng), ModifyDecision::Delete);
            assert_eq!(always_keep.decide(&mut rng), ModifyDecision::Keep);
            assert_eq!(always_rename.decide(&mut rng), ModifyDecision::Rename);
        }
    }

    #[test]
    fn policy_by_kind() {
        let mut c = GeneratorConfig::default();
        c.output.weight = 7;
        assert_eq!(c.policy(ObjectKind::Output).weight, 7);
        assert_eq!(c.policy(ObjectKind::Variable).weight, 1);
    }
}
