//! One complete generated configuration.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde_json::Value;
use tracing::{debug, info};

use stress_addr::ConfigAddress;

use crate::error::{GenError, OutputMismatch, Result};
use crate::namespace::Namespace;
use crate::object::{generate_config_object, ConfigObject, ConfigObjectInstance, ObjectAddr};
use crate::random::new_rand;
use crate::registry::Registry;
use crate::render::Document;
use crate::settings::GeneratorConfig;

/// A generated configuration: the objects declared in its root module, the
/// [`Namespace`] they were named in, and the [`Registry`] of the single root
/// module instance.
///
/// A `Config` is immutable once built. Mutation produces a new `Config`, see
/// [`Config::generate_modified`].
#[derive(Debug)]
pub struct Config {
    addr: ConfigAddress,
    objects: Vec<Box<dyn ConfigObjectInstance>>,
    namespace: Namespace,
    registry: Registry,
}

impl Config {
    /// Build the configuration identified by `addr`.
    ///
    /// The root configuration is generated from the address's root seed and
    /// each mutation step in the address is then replayed in order, so the
    /// same address and generator config always give the same result.
    pub fn generate(addr: &ConfigAddress, config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let root = addr.root_address();
        let mut rng = new_rand(root.random_seed());
        let mut namespace = Namespace::new();

        let count = rng.gen_range(config.min_objects..=config.max_objects);
        let mut objects = Vec::with_capacity(count);
        for _ in 0..count {
            objects.push(generate_config_object(&mut rng, &mut namespace, config)?);
        }
        info!(addr = %root, objects = count, "generated root config");

        let mut current = Self::from_parts(root, objects, namespace);
        for m in addr.mods() {
            current = current.generate_modified(m, config)?;
        }
        Ok(current)
    }

    /// Build a configuration from objects chosen by the caller rather than
    /// generated.
    ///
    /// Names are claimed in the order given; a name declared twice is
    /// rejected with [`GenError::DuplicateName`].
    pub fn assemble(addr: ConfigAddress, objects: Vec<Box<dyn ConfigObject>>) -> Result<Self> {
        let mut namespace = Namespace::new();
        for obj in &objects {
            let obj_addr = obj.addr();
            if !namespace.claim_name(obj_addr.name()) {
                return Err(GenError::DuplicateName(obj_addr.to_string()));
            }
            if let ObjectAddr::Variable(name) = &obj_addr {
                namespace.declare_input_variable(name);
            }
        }
        Ok(Self::from_parts(addr, objects, namespace))
    }

    /// Instantiate `objects` into a fresh root registry, preserving order.
    pub(crate) fn from_parts(
        addr: ConfigAddress,
        objects: Vec<Box<dyn ConfigObject>>,
        namespace: Namespace,
    ) -> Self {
        let mut registry = Registry::new_root();
        let objects: Vec<_> = objects
            .into_iter()
            .map(|obj| obj.instantiate(&mut registry))
            .collect();
        debug!(
            addr = %addr,
            objects = objects.len(),
            recorded = registry.len(),
            "instantiated root module"
        );
        Self {
            addr,
            objects,
            namespace,
            registry,
        }
    }

    /// The address this configuration was built from.
    pub fn addr(&self) -> &ConfigAddress {
        &self.addr
    }

    /// Object instances of the root module, in declaration order.
    pub fn objects(&self) -> &[Box<dyn ConfigObjectInstance>] {
        &self.objects
    }

    /// The namespace of the root module.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The registry of the root module instance.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Addresses of the declared objects, in declaration order.
    pub fn object_addrs(&self) -> Vec<ObjectAddr> {
        self.objects.iter().map(|inst| inst.object().addr()).collect()
    }

    /// Input variables the caller must set when planning or applying.
    pub fn input_variables(&self) -> &[String] {
        self.namespace.input_variables()
    }

    /// Output values this configuration should produce once applied.
    pub fn expected_outputs(&self) -> BTreeMap<String, Value> {
        self.registry.output_values()
    }

    /// Render the configuration as the contents of a single `.tf` file.
    ///
    /// A configuration with no objects renders as an empty file.
    pub fn generate_config_file(&self) -> Result<Vec<u8>> {
        let mut doc = Document::new();
        for inst in &self.objects {
            inst.object().append_config(doc.body_mut())?;
        }
        doc.to_bytes()
    }

    /// Compare observed output values after apply against the expected ones.
    ///
    /// Every differing, missing, or unexpected output is reported in a
    /// single [`GenError::OutputMismatch`].
    pub fn verify_outputs(&self, actual: &BTreeMap<String, Value>) -> Result<()> {
        let expected = self.expected_outputs();
        let names: BTreeSet<&String> = expected.keys().chain(actual.keys()).collect();

        let mismatches: Vec<OutputMismatch> = names
            .into_iter()
            .filter_map(|name| {
                let want = expected.get(name);
                let got = actual.get(name);
                (want != got).then(|| OutputMismatch {
                    name: name.clone(),
                    expected: want.cloned(),
                    actual: got.cloned(),
                })
            })
            .collect();

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(GenError::OutputMismatch { mismatches })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ConfigOutput;
    use crate::settings::KindPolicy;
    use crate::variable::ConfigVariable;
    use proptest::prelude::*;
    use serde_json::json;
    use stress_addr::ModConfigAddress;

    fn outputs_only() -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.variable.weight = 0;
        config
    }

    fn var_and_output() -> Config {
        let objects: Vec<Box<dyn ConfigObject>> = vec![
            Box::new(ConfigVariable::new("a")),
            Box::new(ConfigOutput::new("b", json!("hello world"))),
        ];
        Config::assemble(ConfigAddress::root(1), objects).unwrap()
    }

    #[test]
    fn generate_respects_object_bounds() {
        let config = GeneratorConfig {
            min_objects: 3,
            max_objects: 5,
            ..Default::default()
        };
        for seed in 0..20 {
            let cfg = Config::generate(&ConfigAddress::root(seed), &config).unwrap();
            assert!((3..=5).contains(&cfg.objects().len()));
        }
    }

    #[test]
    fn names_are_unique() {
        let config = GeneratorConfig {
            min_objects: 30,
            max_objects: 30,
            ..Default::default()
        };
        let cfg = Config::generate(&ConfigAddress::root(9), &config).unwrap();
        let names: BTreeSet<String> = cfg
            .object_addrs()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names.len(), 30);
        assert_eq!(cfg.namespace().len(), 30);
    }

    #[test]
    fn empty_config_renders_empty_file() {
        let config = GeneratorConfig {
            min_objects: 0,
            max_objects: 0,
            ..Default::default()
        };
        let cfg = Config::generate(&ConfigAddress::root(3), &config).unwrap();
        assert!(cfg.objects().is_empty());
        assert!(cfg.generate_config_file().unwrap().is_empty());
        assert!(cfg.verify_outputs(&BTreeMap::new()).is_ok());
    }

    #[test]
    fn input_variables_follow_declarations() {
        let cfg = var_and_output();
        assert_eq!(cfg.input_variables(), &["a".to_string()]);
        assert_eq!(
            cfg.object_addrs(),
            vec![
                ObjectAddr::Variable("a".into()),
                ObjectAddr::Output("b".into())
            ]
        );
    }

    #[test]
    fn assembled_config_renders_in_order() {
        let cfg = var_and_output();
        let text = String::from_utf8(cfg.generate_config_file().unwrap()).unwrap();
        let body = hcl::parse(&text).unwrap();
        let blocks: Vec<(&str, &str)> = body
            .blocks()
            .map(|b| (b.identifier(), b.labels()[0].as_str()))
            .collect();
        assert_eq!(blocks, vec![("variable", "a"), ("output", "b")]);
    }

    #[test]
    fn assemble_rejects_duplicate_names() {
        let objects: Vec<Box<dyn ConfigObject>> = vec![
            Box::new(ConfigVariable::new("x")),
            Box::new(ConfigOutput::new("x", json!(1))),
        ];
        let err = Config::assemble(ConfigAddress::root(1), objects).unwrap_err();
        assert!(matches!(err, GenError::DuplicateName(ref n) if n == "output.x"));
    }

    #[test]
    fn generate_rejects_invalid_config() {
        let config = GeneratorConfig {
            min_objects: 4,
            max_objects: 1,
            ..Default::default()
        };
        let err = Config::generate(&ConfigAddress::root(1), &config).unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig(_)));
    }

    #[test]
    fn keep_variable_delete_output() {
        let cfg = var_and_output();
        let config = GeneratorConfig {
            variable: KindPolicy {
                weight: 1,
                delete_probability: 0.0,
                rename_probability: 0.0,
            },
            output: KindPolicy {
                weight: 1,
                delete_probability: 1.0,
                rename_probability: 0.0,
            },
            ..Default::default()
        };
        let m = ModConfigAddress::derive(cfg.addr(), 7);
        let next = cfg.generate_modified(&m, &config).unwrap();

        assert_eq!(next.object_addrs(), vec![ObjectAddr::Variable("a".into())]);
        let only_a: Vec<Box<dyn ConfigObject>> = vec![Box::new(ConfigVariable::new("a"))];
        let expected = Config::assemble(ConfigAddress::root(1), only_a).unwrap();
        assert_eq!(
            next.generate_config_file().unwrap(),
            expected.generate_config_file().unwrap()
        );
        assert!(next.expected_outputs().is_empty());
        assert_eq!(next.addr().mods(), &[m]);
    }

    #[test]
    fn verify_outputs_accepts_expected_values() {
        let cfg = Config::generate(&ConfigAddress::root(5), &outputs_only()).unwrap();
        let expected = cfg.expected_outputs();
        assert_eq!(expected.len(), cfg.objects().len());
        assert!(expected.values().all(|v| v == &json!("hello world")));
        assert!(cfg.verify_outputs(&expected).is_ok());
    }

    #[test]
    fn verify_outputs_reports_every_difference() {
        let cfg = var_and_output();
        let mut actual = BTreeMap::new();
        actual.insert("b".to_string(), json!("goodbye"));
        actual.insert("stray".to_string(), json!(1));

        let Err(GenError::OutputMismatch { mismatches }) = cfg.verify_outputs(&actual) else {
            panic!("expected an output mismatch");
        };
        assert_eq!(
            mismatches,
            vec![
                OutputMismatch {
                    name: "b".into(),
                    expected: Some(json!("hello world")),
                    actual: Some(json!("goodbye")),
                },
                OutputMismatch {
                    name: "stray".into(),
                    expected: None,
                    actual: Some(json!(1)),
                },
            ]
        );
    }

    #[test]
    fn verify_outputs_reports_missing_output() {
        let cfg = var_and_output();
        let err = cfg.verify_outputs(&BTreeMap::new()).unwrap_err();
        assert!(
            matches!(err, GenError::OutputMismatch { ref mismatches } if mismatches.len() == 1)
        );
    }

    proptest! {
        #[test]
        fn generation_is_deterministic(seed in any::<u64>()) {
            let config = GeneratorConfig::default();
            let addr = ConfigAddress::root(seed);
            let a = Config::generate(&addr, &config).unwrap();
            let b = Config::generate(&addr, &config).unwrap();
            prop_assert_eq!(a.object_addrs(), b.object_addrs());
            prop_assert_eq!(a.generate_config_file().unwrap(), b.generate_config_file().unwrap());
            prop_assert_eq!(a.input_variables(), b.input_variables());
        }

        #[test]
        fn addresses_replay_mutations(seed in any::<u64>(), entropy in any::<u64>()) {
            let config = GeneratorConfig::default();
            let root = Config::generate(&ConfigAddress::root(seed), &config).unwrap();
            let m = ModConfigAddress::derive(root.addr(), entropy);
            let mutated = root.generate_modified(&m, &config).unwrap();

            let replayed = Config::generate(mutated.addr(), &config).unwrap();
            prop_assert_eq!(replayed.addr(), mutated.addr());
            prop_assert_eq!(
                replayed.generate_config_file().unwrap(),
                mutated.generate_config_file().unwrap()
            );
        }
    }
}
