use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::namespace::Namespace;
use crate::object::{keep_name, ConfigObject, ConfigObjectInstance, ObjectAddr, ObjectKind};
use crate::random::StressRng;
use crate::registry::Registry;
use crate::render::Body;
use crate::settings::{GeneratorConfig, ModifyDecision};

/// Value given to every generated output for now.
pub const PLACEHOLDER_OUTPUT_VALUE: &str = "hello world";

/// A generated `output` block.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigOutput {
    name: String,
    value: Value,
}

impl ConfigOutput {
    /// Declare an output with a constant value. The caller is responsible
    /// for the name being unique in its module.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The output name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The constant value the output is declared with.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Generate a random output, issuing its name through `ns`.
pub fn generate_config_output(rng: &mut StressRng, ns: &mut Namespace) -> Result<ConfigOutput> {
    let name = ns.generate_short_name(rng)?;
    // TODO: generate the value as an expression referring to other objects
    // in the namespace instead of a constant.
    Ok(ConfigOutput::new(name, Value::String(PLACEHOLDER_OUTPUT_VALUE.into())))
}

impl ConfigObject for ConfigOutput {
    fn addr(&self) -> ObjectAddr {
        ObjectAddr::Output(self.name.clone())
    }

    fn append_config(&self, body: &mut Body) -> Result<()> {
        let value = hcl::to_expression(&self.value)?;
        body.append_block(
            hcl::Block::builder("output")
                .add_label(self.name.as_str())
                .add_attribute(("value", value))
                .build(),
        );
        Ok(())
    }

    fn generate_modified(
        &self,
        rng: &mut StressRng,
        ns: &mut Namespace,
        config: &GeneratorConfig,
    ) -> Result<Option<Box<dyn ConfigObject>>> {
        let name = match config.policy(ObjectKind::Output).decide(rng) {
            ModifyDecision::Delete => {
                debug!(object = %self.addr(), "deleting output");
                return Ok(None);
            }
            ModifyDecision::Rename => ns.generate_short_name(rng)?,
            ModifyDecision::Keep => keep_name(&self.addr(), rng, ns)?,
        };
        Ok(Some(Box::new(ConfigOutput::new(name, self.value.clone()))))
    }

    fn instantiate(self: Box<Self>, reg: &mut Registry) -> Box<dyn ConfigObjectInstance> {
        reg.record(self.addr(), self.value.clone());
        Box::new(ConfigOutputInstance { object: *self })
    }
}

/// A [`ConfigOutput`] bound into a module instance.
#[derive(Debug)]
pub struct ConfigOutputInstance {
    object: ConfigOutput,
}

impl ConfigObjectInstance for ConfigOutputInstance {
    fn object(&self) -> &dyn ConfigObject {
        &self.object
    }

    fn expected_value(&self) -> Option<&Value> {
        Some(&self.object.value)
    }
}
