use tracing::debug;

use crate::error::Result;
use crate::namespace::Namespace;
use crate::object::{keep_name, ConfigObject, ConfigObjectInstance, ObjectAddr, ObjectKind};
use crate::random::StressRng;
use crate::registry::Registry;
use crate::render::Body;
use crate::settings::{GeneratorConfig, ModifyDecision};

/// A generated `variable` block.
///
/// Variables are currently declared without a type constraint or default
/// value, so every one of them must be set by whoever calls the module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigVariable {
    name: String,
}

impl ConfigVariable {
    /// Declare a variable with the given name. The caller is responsible for
    /// the name being unique in its module.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The variable name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Generate a random variable, issuing its name through `ns`.
pub fn generate_config_variable(rng: &mut StressRng, ns: &mut Namespace) -> Result<ConfigVariable> {
    let name = ns.generate_short_name(rng)?;
    ns.declare_input_variable(&name);
    // TODO: also generate type constraints and defaults, so that some
    // variables become optional for the caller.
    Ok(ConfigVariable::new(name))
}

impl ConfigObject for ConfigVariable {
    fn addr(&self) -> ObjectAddr {
        ObjectAddr::Variable(self.name.clone())
    }

    fn append_config(&self, body: &mut Body) -> Result<()> {
        body.append_block(
            hcl::Block::builder("variable")
                .add_label(self.name.as_str())
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
        let name = match config.policy(ObjectKind::Variable).decide(rng) {
            ModifyDecision::Delete => {
                debug!(object = %self.addr(), "deleting variable");
                return Ok(None);
            }
            ModifyDecision::Rename => ns.generate_short_name(rng)?,
            ModifyDecision::Keep => keep_name(&self.addr(), rng, ns)?,
        };
        ns.declare_input_variable(&name);
        Ok(Some(Box::new(ConfigVariable::new(name))))
    }

    fn instantiate(self: Box<Self>, _reg: &mut Registry) -> Box<dyn ConfigObjectInstance> {
        Box::new(ConfigVariableInstance { object: *self })
    }
}

/// A [`ConfigVariable`] bound into a module instance. Its value is supplied
/// at apply time, so the registry records nothing for it.
#[derive(Debug)]
pub struct ConfigVariableInstance {
    object: ConfigVariable,
}

impl ConfigObjectInstance for ConfigVariableInstance {
    fn object(&self) -> &dyn ConfigObject {
        &self.object
    }
}
