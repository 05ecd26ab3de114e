//! The object model shared by every kind of configuration object.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::namespace::Namespace;
use crate::output::generate_config_output;
use crate::random::StressRng;
use crate::registry::Registry;
use crate::render::Body;
use crate::settings::GeneratorConfig;
use crate::variable::generate_config_variable;

/// The kinds of object the generator knows how to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A `variable` block: an input the caller sets.
    Variable,
    /// An `output` block: a value the module exposes after apply.
    Output,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable => write!(f, "variable"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Kind-qualified address of a declared object within a module.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectAddr {
    /// An input variable, `var.<name>`.
    Variable(String),
    /// An output value, `output.<name>`.
    Output(String),
}

impl ObjectAddr {
    /// The object's name without its kind prefix.
    pub fn name(&self) -> &str {
        match self {
            ObjectAddr::Variable(name) | ObjectAddr::Output(name) => name,
        }
    }

    /// The kind of object this address refers to.
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectAddr::Variable(_) => ObjectKind::Variable,
            ObjectAddr::Output(_) => ObjectKind::Output,
        }
    }
}

impl fmt::Display for ObjectAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectAddr::Variable(name) => write!(f, "var.{name}"),
            ObjectAddr::Output(name) => write!(f, "output.{name}"),
        }
    }
}

/// A static declaration in a generated module, typically one block in the
/// rendered configuration.
///
/// Every method that draws randomness takes the random stream and the
/// target namespace explicitly, so an object's behavior is a pure function
/// of those two and replaying an address replays the object.
pub trait ConfigObject: fmt::Debug {
    /// The object's kind-qualified address.
    fn addr(&self) -> ObjectAddr;

    /// Append this object's configuration block(s) to `body`.
    fn append_config(&self, body: &mut Body) -> Result<()>;

    /// Produce the version of this object that belongs in the next
    /// configuration of a series, issuing names through `ns`.
    ///
    /// `Ok(None)` means the object is removed altogether.
    fn generate_modified(
        &self,
        rng: &mut StressRng,
        ns: &mut Namespace,
        config: &GeneratorConfig,
    ) -> Result<Option<Box<dyn ConfigObject>>>;

    /// Bind this declaration into one module instance, recording any
    /// values it determines in `reg`.
    fn instantiate(self: Box<Self>, reg: &mut Registry) -> Box<dyn ConfigObjectInstance>;
}

/// A [`ConfigObject`] bound into a particular module instance.
///
/// At the root of a configuration there is exactly one instance per object.
/// The distinction matters for nested modules, where one module call can
/// produce many instances of everything below it.
pub trait ConfigObjectInstance: fmt::Debug {
    /// The declaration this instance was created from.
    fn object(&self) -> &dyn ConfigObject;

    /// The value this instance should have after apply, when it is known
    /// at generation time.
    fn expected_value(&self) -> Option<&Value> {
        None
    }
}

/// Generate one new object, choosing its kind by the configured weights.
pub fn generate_config_object(
    rng: &mut StressRng,
    ns: &mut Namespace,
    config: &GeneratorConfig,
) -> Result<Box<dyn ConfigObject>> {
    let roll = rng.gen_range(0..config.total_weight().max(1));
    if roll < u64::from(config.variable.weight) {
        Ok(Box::new(generate_config_variable(rng, ns)?))
    } else {
        Ok(Box::new(generate_config_output(rng, ns)?))
    }
}

/// Issue the name a kept object will carry in the new namespace.
///
/// The object holds on to its old name unless an earlier object in the same
/// mutation step already took it, in which case it gets a fresh one.
pub(crate) fn keep_name(
    old: &ObjectAddr,
    rng: &mut StressRng,
    ns: &mut Namespace,
) -> Result<String> {
    if ns.claim_name(old.name()) {
        return Ok(old.name().to_string());
    }
    let name = ns.generate_short_name(rng)?;
    debug!(object = %old, new_name = %name, "name already taken; renaming kept object");
    Ok(name)
}
