//! Dynamic values bound to declared objects.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::object::ObjectAddr;

/// Tracks the dynamic values of the objects declared in a module, for one
/// instance of that module.
///
/// At the root of a configuration there is exactly one registry per
/// [`Namespace`](crate::Namespace), so the split can look arbitrary there.
/// It exists because a module call using `count` or `for_each` yields many
/// module instances, each with its own registry, all sharing the single
/// namespace of the called module.
///
/// Objects whose value is only known at apply time (such as an input
/// variable with no default) record nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    values: BTreeMap<ObjectAddr, Value>,
}

impl Registry {
    /// Create the registry for the single root module instance.
    pub fn new_root() -> Self {
        Self::default()
    }

    /// Record the value an object is expected to have.
    pub fn record(&mut self, addr: ObjectAddr, value: Value) {
        self.values.insert(addr, value);
    }

    /// The recorded value for an object, if any.
    pub fn value(&self, addr: &ObjectAddr) -> Option<&Value> {
        self.values.get(addr)
    }

    /// Expected values of all output values, keyed by output name.
    pub fn output_values(&self) -> BTreeMap<String, Value> {
        self.values
            .iter()
            .filter_map(|(addr, value)| match addr {
                ObjectAddr::Output(name) => Some((name.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
