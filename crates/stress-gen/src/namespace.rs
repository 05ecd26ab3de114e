//! Name coordination for the objects in one generated module.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::warn;

use crate::error::{GenError, Result};
use crate::names;

/// Upper bound on draws for a single unique name.
///
/// Reaching it means the token generator's output space is effectively
/// used up for this module, which is reported as
/// [`GenError::NamespaceExhausted`] rather than looping forever.
pub const MAX_NAME_ATTEMPTS: usize = 10_000;

/// Coordinates names between the generators that build one module, so that
/// objects can refer to each other and the resulting module stays valid.
///
/// `Namespace` is the generation-time counterpart of
/// [`Registry`](crate::Registry): it tracks the static declarations in a
/// module, while a registry tracks the dynamic values of those declarations
/// for one module instance.
///
/// Issued names share one flat table regardless of object kind. The
/// Terraform language would accept a variable and an output with the same
/// name, but never reusing a name keeps the bookkeeping to a single set.
///
/// The mutating methods are for use during generation. Once the owning
/// [`Config`](crate::Config) is built, its namespace is only exposed by
/// shared reference.
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    issued_names: BTreeSet<String>,
    input_variables: Vec<String>,
}

impl Namespace {
    /// Create an empty namespace ready to be populated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a unique short name, for identifiers used within the language
    /// itself such as variable and output names.
    pub fn generate_short_name<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String> {
        self.issue_with(rng, |r: &mut R| names::generate_short_name(r))
    }

    /// Issue a unique short name carrying a modifier prefix.
    pub fn generate_short_modifier_name<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<String> {
        self.issue_with(rng, |r: &mut R| names::generate_short_modifier_name(r))
    }

    /// Issue a unique long, dash-separated name.
    ///
    /// By convention short names are used within the language and long names
    /// are sent to the remote systems simulated by fake providers, so the two
    /// stand out from each other in a dense generated configuration.
    pub fn generate_long_name<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String> {
        self.issue_with(rng, |r: &mut R| names::generate_long_string(r))
    }

    /// Draw from `token` until it yields a name not issued before, record it,
    /// and return it.
    pub fn issue_with<R, F>(&mut self, rng: &mut R, mut token: F) -> Result<String>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> String,
    {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let candidate = token(rng);
            if !self.issued_names.contains(&candidate) {
                self.issued_names.insert(candidate.clone());
                return Ok(candidate);
            }
        }
        warn!(
            attempts = MAX_NAME_ATTEMPTS,
            issued = self.issued_names.len(),
            "name token space exhausted"
        );
        Err(GenError::NamespaceExhausted {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    /// Issue a specific name, e.g. to carry an existing object's name into a
    /// new module. Returns `false` without recording anything if the name was
    /// already issued.
    pub fn claim_name(&mut self, name: &str) -> bool {
        if self.issued_names.contains(name) {
            return false;
        }
        self.issued_names.insert(name.to_string());
        true
    }

    /// Returns `true` if `name` has been issued.
    pub fn is_issued(&self, name: &str) -> bool {
        self.issued_names.contains(name)
    }

    /// All issued names in lexical order.
    pub fn issued_names(&self) -> impl Iterator<Item = &str> {
        self.issued_names.iter().map(String::as_str)
    }

    /// Number of issued names.
    pub fn len(&self) -> usize {
        self.issued_names.len()
    }

    /// Returns `true` if nothing has been issued.
    pub fn is_empty(&self) -> bool {
        self.issued_names.is_empty()
    }

    /// Record that `name` is an input variable of this module.
    pub fn declare_input_variable(&mut self, name: &str) {
        self.input_variables.push(name.to_string());
    }

    /// Input variables in declaration order. A harness uses these to know
    /// which values it must supply to call the module.
    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{new_rand, StressRng};
    use std::collections::HashSet;

    #[test]
    fn short_names_never_repeat() {
        let mut rng = new_rand(10);
        let mut ns = Namespace::new();
        let mut seen = HashSet::new();
        for _ in 0..2_000 {
            let name = ns.generate_short_name(&mut rng).unwrap();
            assert!(seen.insert(name));
        }
        assert_eq!(ns.len(), 2_000);
    }

    #[test]
    fn name_kinds_share_one_table() {
        let mut rng = new_rand(11);
        let mut ns = Namespace::new();
        let short = ns.generate_short_name(&mut rng).unwrap();
        let modifier = ns.generate_short_modifier_name(&mut rng).unwrap();
        let long = ns.generate_long_name(&mut rng).unwrap();
        assert!(ns.is_issued(&short));
        assert!(ns.is_issued(&modifier));
        assert!(ns.is_issued(&long));
        assert_eq!(ns.len(), 3);
        assert!(!ns.claim_name(&long));
    }

    #[test]
    fn finite_token_space_exhausts() {
        let mut rng = new_rand(12);
        let mut ns = Namespace::new();
        let tokens = |r: &mut StressRng| format!("t{}", r.gen_range(0..3));

        let mut issued = HashSet::new();
        for _ in 0..3 {
            issued.insert(ns.issue_with(&mut rng, tokens).unwrap());
        }
        assert_eq!(issued.len(), 3);

        let err = ns.issue_with(&mut rng, tokens).unwrap_err();
        assert!(matches!(
            err,
            GenError::NamespaceExhausted {
                attempts: MAX_NAME_ATTEMPTS
            }
        ));
        assert_eq!(ns.len(), 3);
    }

    #[test]
    fn large_token_space_terminates_with_fresh_name() {
        let mut rng = new_rand(13);
        let mut ns = Namespace::new();
        let prior: Vec<String> = (0..50)
            .map(|_| ns.generate_long_name(&mut rng).unwrap())
            .collect();
        let next = ns.generate_long_name(&mut rng).unwrap();
        assert!(!prior.contains(&next));
    }

    #[test]
    fn claim_name_rejects_duplicates() {
        let mut ns = Namespace::new();
        assert!(ns.claim_name("web"));
        assert!(!ns.claim_name("web"));
        assert_eq!(ns.issued_names().collect::<Vec<_>>(), vec!["web"]);
    }

    #[test]
    fn generation_is_deterministic() {
        let mut ns1 = Namespace::new();
        let mut ns2 = Namespace::new();
        let mut rng1 = new_rand(14);
        let mut rng2 = new_rand(14);
        for _ in 0..20 {
            assert_eq!(
                ns1.generate_short_name(&mut rng1).unwrap(),
                ns2.generate_short_name(&mut rng2).unwrap()
            );
        }
    }

    #[test]
    fn input_variables_keep_declaration_order() {
        let mut ns = Namespace::new();
        ns.declare_input_variable("zed");
        ns.declare_input_variable("alpha");
        assert_eq!(ns.input_variables(), &["zed".to_string(), "alpha".to_string()]);
    }
}
