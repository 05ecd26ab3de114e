//! Deriving the next configuration of a series from the current one.

use rand::Rng;
use tracing::{debug, info};

use stress_addr::ModConfigAddress;

use crate::config::Config;
use crate::error::Result;
use crate::namespace::Namespace;
use crate::object::generate_config_object;
use crate::random::new_rand;
use crate::settings::GeneratorConfig;

impl Config {
    /// Generate a random modification of this configuration.
    ///
    /// Each object, in declaration order, is kept, renamed, or deleted
    /// according to its kind's odds in `config`. Surviving objects keep
    /// their relative order and are named in a fresh namespace, so the
    /// result is valid on its own. Brand-new objects, if enabled, are
    /// appended after them.
    ///
    /// `m` must have been derived from this configuration's address; the
    /// result is identified by this address extended with `m`.
    pub fn generate_modified(
        &self,
        m: &ModConfigAddress,
        config: &GeneratorConfig,
    ) -> Result<Config> {
        config.validate()?;
        let addr = self.addr().new_mod(m)?;

        let mut rng = new_rand(m.random_seed());
        let mut namespace = Namespace::new();
        let mut objects = Vec::with_capacity(self.objects().len());

        for inst in self.objects() {
            let old = inst.object();
            match old.generate_modified(&mut rng, &mut namespace, config)? {
                Some(obj) => {
                    if obj.addr() != old.addr() {
                        debug!(from = %old.addr(), to = %obj.addr(), "renamed object");
                    }
                    objects.push(obj);
                }
                None => debug!(object = %old.addr(), "deleted object"),
            }
        }
        let kept = objects.len();

        if config.new_object_probability > 0.0 {
            while objects.len() - kept < config.max_new_objects
                && rng.gen_bool(config.new_object_probability)
            {
                let obj = generate_config_object(&mut rng, &mut namespace, config)?;
                debug!(object = %obj.addr(), "added object");
                objects.push(obj);
            }
        }

        info!(
            addr = %addr,
            kept,
            deleted = self.objects().len() - kept,
            added = objects.len() - kept,
            "generated modified config"
        );
        Ok(Config::from_parts(addr, objects, namespace))
    }
}
