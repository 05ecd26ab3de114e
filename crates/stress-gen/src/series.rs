//! A root configuration followed by a chain of random modifications.

use std::mem;

use tracing::info;

use stress_addr::{ConfigAddress, ModConfigAddress};

use crate::config::Config;
use crate::error::Result;
use crate::random::new_rand;
use crate::settings::GeneratorConfig;

/// Stream of the root seed's generator reserved for choosing mutation
/// entropy, kept apart from stream 0 which generates the root config.
const MUTATION_STREAM: u64 = 1;

/// The configurations a stress test walks through, in order.
///
/// The first is generated from a root address and every later one is a
/// modification of its predecessor. The address of the last configuration
/// alone is enough to rebuild it.
#[derive(Debug)]
pub struct ConfigSeries {
    configs: Vec<Config>,
}

impl ConfigSeries {
    /// Generate a series starting at `root` with `steps` modifications after
    /// the initial configuration.
    ///
    /// Mutation entropy is drawn from a stream seeded by `root`, so the
    /// whole series is reproducible from the root address.
    pub fn generate(root: &ConfigAddress, steps: usize, config: &GeneratorConfig) -> Result<Self> {
        let mut rng = new_rand(root.random_seed());
        rng.set_stream(MUTATION_STREAM);

        let mut configs = Vec::with_capacity(steps + 1);
        let mut current = Config::generate(root, config)?;
        for _ in 0..steps {
            let m = ModConfigAddress::random(current.addr(), &mut rng);
            let next = current.generate_modified(&m, config)?;
            configs.push(mem::replace(&mut current, next));
        }
        configs.push(current);

        info!(root = %root, steps, "generated config series");
        Ok(Self { configs })
    }

    /// All configurations, initial first.
    pub fn configs(&self) -> &[Config] {
        &self.configs
    }

    /// The final configuration.
    pub fn last(&self) -> Option<&Config> {
        self.configs.last()
    }

    /// Number of configurations, including the initial one.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns `true` if the series holds no configurations.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
