//! Reproducible generation and mutation of Terraform-language configurations.
//!
//! A stress test is a series of configurations that are planned, applied,
//! and verified in order. Each configuration after the first is a random but
//! valid modification of the one before it, and every configuration can be
//! rebuilt exactly from its [`ConfigAddress`].
//!
//! # Key Types
//!
//! - [`Config`] — One generated configuration: address, object instances,
//!   [`Namespace`], and [`Registry`]
//! - [`ConfigSeries`] — An initial configuration followed by its mutations
//! - [`Namespace`] — Issues identifiers that never collide within a module
//! - [`Registry`] — Dynamic values bound to declared objects, per module instance
//! - [`ConfigObject`] / [`ConfigObjectInstance`] — A declaration and its binding
//! - [`GeneratorConfig`] — Tunable sizes, kind weights, and mutation odds
//!
//! All randomness flows from explicit [`StressRng`] values seeded from
//! addresses. Nothing here keeps hidden global state.

pub mod config;
pub mod error;
pub mod mutate;
pub mod names;
pub mod namespace;
pub mod object;
pub mod output;
pub mod random;
pub mod registry;
pub mod render;
pub mod series;
pub mod settings;
pub mod variable;

pub use stress_addr::{AddressError, ConfigAddress, ModConfigAddress};

pub use config::Config;
pub use error::{GenError, OutputMismatch, Result};
pub use namespace::{Namespace, MAX_NAME_ATTEMPTS};
pub use object::{
    generate_config_object, ConfigObject, ConfigObjectInstance, ObjectAddr, ObjectKind,
};
pub use output::{generate_config_output, ConfigOutput, ConfigOutputInstance};
pub use random::{new_rand, StressRng};
pub use registry::Registry;
pub use render::{Body, Document};
pub use series::ConfigSeries;
pub use settings::{GeneratorConfig, KindPolicy, ModifyDecision};
pub use variable::{generate_config_variable, ConfigVariable, ConfigVariableInstance};
