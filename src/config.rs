//! Configuration model: rule values, fragments, bundles and config files

pub mod bundle;
pub mod fragment;
pub mod lintstack_toml;
pub mod rule_value;

pub use bundle::{Bundle, BundleRegistry};
pub use fragment::{Fragment, FragmentDef};
pub use lintstack_toml::{CONFIG_FILE_NAMES, Config, ConfigEntry, LintstackMeta, discover};
pub use rule_value::RuleValue;
