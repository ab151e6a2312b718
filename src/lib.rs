//! Declarative, typed configuration loading
//!
//! This crate resolves configuration once at startup, from environment
//! variables or a YAML document, into a typed, validated and introspectable
//! object with secret-masked display.
//!
//! Environment path: declare fields, resolve explicitly, read typed values.
//!
//! ```
//! use confplus::{Cast, EnvConfig, FieldSpec, Value};
//!
//! let fields = vec![
//!     FieldSpec::new("APP_PORT").cast(Cast::Int).default(8000i64),
//!     FieldSpec::new("DATABASE_HOST").default("localhost"),
//!     FieldSpec::new("CACHE_ENABLED").cast(Cast::Bool).default(true),
//! ];
//!
//! let config = EnvConfig::resolve_with("runtime", fields, |_| None).unwrap();
//! assert_eq!(config.get("APP_PORT"), Some(Value::Int(8000)));
//! println!("{config}"); // grouped, secrets masked
//! ```
//!
//! YAML path: parse the tree, then project it into your own types with
//! dot-notation lookups and serde.
//!
//! ```no_run
//! use confplus::YamlConfig;
//!
//! struct AppSettings {
//!     theme: String,
//!     items_per_page: i64,
//! }
//!
//! let settings: AppSettings = YamlConfig::load_projected("config.yaml", |config| {
//!     Ok(AppSettings {
//!         theme: config.get_str("display.theme").unwrap_or("light").to_string(),
//!         items_per_page: config.get_i64("display.items_per_page").unwrap_or(10),
//!     })
//! })
//! .unwrap();
//! # let _ = settings.theme;
//! # let _ = settings.items_per_page;
//! ```

pub mod env;
pub mod envfile;
pub mod error;
pub mod field;
pub mod profiles;
pub mod render;
pub mod secret;
pub mod validation;
pub mod value;
pub mod yaml;

// Re-export main types
pub use env::EnvConfig;
pub use envfile::load_env_file;
pub use error::{ConfigError, ConfigResult};
pub use field::{Cast, FieldSpec};
pub use profiles::{select_profile, ProfileValues};
pub use render::render_fields;
pub use secret::{is_secret, mask};
pub use validation::Validatable;
pub use value::Value;
pub use yaml::YamlConfig;
