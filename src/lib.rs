//! vault-env - turns `KEY=vault:PATH:FIELD` environment entries into a
//! sourceable file of `export KEY=<secret>` lines.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod reference;

pub use app::{run, run_with_environment};
pub use config::{AuthMode, Cli, Config, Credentials};
pub use error::{AuthError, ConfigError, Error, ParseError};
pub use output::{OutputSink, ResolvedAssignment};
pub use pipeline::{resolve, ResolveSummary};
pub use reference::{parse, SecretReference};
