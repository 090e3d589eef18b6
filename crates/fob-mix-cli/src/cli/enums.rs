use clap::ValueEnum;
use fob_mix::Environment;

/// Build environment selected on the command line
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum EnvironmentArg {
    /// Development build: sourcemaps use the configured devtool
    #[value(name = "development", alias = "dev")]
    Development,

    /// Production build: sourcemaps are separate files or disabled
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Development => Environment::Development,
            EnvironmentArg::Production => Environment::Production,
        }
    }
}
