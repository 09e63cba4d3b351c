//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::RunConfig;
use crate::models::{FileSet, Variable};

/// Run Vim plugin unit tests, one editor process per test file
#[derive(Parser, Debug)]
#[command(name = "vunit")]
#[command(version)]
#[command(about = "Run Vim plugin unit tests and report failures to the build")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run test files
    Run(RunArgs),

    /// Manage configuration files
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory result documents are written to
    #[arg(short, long)]
    pub todir: Option<PathBuf>,

    /// Base directory of the test files given on the command line
    #[arg(short, long, default_value = ".")]
    pub basedir: PathBuf,

    /// Test files relative to --basedir
    pub files: Vec<String>,

    /// Vim variable to set, as KEY=VALUE (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Entry appended to Vim's runtimepath (repeatable)
    #[arg(short, long = "path", value_name = "DIR")]
    pub paths: Vec<String>,

    /// Plugin loaded with :runtime (repeatable)
    #[arg(long = "plugin", value_name = "NAME")]
    pub plugins: Vec<String>,

    /// Vim command run with --cmd before the tests (repeatable)
    #[arg(long = "pre-command", value_name = "CMD")]
    pub pre_commands: Vec<String>,

    /// Property set to "true" when a test fails
    #[arg(long)]
    pub failure_property: Option<String>,

    /// Stop at the first failing test file
    #[arg(long)]
    pub halt_on_failure: bool,

    /// Vim executable
    #[arg(long)]
    pub vim: Option<String>,

    /// Use this runner script instead of the bundled one
    #[arg(long)]
    pub runner_script: Option<PathBuf>,

    /// Predefined property, as KEY=VALUE (repeatable)
    #[arg(short = 'D', long = "property", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Write resulting properties to this file
    #[arg(long)]
    pub properties_out: Option<PathBuf>,

    /// Print a report when done (table, json, json-pretty, csv)
    #[arg(short, long)]
    pub report: Option<String>,
}

impl RunArgs {
    /// Overlay command line options onto a configuration
    pub fn apply_to(&self, config: &mut RunConfig) -> Result<()> {
        if let Some(todir) = &self.todir {
            config.todir = Some(todir.clone());
        }

        if !self.files.is_empty() {
            let mut set = FileSet::new(&self.basedir);
            set.includes = self.files.clone();
            config.filesets.push(set);
        }

        for var in &self.vars {
            let var = Variable::parse(var)
                .ok_or_else(|| anyhow!("Invalid variable '{var}', expected KEY=VALUE"))?;
            config.variables.push(var);
        }

        config.paths.extend(self.paths.iter().cloned());
        config.plugins.extend(self.plugins.iter().cloned());
        config.pre_commands.extend(self.pre_commands.iter().cloned());

        if let Some(property) = &self.failure_property {
            config.failure_property = Some(property.clone());
        }
        if self.halt_on_failure {
            config.halt_on_failure = true;
        }
        if let Some(vim) = &self.vim {
            config.vim = vim.clone();
        }
        if let Some(script) = &self.runner_script {
            config.runner_script = Some(script.clone());
        }

        for property in &self.properties {
            let Variable { key, value } = Variable::parse(property)
                .ok_or_else(|| anyhow!("Invalid property '{property}', expected KEY=VALUE"))?;
            config.properties.insert(key, value);
        }

        Ok(())
    }
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Destination file
        #[arg(default_value = "vunit.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show {
        /// Configuration file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_parsing() {
        let args = Args::parse_from([
            "vunit",
            "run",
            "--todir",
            "build/results",
            "--basedir",
            "test",
            "--var",
            "g:Debug=1",
            "--path",
            "/opt/plugin",
            "--plugin",
            "plugin/foo.vim",
            "--pre-command",
            "set shell=sh",
            "--halt-on-failure",
            "--failure-property",
            "tests.failed",
            "-D",
            "build.id=42",
            "a.vim",
            "sub/b.vim",
        ]);

        match args.command {
            Command::Run(run) => {
                assert_eq!(run.todir, Some(PathBuf::from("build/results")));
                assert_eq!(run.basedir, PathBuf::from("test"));
                assert_eq!(run.files, vec!["a.vim", "sub/b.vim"]);
                assert_eq!(run.vars, vec!["g:Debug=1"]);
                assert_eq!(run.paths, vec!["/opt/plugin"]);
                assert_eq!(run.plugins, vec!["plugin/foo.vim"]);
                assert_eq!(run.pre_commands, vec!["set shell=sh"]);
                assert!(run.halt_on_failure);
                assert_eq!(run.failure_property.as_deref(), Some("tests.failed"));
                assert_eq!(run.properties, vec!["build.id=42"]);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_config_init_args() {
        let args = Args::parse_from(["vunit", "-v", "config", "init"]);
        assert!(args.verbose);
        match args.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { path, force },
            }) => {
                assert_eq!(path, PathBuf::from("vunit.yaml"));
                assert!(!force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_apply_to_appends_and_overrides() {
        let mut config = RunConfig {
            paths: vec!["/from/file".to_string()],
            variables: vec![Variable::new("g:a", "1")],
            ..Default::default()
        };

        let args = RunArgs {
            todir: Some(PathBuf::from("out")),
            basedir: PathBuf::from("test"),
            files: vec!["x.vim".to_string()],
            vars: vec!["g:b=2".to_string()],
            paths: vec!["/from/cli".to_string()],
            vim: Some("nvim".to_string()),
            properties: vec!["p=v".to_string()],
            ..Default::default()
        };
        args.apply_to(&mut config).unwrap();

        assert_eq!(config.todir, Some(PathBuf::from("out")));
        assert_eq!(config.filesets, vec![FileSet::new("test").include("x.vim")]);
        assert_eq!(
            config.variables,
            vec![Variable::new("g:a", "1"), Variable::new("g:b", "2")]
        );
        assert_eq!(config.paths, vec!["/from/file", "/from/cli"]);
        assert_eq!(config.vim, "nvim");
        assert_eq!(config.properties.get("p").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_apply_to_rejects_bad_variable() {
        let args = RunArgs {
            vars: vec!["nonsense".to_string()],
            ..Default::default()
        };
        assert!(args.apply_to(&mut RunConfig::default()).is_err());
    }

    #[test]
    fn test_no_files_adds_no_fileset() {
        let mut config = RunConfig::default();
        RunArgs::default().apply_to(&mut config).unwrap();
        assert!(config.filesets.is_empty());
    }
}
