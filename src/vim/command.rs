//! Vim command line construction

use crate::models::Variable;

use super::shell::ShellWrapper;

/// Startup fragment every invocation carries
pub const STARTUP_CMD: &str = "set nocp | sy on | filetype plugin indent on";

/// Default editor executable
pub const DEFAULT_VIM: &str = "vim";

/// Builder for a single non-interactive Vim invocation
#[derive(Clone, Debug)]
pub struct VimCommand {
    executable: String,
    variables: Vec<Variable>,
    paths: Vec<String>,
    plugins: Vec<String>,
    pre_commands: Vec<String>,
    commands: Vec<String>,
}

impl Default for VimCommand {
    fn default() -> Self {
        Self::new(DEFAULT_VIM)
    }
}

impl VimCommand {
    /// Create a command for the given Vim executable
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            variables: Vec::new(),
            paths: Vec::new(),
            plugins: Vec::new(),
            pre_commands: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Set variables assigned before anything is sourced
    pub fn variables(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.variables.extend(variables);
        self
    }

    /// Add entries appended to 'runtimepath'
    pub fn paths<S: Into<String>>(mut self, paths: impl IntoIterator<Item = S>) -> Self {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add plugins loaded with `:runtime`
    pub fn plugins<S: Into<String>>(mut self, plugins: impl IntoIterator<Item = S>) -> Self {
        self.plugins.extend(plugins.into_iter().map(Into::into));
        self
    }

    /// Add a command run before any plugin is sourced
    pub fn pre_command(mut self, cmd: impl Into<String>) -> Self {
        self.pre_commands.push(cmd.into());
        self
    }

    /// Add a command run after startup
    pub fn command(mut self, cmd: impl Into<String>) -> Self {
        self.commands.push(cmd.into());
        self
    }

    /// Assemble the Vim command line, ending with the given quit fragment
    pub fn command_line(&self, quit: &str) -> String {
        let mut line = format!("{} -u NONE -U NONE", self.executable);
        line.push_str(&format!(" --cmd \"{STARTUP_CMD}\""));

        if !self.variables.is_empty() {
            let lets: Vec<String> = self.variables.iter().map(Variable::to_let).collect();
            line.push_str(&format!(" --cmd \"{}\"", lets.join(" | ")));
        }

        if !self.paths.is_empty() {
            line.push_str(&format!(" --cmd \"set rtp+={}\"", self.paths.join(",")));
        }

        if !self.plugins.is_empty() {
            line.push_str(&format!(" --cmd \"runtime {}\"", self.plugins.join(" ")));
        }

        for cmd in &self.pre_commands {
            line.push_str(&format!(" --cmd \"{cmd}\""));
        }

        for cmd in &self.commands {
            line.push_str(&format!(" -c \"{cmd}\""));
        }

        line.push(' ');
        line.push_str(quit);
        line
    }

    /// Build the full argv for the given shell
    pub fn build(&self, shell: &dyn ShellWrapper) -> Vec<String> {
        shell.wrap(&self.command_line(shell.quit_fragment()))
    }
}
