//! Platform shell wrapping
//!
//! Vim does not behave when launched straight from a piped child process, so
//! the assembled command line always runs through the platform shell.

/// Strategy for turning a Vim command line into a process argv
pub trait ShellWrapper: Send + Sync {
    /// Trailing fragment that quits Vim unconditionally
    fn quit_fragment(&self) -> &'static str;

    /// Wrap a complete Vim command line into program + arguments
    fn wrap(&self, command_line: &str) -> Vec<String>;

    fn name(&self) -> &'static str;
}

/// `sh -c` with terminal output discarded
#[derive(Clone, Copy, Debug, Default)]
pub struct PosixShell;

impl ShellWrapper for PosixShell {
    fn quit_fragment(&self) -> &'static str {
        "-c 'qa!'"
    }

    fn wrap(&self, command_line: &str) -> Vec<String> {
        vec![
            "sh".to_string(),
            "-c".to_string(),
            format!("{command_line} > /dev/null 2>&1"),
        ]
    }

    fn name(&self) -> &'static str {
        "sh"
    }
}

/// `cmd /c`
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowsShell;

impl ShellWrapper for WindowsShell {
    fn quit_fragment(&self) -> &'static str {
        "-c \"qa!\""
    }

    fn wrap(&self, command_line: &str) -> Vec<String> {
        vec![
            "cmd".to_string(),
            "/c".to_string(),
            command_line.to_string(),
        ]
    }

    fn name(&self) -> &'static str {
        "cmd"
    }
}

/// Select the wrapper for the platform we are running on
pub fn platform_shell() -> Box<dyn ShellWrapper> {
    if cfg!(windows) {
        Box::new(WindowsShell)
    } else {
        Box::new(PosixShell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_wrap() {
        let argv = PosixShell.wrap("vim -u NONE");
        assert_eq!(argv, vec!["sh", "-c", "vim -u NONE > /dev/null 2>&1"]);
        assert_eq!(PosixShell.quit_fragment(), "-c 'qa!'");
    }

    #[test]
    fn test_windows_wrap() {
        let argv = WindowsShell.wrap("vim -u NONE");
        assert_eq!(argv, vec!["cmd", "/c", "vim -u NONE"]);
        assert_eq!(WindowsShell.quit_fragment(), "-c \"qa!\"");
    }

    #[test]
    fn test_platform_shell() {
        let shell = platform_shell();
        if cfg!(windows) {
            assert_eq!(shell.name(), "cmd");
        } else {
            assert_eq!(shell.name(), "sh");
        }
    }
}
