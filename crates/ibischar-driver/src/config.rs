//! Driver policy: simulator command, iterate/cleanup flags, and an optional
//! wall-clock timeout.

use std::time::Duration;

/// How the driver invokes the external simulator and what it does with
/// scratch artifacts afterward.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Executable name or path (e.g. `"hspice"`, `"spectre"`, `"eldo"`).
    pub command: String,
    /// Extra arguments appended before the deck path.
    pub extra_args: Vec<String>,
    /// Skip invocation if the expected result file already exists and is
    /// newer than the deck (spec §4.3 "iterate").
    pub iterate: bool,
    /// Delete deck/log/message file after a successful parse (spec §4.3
    /// "cleanup"). The log is always preserved on failure regardless of
    /// this flag.
    pub cleanup: bool,
    /// Optional wall-clock cap; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            command: "hspice".to_string(),
            extra_args: Vec::new(),
            iterate: false,
            cleanup: false,
            timeout: None,
        }
    }
}

impl DriverConfig {
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_iterate(mut self, iterate: bool) -> Self {
        self.iterate = iterate;
        self
    }

    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `true` when `command` resolves to something executable via `PATH` or an
/// absolute path; mirrors the availability probe the teacher uses before
/// ever spawning the real subprocess.
pub fn is_simulator_available(config: &DriverConfig) -> bool {
    which(&config.command).is_some()
}

fn which(command: &str) -> Option<std::path::PathBuf> {
    let path = std::path::Path::new(command);
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths)
            .map(|dir| dir.join(command))
            .find(|candidate| candidate.is_file())
    })
}
