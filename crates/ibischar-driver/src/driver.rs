//! Subprocess spawn/wait for the external SPICE simulator, grounded on the
//! `is_ngspice_available`/`run_ngspice`/`ngspice_version` subprocess pattern:
//! probe for the executable before ever spawning, capture stdout/stderr to
//! a log file beside the deck, and treat a non-zero exit code as advisory
//! rather than fatal (spec §4.3 "a non-zero simulator exit code is not
//! itself fatal").

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::config::DriverConfig;
use crate::error::{DriverError, DriverResult};

/// Paths produced by one simulator invocation; the caller (result reader /
/// orchestrator) decides whether to invoke [`cleanup`] once parsing
/// succeeds.
#[derive(Debug, Clone)]
pub struct SimulationHandle {
    pub deck_path: PathBuf,
    pub result_path: PathBuf,
    pub log_path: PathBuf,
}

/// Spawn the simulator against `deck_path`, wait for it to finish (subject
/// to `config.timeout` and `cancel`), and confirm `result_path` was
/// produced and non-empty. Honors `config.iterate` by skipping invocation
/// entirely when the result is already newer than the deck.
pub fn invoke(
    deck_path: &Path,
    result_path: &Path,
    config: &DriverConfig,
    cancel: &AtomicBool,
) -> DriverResult<SimulationHandle> {
    let log_path = deck_path.with_extension("log");

    if config.iterate && result_is_fresh(deck_path, result_path) {
        log::info!(
            "iterate: reusing existing result {} (newer than {})",
            result_path.display(),
            deck_path.display()
        );
        return Ok(SimulationHandle {
            deck_path: deck_path.to_path_buf(),
            result_path: result_path.to_path_buf(),
            log_path,
        });
    }

    let log_file = File::create(&log_path)?;
    log::debug!(
        "spawning {} on {}",
        config.command,
        deck_path.display()
    );
    let mut child = Command::new(&config.command)
        .args(&config.extra_args)
        .arg(deck_path)
        .stdout(log_file.try_clone()?)
        .stderr(log_file)
        .spawn()
        .map_err(|source| DriverError::Spawn {
            command: config.command.clone(),
            source,
        })?;

    let started = Instant::now();
    let status = loop {
        if cancel.load(Ordering::SeqCst) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(DriverError::Cancelled);
        }
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if let Some(timeout) = config.timeout {
            if started.elapsed() > timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(DriverError::Timeout(timeout));
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(25));
    };

    if !result_path.is_file() {
        return Err(DriverError::MissingResultFile {
            status: format!("{status:?}"),
            path: result_path.display().to_string(),
        });
    }
    let metadata = std::fs::metadata(result_path)?;
    if metadata.len() == 0 {
        return Err(DriverError::EmptyResultFile {
            path: result_path.display().to_string(),
        });
    }

    Ok(SimulationHandle {
        deck_path: deck_path.to_path_buf(),
        result_path: result_path.to_path_buf(),
        log_path,
    })
}

/// `true` when `result_path` exists and its mtime is at least as new as
/// `deck_path`'s (spec §4.3 "iterate" policy).
fn result_is_fresh(deck_path: &Path, result_path: &Path) -> bool {
    let (Ok(result_meta), Ok(deck_meta)) = (
        std::fs::metadata(result_path),
        std::fs::metadata(deck_path),
    ) else {
        return false;
    };
    match (result_meta.modified(), deck_meta.modified()) {
        (Ok(result_time), Ok(deck_time)) => result_time >= deck_time,
        _ => false,
    }
}

/// Delete the deck and simulator log after a successful downstream parse.
/// The log is never removed if this isn't called, which is how failure
/// preservation (spec §4.3) falls out for free: callers only invoke this
/// on the success path.
pub fn cleanup(handle: &SimulationHandle) {
    let _ = std::fs::remove_file(&handle.deck_path);
    let _ = std::fs::remove_file(&handle.log_path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let dir = tempdir().unwrap();
        let deck_path = dir.path().join("deck.sp");
        std::fs::write(&deck_path, "* empty deck\n").unwrap();
        let result_path = dir.path().join("deck.out");

        let config = DriverConfig::default().with_command("definitely-not-a-real-simulator-binary");
        let cancel = AtomicBool::new(false);

        let err = invoke(&deck_path, &result_path, &config, &cancel).unwrap_err();
        assert!(matches!(err, DriverError::Spawn { .. }));
    }

    #[test]
    fn iterate_skips_invocation_when_result_is_fresh() {
        let dir = tempdir().unwrap();
        let deck_path = dir.path().join("deck.sp");
        std::fs::write(&deck_path, "* empty deck\n").unwrap();

        let result_path = dir.path().join("deck.out");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let mut result_file = File::create(&result_path).unwrap();
        result_file.write_all(b"result data").unwrap();
        drop(result_file);

        let config = DriverConfig::default()
            .with_command("definitely-not-a-real-simulator-binary")
            .with_iterate(true);
        let cancel = AtomicBool::new(false);

        let handle = invoke(&deck_path, &result_path, &config, &cancel).unwrap();
        assert_eq!(handle.result_path, result_path);
    }

    #[test]
    fn cleanup_removes_deck_and_log_but_caller_controls_when() {
        let dir = tempdir().unwrap();
        let deck_path = dir.path().join("deck.sp");
        let log_path = dir.path().join("deck.log");
        std::fs::write(&deck_path, "* deck").unwrap();
        std::fs::write(&log_path, "log").unwrap();

        let handle = SimulationHandle {
            deck_path: deck_path.clone(),
            result_path: dir.path().join("deck.out"),
            log_path: log_path.clone(),
        };
        cleanup(&handle);
        assert!(!deck_path.exists());
        assert!(!log_path.exists());
    }
}
