use std::io;
use std::process::Command;
use std::sync::{Mutex, PoisonError};
use std::thread;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Empty command")]
    EmptyCommand,

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Capability to start an external process from an argument vector.
pub trait Launcher {
    /// Start `argv[0]` with `argv[1..]` and return without waiting for it.
    fn launch(&self, argv: &[String]) -> Result<(), LaunchError>;
}

/// Spawns real OS processes.
///
/// No stdio redirection, working directory or environment override is
/// applied; the child inherits all of them. `launch` returns as soon as the
/// process has started. A detached thread waits on the child so it is reaped
/// when it exits instead of lingering as a zombie.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, argv: &[String]) -> Result<(), LaunchError> {
        let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;
        log::debug!("spawning {program} {args:?}");
        let mut child = Command::new(program)
            .args(args)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;

        let pid = child.id();
        let reaper = thread::Builder::new()
            .name(format!("reap-{pid}"))
            .spawn(move || match child.wait() {
                Ok(status) => log::debug!("child {pid} exited with {status}"),
                Err(err) => log::warn!("failed to wait for child {pid}: {err}"),
            });
        if let Err(err) = reaper {
            log::warn!("failed to start reaper for child {pid}: {err}");
        }
        Ok(())
    }
}

/// Records argument vectors instead of spawning them.
///
/// Used for dry runs and as a test double.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launched: Mutex<Vec<Vec<String>>>,
}

impl RecordingLauncher {
    pub fn launched(&self) -> Vec<Vec<String>> {
        self.launched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, argv: &[String]) -> Result<(), LaunchError> {
        if argv.is_empty() {
            return Err(LaunchError::EmptyCommand);
        }
        self.launched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(argv.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            ProcessLauncher.launch(&[]),
            Err(LaunchError::EmptyCommand)
        ));
        assert!(matches!(
            RecordingLauncher::default().launch(&[]),
            Err(LaunchError::EmptyCommand)
        ));
    }

    #[test]
    fn missing_program_surfaces_spawn_error() {
        let argv = vec!["settings-launcher-no-such-program".to_string()];
        match ProcessLauncher.launch(&argv) {
            Err(LaunchError::Spawn { program, source }) => {
                assert_eq!(program, "settings-launcher-no-such-program");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected spawn error, got {other:?}"),
        }
    }

    /// Zombie processes whose parent is this test binary.
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id();
        let Ok(entries) = std::fs::read_dir("/proc") else {
            return 0;
        };
        entries
            .filter_map(|entry| std::fs::read_to_string(entry.ok()?.path().join("stat")).ok())
            .filter(|stat| {
                // `pid (comm) state ppid ...`; comm may contain spaces.
                let Some(tail) = stat.rfind(')').map(|pos| &stat[pos + 1..]) else {
                    return false;
                };
                let mut fields = tail.split_whitespace();
                let state = fields.next();
                let ppid = fields.next().and_then(|ppid| ppid.parse::<u32>().ok());
                state == Some("Z") && ppid == Some(me)
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn launched_children_are_reaped() {
        let argv = vec!["true".to_string()];
        for _ in 0..5 {
            ProcessLauncher.launch(&argv).unwrap();
        }

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        let mut zombies = zombie_children();
        while zombies > 0 && std::time::Instant::now() < deadline {
            thread::sleep(std::time::Duration::from_millis(50));
            zombies = zombie_children();
        }
        assert_eq!(zombies, 0, "launched children were left unreaped");
    }

    #[test]
    fn recording_launcher_keeps_call_order() {
        let launcher = RecordingLauncher::default();
        launcher.launch(&["a".to_string()]).unwrap();
        launcher.launch(&["b".to_string(), "c".to_string()]).unwrap();
        assert_eq!(
            launcher.launched(),
            vec![
                vec!["a".to_string()],
                vec!["b".to_string(), "c".to_string()]
            ]
        );
    }
}
