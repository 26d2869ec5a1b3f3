//! Copies the report to the system clipboard through whichever clipboard
//! command the platform provides.

use anyhow::{Context, Result};
use log;
use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Tmux,
    MacOS,
    Wsl,
    Wayland,
    Xsel,
    Xclip,
    Termux,
}

impl Provider {
    fn program(self) -> &'static str {
        match self {
            Self::Tmux => "tmux",
            Self::MacOS => "pbcopy",
            Self::Wsl => "clip.exe",
            Self::Wayland => "wl-copy",
            Self::Xsel => "xsel",
            Self::Xclip => "xclip",
            Self::Termux => "termux-clipboard-set",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Tmux => &["load-buffer", "-w", "-"],
            Self::Xsel => &["-b", "-i"],
            Self::Xclip => &["-selection", "clipboard", "-in"],
            Self::MacOS | Self::Wsl | Self::Wayland | Self::Termux => &[],
        }
    }

    fn copy(self, text: &str) -> Result<()> {
        let cmd = self.program();
        let mut child = Command::new(cmd)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to spawn {}", cmd))?;

        child
            .stdin
            .as_mut()
            .context("Failed to open clipboard stdin")?
            .write_all(text.as_bytes())
            .with_context(|| format!("Failed to write to {}", cmd))?;

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", cmd))?;
        if !status.success() {
            anyhow::bail!("{} exited with status: {}", cmd, status);
        }
        Ok(())
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let providers = available_providers();
    if providers.is_empty() {
        anyhow::bail!("No suitable clipboard mechanism found");
    }

    let mut last_error = None;
    for provider in providers {
        log::debug!("Trying clipboard provider {:?}", provider);
        match provider.copy(text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                log::debug!("Clipboard provider {:?} failed: {:#}", provider, e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No suitable clipboard mechanism found")))
}

fn available_providers() -> Vec<Provider> {
    let mut providers = Vec::new();
    if env::var("TMUX").is_ok() && command_exists("tmux") {
        providers.push(Provider::Tmux);
    }

    let candidates: &[Provider] = if cfg!(target_os = "macos") {
        &[Provider::MacOS]
    } else if cfg!(target_os = "windows") || env::var("WSL_DISTRO_NAME").is_ok() {
        &[Provider::Wsl]
    } else if cfg!(target_os = "android") {
        &[Provider::Termux]
    } else {
        &[Provider::Wayland, Provider::Xsel, Provider::Xclip]
    };

    providers.extend(
        candidates
            .iter()
            .copied()
            .filter(|p| command_exists(p.program())),
    );
    providers
}

pub fn command_exists(command: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| dir.join(command).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_does_not_exist() {
        assert!(!command_exists("projmap-no-such-clipboard-tool"));
    }

    #[test]
    fn x11_providers_target_the_clipboard_selection() {
        assert_eq!(Provider::Xclip.args(), ["-selection", "clipboard", "-in"]);
        assert_eq!(Provider::Xsel.args(), ["-b", "-i"]);
        assert!(Provider::Wayland.args().is_empty());
    }
}
