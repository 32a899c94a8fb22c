//! Best-effort browser launch

use crate::error::Result;
use std::io;
use std::process::{Command, Stdio};
use tracing::debug;

/// Platform command that opens a URL in the default browser
fn opener(url: &str) -> Option<Command> {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/c", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(unix) {
        Command::new("xdg-open")
    } else {
        return None;
    };
    cmd.arg(url);
    Some(cmd)
}

/// Open `url` without waiting for the browser
pub fn open_url(url: &str) -> Result<()> {
    let mut cmd = opener(url).ok_or_else(|| {
        io::Error::new(io::ErrorKind::Unsupported, "no browser launcher for this platform")
    })?;
    debug!("Opening {url}");
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
