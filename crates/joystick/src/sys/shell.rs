use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};

/// Starts `sh -c <command>` with null stdio.
pub fn start(command: &str) -> io::Result<Child> {
    Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

/// Starts the command and hands the child to a reaper task, so nothing is left behind once it
/// exits. Must be called on the effect runtime.
pub fn spawn(command: &str) -> io::Result<()> {
    let child = start(command)?;
    let command = command.to_string();
    tokio::spawn(async move {
        if let Err(e) = reap(child).await {
            log::warn!("Failed to wait for '{}': {}", command, e);
        }
    });
    Ok(())
}

async fn reap(mut child: Child) -> io::Result<ExitStatus> {
    let status = child.wait().await?;
    if !status.success() {
        log::debug!("Command exited with {}", status);
    }
    Ok(status)
}
