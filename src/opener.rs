use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Result, bail};
use tracing::{debug, warn};

use crate::config::URL_PLACEHOLDER;

pub fn expand_command(template: &[String], url: &str) -> Vec<String> {
    template
        .iter()
        .map(|arg| arg.replace(URL_PLACEHOLDER, url))
        .collect()
}

/// Launches the opener without waiting on it. The child is reaped from a
/// detached thread so it never lingers as a zombie.
pub fn open_detached(template: &[String], url: &str) -> Result<()> {
    let argv = expand_command(template, url);
    let Some((program, args)) = argv.split_first() else {
        bail!("open command is empty");
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    debug!(program = %program, url, "spawned opener");

    thread::spawn(move || {
        if let Err(error) = child.wait() {
            warn!(error = %error, "failed to reap opener process");
        }
    });
    Ok(())
}

/// Best effort: failures are logged and never reach the dashboard.
pub fn open_url(template: &[String], url: &str) {
    if let Err(error) = open_detached(template, url) {
        warn!(error = %error, url, "failed to launch opener");
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_command, open_detached};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn substitutes_url_into_every_placeholder() {
        let template = strings(&["browser", "--new-tab", "{url}", "--ref={url}"]);
        let argv = expand_command(&template, "https://example.net/browse/A-1");

        assert_eq!(
            argv,
            strings(&[
                "browser",
                "--new-tab",
                "https://example.net/browse/A-1",
                "--ref=https://example.net/browse/A-1",
            ])
        );
    }

    #[test]
    fn empty_template_is_an_error() {
        assert!(open_detached(&[], "https://example.net").is_err());
    }

    #[test]
    fn missing_program_is_an_error() {
        let template = strings(&["jiradash-no-such-opener", "{url}"]);
        assert!(open_detached(&template, "https://example.net").is_err());
    }
}
