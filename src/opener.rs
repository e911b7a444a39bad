use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// Opens a URL for the user, typically in a browser.
#[async_trait]
pub trait Opener: Send + Sync {
    async fn open(&self, url: &str) -> Result<()>;
}

pub fn quote_if_required(value: &str) -> String {
    if value.contains(' ') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

/// Program and arguments that open `url` on the given target OS.
///
/// Windows goes through `cmd`, which re-parses the line, so the URL is
/// quoted there. Elsewhere the URL is passed as a single argument.
pub fn open_command(os: &str, url: &str) -> (String, Vec<String>) {
    match os {
        "windows" => (
            "cmd".to_string(),
            vec![
                "/C".to_string(),
                "start".to_string(),
                "\"\"".to_string(),
                quote_if_required(url),
            ],
        ),
        "macos" => ("open".to_string(), vec![url.to_string()]),
        _ => ("xdg-open".to_string(), vec![url.to_string()]),
    }
}

/// Launches the platform's URL handler without waiting for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

#[async_trait]
impl Opener for SystemOpener {
    async fn open(&self, url: &str) -> Result<()> {
        let (program, args) = open_command(std::env::consts::OS, url);
        debug!(%program, ?args, "Opening URL");

        if let Err(err) = Command::new(&program).args(&args).spawn() {
            warn!(%program, %url, error = %err, "Could not launch URL opener");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        assert_eq!(quote_if_required("https://x/y"), "https://x/y");
        assert_eq!(quote_if_required("C:\\My Files"), "\"C:\\My Files\"");
    }

    #[test]
    fn picks_platform_opener() {
        let url = "https://github.com/o/r/releases/edit/v1";
        assert_eq!(
            open_command("linux", url),
            ("xdg-open".to_string(), vec![url.to_string()])
        );
        assert_eq!(
            open_command("macos", url),
            ("open".to_string(), vec![url.to_string()])
        );
        let (program, args) = open_command("windows", "a b");
        assert_eq!(program, "cmd");
        assert_eq!(args.last().map(String::as_str), Some("\"a b\""));
    }
}
