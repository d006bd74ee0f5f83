use async_trait::async_trait;
use eyre::{bail, Context, Result};
use gallery_core::interaction::LinkOpener;
use std::process::Stdio;

/// Hands links to the desktop's default handler (`xdg-open`, `open` on macOS).
/// The spawned browser gets nothing back from us beyond the link itself.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
}

impl Default for SystemOpener {
    fn default() -> Self {
        let program = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        SystemOpener {
            program: program.to_owned(),
        }
    }
}

impl SystemOpener {
    pub fn with_program(program: impl Into<String>) -> SystemOpener {
        SystemOpener {
            program: program.into(),
        }
    }
}

#[async_trait]
impl LinkOpener for SystemOpener {
    async fn open(&self, link: &str) -> Result<()> {
        let status = tokio::process::Command::new(&self.program)
            .arg(link)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .wrap_err_with(|| format!("error running {}", self.program))?;
        if !status.success() {
            bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use claims::{assert_err, assert_ok};

    use super::*;

    #[tokio::test]
    async fn reports_exit_status() {
        assert_ok!(SystemOpener::with_program("true").open("https://x.test").await);
        assert_err!(SystemOpener::with_program("false").open("https://x.test").await);
        assert_err!(
            SystemOpener::with_program("/nonexistent/opener")
                .open("https://x.test")
                .await
        );
    }
}
