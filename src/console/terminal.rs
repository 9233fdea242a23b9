use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;

use crate::admin::feedback::{Feedback, Notice, NoticeLevel, Route};
use crate::core::shutdown::stop_requested;

/// One read from the administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Line(String),
    /// End of input.
    Closed,
    /// A shutdown signal arrived before the line was complete.
    Stopped,
}

/// Line-based host for the admin screens.
///
/// Notices raised while a command runs are queued and written by
/// [`Terminal::flush_notices`]; a confirmation prompt flushes them first so the
/// administrator sees them in order. Every read, the confirmation answer included, gives
/// way to the shutdown receiver when one is attached.
pub(crate) struct Terminal<R, W> {
    reader: R,
    writer: W,
    pending: Vec<Notice>,
    route: Option<Route>,
    shutdown: Option<watch::Receiver<bool>>,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub(crate) fn new(reader: R, writer: W) -> Self {
        Self { reader, writer, pending: Vec::new(), route: None, shutdown: None }
    }

    pub(crate) fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub(crate) async fn read_input(&mut self) -> io::Result<Input> {
        let mut line = String::new();
        let read = match self.shutdown.as_mut() {
            Some(shutdown) => tokio::select! {
                biased;
                () = stop_requested(shutdown) => None,
                read = self.reader.read_line(&mut line) => Some(read?),
            },
            None => Some(self.reader.read_line(&mut line).await?),
        };
        Ok(match read {
            None => Input::Stopped,
            Some(0) => Input::Closed,
            Some(_) => Input::Line(line.trim_end_matches(['\r', '\n']).to_string()),
        })
    }

    pub(crate) async fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }

    pub(crate) async fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        if !text.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await
    }

    pub(crate) async fn flush_notices(&mut self) -> io::Result<()> {
        for notice in std::mem::take(&mut self.pending) {
            let tag = match notice.level {
                NoticeLevel::Success => "ok",
                NoticeLevel::Error => "error",
            };
            self.write_line(&format!("[{tag}] {}", notice.message)).await?;
        }
        Ok(())
    }

    pub(crate) fn take_route(&mut self) -> Option<Route> {
        self.route.take()
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[async_trait]
impl<R, W> Feedback for Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn notify(&mut self, notice: Notice) {
        self.pending.push(notice);
    }

    /// Anything but `y`/`yes` declines, including end of input, shutdown or a broken terminal.
    async fn confirm(&mut self, prompt: &str) -> bool {
        let asked = async {
            self.flush_notices().await?;
            self.write(&format!("{prompt} [y/N] ")).await?;
            self.read_input().await
        };
        match asked.await {
            Ok(Input::Line(answer)) => {
                matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
            }
            Ok(Input::Closed) => false,
            Ok(Input::Stopped) => {
                tracing::info!(prompt, "Shutdown requested during confirmation; declined");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "Confirmation prompt failed; treating as declined");
                false
            }
        }
    }

    fn navigate(&mut self, route: Route) {
        self.route = Some(route);
    }
}
