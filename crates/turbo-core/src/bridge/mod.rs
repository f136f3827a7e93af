//! Host bridge: drives the coordinator from a browser extension shell.
//!
//! The shell forwards browser events as JSON lines (stdin for `turbo host`) and
//! carries out the commands written back (stdout). Each download runs on its
//! own task; the loop ends at end of input once in-flight tasks finish.

mod protocol;
mod writer;

pub use protocol::{parse_event, BrowserCommand, HostEvent};
pub use writer::CommandWriter;

use crate::companion::Companion;
use crate::coordinator::{HandoffCoordinator, HandoffOutcome};
use crate::menu::ContextMenuItem;
use crate::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tokio::task::JoinSet;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("bridge I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding command: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Tally of what the host did before input ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSummary {
    pub handed_off: usize,
    pub resumed: usize,
    pub ignored: usize,
    pub links_sent: usize,
    pub links_failed: usize,
    pub malformed_lines: usize,
}

enum TaskResult {
    Download(HandoffOutcome),
    Link(bool),
}

impl HostSummary {
    fn record(&mut self, result: TaskResult) {
        match result {
            TaskResult::Download(HandoffOutcome::HandedOff) => self.handed_off += 1,
            TaskResult::Download(HandoffOutcome::Resumed) => self.resumed += 1,
            TaskResult::Download(HandoffOutcome::Ignored(_)) => self.ignored += 1,
            TaskResult::Link(true) => self.links_sent += 1,
            TaskResult::Link(false) => self.links_failed += 1,
        }
    }
}

/// Runs the bridge until `input` is exhausted, then clears the session marker.
///
/// In-flight downloads are always waited for, even when reading input or
/// writing a command fails, so no download is left paused by an early return.
pub async fn run_host<R, W>(
    input: R,
    output: W,
    companion: Arc<dyn Companion>,
    session: Arc<dyn SessionStore>,
    grace_window: Duration,
) -> Result<HostSummary, BridgeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let writer = Arc::new(CommandWriter::new(output));
    let coordinator =
        HandoffCoordinator::new(companion, writer.clone(), session.clone(), grace_window);

    let mut summary = HostSummary::default();
    let mut tasks: JoinSet<TaskResult> = JoinSet::new();

    let read = read_events(input, &writer, &coordinator, &mut tasks, &mut summary).await;
    if let Err(e) = &read {
        tracing::error!("host input aborted, finishing in-flight downloads: {}", e);
    }

    while let Some(done) = tasks.join_next().await {
        record_joined(&mut summary, done);
    }
    session.clear().await;
    read?;
    tracing::info!(?summary, "host input closed");
    Ok(summary)
}

async fn read_events<R, W>(
    mut input: R,
    writer: &CommandWriter<W>,
    coordinator: &HandoffCoordinator,
    tasks: &mut JoinSet<TaskResult>,
    summary: &mut HostSummary,
) -> Result<(), BridgeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => parse_event(line).map_err(|e| e.to_string()),
            Err(e) => Err(format!("not UTF-8: {e}")),
        };
        let event = match parsed {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("skipping malformed event line: {}", e);
                summary.malformed_lines += 1;
                continue;
            }
        };

        match event {
            HostEvent::Installed => {
                writer
                    .send(&BrowserCommand::CreateMenu(ContextMenuItem::turbo_download()))
                    .await?;
            }
            HostEvent::DownloadCreated(item) => {
                tracing::debug!(download_id = %item.id, url = %item.url, "download created");
                let coordinator = coordinator.clone();
                tasks.spawn(async move {
                    TaskResult::Download(coordinator.on_download_created(&item).await)
                });
            }
            HostEvent::MenuClicked(click) => {
                if click.turbo_link().is_none() {
                    continue;
                }
                let coordinator = coordinator.clone();
                tasks.spawn(async move {
                    let sent = matches!(coordinator.on_menu_clicked(&click).await, Some(Ok(())));
                    TaskResult::Link(sent)
                });
            }
        }

        // Reap finished tasks so the set does not grow for the host's lifetime.
        while let Some(done) = tasks.try_join_next() {
            record_joined(summary, done);
        }
    }
}

fn record_joined(summary: &mut HostSummary, joined: Result<TaskResult, tokio::task::JoinError>) {
    match joined {
        Ok(result) => summary.record(result),
        Err(e) => tracing::error!("download task failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{now_millis, MemorySessionStore};
    use crate::testing::FakeCompanion;
    use tokio::io::AsyncReadExt;

    async fn run(
        input: &str,
        companion: Arc<FakeCompanion>,
        session: Arc<MemorySessionStore>,
    ) -> (HostSummary, Vec<serde_json::Value>) {
        run_raw(input.as_bytes(), companion, session).await
    }

    async fn run_raw(
        input: &[u8],
        companion: Arc<FakeCompanion>,
        session: Arc<MemorySessionStore>,
    ) -> (HostSummary, Vec<serde_json::Value>) {
        let (tx, mut rx) = tokio::io::duplex(64 * 1024);
        let summary = run_host(input, tx, companion, session, Duration::from_secs(2))
            .await
            .unwrap();
        let mut out = String::new();
        rx.read_to_string(&mut out).await.unwrap();
        let commands = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, commands)
    }

    fn old_session() -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::started_at(now_millis() - 60_000))
    }

    fn commands_for(commands: &[serde_json::Value], id: i64) -> Vec<String> {
        commands
            .iter()
            .filter(|c| c["id"].as_i64() == Some(id))
            .map(|c| c["command"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn installed_registers_menu() {
        let (summary, commands) = run(
            "{\"type\":\"installed\"}\n",
            Arc::new(FakeCompanion::accepting()),
            old_session(),
        )
        .await;
        assert_eq!(summary, HostSummary::default());
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0]["command"], "create_menu");
        assert_eq!(commands[0]["title"], "Download with Turbo");
    }

    #[tokio::test]
    async fn admitted_download_is_paused_canceled_erased() {
        let companion = Arc::new(FakeCompanion::accepting());
        let input = "{\"type\":\"download_created\",\"id\":3,\"url\":\"https://x/a.iso\"}\n\
                     {\"type\":\"download_created\",\"id\":4,\"url\":\"https://x/a.txt\"}\n";
        let (summary, commands) = run(input, companion.clone(), old_session()).await;

        assert_eq!(summary.handed_off, 1);
        assert_eq!(summary.ignored, 1);
        assert_eq!(companion.received(), vec!["https://x/a.iso"]);
        let actions: Vec<_> = commands
            .iter()
            .map(|c| (c["command"].as_str().unwrap().to_string(), c["id"].as_i64().unwrap()))
            .collect();
        assert_eq!(
            actions,
            vec![
                ("pause".to_string(), 3),
                ("cancel".to_string(), 3),
                ("erase".to_string(), 3),
            ]
        );
    }

    #[tokio::test]
    async fn unreachable_companion_resumes() {
        let input = "{\"type\":\"download_created\",\"id\":8,\"url\":\"https://x/a.rar\"}\n";
        let companion = Arc::new(FakeCompanion::refusing());
        let (summary, commands) = run(input, companion, old_session()).await;
        assert_eq!(summary.resumed, 1);
        let names: Vec<_> = commands
            .iter()
            .map(|c| c["command"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["pause", "resume"]);
    }

    #[tokio::test]
    async fn menu_clicks_and_malformed_lines() {
        let companion = Arc::new(FakeCompanion::accepting());
        let input = "garbage\n\n\
                     {\"type\":\"menu_clicked\",\"menu_item_id\":\"turboDownload\",\"link_url\":\"https://x/page\"}\n\
                     {\"type\":\"menu_clicked\",\"menu_item_id\":\"other\",\"link_url\":\"https://x/other\"}\n";
        let (summary, commands) = run(input, companion.clone(), old_session()).await;
        assert_eq!(summary.malformed_lines, 1);
        assert_eq!(summary.links_sent, 1);
        assert!(commands.is_empty());
        assert_eq!(companion.received(), vec!["https://x/page"]);
    }

    #[tokio::test]
    async fn non_utf8_line_is_skipped_while_downloads_are_in_flight() {
        let companion = Arc::new(FakeCompanion::refusing().with_delay(Duration::from_millis(200)));
        let input: &[u8] = b"{\"type\":\"download_created\",\"id\":1,\"url\":\"https://x/a.zip\"}\n\
                             \xff\xfe garbage\n\
                             {\"type\":\"download_created\",\"id\":2,\"url\":\"https://x/b.zip\"}\n";
        let (summary, commands) = run_raw(input, companion.clone(), old_session()).await;

        assert_eq!(summary.malformed_lines, 1);
        assert_eq!(summary.resumed, 2);
        assert_eq!(commands_for(&commands, 1), vec!["pause", "resume"]);
        assert_eq!(commands_for(&commands, 2), vec!["pause", "resume"]);
        assert_eq!(companion.received().len(), 2);
    }

    #[tokio::test]
    async fn failed_write_still_finishes_in_flight_downloads() {
        let companion = Arc::new(FakeCompanion::refusing().with_delay(Duration::from_millis(50)));
        let session = old_session();
        let (tx, rx) = tokio::io::duplex(64);
        drop(rx);
        let input = "{\"type\":\"download_created\",\"id\":5,\"url\":\"https://x/a.7z\"}\n\
                     {\"type\":\"installed\"}\n\
                     {\"type\":\"download_created\",\"id\":6,\"url\":\"https://x/b.7z\"}\n";

        let result = run_host(
            input.as_bytes(),
            tx,
            companion.clone(),
            session.clone(),
            Duration::from_secs(2),
        )
        .await;

        assert!(matches!(result, Err(BridgeError::Io(_))));
        // The download seen before the failure ran to completion; the one after was never read.
        assert_eq!(companion.received(), vec!["https://x/a.7z"]);
        assert!(session.session_start().await.is_none());
    }

    #[tokio::test]
    async fn session_marker_cleared_at_end_of_input() {
        let session = old_session();
        run("", Arc::new(FakeCompanion::accepting()), session.clone()).await;
        assert!(session.session_start().await.is_none());
    }

    #[tokio::test]
    async fn fresh_session_leaves_restored_downloads_alone() {
        let companion = Arc::new(FakeCompanion::accepting());
        let input = "{\"type\":\"download_created\",\"id\":1,\"url\":\"https://x/a.zip\"}\n";
        let session = Arc::new(MemorySessionStore::new());
        let (summary, commands) = run(input, companion.clone(), session).await;
        assert_eq!(summary.ignored, 1);
        assert!(commands.is_empty());
        assert!(companion.received().is_empty());
    }
}
