use kanal::AsyncSender;
use tehthu_core::DiagnosticsLog;
use tehthu_core::types::AppEvent;

/// Forward diagnostics to the output loop until the log is closed.
///
/// `DiagnosticsLog::pop` blocks, so this owns a blocking-pool thread.
pub async fn log_pump(log: DiagnosticsLog, output_tx: AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let tx = output_tx.to_sync();
    log.attach();

    let forwarded = tokio::task::spawn_blocking(move || {
        let mut count = 0usize;
        while let Some(line) = log.pop() {
            // output loop already gone; keep draining so producers never stall
            if let Err(e) = tx.send(AppEvent::LogLine(line.clone())) {
                tracing::trace!("Output closed ({e}), printing directly");
                eprintln!("{line}");
            }
            count += 1;
        }
        count
    })
    .await?;

    tracing::debug!("Log pump stopped after {forwarded} lines");
    Ok(())
}
