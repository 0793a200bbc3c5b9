use std::time::Duration;

use tehthu_core::DiagnosticsLog;
use tehthu_core::types::AppEvent;
use tokio::time::timeout;

use crate::log_pump::log_pump;

async fn wait_attached(log: &DiagnosticsLog) {
    timeout(Duration::from_secs(2), async {
        while !log.is_attached() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Timeout - pump never attached");
}

#[tokio::test]
async fn test_pump_forwards_lines_in_order() {
    let log = DiagnosticsLog::silent(8);
    let (tx, rx) = kanal::bounded_async(16);
    let pump = tokio::spawn(log_pump(log.clone(), tx));
    wait_attached(&log).await;

    log.push("first");
    log.warning("second");

    for expected in ["first", "Warning: second"] {
        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("Timeout - line never forwarded")
            .expect("channel closed");
        assert_eq!(event, AppEvent::LogLine(expected.to_string()));
    }

    log.close();
    let result = timeout(Duration::from_secs(2), pump).await;
    assert!(matches!(result, Ok(Ok(Ok(())))), "pump did not stop on close");
}

#[tokio::test]
async fn test_pump_keeps_draining_without_output() {
    let log = DiagnosticsLog::silent(2);
    let (tx, rx) = kanal::bounded_async::<AppEvent>(1);
    let _ = rx.close();
    let pump = tokio::spawn(log_pump(log.clone(), tx));
    wait_attached(&log).await;

    // more lines than the log holds; producers would block if nobody drained
    let producer = log.clone();
    let pushed = tokio::task::spawn_blocking(move || {
        for i in 0..10 {
            producer.push(format!("line {i}"));
        }
    });
    timeout(Duration::from_secs(2), pushed)
        .await
        .expect("Timeout - producer blocked")
        .unwrap();

    log.close();
    assert!(timeout(Duration::from_secs(2), pump).await.is_ok());
}
