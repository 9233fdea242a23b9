use tokio::signal;
use tokio::sync::watch;

/// Starts listening for Ctrl+C or SIGTERM; the receiver flips to `true` once one arrives.
pub(crate) fn spawn_listener() -> watch::Receiver<bool> {
    let (stop, stopped) = watch::channel(false);
    tokio::spawn(async move {
        let Some(name) = next_signal().await else {
            return;
        };
        tracing::info!(signal = name, "Stopping console");
        if stop.send(true).is_err() {
            tracing::debug!("Console already closed when the signal arrived");
        }
    });
    stopped
}

/// Completes once a stop was requested; never completes if the sender went away silently.
pub(crate) async fn stop_requested(stopped: &mut watch::Receiver<bool>) {
    if stopped.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Name of the first stop signal received, `None` if no handler could be installed.
async fn next_signal() -> Option<&'static str> {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => Some("SIGINT"),
            Err(err) => {
                tracing::warn!(error = %err, "Ctrl+C will not stop the console");
                None
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => stream.recv().await.map(|()| "SIGTERM"),
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM will not stop the console");
                None
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::ready(None::<&'static str>);

    tokio::pin!(interrupt, terminate);
    let mut interrupt_done = false;
    let mut terminate_done = false;
    while !(interrupt_done && terminate_done) {
        tokio::select! {
            name = &mut interrupt, if !interrupt_done => match name {
                Some(name) => return Some(name),
                None => interrupt_done = true,
            },
            name = &mut terminate, if !terminate_done => match name {
                Some(name) => return Some(name),
                None => terminate_done = true,
            },
        }
    }
    None
}
