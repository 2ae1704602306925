use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use analyser_core::{AlertId, RequestId};
use analyser_logging::{analyser_debug, analyser_info};

use crate::submit::{AnalysisClient, ReqwestAnalysisClient, SubmitSettings};
use crate::{AnalysisRequest, EngineError, EngineEvent};

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    ExpireAlert {
        alert_id: AlertId,
        after: Duration,
    },
}

/// Runs submissions and alert timers on a background tokio runtime.
///
/// Results come back as [`EngineEvent`]s; the owner polls with
/// [`EngineHandle::try_recv`] or [`EngineHandle::recv_timeout`]. Dropping the
/// handle stops the worker thread and abandons pending work.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings) -> Result<Self, EngineError> {
        let client = ReqwestAnalysisClient::new(settings)?;
        analyser_info!("analysis endpoint: {}", client.endpoint());
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn AnalysisClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, request_id: RequestId, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            request,
        });
    }

    pub fn schedule_alert_expiry(&self, alert_id: AlertId, after: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ExpireAlert { alert_id, after });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn AnalysisClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            request,
        } => {
            analyser_info!(
                "request {} submitting {} ({} bytes)",
                request_id,
                request.file_name,
                request.content.len()
            );
            let result = client.analyze(request).await;
            let _ = event_tx.send(EngineEvent::AnalysisCompleted { request_id, result });
        }
        EngineCommand::ExpireAlert { alert_id, after } => {
            tokio::time::sleep(after).await;
            analyser_debug!("alert {} expired", alert_id);
            let _ = event_tx.send(EngineEvent::AlertExpired { alert_id });
        }
    }
}
