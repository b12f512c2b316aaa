//! Backend worker: owns the tokio runtime and performs prediction calls.

use std::{sync::Arc, thread};

use client_core::{
    ClientSettings, HttpPredictionTransport, PredictionTransport, SubmissionTicket,
    TransportError,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: ClientSettings,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                deliver(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let transport: Result<Arc<dyn PredictionTransport>, String> =
            match HttpPredictionTransport::from_settings(&settings) {
                Ok(transport) => {
                    tracing::info!(endpoint = transport.endpoint(), "prediction transport ready");
                    Ok(Arc::new(transport))
                }
                Err(err) => {
                    let message = format!("prediction transport unavailable: {err}");
                    deliver(
                        &ui_tx,
                        UiEvent::Error(UiError::from_message(
                            UiErrorContext::BackendStartup,
                            message.clone(),
                        )),
                    );
                    tracing::error!("{message}");
                    Err(message)
                }
            };

        if transport.is_ok() {
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Ready - predictions go to {}",
                settings.endpoint
            )));
        }

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict { ticket } => match &transport {
                        Ok(transport) => {
                            let transport = Arc::clone(transport);
                            let ui_tx = ui_tx.clone();
                            tokio::spawn(async move {
                                run_prediction(transport.as_ref(), ticket, &ui_tx).await;
                            });
                        }
                        Err(reason) => {
                            deliver(
                                &ui_tx,
                                UiEvent::PredictionFinished {
                                    id: ticket.id,
                                    outcome: Err(TransportError::Network(reason.clone())),
                                },
                            );
                        }
                    },
                }
            }
            tracing::debug!("ui command channel closed; backend worker exiting");
        });
    })
}

/// Blocks until the UI takes the event; the `Submitting` phase only ends
/// when its outcome arrives.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        tracing::warn!("ui gone before backend event was delivered");
    }
}

async fn run_prediction(
    transport: &dyn PredictionTransport,
    ticket: SubmissionTicket,
    ui_tx: &Sender<UiEvent>,
) {
    let outcome = transport.predict(&ticket.request).await;
    if ui_tx
        .send(UiEvent::PredictionFinished {
            id: ticket.id,
            outcome,
        })
        .is_err()
    {
        tracing::warn!(submission = ticket.id.0, "ui gone before prediction finished");
    }
}
