// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording handlers shared by dispatcher and resume tests

use crate::{
    Environments, HandlerError, Handlers, Installer, PhaseHandler, PhaseParams, PlanCompleter,
};
use op_core::{FakeClock, Operation, OperationKind};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Shared log of handler invocations, e.g. `update:execute:/masters`
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

pub struct RecordingHandler {
    name: &'static str,
    log: CallLog,
    fail: bool,
}

impl RecordingHandler {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(name: &'static str, log: &CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(name, log)
        }
    }

    fn record(&self, entry: String) -> Result<(), HandlerError> {
        self.log.push(entry);
        if self.fail {
            return Err(HandlerError::Failed("boom".to_string()));
        }
        Ok(())
    }
}

impl PhaseHandler for RecordingHandler {
    fn execute_phase(
        &self,
        _env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        self.record(format!("{}:execute:{}:{}", self.name, operation.id, params.phase_id))
    }

    fn rollback_phase(
        &self,
        _env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        self.record(format!("{}:rollback:{}:{}", self.name, operation.id, params.phase_id))
    }
}

impl PlanCompleter for RecordingHandler {
    fn complete_plan(&self, _env: &Environments, operation: &Operation) -> Result<(), HandlerError> {
        self.record(format!("{}:complete:{}", self.name, operation.id))
    }
}

/// Installer recording every call; `restart` returns `restarted-install`
pub struct RecordingInstaller {
    log: CallLog,
}

impl RecordingInstaller {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Installer for RecordingInstaller {
    fn execute_phase(
        &self,
        _env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        self.log
            .push(format!("installer:execute:{}:{}", operation.id, params.phase_id));
        Ok(())
    }

    fn rollback_phase(
        &self,
        _env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        self.log
            .push(format!("installer:rollback:{}:{}", operation.id, params.phase_id));
        Ok(())
    }

    fn restart(&self, _env: &Environments) -> Result<Operation, HandlerError> {
        self.log.push("installer:restart".to_string());
        Ok(Operation::new(
            "restarted-install",
            OperationKind::Install,
            "local",
            &FakeClock::new(),
        ))
    }
}

/// Handlers that record into `log`, each named after its routing target
pub fn recording_handlers(log: &CallLog) -> Handlers {
    Handlers {
        install_completer: Arc::new(RecordingHandler::new("install", log)),
        expand: Arc::new(RecordingHandler::new("expand", log)),
        update: Arc::new(RecordingHandler::new("update", log)),
        environ: Arc::new(RecordingHandler::new("environ", log)),
        config: Arc::new(RecordingHandler::new("config", log)),
        garbage_collect: Arc::new(RecordingHandler::new("gc", log)),
    }
}

/// Recording params: phase `phase` with the recording installer
pub fn recording_params(phase: &str, log: &CallLog) -> PhaseParams {
    PhaseParams {
        installer: Arc::new(RecordingInstaller::new(log)),
        ..PhaseParams::for_phase(phase)
    }
}

/// Environments under a path that is never written by recording handlers
pub fn unused_environments() -> Environments {
    let root = PathBuf::from("/nonexistent/opctl");
    Environments {
        cluster_dir: root.join("cluster"),
        wizard_dir: root.join("wizard"),
        update_dir: None,
        join_dir: None,
    }
}

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run a closure with captured tracing output
pub fn with_tracing<T>(f: impl FnOnce() -> T) -> (String, T) {
    let logs = LogBuffer::default();
    let writer = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let contents = logs.0.lock().unwrap_or_else(|e| e.into_inner()).clone();
    (String::from_utf8_lossy(&contents).to_string(), result)
}
