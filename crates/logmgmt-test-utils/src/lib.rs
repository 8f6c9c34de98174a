//! Testing utilities for the logging management workspace
//!
//! Shared test helpers and fixtures.

#![allow(missing_docs)]

use logmgmt_handler::{HandlerCore, HandlerError, LogHandler};
use logmgmt_model::{AttributeDefinition, ModelValue, PathAddress};
use logmgmt_write::{ExtensionHook, HookError, WriteOperation};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary, filtered by `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Handler that keeps everything it writes in memory
#[derive(Debug)]
pub struct MemoryHandler {
    core: HandlerCore,
    output: Mutex<Vec<u8>>,
}

impl MemoryHandler {
    pub fn new(name: &str) -> Self {
        Self {
            core: HandlerCore::new(name),
            output: Mutex::new(Vec::new()),
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.output.lock().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output.lock()).into_owned()
    }
}

impl LogHandler for MemoryHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<(), HandlerError> {
        self.output.lock().extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&self) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Which side of a write the hook saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Apply,
    Revert,
}

/// One call seen by [`RecordingHook`]
#[derive(Debug, Clone, PartialEq)]
pub struct HookCall {
    pub phase: Phase,
    pub handler: Option<String>,
    pub attribute: String,
    pub value: ModelValue,
}

/// Hook that records every call and reports a configurable outcome
#[derive(Debug, Default)]
pub struct RecordingHook {
    attributes: Vec<AttributeDefinition>,
    restart: AtomicBool,
    reject: Mutex<Option<String>>,
    calls: Mutex<Vec<HookCall>>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(attributes: Vec<AttributeDefinition>) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Report restart-required from every apply
    pub fn require_restart(&self, restart: bool) {
        self.restart.store(restart, Ordering::SeqCst);
    }

    /// Fail every call with this reason
    pub fn reject_with(&self, reason: &str) {
        *self.reject.lock() = Some(reason.to_string());
    }

    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().clone()
    }

    fn record(&self, phase: Phase, op: &WriteOperation, value: &ModelValue) -> Result<(), HookError> {
        self.calls.lock().push(HookCall {
            phase,
            handler: op.handler_name().map(str::to_string),
            attribute: op.attribute_name().to_string(),
            value: value.clone(),
        });
        match self.reject.lock().as_deref() {
            Some(reason) => Err(HookError::rejected(op.attribute_name(), reason)),
            None => Ok(()),
        }
    }
}

impl<T> ExtensionHook<T> for RecordingHook {
    fn attributes(&self) -> Vec<AttributeDefinition> {
        self.attributes.clone()
    }

    fn apply(&self, op: &WriteOperation, _handler: &T) -> Result<bool, HookError> {
        self.record(Phase::Apply, op, op.resolved_value())?;
        Ok(self.restart.load(Ordering::SeqCst))
    }

    fn revert(&self, op: &WriteOperation, _handler: &T) -> Result<(), HookError> {
        self.record(Phase::Revert, op, op.value_to_restore())
    }
}

/// `/subsystem=logging/<kind>=<name>`
pub fn handler_address(kind: &str, name: &str) -> PathAddress {
    format!("/subsystem=logging/{kind}={name}")
        .parse()
        .expect("valid handler address")
}

pub fn write_op(
    kind: &str,
    name: &str,
    attribute: &str,
    new: ModelValue,
    current: ModelValue,
) -> WriteOperation {
    WriteOperation::new(handler_address(kind, name), attribute, new, current)
}
