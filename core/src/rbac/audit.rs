//! Audit logging for authorization decisions

use crate::rbac::permission::Permission;
use crate::rbac::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Timestamp of the check
    pub timestamp: DateTime<Utc>,
    /// Role the check ran for
    pub role: Role,
    /// Permission that was checked
    pub permission: Permission,
    /// Whether the role holds the permission
    pub allowed: bool,
    /// Policy generation that answered
    pub generation: u64,
}

/// Audit logger for authorization decisions
#[derive(Debug, Clone)]
pub struct AuditLogger {
    sender: mpsc::UnboundedSender<AuditLogEntry>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AuditLogEntry>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Log a permission decision
    pub fn log(&self, role: Role, permission: Permission, allowed: bool, generation: u64) {
        let entry = AuditLogEntry {
            timestamp: Utc::now(),
            role,
            permission,
            allowed,
            generation,
        };

        if let Err(e) = self.sender.send(entry) {
            error!("Failed to send audit log entry: {}", e);
        } else {
            debug!(
                "Audit: role={} permission={} allowed={} generation={}",
                role, permission, allowed, generation
            );
        }
    }
}

/// Background task to process audit logs
pub async fn process_audit_logs(mut receiver: mpsc::UnboundedReceiver<AuditLogEntry>) {
    while let Some(entry) = receiver.recv().await {
        tracing::info!(
            "RBAC Audit: role={} permission={} result={} generation={}",
            entry.role,
            entry.permission,
            if entry.allowed { "allowed" } else { "denied" },
            entry.generation
        );
    }
}
