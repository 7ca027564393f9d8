//! Deployment service
//!
//! Runs the three-step deployment sequence:
//! 1. Upsert the package manifest (hash lookup, then create-or-update)
//! 2. Upsert the source file the same way
//! 3. Dispatch the build workflow
//!
//! Steps are strictly chained; each remote call completes before the next
//! begins, and the first failure ends the attempt. Previously uploaded files
//! are not rolled back, so a late failure can leave the remote repository
//! partially updated.

use std::sync::Arc;

use airlift_core::domain::credentials::Credentials;
use airlift_core::domain::deployment::{Deployment, DeploymentStatus};
use chrono::Utc;
use tokio::sync::{Semaphore, watch};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::DeployError;
use crate::host::ContentHost;
use crate::payload;

/// Deployment orchestrator
///
/// Owns the credentials for one target repository and a status channel that
/// observers subscribe to. At most one deployment is in flight at a time; a
/// `deploy` call while busy is rejected without touching the status channel.
pub struct Deployer {
    credentials: Credentials,
    host: Arc<dyn ContentHost>,
    status_tx: watch::Sender<DeploymentStatus>,
    slot: Semaphore,
}

impl Deployer {
    /// Creates a deployer for one target repository
    pub fn new(credentials: Credentials, host: Arc<dyn ContentHost>) -> Self {
        let (status_tx, _) = watch::channel(DeploymentStatus::Idle);
        Self {
            credentials,
            host,
            status_tx,
            slot: Semaphore::new(1),
        }
    }

    /// Subscribe to status transitions
    ///
    /// The receiver always holds the latest status; transitions published
    /// while the observer is behind are collapsed to the newest one.
    pub fn subscribe(&self) -> watch::Receiver<DeploymentStatus> {
        self.status_tx.subscribe()
    }

    /// The current status
    pub fn status(&self) -> DeploymentStatus {
        self.status_tx.borrow().clone()
    }

    /// True while a deployment is in flight
    pub fn is_busy(&self) -> bool {
        self.status_tx.borrow().is_busy()
    }

    /// Runs one deployment of `source`
    ///
    /// Publishes every transition on the status channel and finishes in a
    /// terminal status, which the returned record carries along with the
    /// attempt's timestamps. A failed attempt is a normal return; only a
    /// deployment that cannot start (another one is running) is an `Err`.
    pub async fn deploy(&self, source: &str) -> Result<Deployment, DeployError> {
        let _permit = self
            .slot
            .try_acquire()
            .map_err(|_| DeployError::AlreadyRunning)?;

        let id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Starting deployment {}", id);

        let status = self.run_steps(source).await;
        self.publish(status.clone());

        match &status {
            DeploymentStatus::Succeeded => info!("Deployment {} succeeded", id),
            DeploymentStatus::Failed { reason } => error!("Deployment {} failed: {}", id, reason),
            _ => {}
        }

        Ok(Deployment {
            id,
            started_at,
            completed_at: Utc::now(),
            status,
        })
    }

    /// Publish a status transition to subscribers
    fn publish(&self, status: DeploymentStatus) {
        self.status_tx.send_replace(status);
    }

    /// The sequential step chain; returns the terminal status
    async fn run_steps(&self, source: &str) -> DeploymentStatus {
        if let Err(e) = self.credentials.validate() {
            warn!("Deployment rejected: {}", e);
            return DeploymentStatus::Failed {
                reason: e.to_string(),
            };
        }

        if let Err(failed) = self
            .upsert_step(payload::MANIFEST_PATH, payload::MANIFEST_TEMPLATE.as_bytes())
            .await
        {
            return failed;
        }

        if let Err(failed) = self.upsert_step(payload::SOURCE_PATH, source.as_bytes()).await {
            return failed;
        }

        self.publish(DeploymentStatus::TriggeringWorkflow);
        match self
            .host
            .dispatch_workflow(&self.credentials, payload::WORKFLOW_FILE, payload::DISPATCH_REF)
            .await
        {
            Ok(()) => DeploymentStatus::Succeeded,
            Err(e) => {
                error!("Workflow dispatch failed: {}", e);
                DeploymentStatus::Failed {
                    reason: "failed to trigger automation".to_string(),
                }
            }
        }
    }

    /// One fetch-hash-then-upsert step
    ///
    /// A 404 on the lookup is the create path. Any other lookup failure ends
    /// the attempt; an unreachable API must not be mistaken for an absent
    /// file.
    async fn upsert_step(&self, path: &str, content: &[u8]) -> Result<(), DeploymentStatus> {
        self.publish(DeploymentStatus::FetchingHash {
            path: path.to_string(),
        });

        let sha = match self.host.content_sha(&self.credentials, path).await {
            Ok(sha) => sha,
            Err(e) => {
                error!("Hash lookup for {} failed: {}", path, e);
                return Err(DeploymentStatus::Failed {
                    reason: format!("failed to fetch hash for {}", path),
                });
            }
        };

        self.publish(DeploymentStatus::Uploading {
            path: path.to_string(),
        });

        match self
            .host
            .upsert_file(
                &self.credentials,
                path,
                content,
                sha,
                &payload::commit_message(path),
            )
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("Upload of {} failed: {}", path, e);
                Err(DeploymentStatus::Failed {
                    reason: format!("failed to upload {}", path),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airlift_github::ClientError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// One recorded host call
    #[derive(Debug, Clone, PartialEq)]
    enum HostCall {
        ContentSha(String),
        UpsertFile { path: String, sha: Option<String> },
        Dispatch { workflow: String, git_ref: String },
    }

    /// Scripted host that records every call
    #[derive(Default)]
    struct RecordingHost {
        calls: Mutex<Vec<HostCall>>,
        shas: HashMap<String, String>,
        fail_sha_lookup: bool,
        fail_upsert_of: Option<String>,
        fail_dispatch: bool,
    }

    impl RecordingHost {
        fn calls(&self) -> Vec<HostCall> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: HostCall) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ContentHost for RecordingHost {
        async fn content_sha(
            &self,
            _creds: &Credentials,
            path: &str,
        ) -> Result<Option<String>, ClientError> {
            self.record(HostCall::ContentSha(path.to_string()));
            if self.fail_sha_lookup {
                return Err(ClientError::api_error(500, "lookup exploded"));
            }
            Ok(self.shas.get(path).cloned())
        }

        async fn upsert_file(
            &self,
            _creds: &Credentials,
            path: &str,
            _content: &[u8],
            sha: Option<String>,
            _message: &str,
        ) -> Result<(), ClientError> {
            self.record(HostCall::UpsertFile {
                path: path.to_string(),
                sha,
            });
            if self.fail_upsert_of.as_deref() == Some(path) {
                return Err(ClientError::api_error(409, "conflict"));
            }
            Ok(())
        }

        async fn dispatch_workflow(
            &self,
            _creds: &Credentials,
            workflow_file: &str,
            git_ref: &str,
        ) -> Result<(), ClientError> {
            self.record(HostCall::Dispatch {
                workflow: workflow_file.to_string(),
                git_ref: git_ref.to_string(),
            });
            if self.fail_dispatch {
                return Err(ClientError::api_error(422, "no such workflow"));
            }
            Ok(())
        }
    }

    /// Host whose first operations wait until the test releases them
    struct ParkedHost {
        gate: Semaphore,
    }

    impl ParkedHost {
        fn new() -> Self {
            Self {
                gate: Semaphore::new(0),
            }
        }

        fn release(&self) {
            self.gate.add_permits(16);
        }
    }

    #[async_trait]
    impl ContentHost for ParkedHost {
        async fn content_sha(
            &self,
            _creds: &Credentials,
            _path: &str,
        ) -> Result<Option<String>, ClientError> {
            let _permit = self.gate.acquire().await.unwrap();
            Ok(None)
        }

        async fn upsert_file(
            &self,
            _creds: &Credentials,
            _path: &str,
            _content: &[u8],
            _sha: Option<String>,
            _message: &str,
        ) -> Result<(), ClientError> {
            Ok(())
        }

        async fn dispatch_workflow(
            &self,
            _creds: &Credentials,
            _workflow_file: &str,
            _git_ref: &str,
        ) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn creds() -> Credentials {
        Credentials::new("u", "r", "t")
    }

    #[tokio::test]
    async fn test_empty_credentials_fail_without_network() {
        let host = Arc::new(RecordingHost::default());
        let deployer = Deployer::new(Credentials::new("", "", ""), host.clone());

        let deployment = deployer.deploy("print(1)").await.unwrap();

        assert!(host.calls().is_empty());
        assert_eq!(
            deployment.status,
            DeploymentStatus::Failed {
                reason: "missing repo info or token".to_string()
            }
        );
        assert!(!deployer.is_busy());
    }

    #[tokio::test]
    async fn test_create_path_sends_no_sha() {
        let host = Arc::new(RecordingHost::default());
        let deployer = Deployer::new(creds(), host.clone());

        deployer.deploy("print(1)").await.unwrap();

        let upserts: Vec<_> = host
            .calls()
            .into_iter()
            .filter(|c| matches!(c, HostCall::UpsertFile { .. }))
            .collect();
        assert_eq!(upserts.len(), 2);
        for upsert in upserts {
            assert!(matches!(upsert, HostCall::UpsertFile { sha: None, .. }));
        }
    }

    #[tokio::test]
    async fn test_existing_file_sends_its_sha() {
        let host = Arc::new(RecordingHost {
            shas: HashMap::from([
                (payload::MANIFEST_PATH.to_string(), "abc123".to_string()),
                (payload::SOURCE_PATH.to_string(), "def456".to_string()),
            ]),
            ..Default::default()
        });
        let deployer = Deployer::new(creds(), host.clone());

        deployer.deploy("print(1)").await.unwrap();

        assert!(host.calls().contains(&HostCall::UpsertFile {
            path: payload::MANIFEST_PATH.to_string(),
            sha: Some("abc123".to_string()),
        }));
        assert!(host.calls().contains(&HostCall::UpsertFile {
            path: payload::SOURCE_PATH.to_string(),
            sha: Some("def456".to_string()),
        }));
    }

    #[tokio::test]
    async fn test_manifest_failure_stops_the_sequence() {
        let host = Arc::new(RecordingHost {
            fail_upsert_of: Some(payload::MANIFEST_PATH.to_string()),
            ..Default::default()
        });
        let deployer = Deployer::new(creds(), host.clone());

        let deployment = deployer.deploy("print(1)").await.unwrap();

        assert_eq!(
            deployment.status,
            DeploymentStatus::Failed {
                reason: "failed to upload Package.swift".to_string()
            }
        );
        let calls = host.calls();
        assert!(
            !calls
                .iter()
                .any(|c| matches!(c, HostCall::ContentSha(p) if p == payload::SOURCE_PATH))
        );
        assert!(!calls.iter().any(|c| matches!(c, HostCall::Dispatch { .. })));
    }

    #[tokio::test]
    async fn test_sha_lookup_failure_is_not_a_create() {
        let host = Arc::new(RecordingHost {
            fail_sha_lookup: true,
            ..Default::default()
        });
        let deployer = Deployer::new(creds(), host.clone());

        let deployment = deployer.deploy("print(1)").await.unwrap();

        assert_eq!(
            deployment.status,
            DeploymentStatus::Failed {
                reason: "failed to fetch hash for Package.swift".to_string()
            }
        );
        assert!(
            !host
                .calls()
                .iter()
                .any(|c| matches!(c, HostCall::UpsertFile { .. }))
        );
    }

    #[tokio::test]
    async fn test_dispatch_failure_fails_the_deployment() {
        let host = Arc::new(RecordingHost {
            fail_dispatch: true,
            ..Default::default()
        });
        let deployer = Deployer::new(creds(), host.clone());

        let deployment = deployer.deploy("print(1)").await.unwrap();

        assert_eq!(
            deployment.status,
            DeploymentStatus::Failed {
                reason: "failed to trigger automation".to_string()
            }
        );
        assert!(!deployer.is_busy());
    }

    #[tokio::test]
    async fn test_happy_path_call_order() {
        let host = Arc::new(RecordingHost::default());
        let deployer = Deployer::new(creds(), host.clone());

        let deployment = deployer.deploy("print(1)").await.unwrap();

        assert!(deployment.succeeded());
        assert!(!deployer.is_busy());
        assert_eq!(deployer.status(), DeploymentStatus::Succeeded);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::ContentSha(payload::MANIFEST_PATH.to_string()),
                HostCall::UpsertFile {
                    path: payload::MANIFEST_PATH.to_string(),
                    sha: None,
                },
                HostCall::ContentSha(payload::SOURCE_PATH.to_string()),
                HostCall::UpsertFile {
                    path: payload::SOURCE_PATH.to_string(),
                    sha: None,
                },
                HostCall::Dispatch {
                    workflow: payload::WORKFLOW_FILE.to_string(),
                    git_ref: payload::DISPATCH_REF.to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_deploy_rejected_while_busy() {
        let host = Arc::new(ParkedHost::new());
        let deployer = Arc::new(Deployer::new(creds(), host.clone()));

        let mut rx = deployer.subscribe();
        let running = Arc::clone(&deployer);
        let handle = tokio::spawn(async move { running.deploy("print(1)").await });

        // Wait until the first attempt has started its first step
        rx.wait_for(|s| s.is_busy()).await.unwrap();
        assert!(deployer.is_busy());

        let err = deployer.deploy("print(2)").await.unwrap_err();
        assert!(matches!(err, DeployError::AlreadyRunning));
        // The rejected call must not disturb the in-flight attempt's status
        assert!(deployer.status().is_busy());

        host.release();
        let deployment = handle.await.unwrap().unwrap();
        assert!(deployment.succeeded());
        assert!(!deployer.is_busy());
    }

    #[tokio::test]
    async fn test_new_deployment_leaves_terminal_state() {
        let host = Arc::new(RecordingHost {
            fail_dispatch: true,
            ..Default::default()
        });
        let deployer = Deployer::new(creds(), host.clone());

        let first = deployer.deploy("print(1)").await.unwrap();
        assert!(!first.succeeded());

        // A fresh attempt is allowed to leave the terminal state
        let second = deployer.deploy("print(2)").await.unwrap();
        assert!(!second.succeeded());
        assert_eq!(host.calls().len(), 10);
    }
}
