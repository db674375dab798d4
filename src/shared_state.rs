use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use axum::extract::FromRef;
use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::Config;
use crate::error::MetricsError;
use crate::models::prediction::{PredictionRequest, PredictionResult};
use crate::services::metrics_service::MetricsClient;

/// A prediction kept for the current session only.
#[derive(Debug, Clone)]
pub struct StoredPrediction {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub request: PredictionRequest,
    pub result: PredictionResult,
}

#[derive(Clone, Debug)]
pub struct AppState {
    /// Latest prediction; each submit replaces it
    current: Arc<RwLock<Option<StoredPrediction>>>,
    /// Logged-in username, if any
    user: Arc<RwLock<Option<String>>>,
    pub metrics: MetricsClient,
    started_at: Instant,
}

impl AppState {
    pub fn new(metrics_timeout: Duration) -> Result<Self, MetricsError> {
        Ok(Self {
            current: Arc::new(RwLock::new(None)),
            user: Arc::new(RwLock::new(None)),
            metrics: MetricsClient::new(metrics_timeout)?,
            started_at: Instant::now(),
        })
    }

    pub fn store_prediction(&self, request: PredictionRequest, result: PredictionResult) -> StoredPrediction {
        let stored = StoredPrediction {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            request,
            result,
        };
        match self.current.write() {
            Ok(mut slot) => *slot = Some(stored.clone()),
            Err(e) => error!("[STATE] Failed to store prediction {}: {}", stored.id, e),
        }
        stored
    }

    pub fn current_prediction(&self) -> Option<StoredPrediction> {
        if let Ok(slot) = self.current.read() {
            slot.clone()
        } else {
            None
        }
    }

    pub fn login(&self, username: &str) {
        if let Ok(mut user) = self.user.write() {
            info!("[SESSION] Logged in: {}", username);
            *user = Some(username.to_string());
        }
    }

    pub fn logout(&self) {
        if let Ok(mut user) = self.user.write() {
            if let Some(name) = user.take() {
                info!("[SESSION] Logged out: {}", name);
            }
        }
    }

    pub fn user(&self) -> Option<String> {
        if let Ok(user) = self.user.read() {
            user.clone()
        } else {
            None
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Router state; handlers extract `State<AppState>` and/or `State<Config>`.
#[derive(Clone)]
pub struct SharedState {
    pub app: AppState,
    pub config: Config,
}

impl SharedState {
    pub fn new(config: Config) -> Result<Self, MetricsError> {
        let app = AppState::new(Duration::from_secs(config.metrics.timeout_s))?;
        Ok(Self { app, config })
    }
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> Self {
        shared.app.clone()
    }
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Self {
        shared.config.clone()
    }
}
