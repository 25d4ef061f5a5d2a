use crate::ports::DatagramFlow;
use crate::services::MappingTableService;
use crate::use_cases::flow::ServeFlowUseCase;
use netoverride_domain::{DomainError, LifecycleEvent, ProxyState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Drives `Stopped → Starting → Running ⇄ Sleeping → Stopped` on behalf of
/// the host and hands accepted flows to their read loops.
///
/// Transitions are serialized; a transition that needs a mapping reload
/// holds the state until the new table is installed.
pub struct ProxyLifecycle {
    state: Mutex<ProxyState>,
    mappings: Arc<MappingTableService>,
    serve_flow: Arc<ServeFlowUseCase>,
}

impl ProxyLifecycle {
    pub fn new(mappings: Arc<MappingTableService>, serve_flow: Arc<ServeFlowUseCase>) -> Self {
        Self {
            state: Mutex::new(ProxyState::Stopped),
            mappings,
            serve_flow,
        }
    }

    pub async fn state(&self) -> ProxyState {
        *self.state.lock().await
    }

    /// Loads the mapping snapshot and starts accepting flows. Returns the
    /// number of mappings loaded.
    pub async fn start(&self) -> Result<usize, DomainError> {
        let mut state = self.state.lock().await;
        *state = state.transition(LifecycleEvent::Start)?;
        info!(state = state.as_str(), "Proxy starting");

        let count = self.mappings.refresh().await;

        *state = state.transition(LifecycleEvent::Ready)?;
        info!(state = state.as_str(), mappings = count, "Proxy started");
        Ok(count)
    }

    /// Stops accepting flows. Flows already running keep going until the
    /// host closes them.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        let previous = *state;
        *state = previous
            .transition(LifecycleEvent::Stop)
            .unwrap_or(ProxyState::Stopped);
        info!(previous = %previous, "Proxy stopped");
    }

    pub async fn sleep(&self) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        *state = state.transition(LifecycleEvent::Sleep)?;
        info!("Proxy going to sleep");
        Ok(())
    }

    /// Reloads the mapping snapshot, then resumes. Returns the number of
    /// mappings loaded.
    pub async fn wake(&self) -> Result<usize, DomainError> {
        let mut state = self.state.lock().await;
        let next = state.transition(LifecycleEvent::Wake)?;

        let count = self.mappings.refresh().await;

        *state = next;
        info!(mappings = count, "Proxy woke up");
        Ok(count)
    }

    /// Takes ownership of serving `flow` when running. Returns the read
    /// loop's handle, or `None` when the flow is refused.
    ///
    /// The state lock is held until the read loop is spawned, so no flow
    /// starts after a concurrent `stop` or `sleep` has returned.
    pub async fn accept_flow(&self, flow: Arc<dyn DatagramFlow>) -> Option<JoinHandle<usize>> {
        let state = self.state.lock().await;
        if !state.accepts_flows() {
            debug!(state = %*state, remote = %flow.remote_endpoint(), "Refusing flow");
            return None;
        }

        debug!(remote = %flow.remote_endpoint(), "New UDP flow");
        let serve_flow = Arc::clone(&self.serve_flow);
        let handle = tokio::spawn(async move { serve_flow.run(flow).await });
        drop(state);
        Some(handle)
    }
}
