use crate::ports::{Datagram, DatagramFlow, UpstreamForwarder};
use crate::services::MappingTableService;
use crate::use_cases::dns::{HandleDnsQueryUseCase, QueryOutcome};
use netoverride_domain::RefreshPolicy;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-flow read loop: read, decide, answer or forward, read again.
pub struct ServeFlowUseCase {
    mappings: Arc<MappingTableService>,
    handler: Arc<HandleDnsQueryUseCase>,
    forwarder: Arc<dyn UpstreamForwarder>,
    refresh: RefreshPolicy,
}

impl ServeFlowUseCase {
    pub fn new(
        mappings: Arc<MappingTableService>,
        handler: Arc<HandleDnsQueryUseCase>,
        forwarder: Arc<dyn UpstreamForwarder>,
    ) -> Self {
        Self {
            mappings,
            handler,
            forwarder,
            refresh: RefreshPolicy::default(),
        }
    }

    pub fn with_refresh_policy(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }

    /// Serves `flow` until it reports a terminal read error. Returns the
    /// number of datagrams dispatched.
    pub async fn run(&self, flow: Arc<dyn DatagramFlow>) -> usize {
        if self.refresh == RefreshPolicy::PerFlow {
            self.mappings.refresh().await;
        }

        let remote = flow.remote_endpoint().clone();
        debug!(remote = %remote, "Flow read loop started");

        let mut handled = 0usize;
        loop {
            let datagrams = match flow.read_datagrams().await {
                Ok(datagrams) => datagrams,
                Err(e) => {
                    debug!(remote = %remote, error = %e, handled, "Flow read loop finished");
                    return handled;
                }
            };

            for datagram in datagrams {
                if self.refresh == RefreshPolicy::PerDatagram {
                    self.mappings.refresh().await;
                }
                self.dispatch(&flow, datagram).await;
                handled += 1;
            }
        }
    }

    async fn dispatch(&self, flow: &Arc<dyn DatagramFlow>, datagram: Datagram) {
        match self.handler.execute(&datagram.payload) {
            QueryOutcome::Respond(response) => {
                let reply = Datagram::new(response, datagram.endpoint);
                if let Err(e) = flow.write_datagrams(vec![reply]).await {
                    warn!(error = %e, "Failed to write synthesized response");
                }
            }
            QueryOutcome::Forward => self.spawn_forward(flow, datagram),
            QueryOutcome::Drop => {}
        }
    }

    /// Forwarding runs on its own task so a stalled resolver only delays the
    /// query that triggered it.
    fn spawn_forward(&self, flow: &Arc<dyn DatagramFlow>, datagram: Datagram) {
        let forwarder = Arc::clone(&self.forwarder);
        let flow = Arc::clone(flow);

        tokio::spawn(async move {
            let target = flow.remote_endpoint().clone();
            match forwarder.forward(&datagram.payload, &target).await {
                Ok(reply) => {
                    debug!(upstream = %target, bytes = reply.len(), "Relaying upstream response");
                    let reply = Datagram::new(reply, datagram.endpoint);
                    if let Err(e) = flow.write_datagrams(vec![reply]).await {
                        warn!(error = %e, "Failed to write upstream response");
                    }
                }
                Err(e) => {
                    warn!(upstream = %target, error = %e, "Upstream forward failed, dropping query");
                }
            }
        });
    }
}
