use super::{Connection, GraphAction, GraphState};
use crate::error::GraphError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// The single owner of canonical graph state.
///
/// Every change goes through [`GraphStore::dispatch`]. Subscribers receive
/// each new snapshot; a failed action publishes nothing.
#[derive(Debug, Clone)]
pub struct GraphStore {
    tx: Arc<watch::Sender<Arc<GraphState>>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::with_state(GraphState::default())
    }

    pub fn with_state(state: GraphState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(state));
        Self { tx: Arc::new(tx) }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<GraphState> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<GraphState>> {
        self.tx.subscribe()
    }

    /// Applies `action` atomically and publishes the resulting snapshot.
    pub fn dispatch(&self, action: GraphAction) -> Result<Arc<GraphState>, GraphError> {
        let name = action.name();
        let mut outcome = Ok(());
        self.tx.send_if_modified(|state| match state.apply(action) {
            Ok(next) => {
                *state = Arc::new(next);
                true
            }
            Err(e) => {
                outcome = Err(e);
                false
            }
        });

        match outcome {
            Ok(()) => {
                debug!(action = name, "Applied graph action");
                Ok(self.snapshot())
            }
            Err(e) => {
                debug!(action = name, error = %e, "Graph action rejected");
                Err(e)
            }
        }
    }

    /// Adds the edge described by `connection`, replacing any edge already
    /// feeding its target handle. Returns `false` when the connection is
    /// rejected; the graph is then unchanged.
    pub fn connect(&self, connection: Connection) -> bool {
        match self.dispatch(GraphAction::Connect(connection)) {
            Ok(_) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Swaps in a whole new state, e.g. after loading a project.
    pub fn replace(&self, state: GraphState) {
        self.tx.send_replace(Arc::new(state));
        debug!("Replaced graph state");
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
