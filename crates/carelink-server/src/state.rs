use std::sync::Arc;

use carelink_catalog::ProgramCatalog;
use carelink_ledger::EnrollmentLedger;
use carelink_registry::ClientRegistry;
use carelink_store::MemoryCollection;
use carelink_types::{Client, Enrollment, Program};

/// Shared application state: one component per collection, all handles to
/// the same store. Cloning is cheap; every request sees the same records.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ClientRegistry>,
    pub catalog: Arc<ProgramCatalog>,
    pub ledger: Arc<EnrollmentLedger>,
}

impl AppState {
    /// Wire the three components over fresh in-memory collections.
    pub fn new() -> Self {
        let clients: Arc<MemoryCollection<Client>> = Arc::new(MemoryCollection::new());
        let programs: Arc<MemoryCollection<Program>> = Arc::new(MemoryCollection::new());
        let enrollments: Arc<MemoryCollection<Enrollment>> = Arc::new(MemoryCollection::new());

        Self {
            registry: Arc::new(ClientRegistry::new(clients.clone())),
            catalog: Arc::new(ProgramCatalog::new(programs.clone())),
            ledger: Arc::new(EnrollmentLedger::new(enrollments, clients, programs)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
