use std::sync::Arc;

use sip2_pool::{CommunicatorOptions, ConnectionPool};

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub communicator: CommunicatorOptions,
}

impl AppState {
    pub fn new(pool: ConnectionPool, communicator: CommunicatorOptions) -> Self {
        AppState { pool: Arc::new(pool), communicator }
    }
}
