//! Kit Optima REST Service
//!
//! Thin HTTP layer over [`KitOptimizer`](crate::optimizer::KitOptimizer).
//!
//! ## Endpoints
//!
//! - `POST /api/optimize-kitting` - Optimize a BoQ schedule (also `/optimize-kitting`)
//! - `POST /api/clean-boq` - Clean raw BoQ rows
//! - `GET /health` - Service status (also `/api/health`)

pub mod middleware;
pub mod routes;
pub mod state;

pub use middleware::{metrics_middleware, record_cleaning_metrics};
pub use routes::{create_router, ErrorResponse};
pub use state::ServiceState;
