pub mod middleware;
pub mod telemetry;

pub use middleware::request_id::{request_id_middleware, RequestId};
pub use telemetry::{init_telemetry, shutdown_telemetry};
