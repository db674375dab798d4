pub mod metrics_controller;
pub mod prediction_controller;
pub mod session_controller;
pub mod system_controller;
