// Task-Modul: Enthält alle Embassy Tasks
//
// Der Pin Task besitzt Controller und Bridge-Registry.
// HTTP Tasks parsen Remote-Aufrufe und schicken sie per Channel an den Pin Task.

pub mod bridge;
pub mod pin_control;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use bridge::bridge_server_task;
pub use pin_control::{pin_control_logic, pin_control_task};
pub use wifi::{connection_task, dhcp_task, net_task, wait_for_network};
