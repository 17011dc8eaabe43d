mod audit;
mod control;
mod implementation;
mod request;
mod standard;

pub use audit::AuditCommands;
pub use control::ControlCommands;
pub use implementation::ImplementationCommands;
pub use request::RequestCommands;
pub use standard::StandardCommands;
