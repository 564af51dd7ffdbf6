// Use cases layer: session brokering and account workflows.

pub mod broker;
pub mod registry;
#[cfg(test)]
pub(crate) mod test_support;
pub mod users;

pub use broker::{BrokerHandle, BrokerSettings, Payload, Subscription};
pub use registry::BrokerRegistry;
pub use users::{CreateUserUseCase, ListUsersUseCase};
