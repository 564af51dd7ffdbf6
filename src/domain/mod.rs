// Domain layer: session identities, account records, errors and ports.

pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::{GameId, SubscriberId, User};
pub use errors::{BrokerError, RegistryError, UserError};
pub use ports::{IdGenerator, UserStore};
