mod command;
mod matchmaker;
mod registry;
mod room;
mod waiting_pool;

pub use command::MatchCommand;
pub use matchmaker::Matchmaker;
pub use registry::{Connection, ConnectionState, Registry};
pub use room::Room;
pub use waiting_pool::WaitingPool;
