//! Configuration section definitions.

mod assets;
mod serve;
mod watch;

pub use assets::AssetsConfig;
pub use serve::ServeConfig;
pub use watch::WatchConfig;
