//! Command implementations.

mod assets;
mod convert;
mod export;
mod fallback;

pub use assets::AssetsCommand;
pub use convert::ConvertCommand;
pub use export::{
    AndroidCommand, HugoCommand, IosCatalogCommand, IosCommand, JsonCommand, PoCommand,
};
pub use fallback::FallbackCommand;
