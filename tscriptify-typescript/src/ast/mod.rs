//! TypeScript declarations rendered through the shared code builder.

mod declaration;
mod enumeration;

pub use declaration::Declaration;
pub use enumeration::Enum;
