mod quote;
mod symbol;
mod timestamp;

pub use quote::Quote;
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
