pub mod batch;
pub mod decode;
pub mod quotes;
pub mod request;
#[cfg(test)]
pub mod testing;

pub use batch::{batch_symbols, join_symbols};
pub use quotes::{QuoteClient, QuoteSource};
pub use request::QuoteMode;
