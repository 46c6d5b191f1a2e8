pub mod describe;
pub mod scanner;
pub mod snapshot;
