pub mod dump;
pub mod hashes;
pub mod layout;
mod load;
pub mod lookup;

#[cfg(test)]
mod commands_tests;

pub use load::CommandError;
