pub mod base;
pub mod echo;
pub mod random;

pub use base::BasePlayer;
pub use echo::EchoPlayer;
pub use random::RandomPlayer;
