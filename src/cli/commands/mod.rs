//! One module per subcommand.

pub mod add;
pub mod generate;
pub mod get;
pub mod hash;
pub mod init;
pub mod list;
pub mod remove;
pub mod rotate;
pub mod status;
