mod args;
mod command;
mod electives_cmd;
mod profile_cmd;
mod review_cmd;

pub use args::Cli;
pub use command::{Command, PaymentArgs};
pub use electives_cmd::ElectivesCmd;
pub use profile_cmd::ProfileCmd;
pub use review_cmd::{ReviewCmd, ReviewTargetArgs};

pub use args::parse;
