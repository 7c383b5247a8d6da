pub mod gerrit;

use super::args::{Cli, Command};

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Gerrit(args) => gerrit::run(args).await,
    }
}
