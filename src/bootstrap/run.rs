use std::io::{self, IsTerminal};

use anyhow::Context;
use tracing::{debug, info};

use jams_app::AppPaths;
use jams_core::app_dirs::AppDirs;
use jams_core::ports::AppDirsPort;
use jams_infra::DirsAppDirsAdapter;

use super::config::{process_env, resolve_config};
use super::tracing::init_tracing_subscriber;
use super::wiring::{
    wire_auth, wire_identity, wire_navigator, wire_session_store, wire_signup_store,
};
use crate::cli::account;
use crate::cli::signup::{run_wizard, WizardExit};
use crate::cli::{Cli, Command, Prompter};

/// Load config, start logging, wire the requested command and run it.
pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    let app_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve app data directory")?;
    let config = resolve_config(cli.config.as_deref(), &app_dirs, process_env())?;
    let paths = AppPaths::from_app_dirs(&AppDirs {
        app_data_root: config.data_dir.clone(),
    });

    init_tracing_subscriber(&paths.logs_dir, cli.verbose)?;
    debug!(data_dir = %config.data_dir.display(), "configuration resolved");

    let store = wire_signup_store(&paths).await;
    let sessions = wire_session_store(&paths);
    let stdin = io::stdin();
    let mut prompter =
        Prompter::new(stdin.lock(), io::stdout()).with_terminal_echo(stdin.is_terminal());

    match cli.command {
        Command::Status => account::status(&store, &mut io::stdout()).await,
        Command::Reset => account::reset(&store, &mut io::stdout()).await,
        Command::Signup => {
            let navigator = wire_navigator(store, wire_identity(&config)?, sessions);
            match run_wizard(&navigator, &mut prompter).await? {
                WizardExit::Registered(outcome) => {
                    info!(user_id = %outcome.user.id, "registration complete");
                    prompter.say(account::describe_user(&outcome.user))?;
                }
                WizardExit::Left => prompter.say("Signup cancelled. Progress is kept.")?,
                WizardExit::Interrupted => {}
            }
            Ok(())
        }
        Command::Login { email } => {
            let auth = wire_auth(wire_identity(&config)?, sessions);
            if !account::login(&auth.login, email, &mut prompter).await? {
                anyhow::bail!("login failed");
            }
            Ok(())
        }
        Command::Whoami => {
            let auth = wire_auth(wire_identity(&config)?, sessions);
            if !account::whoami(&auth.current_session, &mut io::stdout()).await? {
                anyhow::bail!("not signed in");
            }
            Ok(())
        }
        Command::Logout => {
            let auth = wire_auth(wire_identity(&config)?, sessions);
            if !account::logout(&auth.sign_out, &mut io::stdout()).await? {
                anyhow::bail!("sign out failed");
            }
            Ok(())
        }
    }
}
