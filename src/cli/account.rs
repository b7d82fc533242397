//! Account commands: signup progress (status, reset) and the session
//! (login, whoami, logout). Identity service messages are printed unchanged.

use std::io::{BufRead, Write};

use jams_app::usecases::{
    CurrentSession, LoginError, LoginWithPassword, SignOut, SignupFormStore,
};
use jams_core::identity::AuthUser;
use jams_core::signup::{SignupFormState, TOTAL_STEPS};

use super::Prompter;

const NOT_SET: &str = "-";

/// Render saved progress. The password is never printed.
pub fn describe_progress(state: &SignupFormState) -> String {
    let data = &state.form_data;
    let or_unset = |value: &str| {
        if value.is_empty() {
            NOT_SET.to_string()
        } else {
            value.to_string()
        }
    };

    let mut lines = vec![format!(
        "Step {}/{}: {}",
        state.current_step.number(),
        TOTAL_STEPS,
        state.current_step.title()
    )];
    lines.push(format!("  name:     {}", or_unset(&data.name)));
    lines.push(format!("  email:    {}", or_unset(&data.email)));
    lines.push(format!(
        "  password: {}",
        if data.password.is_empty() { NOT_SET } else { "(set)" }
    ));
    lines.push(format!("  school:   {}", or_unset(&data.school)));
    lines.push(format!("  phone:    {}", or_unset(&data.phone_number)));
    lines.join("\n")
}

pub fn describe_user(user: &AuthUser) -> String {
    format!(
        "Signed in as {} (id {})",
        user.email.as_deref().unwrap_or(NOT_SET),
        user.id
    )
}

pub async fn status<W: Write>(store: &SignupFormStore, output: &mut W) -> anyhow::Result<()> {
    writeln!(output, "{}", describe_progress(&store.snapshot().await))?;
    Ok(())
}

pub async fn reset<W: Write>(store: &SignupFormStore, output: &mut W) -> anyhow::Result<()> {
    store.reset_form().await;
    writeln!(output, "Signup progress cleared.")?;
    Ok(())
}

const NOT_SIGNED_IN: &str = "Not signed in.";

/// Sign in and keep the session for later commands.
pub async fn login<R: BufRead, W: Write>(
    login: &LoginWithPassword,
    email: Option<String>,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<bool> {
    let email = match email {
        Some(email) => email,
        None => prompter.ask("Email:")?.unwrap_or_default(),
    };
    let password = prompter.ask("Password:")?.unwrap_or_default();

    match login.execute(&email, &password).await {
        Ok(session) => {
            prompter.say(describe_user(&session.user))?;
            Ok(true)
        }
        Err(LoginError::Validation(errors)) => {
            // Display is the first issue only.
            prompter.say(errors)?;
            Ok(false)
        }
        Err(LoginError::Auth(err)) => {
            prompter.say(err)?;
            Ok(false)
        }
    }
}

/// Show who the stored session belongs to. A session the identity service
/// rejects has already been dropped when this prints its message.
pub async fn whoami<W: Write>(current: &CurrentSession, output: &mut W) -> anyhow::Result<bool> {
    match current.execute().await {
        Ok(Some(session)) => {
            writeln!(output, "{}", describe_user(&session.user))?;
            Ok(true)
        }
        Ok(None) => {
            writeln!(output, "{NOT_SIGNED_IN}")?;
            Ok(false)
        }
        Err(err) => {
            writeln!(output, "{err}")?;
            writeln!(output, "{NOT_SIGNED_IN}")?;
            Ok(false)
        }
    }
}

pub async fn logout<W: Write>(sign_out: &SignOut, output: &mut W) -> anyhow::Result<bool> {
    match sign_out.execute().await {
        Ok(true) => {
            writeln!(output, "Signed out.")?;
            Ok(true)
        }
        Ok(false) => {
            writeln!(output, "{NOT_SIGNED_IN}")?;
            Ok(true)
        }
        Err(err) => {
            writeln!(output, "{err}")?;
            Ok(false)
        }
    }
}
