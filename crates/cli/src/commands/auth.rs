//! Sign-in, registration, and profile commands.
//!
//! Passwords are read from the `SHOPPRIME_PASSWORD` environment variable
//! rather than argv so they never land in shell history or process
//! listings. Login prints the issued token; exporting it as
//! `SHOPPRIME_API_TOKEN` lets every later invocation resume the session.

use shopprime_core::UserRole;
use shopprime_client::api::types::User;

use super::{CliError, Context};

fn password_from_env() -> Result<String, CliError> {
    std::env::var("SHOPPRIME_PASSWORD").map_err(|_| {
        CliError::InvalidArgument(
            "set SHOPPRIME_PASSWORD in the environment to sign in".to_string(),
        )
    })
}

#[allow(clippy::print_stdout)]
pub async fn login(ctx: &Context, email: &str) -> Result<(), CliError> {
    let password = password_from_env()?;
    let response = ctx.api.login(email, &password).await?;

    println!("Signed in as {} ({})", response.user.name, response.user.email);
    println!("Export the token for subsequent commands:");
    println!("  export SHOPPRIME_API_TOKEN={}", response.token);
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn register(ctx: &Context, email: &str, name: &str) -> Result<(), CliError> {
    let password = password_from_env()?;
    let response = ctx.api.register(name, email, &password).await?;

    println!(
        "Account created for {} ({})",
        response.user.name, response.user.email
    );
    println!("Export the token for subsequent commands:");
    println!("  export SHOPPRIME_API_TOKEN={}", response.token);
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn profile(
    ctx: &Context,
    name: Option<String>,
    phone: Option<String>,
) -> Result<(), CliError> {
    let current = ctx.require_session().await?;

    let user = if name.is_some() || phone.is_some() {
        let name = name.unwrap_or(current.name);
        ctx.api.update_profile(&name, phone.as_deref()).await?
    } else {
        current
    };
    render_user(&user);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn render_user(user: &User) {
    println!("{}", user.name);
    println!("  email: {}", user.email);
    if let Some(phone) = &user.phone {
        println!("  phone: {phone}");
    }
    let role = match user.role {
        UserRole::Admin => "admin",
        UserRole::Customer => "customer",
    };
    println!("  role:  {role}");
}
