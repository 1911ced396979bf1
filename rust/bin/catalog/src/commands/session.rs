//! `catalog open|login|logout`.

use anyhow::Result;
use catalog::request::{LoginReq, LogoutReq, NavigateReq, OpenAppReq};
use catalog::state::{LoginState, Route};

use super::app::App;
use super::prompt_line;

/// Resolve `/` and print where it leads.
pub async fn open(app: &App) -> Result<()> {
    app.flux.emit(OpenAppReq::PATH, OpenAppReq).await;
    println!("{}", app.route().path());
    Ok(())
}

pub async fn login(app: &App, email: Option<String>, password: Option<String>) -> Result<()> {
    app.flux.emit(NavigateReq::PATH, NavigateReq(Route::Login)).await;
    let challenge = app
        .flux
        .get_as::<LoginState>(LoginState::PATH)
        .map(|s| s.challenge)
        .unwrap_or_default();

    let email = match email {
        Some(e) => e,
        None => prompt_line("Email: ")?,
    };
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };
    eprintln!("Captcha: {}", challenge);
    let captcha = prompt_line("Type the captcha (without spaces): ")?;

    app.flux
        .emit(
            LoginReq::PATH,
            LoginReq {
                email: email.clone(),
                password,
                captcha,
            },
        )
        .await;

    if app.route() != Route::DASHBOARD {
        let error = app
            .flux
            .get_as::<LoginState>(LoginState::PATH)
            .and_then(|s| s.error)
            .unwrap_or_else(|| "Login failed.".to_string());
        anyhow::bail!(error);
    }
    println!("Logged in as {}.", email);
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.flux.emit(LogoutReq::PATH, LogoutReq).await;
    println!("Logged out.");
    Ok(())
}
