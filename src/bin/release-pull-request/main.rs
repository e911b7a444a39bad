use release_pull_request::{
    ConfigStore, GitHub, NO_TOKEN_EXIT_CODE, ReleaseError, SystemEnvironment, SystemOpener,
    TerminalPrompt, draft_release, parse_args, resolve_token, token_instructions,
};

fn handle_clap_help_version(clap_err: &clap::Error) -> ! {
    use clap::error::ErrorKind;
    match clap_err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{clap_err}");
            std::process::exit(0);
        }
        _ => {
            eprint!("{clap_err}");
            std::process::exit(2);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let env = SystemEnvironment;

    let opts = match parse_args(std::env::args_os(), &env) {
        Ok(opts) => opts,
        Err(err) => {
            if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
                handle_clap_help_version(clap_err);
            } else {
                return Err(err);
            }
        }
    };

    let token = match resolve_token(&opts, &env) {
        Ok(token) => token,
        Err(ReleaseError::MissingToken) => {
            eprintln!("{}", token_instructions());
            std::process::exit(NO_TOKEN_EXIT_CODE);
        }
        Err(err) => return Err(err.into()),
    };

    let github = GitHub::new(token)?;
    let config = ConfigStore::from_environment(&env);
    let drafted = draft_release(&opts, &github, &TerminalPrompt::new(), &SystemOpener, &config).await?;

    println!("{}", drafted.edit_url);
    Ok(())
}
