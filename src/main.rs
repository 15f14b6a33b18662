// Entrypoint for the CLI application.
// - Keeps `main` small: create an API client and hand it to the UI loop.
// - Logging goes through env_logger; set RUST_LOG=debug to see request
//   lines and transport failures.

use cinematch_cli::{api::ApiClient, ui::main_menu};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Create API client configured by environment variable
    // `RECOMMENDER_URL` or default to http://localhost:5000. See
    // `api::ApiClient::from_env`.
    let api = ApiClient::from_env()?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(api)?;
    Ok(())
}
