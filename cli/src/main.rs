#[macro_use]
extern crate log;
#[macro_use]
extern crate validator_derive;

use std::env;
use std::io;

use dotenv::dotenv;

mod engine;
mod menu;
mod prompt;
mod stats;
mod store;
mod tests;
mod validate;

use crate::menu::Menu;
use crate::store::PgStore;

fn main() {
    dotenv().ok();
    env_logger::init();

    let pool = db::new_pool();
    let store = PgStore::new(pool);

    let api_key = env::var("QUIZAPI_KEY").unwrap_or_default();
    let base_url =
        env::var("QUIZAPI_URL").unwrap_or_else(|_| quizapi::DEFAULT_BASE_URL.to_string());
    let provider = match quizapi::Client::with_base_url(api_key, base_url) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to build question client - {}", err);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(&store, &provider, stdin.lock(), stdout.lock());

    match menu.run() {
        Ok(()) => {}
        Err(ref err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            info!("Input closed, exiting");
        }
        Err(err) => {
            error!("Exiting after I/O failure - {}", err);
            std::process::exit(1);
        }
    }
}
