//! Produce an `AUTH_PASSWORD_HASH` value.
//!
//! Reads the plaintext password from the first line of stdin and prints its
//! Argon2id PHC string:
//!
//! ```text
//! echo -n 's3cret' | cargo run -p warehouse-api --bin hash-password
//! ```

use std::io::{self, BufRead};
use std::process::ExitCode;

use warehouse_api::auth::credentials::hash_password;

fn main() -> ExitCode {
    let mut line = String::new();
    if let Err(e) = io::stdin().lock().read_line(&mut line) {
        eprintln!("Failed to read password from stdin: {e}");
        return ExitCode::FAILURE;
    }

    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        eprintln!("Refusing to hash an empty password");
        return ExitCode::FAILURE;
    }

    match hash_password(password) {
        Ok(hash) => {
            println!("{hash}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to hash password: {e}");
            ExitCode::FAILURE
        }
    }
}
