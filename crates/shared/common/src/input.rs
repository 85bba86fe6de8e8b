//! Reading secrets for the command-line tools.

use std::io::{self, BufRead};

use domain::Secret;
use zeroize::Zeroizing;

/// Read a secret from `env_var`, falling back to the first line of stdin.
pub fn read_secret(env_var: &str) -> io::Result<Secret> {
    if let Ok(value) = std::env::var(env_var) {
        return Ok(Secret::from(value));
    }

    read_secret_line(io::stdin().lock())
}

/// Read one line from `reader` as a secret, without its line terminator.
///
/// The buffer is zeroed on every exit, a failed read included; on success the
/// bytes move into the [`Secret`] without another plaintext copy.
pub fn read_secret_line<R: BufRead>(mut reader: R) -> io::Result<Secret> {
    let mut line = Zeroizing::new(String::new());
    reader.read_line(&mut line)?;

    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);

    Ok(Secret::from(std::mem::take(&mut *line)))
}
