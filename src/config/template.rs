//! Environment presets.
//!
//! | env                  | base        | extra             |
//! |----------------------|-------------|-------------------|
//! | `production`, `prod` | production  | no timestamp      |
//! | `staging`, `stg`     | development | no timestamp      |
//! | anything else        | development | none              |
//!
//! Every branch then gets console encoding, coloured capital levels and
//! stdout as the only sink, production included.

use crate::config::options::{disable_timestamp, encoding, level_encoder, output_paths};
use crate::config::schema::{LevelEncoder, LogConfig, CONSOLE_ENCODING};

/// Baseline configuration for the named environment. Matching is exact and
/// case-sensitive.
pub fn template(env: &str) -> LogConfig {
    let mut c = match env {
        "production" | "prod" => {
            let mut c = LogConfig::production();
            disable_timestamp().apply(&mut c);
            c
        }
        "staging" | "stg" => {
            let mut c = LogConfig::development();
            disable_timestamp().apply(&mut c);
            c
        }
        _ => LogConfig::development(),
    };

    encoding(CONSOLE_ENCODING).apply(&mut c);
    level_encoder(LevelEncoder::CapitalColor).apply(&mut c);
    output_paths(["stdout"]).apply(&mut c);
    c
}
