/// Log filter used when neither the config nor `RUST_LOG` provides one
pub const DEFAULT_LOG_FILTER: &str = "the_relay=info,warn";
