use std::env;

const HELP: &str = include_str!("./cli-help.txt");

/// Variables that are safe to echo back. Anything holding a secret must stay off this list.
const PRINTABLE_ENVS: [&str; 15] = [
    "RUST_LOG",
    "DS_HOST",
    "DS_PORT",
    "DS_DEALS_FILE",
    "DS_CACHE_TTL_SECS",
    "DS_UNLOCK_PRICE_PAISE",
    "DS_CURRENCY",
    "DS_RAZORPAY_KEY_ID",
    "DS_RAZORPAY_API_URL",
    "DS_AFFILIATE_FLIPKART",
    "DS_AFFILIATE_AMAZON",
    "DS_AFFILIATE_JIOMART",
    "DS_AFFILIATE_MYNTRA",
    "DS_AFFILIATE_SWIGGY",
    "DS_AFFILIATE_BIGBASKET",
];

/// The server has no command-line interface. Any argument at all prints the help text and the current configuration,
/// and returns true so that the caller can exit instead of starting the server.
pub fn handle_command_line_args() -> bool {
    if env::args().len() <= 1 {
        return false;
    }
    println!("\n{HELP}\n");
    println!("Current environment values (EXCLUDING variables that contain secrets):");
    for line in env_summary() {
        println!("{line}");
    }
    true
}

fn env_summary() -> Vec<String> {
    PRINTABLE_ENVS
        .iter()
        .map(|&name| {
            let val = env::var_os(name)
                .map(|v| v.into_string().unwrap_or_else(|s| format!("Invalid value: {}", s.to_string_lossy())))
                .unwrap_or_else(|| "Not set".into());
            format!("  {name:<35} {val:<15}")
        })
        .collect()
}
