//! epg-paths: bridge domain / EPG / path summary for an ACI leaf

#[tokio::main]
async fn main() {
    if let Err(e) = epg_paths::logging::init_logging() {
        if tracing::dispatcher::has_been_set() {
            epg_paths::log_warn!("Log file disabled: {}", e);
        } else {
            eprintln!("[WARN] Failed to initialize logging: {}", e);
        }
    }

    if let Err(e) = epg_paths::run(std::env::args()).await {
        if tracing::dispatcher::has_been_set() {
            epg_paths::log_error!("{:#}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(epg_paths::exit_code_for(&e));
    }
}
