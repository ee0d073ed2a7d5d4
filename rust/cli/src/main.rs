use ledger_sync::logging::{init_logging, LogFormat};

fn main() {
    let format = match std::env::var("POKER_LEDGER_LOG_FORMAT").as_deref() {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Text,
    };
    init_logging("warn,ledger_cli=info", format);

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = ledger_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
