fn main() {
    if let Err(err) = alloy_intake::run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
