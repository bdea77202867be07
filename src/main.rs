fn main() {
    if let Err(err) = geotable::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
