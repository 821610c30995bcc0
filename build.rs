fn main() {
    // The ESP-IDF build environment only matters when cross-compiling for
    // the chip; host builds (tests, simulation) skip it entirely.
    if std::env::var("TARGET").is_ok_and(|t| t.ends_with("-espidf")) {
        embuild::espidf::sysenv::output();
    }
}
