fn main() {
    // ESP-IDF link-args propagation is only needed for on-target builds;
    // host builds (tests, simulation) skip it.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
