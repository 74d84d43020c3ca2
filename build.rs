fn main() {
    // Propagate the ESP-IDF build environment to dependent crates.
    // No-op for host-target test builds (espidf feature disabled).
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
