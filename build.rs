fn main() {
    // ESP-IDF environment export is only needed for the firmware build;
    // host builds (tests, simulation) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
