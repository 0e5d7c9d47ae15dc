use log::LevelFilter;
use seabattle::{init_logging, level_from, LOG_ENV};

#[test]
fn test_level_names() {
    assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
    assert_eq!(level_from(Some(" TRACE ")), LevelFilter::Trace);
    assert_eq!(level_from(Some("off")), LevelFilter::Off);
    assert_eq!(level_from(Some("loud")), LevelFilter::Info);
    assert_eq!(level_from(None), LevelFilter::Info);
}

#[test]
fn test_init_reads_env_once() {
    std::env::set_var(LOG_ENV, "debug");
    init_logging();
    assert_eq!(log::max_level(), LevelFilter::Debug);

    std::env::set_var(LOG_ENV, "error");
    init_logging();
    assert_eq!(log::max_level(), LevelFilter::Debug);
}
