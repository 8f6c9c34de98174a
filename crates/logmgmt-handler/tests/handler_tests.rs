use logmgmt_handler::{
    Charset, FileHandler, HandlerLookup, HandlerRegistry, Level, LogHandler, LogRecord,
    PatternFormatter,
};
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_file_handler_honours_live_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.log");
    let handler = FileHandler::open("FILE", &path, true).unwrap();
    handler.set_formatter(Arc::new(PatternFormatter::new("%-5p %m%n").unwrap()));

    handler.publish(&LogRecord::new(Level::DEBUG, "app", "first")).unwrap();
    handler.set_level(Level::WARN);
    handler.publish(&LogRecord::new(Level::INFO, "app", "dropped")).unwrap();
    handler.set_encoding(Some("ISO-8859-1")).unwrap();
    handler.publish(&LogRecord::new(Level::ERROR, "app", "caf\u{e9}")).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let mut expected = b"DEBUG first\nERROR caf".to_vec();
    expected.extend_from_slice(&[0xe9, b'\n']);
    assert_eq!(bytes, expected);
    assert_eq!(handler.encoding(), Some(Charset::Iso8859_1));
}

#[test]
fn test_registry_concurrent_register_and_remove() {
    let registry = Arc::new(HandlerRegistry::<FileHandler>::new());
    std::thread::scope(|scope| {
        for t in 0..4 {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                for i in 0..50 {
                    let name = format!("H{t}-{i}");
                    registry.register(FileHandler::new(name.as_str()));
                    assert!(registry.get(&name).is_some());
                    if i % 2 == 0 {
                        registry.remove(&name);
                        assert!(registry.get(&name).is_none());
                    }
                }
            });
        }
    });
    assert_eq!(registry.len(), 4 * 25);
}

proptest! {
    #[test]
    fn prop_known_level_names_parse_in_any_case(index in 0usize..14, lower in any::<bool>()) {
        let level = Level::known()[index];
        let token = if lower { level.name().to_lowercase() } else { level.name().to_string() };
        prop_assert_eq!(Level::parse(&token).unwrap(), level);
    }

    #[test]
    fn prop_unknown_tokens_rejected(token in "[A-Z]{1,12}") {
        prop_assume!(Level::known().iter().all(|l| l.name() != token));
        prop_assert!(Level::parse(&token).is_err());
    }

    #[test]
    fn prop_failed_encoding_change_is_invisible(name in "[a-z]{3,10}-x") {
        let handler = FileHandler::new("FILE");
        handler.set_encoding(Some("UTF-16LE")).unwrap();
        prop_assert!(handler.set_encoding(Some(&name)).is_err());
        prop_assert_eq!(handler.encoding(), Some(Charset::Utf16Le));
    }
}
