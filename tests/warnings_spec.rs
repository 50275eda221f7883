//! Warning deduplication: each offender is reported exactly once.
//!
//! Everything lives in a single test function because the process-global
//! logger can only be installed once.

use std::path::PathBuf;
use std::sync::Mutex;

use dos_unicode::{FixedHost, Transcoder};
use log::{LevelFilter, Log, Metadata, Record};

struct CaptureLogger {
    messages: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.messages
            .lock()
            .expect("logger mutex")
            .push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    messages: Mutex::new(Vec::new()),
};

fn resources_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
}

#[test]
fn warnings_are_deduplicated_per_offender() {
    log::set_logger(&LOGGER).expect("install logger");
    log::set_max_level(LevelFilter::Warn);

    let mut t = Transcoder::new(FixedHost::new(resources_root()));

    // The same unmappable code point twice, plus a different one
    t.utf8_to_dos_for_cp("日".as_bytes(), 437);
    t.utf8_to_dos_for_cp("日本".as_bytes(), 437);
    // The same unknown code page twice
    t.utf8_to_dos_for_cp(b"A", 9999);
    t.utf8_to_dos_for_cp(b"A", 9999);

    // A transcoder with no usable configuration at all warns once about
    // the default code page
    let empty = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(empty.path().join("mapping")).expect("mapping dir");
    let mut broken = Transcoder::new(FixedHost::new(empty.path()));
    broken.utf8_to_dos(b"A");
    broken.utf8_to_dos(b"B");

    let messages = LOGGER.messages.lock().expect("logger mutex").clone();
    let count = |needle: &str| messages.iter().filter(|m| m.contains(needle)).count();

    assert_eq!(count("code point 0x65e5"), 1, "messages: {:?}", messages);
    assert_eq!(count("code point 0x672c"), 1, "messages: {:?}", messages);
    assert_eq!(count("unknown code page 9999"), 1, "messages: {:?}", messages);
    assert_eq!(
        count("unable to prepare default code page"),
        1,
        "messages: {:?}",
        messages
    );
}
