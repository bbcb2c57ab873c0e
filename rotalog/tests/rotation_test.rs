use rotalog::{FileLocation, FileWriteMode, LoggerError, RotatingFile};
use std::fs;
use std::path::Path;

fn location(dir: &Path) -> FileLocation {
    FileLocation {
        dir: dir.to_path_buf(),
        name: "log".to_string(),
        ext: "ansi".to_string(),
    }
}

fn line_of(len: usize) -> String {
    // Newline is appended by the sink.
    "x".repeat(len - 1)
}

#[test]
fn test_creates_missing_directory() {
    let root = tempfile::tempdir().unwrap();
    let nested = root.path().join("a").join("b");

    let file = RotatingFile::open(location(&nested), 100, FileWriteMode::Blocking).unwrap();

    assert!(nested.is_dir());
    assert_eq!(file.sequence_id(), 0);
    assert_eq!(file.bytes_written(), 0);
    assert!(file.path().ends_with("log.0.ansi"));
    assert!(file.path().exists());
}

#[test]
fn test_restart_skips_oversized_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("log.3.ansi"), vec![b'a'; 150]).unwrap();

    let file = RotatingFile::open(location(dir.path()), 100, FileWriteMode::Blocking).unwrap();

    assert_eq!(file.sequence_id(), 4);
    assert_eq!(file.bytes_written(), 0);
    assert!(file.path().ends_with("log.4.ansi"));
}

#[test]
fn test_restart_resumes_highest_sequence() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("log.1.ansi"), vec![b'a'; 90]).unwrap();
    fs::write(dir.path().join("log.2.ansi"), vec![b'a'; 40]).unwrap();
    fs::write(dir.path().join("log.x.ansi"), b"noise").unwrap();
    fs::write(dir.path().join("log.9.txt"), b"noise").unwrap();
    fs::write(dir.path().join("other.7.ansi"), b"noise").unwrap();

    let mut file = RotatingFile::open(location(dir.path()), 100, FileWriteMode::Blocking).unwrap();

    assert_eq!(file.sequence_id(), 2);
    assert_eq!(file.bytes_written(), 40);

    file.write_line("appended").unwrap();
    let contents = fs::read_to_string(dir.path().join("log.2.ansi")).unwrap();
    assert!(contents.ends_with("appended\n"));
    assert_eq!(contents.len(), 49);
}

#[test]
fn test_rotates_after_threshold_exceeded() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = RotatingFile::open(location(dir.path()), 100, FileWriteMode::Blocking).unwrap();
    let line = line_of(30);

    for _ in 0..4 {
        file.write_line(&line).unwrap();
    }
    assert_eq!(file.sequence_id(), 0);
    assert_eq!(file.bytes_written(), 120);

    file.write_line(&line).unwrap();
    assert_eq!(file.sequence_id(), 1);
    assert_eq!(file.bytes_written(), 30);

    let first = fs::metadata(dir.path().join("log.0.ansi")).unwrap().len();
    let second = fs::metadata(dir.path().join("log.1.ansi")).unwrap().len();
    assert_eq!(first, 120);
    assert_eq!(second, 30);
}

#[test]
fn test_reaching_threshold_exactly_does_not_rotate() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = RotatingFile::open(location(dir.path()), 100, FileWriteMode::Blocking).unwrap();

    file.write_line(&line_of(50)).unwrap();
    file.write_line(&line_of(50)).unwrap();
    assert_eq!(file.bytes_written(), 100);

    file.write_line(&line_of(10)).unwrap();
    assert_eq!(file.sequence_id(), 0);
    assert_eq!(file.bytes_written(), 110);

    file.write_line(&line_of(10)).unwrap();
    assert_eq!(file.sequence_id(), 1);
}

#[test]
fn test_overshoot_bounded_by_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let max = 256;
    let mut file = RotatingFile::open(location(dir.path()), max, FileWriteMode::Blocking).unwrap();

    let lengths = [17usize, 64, 3, 99, 41, 12, 80, 5, 33, 70];
    let longest = *lengths.iter().max().unwrap() as u64;
    for round in 0..10 {
        for len in lengths {
            file.write_line(&line_of(len + round)).unwrap();
        }
    }

    let last = file.sequence_id();
    assert!(last > 0);
    for id in 0..last {
        let size = fs::metadata(dir.path().join(format!("log.{}.ansi", id)))
            .unwrap()
            .len();
        assert!(size > max);
        assert!(size <= max + longest + 10);
    }
}

#[test]
fn test_close_is_idempotent_and_blocks_writes() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = RotatingFile::open(location(dir.path()), 100, FileWriteMode::Blocking).unwrap();
    file.write_line("before close").unwrap();

    file.close().unwrap();
    file.close().unwrap();
    assert!(file.is_closed());

    let err = file.write_line("after close").unwrap_err();
    assert!(matches!(err, LoggerError::Closed { .. }));

    let contents = fs::read_to_string(dir.path().join("log.0.ansi")).unwrap();
    assert_eq!(contents, "before close\n");
}

#[test]
fn test_non_blocking_flushes_on_close() {
    let dir = tempfile::tempdir().unwrap();
    let mut file =
        RotatingFile::open(location(dir.path()), 1 << 20, FileWriteMode::NonBlocking).unwrap();

    for i in 0..50 {
        file.write_line(&format!("line {}", i)).unwrap();
    }
    file.close().unwrap();

    let contents = fs::read_to_string(dir.path().join("log.0.ansi")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 50);
    assert_eq!(lines[0], "line 0");
    assert_eq!(lines[49], "line 49");
}

#[test]
fn test_non_blocking_rotation_drains_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut file =
        RotatingFile::open(location(dir.path()), 10, FileWriteMode::NonBlocking).unwrap();

    file.write_line("first line").unwrap();
    file.write_line("second line").unwrap();
    file.close().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("log.0.ansi")).unwrap(),
        "first line\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("log.1.ansi")).unwrap(),
        "second line\n"
    );
}

#[test]
fn test_open_fails_when_directory_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"").unwrap();

    let result = RotatingFile::open(location(&blocker), 100, FileWriteMode::Blocking);
    assert!(matches!(result, Err(LoggerError::Io { .. })));
}

#[test]
fn test_failed_rotation_reports_io_error_and_retries() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = RotatingFile::open(location(dir.path()), 10, FileWriteMode::Blocking).unwrap();
    file.write_line("first line").unwrap();

    // Created after open so the initial scan still resumes at 0.
    let next = dir.path().join("log.1.ansi");
    fs::create_dir(&next).unwrap();

    let result = file.write_line("second line");
    assert!(matches!(result, Err(LoggerError::Io { .. })));
    assert_eq!(file.sequence_id(), 1);

    fs::remove_dir(&next).unwrap();
    file.write_line("third line").unwrap();
    file.close().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("log.0.ansi")).unwrap(),
        "first line\n"
    );
    assert_eq!(fs::read_to_string(&next).unwrap(), "third line\n");
}
