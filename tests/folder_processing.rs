//! Folder processor integration tests.
//!
//! Each test builds a synthetic capture in a temp dir and runs a single
//! folder job against it.

mod common;

use std::{
    fs,
    time::{Duration, SystemTime},
};

use common::{SyntheticDataset, count_entries, frame_name, listed_names};
use keytrim::{FolderJob, ProcessingOutcome, TrimOptions, process_folder};

const CAPTURE: &str = "NIA_SL_WORD0001_REAL01_F";

fn job_for(dataset: &SyntheticDataset, capture: &str) -> FolderJob {
    FolderJob::new(
        dataset.keypoint_folder("01", capture),
        dataset.metadata_folder("01"),
        dataset.output_root().join("01"),
    )
}

fn expect_success(outcome: ProcessingOutcome) -> keytrim::FolderStats {
    match outcome {
        ProcessingOutcome::Success(stats) => stats,
        other => panic!("Expected success, got {other:?}"),
    }
}

fn expect_error(outcome: ProcessingOutcome) -> String {
    match outcome {
        ProcessingOutcome::Error { message, .. } => message,
        other => panic!("Expected error, got {other:?}"),
    }
}

#[test]
fn trims_to_padded_gesture_window() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 100, (1.0, 3.0, 5.0));

    let stats = expect_success(process_folder(&job_for(&dataset, CAPTURE), &TrimOptions::new()));
    assert_eq!(stats.folder_name, CAPTURE);
    assert_eq!(stats.total_frames, 100);
    assert_eq!((stats.start_frame, stats.end_frame), (10, 70));
    assert_eq!(stats.kept_frames, 61);
    assert_eq!(stats.trimmed_frames, 39);
    assert_eq!((stats.start_time, stats.end_time), (1.0, 3.0));
}

#[test]
fn kept_frames_are_renumbered_in_temporal_order() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 100, (1.0, 3.0, 5.0));

    expect_success(process_folder(&job_for(&dataset, CAPTURE), &TrimOptions::new()));

    let output_folder = dataset.output_root().join("01").join(CAPTURE);
    let names = listed_names(&output_folder);
    let expected: Vec<String> = (0..61).map(|index| frame_name(CAPTURE, index)).collect();
    assert_eq!(names, expected);

    for (sequence, name) in names.iter().enumerate() {
        let content = fs::read_to_string(output_folder.join(name)).unwrap();
        assert_eq!(content, format!("{{\"frame\": {}}}", sequence + 10));
    }
}

#[test]
fn copies_keep_modification_times() {
    let dataset = SyntheticDataset::new();
    let capture_folder = dataset.add_front_capture("01", "WORD0001", 30, (0.0, 1.0, 1.0));

    let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_500_000_000);
    let first = capture_folder.join(frame_name(CAPTURE, 0));
    let file = fs::OpenOptions::new().write(true).open(&first).unwrap();
    file.set_modified(past).unwrap();
    drop(file);

    expect_success(process_folder(&job_for(&dataset, CAPTURE), &TrimOptions::new()));

    let copied = dataset
        .output_root()
        .join("01")
        .join(CAPTURE)
        .join(frame_name(CAPTURE, 0));
    assert_eq!(fs::metadata(copied).unwrap().modified().unwrap(), past);
}

#[test]
fn dry_run_reports_the_same_statistics_without_writing() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 100, (1.0, 3.0, 5.0));
    let job = job_for(&dataset, CAPTURE);

    let planned = expect_success(process_folder(&job, &TrimOptions::new().with_dry_run(true)));
    assert_eq!(count_entries(&dataset.output_root()), 0);

    let actual = expect_success(process_folder(&job, &TrimOptions::new()));
    assert_eq!(planned, actual);
}

#[test]
fn existing_output_folder_is_reused() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 20, (0.2, 0.8, 1.0));
    let job = job_for(&dataset, CAPTURE);
    fs::create_dir_all(job.output_folder()).unwrap();

    let first = expect_success(process_folder(&job, &TrimOptions::new()));
    let second = expect_success(process_folder(&job, &TrimOptions::new()));
    assert_eq!(first, second);
    assert_eq!(listed_names(&job.output_folder()).len() as i64, first.kept_frames);
}

#[test]
fn other_views_are_skipped_without_writes() {
    let dataset = SyntheticDataset::new();
    for view in ["D", "L", "R", "U"] {
        let capture = format!("NIA_SL_WORD0001_REAL01_{view}");
        dataset.add_capture("01", &capture, 10);

        let outcome = process_folder(&job_for(&dataset, &capture), &TrimOptions::new());
        match outcome {
            ProcessingOutcome::Skipped { folder_name, reason } => {
                assert_eq!(folder_name, capture);
                assert_eq!(reason, "not front view");
            }
            other => panic!("Expected skip, got {other:?}"),
        }
    }
    assert_eq!(count_entries(&dataset.output_root()), 0);
}

#[test]
fn front_folder_without_item_code_is_an_error() {
    let dataset = SyntheticDataset::new();
    let capture = "NIA_SL_SEN0001_REAL01_F";
    dataset.add_capture("01", capture, 10);

    let message = expect_error(process_folder(&job_for(&dataset, capture), &TrimOptions::new()));
    assert!(message.contains("Cannot parse folder name"), "{message}");
}

#[test]
fn missing_metadata_is_an_error() {
    let dataset = SyntheticDataset::new();
    dataset.add_capture("01", CAPTURE, 10);
    dataset.add_morpheme("01", "NIA_SL_WORD0002_REAL01_F_morpheme.json", 0.1, 0.5, 1.0);

    let message = expect_error(process_folder(&job_for(&dataset, CAPTURE), &TrimOptions::new()));
    assert!(message.contains("Morpheme file not found"), "{message}");
    assert!(message.contains("NIA_SL_WORD0001_REAL*_F_morpheme.json"), "{message}");
    assert_eq!(count_entries(&dataset.output_root()), 0);
}

#[test]
fn empty_capture_is_an_error() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 0, (0.1, 0.5, 1.0));

    let message = expect_error(process_folder(&job_for(&dataset, CAPTURE), &TrimOptions::new()));
    assert!(message.contains("No keypoint files found"), "{message}");
}

#[test]
fn malformed_metadata_is_an_error() {
    let dataset = SyntheticDataset::new();
    dataset.add_capture("01", CAPTURE, 10);
    fs::create_dir_all(dataset.metadata_folder("01")).unwrap();
    fs::write(
        dataset
            .metadata_folder("01")
            .join("NIA_SL_WORD0001_REAL01_F_morpheme.json"),
        r#"{"data": [{"start": 0.1}], "metaData": {}}"#,
    )
    .unwrap();

    let message = expect_error(process_folder(&job_for(&dataset, CAPTURE), &TrimOptions::new()));
    assert!(message.contains("Error loading morpheme data"), "{message}");
}

#[test]
fn zero_duration_metadata_is_an_error() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 10, (0.0, 0.0, 0.0));

    let message = expect_error(process_folder(&job_for(&dataset, CAPTURE), &TrimOptions::new()));
    assert!(message.contains("duration"), "{message}");
}

#[test]
fn out_of_range_gesture_time_is_an_error() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 10, (0.0, 1e30, 1.0));
    let job = job_for(&dataset, CAPTURE);

    let message = expect_error(process_folder(&job, &TrimOptions::new()));
    assert!(message.contains("outside the frame index range"), "{message}");
    assert!(!job.output_folder().exists());
}

#[test]
fn lexicographically_first_metadata_match_wins() {
    let dataset = SyntheticDataset::new();
    dataset.add_capture("01", CAPTURE, 100);
    // Written in reverse order; REAL01 sorts first and keeps frames 10..=30.
    dataset.add_morpheme("01", "NIA_SL_WORD0001_REAL03_F_morpheme.json", 4.0, 4.5, 5.0);
    dataset.add_morpheme("01", "NIA_SL_WORD0001_REAL02_F_morpheme.json", 3.0, 3.5, 5.0);
    dataset.add_morpheme("01", "NIA_SL_WORD0001_REAL01_F_morpheme.json", 1.0, 1.0, 5.0);

    let stats = expect_success(process_folder(
        &job_for(&dataset, CAPTURE),
        &TrimOptions::new().with_dry_run(true),
    ));
    assert_eq!((stats.start_frame, stats.end_frame), (10, 30));
}

#[test]
fn offset_widens_the_kept_window() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 100, (2.0, 3.0, 5.0));
    let job = job_for(&dataset, CAPTURE);

    let narrow = expect_success(process_folder(&job, &TrimOptions::new().with_offset(0).with_dry_run(true)));
    let wide = expect_success(process_folder(&job, &TrimOptions::new().with_offset(25).with_dry_run(true)));
    assert_eq!((narrow.start_frame, narrow.end_frame), (40, 60));
    assert_eq!((wide.start_frame, wide.end_frame), (15, 85));
}

/// Timing past the end of the recording yields an inverted range. It is
/// reported as computed (negative kept count) and copies nothing.
#[test]
fn inverted_range_copies_no_frames() {
    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 10, (2.5, 3.0, 1.0));
    let job = job_for(&dataset, CAPTURE);

    let stats = expect_success(process_folder(&job, &TrimOptions::new()));
    assert_eq!((stats.start_frame, stats.end_frame), (15, 9));
    assert_eq!(stats.kept_frames, -5);
    assert_eq!(stats.trimmed_frames, 15);

    assert!(job.output_folder().is_dir());
    assert!(listed_names(&job.output_folder()).is_empty());
}

#[cfg(unix)]
#[test]
fn copy_failure_is_reported_for_that_folder() {
    use std::os::unix::fs::PermissionsExt;

    let dataset = SyntheticDataset::new();
    dataset.add_front_capture("01", "WORD0001", 20, (0.0, 1.0, 1.0));
    let job = job_for(&dataset, CAPTURE);
    fs::create_dir_all(job.output_folder()).unwrap();
    fs::set_permissions(job.output_folder(), fs::Permissions::from_mode(0o555)).unwrap();

    // Permission bits do not bind a privileged user.
    let probe = job.output_folder().join("probe");
    if fs::write(&probe, b"").is_ok() {
        fs::remove_file(probe).unwrap();
        return;
    }

    let message = expect_error(process_folder(&job, &TrimOptions::new()));
    assert!(message.contains("Failed to copy"), "{message}");

    fs::set_permissions(job.output_folder(), fs::Permissions::from_mode(0o755)).unwrap();
}
