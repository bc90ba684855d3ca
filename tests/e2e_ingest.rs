// Rampart - tests/e2e_ingest.rs
//
// End-to-end tests for the simulated ingestion pipeline as the GUI
// drives it: a hand-rolled clock steps the queue through upload,
// analysis, and verdict, while the tests observe the two surfaces the
// scan page and the frame loop actually consume: the live phase
// counts, and the wakeup schedule behind request_repaint_after.

use rampart::core::ingest::{IngestQueue, RejectReason};
use rampart::core::model::UploadStatus;
use rampart::core::stats::queue_summary;
use rampart::util::constants::MAX_UPLOAD_SIZE_BYTES;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(200);
const ANALYSIS_DELAY: Duration = Duration::from_millis(3000);

// =============================================================================
// Helpers
// =============================================================================

/// A queue on the default timings with a fixed seed, so every run
/// replays the same verdicts.
fn seeded_queue(seed: u64) -> IngestQueue {
    IngestQueue::with_rng(TICK, ANALYSIS_DELAY, StdRng::seed_from_u64(seed))
}

/// Step a virtual clock until no item is in flight. Panics if the
/// queue never settles.
fn drain(queue: &mut IngestQueue, start: Instant) -> Instant {
    let step = Duration::from_millis(50);
    let mut now = start;
    for _ in 0..10_000 {
        if !queue.is_busy() {
            return now;
        }
        now += step;
        queue.tick(now);
    }
    panic!("queue never settled");
}

// =============================================================================
// Phase counts E2E
// =============================================================================

/// A mixed batch (one supported sample, one unsupported) runs to the
/// end with the sidebar counts correct at both ends of the pipeline.
#[test]
fn e2e_mixed_batch_summary_tracks_each_phase() {
    let mut queue = seeded_queue(17);
    let t0 = Instant::now();

    queue.submit("dropper.exe", 4096, t0).unwrap();
    queue.submit("notes.txt", 512, t0).unwrap();

    let before = queue_summary(queue.items());
    assert_eq!(before.total, 2);
    assert_eq!(before.uploading, 2);
    assert_eq!(before.in_flight(), 2);

    drain(&mut queue, t0);

    let after = queue_summary(queue.items());
    assert_eq!(after.total, 2);
    assert_eq!(after.in_flight(), 0);
    // The supported extension completes with a verdict; the engine
    // rejects the unsupported one after its upload finishes.
    assert_eq!(after.completed, 1);
    assert_eq!(after.failed, 1);

    let dropper = queue
        .items()
        .iter()
        .find(|item| item.name == "dropper.exe")
        .unwrap();
    assert_eq!(dropper.status, UploadStatus::Completed);
    assert!(dropper.result.is_some());

    let notes = queue
        .items()
        .iter()
        .find(|item| item.name == "notes.txt")
        .unwrap();
    assert_eq!(notes.status, UploadStatus::Failed);
    assert!(notes.result.is_none());
}

/// Every phase the scan page renders is observable from outside:
/// uploading with partial progress, analyzing at 100%, then terminal.
#[test]
fn e2e_item_is_observable_in_every_phase() {
    let mut queue = seeded_queue(29);
    let t0 = Instant::now();
    let id = queue.submit("payload.apk", 1 << 20, t0).unwrap();

    let step = Duration::from_millis(50);
    let mut now = t0;
    let mut saw_uploading_with_progress = false;
    let mut saw_analyzing = false;

    for _ in 0..10_000 {
        now += step;
        queue.tick(now);
        let summary = queue_summary(queue.items());
        let item = queue.get(id).unwrap();
        match item.status {
            UploadStatus::Uploading => {
                if item.progress > 0.0 {
                    saw_uploading_with_progress = true;
                }
                assert_eq!(summary.uploading, 1);
            }
            UploadStatus::Analyzing => {
                saw_analyzing = true;
                assert_eq!(summary.analyzing, 1);
            }
            UploadStatus::Completed | UploadStatus::Failed => break,
        }
    }

    assert!(saw_uploading_with_progress);
    assert!(saw_analyzing);
    assert!(!queue.is_busy());
}

// =============================================================================
// Admission and removal E2E
// =============================================================================

/// A rejected submission is reported and swallowed; uploads already in
/// the queue keep advancing as if nothing happened.
#[test]
fn e2e_rejection_does_not_disturb_live_uploads() {
    let mut queue = seeded_queue(5);
    let t0 = Instant::now();
    let id = queue.submit("payload.apk", 4096, t0).unwrap();

    queue.tick(t0 + TICK);
    let progress_before = queue.get(id).unwrap().progress;
    assert!(progress_before > 0.0);

    let rejected = queue.submit("disk_image.iso", MAX_UPLOAD_SIZE_BYTES + 1, t0 + TICK);
    assert!(matches!(rejected, Err(RejectReason::TooLarge { .. })));
    assert_eq!(queue_summary(queue.items()).total, 1);

    queue.tick(t0 + TICK * 2);
    assert!(queue.get(id).unwrap().progress > progress_before);
}

/// Removing an item mid-upload drops it from the counts immediately
/// and permanently; the survivor still reaches its verdict.
#[test]
fn e2e_removal_mid_flight_keeps_counts_consistent() {
    let mut queue = seeded_queue(13);
    let t0 = Instant::now();
    let doomed = queue.submit("first.exe", 1024, t0).unwrap();
    let kept = queue.submit("second.zip", 2048, t0).unwrap();

    queue.tick(t0 + TICK);
    assert!(queue.remove(doomed));
    assert_eq!(queue_summary(queue.items()).total, 1);

    let end = drain(&mut queue, t0 + TICK);

    assert!(queue.get(doomed).is_none());
    assert_eq!(queue.get(kept).unwrap().status, UploadStatus::Completed);

    // A late tick past every orphaned deadline must not resurrect it.
    queue.tick(end + Duration::from_secs(60));
    let summary = queue_summary(queue.items());
    assert_eq!(summary.total, 1);
    assert_eq!(summary.completed, 1);
}

// =============================================================================
// Frame scheduling E2E
// =============================================================================

/// The frame loop sleeps until `next_due` and repaints then. The
/// schedule must exist exactly while work is pending: one interval
/// ahead during upload, and gone once everything has settled.
#[test]
fn e2e_wakeup_schedule_matches_pending_work() {
    let mut queue = seeded_queue(21);
    assert!(queue.next_due().is_none());

    let t0 = Instant::now();
    queue.submit("sample.exe", 4096, t0).unwrap();
    assert_eq!(queue.next_due(), Some(t0 + TICK));

    // Firing a progress step schedules the next one exactly one
    // interval later. A single step can never finish the upload, so
    // the item is still uploading here.
    queue.tick(t0 + TICK);
    assert_eq!(queue.next_due(), Some(t0 + TICK * 2));

    let end = drain(&mut queue, t0 + TICK);
    queue.tick(end + Duration::from_secs(60));
    assert!(!queue.is_busy());
    assert!(queue.next_due().is_none());
}
