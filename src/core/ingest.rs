// Rampart - core/ingest.rs
//
// Simulated ingestion pipeline for the scan page.
//
// The queue is a pure state holder: nothing advances until the caller
// invokes `tick` with the current instant. The GUI ticks once per
// frame with `Instant::now()`; tests drive a hand-rolled clock through
// the same entry point and observe every transition deterministically.
// Verdicts come from a caller-supplied RNG, so a fixed seed replays an
// identical run.
//
// Each live item owns at most one pending deadline. A deadline whose
// item has been removed, or whose item has already settled, fires as a
// silent no-op. Missed intervals do not batch: a tick far past the
// deadline still advances the item by a single step.

use crate::core::model::{AnalysisResult, RiskLevel, UploadItem, UploadStatus};
use crate::util::constants::{
    ACCEPTED_EXTENSIONS, MALWARE_TYPE_LABELS, MAX_QUEUE_ITEMS, MAX_UPLOAD_SIZE_BYTES,
    MAX_VERDICT_SCORE, MIN_VERDICT_SCORE, PROGRESS_INCREMENT_MAX,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

// =============================================================================
// Admission
// =============================================================================

/// Why a submission was turned away at admission.
///
/// Rejections are recoverable per-item conditions, reported to the
/// user as warnings. The queue itself is never left in a partial
/// state: a rejected file does not enter it at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// File exceeds the upload size ceiling.
    TooLarge { size: u64 },

    /// Queue already holds the maximum number of items.
    QueueFull,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::TooLarge { size } => write!(
                f,
                "exceeds the {} MB upload limit ({} bytes)",
                MAX_UPLOAD_SIZE_BYTES / (1024 * 1024),
                size
            ),
            RejectReason::QueueFull => {
                write!(f, "upload queue is full ({} items)", MAX_QUEUE_ITEMS)
            }
        }
    }
}

// =============================================================================
// Ingest Queue
// =============================================================================

/// A deadline for one item's next pipeline step.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    item_id: u64,
    due: Instant,
}

/// The simulated ingestion queue.
///
/// Holds the transient upload items plus their pipeline timing state.
/// All timing flows through the `now` argument of `submit` and `tick`;
/// the queue never reads the wall clock itself.
#[derive(Debug)]
pub struct IngestQueue {
    items: Vec<UploadItem>,
    deadlines: Vec<Deadline>,
    next_id: u64,
    rng: StdRng,
    tick_interval: Duration,
    analysis_delay: Duration,
}

impl IngestQueue {
    /// Create a queue with an entropy-seeded RNG.
    pub fn new(tick_interval: Duration, analysis_delay: Duration) -> Self {
        Self::with_rng(tick_interval, analysis_delay, StdRng::from_entropy())
    }

    /// Create a queue with an explicit RNG (fixed seed for replays and tests).
    pub fn with_rng(tick_interval: Duration, analysis_delay: Duration, rng: StdRng) -> Self {
        Self {
            items: Vec::new(),
            deadlines: Vec::new(),
            next_id: 1,
            rng,
            tick_interval,
            analysis_delay,
        }
    }

    /// Submit a file for ingestion.
    ///
    /// Admission checks run synchronously; an accepted file enters the
    /// queue in the Uploading phase with its first progress step due
    /// one tick interval from `now`. Returns the new item's ID.
    pub fn submit(&mut self, name: &str, size: u64, now: Instant) -> Result<u64, RejectReason> {
        if size > MAX_UPLOAD_SIZE_BYTES {
            tracing::warn!(name, size, "Upload rejected: too large");
            return Err(RejectReason::TooLarge { size });
        }
        if self.items.len() >= MAX_QUEUE_ITEMS {
            tracing::warn!(name, "Upload rejected: queue full");
            return Err(RejectReason::QueueFull);
        }

        let id = self.next_id;
        self.next_id += 1;

        self.items.push(UploadItem {
            id,
            name: name.to_string(),
            size,
            file_type: file_extension(name),
            status: UploadStatus::Uploading,
            progress: 0.0,
            result: None,
        });
        self.deadlines.push(Deadline {
            item_id: id,
            due: now + self.tick_interval,
        });

        tracing::debug!(id, name, size, "Upload queued");
        Ok(id)
    }

    /// Advance the pipeline to `now`, firing every due deadline once.
    pub fn tick(&mut self, now: Instant) {
        if self.deadlines.is_empty() {
            return;
        }

        let mut due = Vec::new();
        self.deadlines.retain(|deadline| {
            if deadline.due <= now {
                due.push(*deadline);
                false
            } else {
                true
            }
        });

        for deadline in due {
            self.advance(deadline.item_id, now);
        }
    }

    /// Remove an item from the queue.
    ///
    /// Any pending deadline for the item is left in place; it fires as
    /// a no-op at its due time. Returns false if no such item exists.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::debug!(id, "Upload removed from queue");
        }
        removed
    }

    /// All items in submission order.
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    /// Look up an item by ID.
    pub fn get(&self, id: u64) -> Option<&UploadItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while any item is still moving through the pipeline.
    pub fn is_busy(&self) -> bool {
        self.items.iter().any(|item| !item.status.is_terminal())
    }

    /// Earliest pending deadline, for frame scheduling. May point at a
    /// removed item's stale deadline; the next tick clears those.
    pub fn next_due(&self) -> Option<Instant> {
        self.deadlines.iter().map(|deadline| deadline.due).min()
    }

    /// Fire one deadline for the given item.
    fn advance(&mut self, item_id: u64, now: Instant) {
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            // Item was removed while its deadline was pending.
            return;
        };

        match item.status {
            UploadStatus::Uploading => {
                item.progress += self.rng.gen_range(0.0..PROGRESS_INCREMENT_MAX);
                if item.progress >= 100.0 {
                    item.progress = 100.0;
                    item.status = UploadStatus::Analyzing;
                    self.deadlines.push(Deadline {
                        item_id,
                        due: now + self.analysis_delay,
                    });
                    tracing::debug!(id = item_id, "Upload complete, analysis started");
                } else {
                    self.deadlines.push(Deadline {
                        item_id,
                        due: now + self.tick_interval,
                    });
                }
            }
            UploadStatus::Analyzing => {
                if ACCEPTED_EXTENSIONS.contains(&item.file_type.as_str()) {
                    let verdict = fabricate_verdict(&mut self.rng);
                    tracing::info!(
                        id = item_id,
                        name = %item.name,
                        score = verdict.score,
                        malware_type = %verdict.malware_type,
                        "Analysis completed"
                    );
                    item.result = Some(verdict);
                    item.status = UploadStatus::Completed;
                } else {
                    tracing::info!(
                        id = item_id,
                        name = %item.name,
                        file_type = %item.file_type,
                        "Analysis failed: unsupported file type"
                    );
                    item.status = UploadStatus::Failed;
                }
            }
            // Stale deadline for an item that already settled.
            UploadStatus::Completed | UploadStatus::Failed => {}
        }
    }
}

/// Fabricate a verdict for a completed analysis.
///
/// Risk level and malware family are uniform draws over their label
/// sets; the score is a uniform integer in the verdict range.
fn fabricate_verdict(rng: &mut StdRng) -> AnalysisResult {
    let levels = RiskLevel::all();
    let risk_level = levels[rng.gen_range(0..levels.len())];
    let malware_type = MALWARE_TYPE_LABELS[rng.gen_range(0..MALWARE_TYPE_LABELS.len())].to_string();
    let score = rng.gen_range(MIN_VERDICT_SCORE..=MAX_VERDICT_SCORE);

    AnalysisResult {
        risk_level,
        malware_type,
        score,
    }
}

/// Lowercase extension of a filename, or "unknown" when there is none.
///
/// Follows `Path::extension` semantics: dotfiles and extensionless
/// names have no extension and map to "unknown", which the accepted
/// extension list never contains.
pub fn file_extension(name: &str) -> String {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::{ANALYSIS_DELAY_MS, UPLOAD_TICK_INTERVAL_MS};

    fn test_queue(seed: u64) -> IngestQueue {
        IngestQueue::with_rng(
            Duration::from_millis(UPLOAD_TICK_INTERVAL_MS),
            Duration::from_millis(ANALYSIS_DELAY_MS),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Step a virtual clock until the item reaches a terminal status.
    /// Panics if it never settles (a stuck pipeline is a bug).
    fn run_until_terminal(queue: &mut IngestQueue, id: u64, start: Instant) -> Instant {
        let step = Duration::from_millis(50);
        let mut now = start;
        for _ in 0..10_000 {
            if queue
                .get(id)
                .map(|item| item.status.is_terminal())
                .unwrap_or(true)
            {
                return now;
            }
            now += step;
            queue.tick(now);
        }
        panic!("item {id} never reached a terminal status");
    }

    #[test]
    fn test_submit_enters_uploading_phase() {
        let mut queue = test_queue(1);
        let now = Instant::now();
        let id = queue.submit("sample.exe", 4096, now).unwrap();

        let item = queue.get(id).unwrap();
        assert_eq!(item.status, UploadStatus::Uploading);
        assert_eq!(item.progress, 0.0);
        assert_eq!(item.file_type, "exe");
        assert!(item.result.is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_oversized_submission_is_rejected() {
        let mut queue = test_queue(1);
        let now = Instant::now();
        let result = queue.submit("huge.iso", MAX_UPLOAD_SIZE_BYTES + 1, now);

        assert_eq!(
            result,
            Err(RejectReason::TooLarge {
                size: MAX_UPLOAD_SIZE_BYTES + 1
            })
        );
        assert!(queue.is_empty());
        assert!(queue.next_due().is_none());
    }

    #[test]
    fn test_queue_cap_is_enforced() {
        let mut queue = test_queue(1);
        let now = Instant::now();
        for i in 0..MAX_QUEUE_ITEMS {
            queue.submit(&format!("file{i}.exe"), 100, now).unwrap();
        }
        assert_eq!(queue.submit("one_too_many.exe", 100, now), Err(RejectReason::QueueFull));
        assert_eq!(queue.len(), MAX_QUEUE_ITEMS);
    }

    #[test]
    fn test_nothing_advances_without_tick() {
        let mut queue = test_queue(1);
        let now = Instant::now();
        let id = queue.submit("sample.exe", 4096, now).unwrap();

        // A tick before the first deadline is a no-op.
        queue.tick(now);
        let item = queue.get(id).unwrap();
        assert_eq!(item.status, UploadStatus::Uploading);
        assert_eq!(item.progress, 0.0);

        // The first deadline fires exactly one interval later.
        queue.tick(now + Duration::from_millis(UPLOAD_TICK_INTERVAL_MS));
        assert!(queue.get(id).unwrap().progress > 0.0);
    }

    #[test]
    fn test_progress_is_monotonic_and_hits_100_before_analysis() {
        let mut queue = test_queue(7);
        let start = Instant::now();
        let id = queue.submit("sample.apk", 1 << 20, start).unwrap();

        let step = Duration::from_millis(50);
        let mut now = start;
        let mut last_progress = 0.0_f32;
        let mut saw_analyzing = false;

        for _ in 0..10_000 {
            now += step;
            queue.tick(now);
            let item = queue.get(id).unwrap();

            assert!(
                item.progress >= last_progress,
                "progress regressed from {last_progress} to {}",
                item.progress
            );
            last_progress = item.progress;

            match item.status {
                // An item at 100% transitions in the same step, so a
                // visible Uploading item is always strictly below it.
                UploadStatus::Uploading => assert!(item.progress < 100.0),
                UploadStatus::Analyzing | UploadStatus::Completed => {
                    // Leaving the upload phase requires exactly 100%.
                    assert_eq!(item.progress, 100.0);
                    saw_analyzing = true;
                    if item.status == UploadStatus::Completed {
                        break;
                    }
                }
                UploadStatus::Failed => panic!("accepted extension must not fail"),
            }
        }

        assert!(saw_analyzing, "item never left the upload phase");
    }

    #[test]
    fn test_completed_item_carries_verdict_in_range() {
        let mut queue = test_queue(42);
        let start = Instant::now();
        let id = queue.submit("sample.pdf", 2048, start).unwrap();
        run_until_terminal(&mut queue, id, start);

        let item = queue.get(id).unwrap();
        assert_eq!(item.status, UploadStatus::Completed);
        let verdict = item.result.as_ref().expect("completed item has a verdict");
        assert!(verdict.score >= MIN_VERDICT_SCORE && verdict.score <= MAX_VERDICT_SCORE);
        assert!(MALWARE_TYPE_LABELS.contains(&verdict.malware_type.as_str()));
    }

    #[test]
    fn test_unaccepted_extension_fails_after_analysis() {
        let mut queue = test_queue(3);
        let start = Instant::now();
        let id = queue.submit("weird.xyz", 2048, start).unwrap();

        // The item still runs the full upload, then analysis rejects it.
        let step = Duration::from_millis(50);
        let mut now = start;
        let mut saw_analyzing = false;
        for _ in 0..10_000 {
            now += step;
            queue.tick(now);
            let item = queue.get(id).unwrap();
            if item.status == UploadStatus::Analyzing {
                saw_analyzing = true;
            }
            if item.status.is_terminal() {
                break;
            }
        }

        let item = queue.get(id).unwrap();
        assert!(saw_analyzing, "rejection happens in the analysis phase");
        assert_eq!(item.status, UploadStatus::Failed);
        assert!(item.result.is_none());
    }

    #[test]
    fn test_removal_leaves_inflight_deadline_to_expire_quietly() {
        let mut queue = test_queue(5);
        let start = Instant::now();
        let id = queue.submit("sample.exe", 4096, start).unwrap();

        queue.tick(start + Duration::from_millis(UPLOAD_TICK_INTERVAL_MS));
        assert!(queue.next_due().is_some());

        assert!(queue.remove(id));
        assert!(queue.is_empty());
        assert!(!queue.remove(id));

        // The orphaned deadline fires once, hits no item, and drains.
        queue.tick(start + Duration::from_secs(60));
        assert!(queue.next_due().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_identical_seeds_replay_identical_runs() {
        let start = Instant::now();
        let mut runs = Vec::new();

        for _ in 0..2 {
            let mut queue = test_queue(99);
            queue.submit("alpha.exe", 1024, start).unwrap();
            queue.submit("beta.dll", 2048, start).unwrap();

            let mut now = start;
            for _ in 0..400 {
                now += Duration::from_millis(50);
                queue.tick(now);
            }
            runs.push(queue.items().to_vec());
        }

        assert_eq!(runs[0], runs[1]);
        // 400 steps of 50 ms cover upload plus analysis for both items.
        assert!(runs[0].iter().all(|item| item.status.is_terminal()));
    }

    #[test]
    fn test_items_progress_independently() {
        let mut queue = test_queue(11);
        let start = Instant::now();
        let a = queue.submit("first.exe", 512, start).unwrap();
        let b = queue.submit("second.zip", 512, start).unwrap();

        run_until_terminal(&mut queue, a, start);
        let end = run_until_terminal(&mut queue, b, start);
        queue.tick(end);

        assert_eq!(queue.get(a).unwrap().status, UploadStatus::Completed);
        assert_eq!(queue.get(b).unwrap().status, UploadStatus::Completed);
        assert!(!queue.is_busy());
    }

    #[test]
    fn test_file_extension_normalisation() {
        assert_eq!(file_extension("SAMPLE.EXE"), "exe");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("noext"), "unknown");
        assert_eq!(file_extension(".bashrc"), "unknown");
    }
}
