use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use tracing::{info, trace};

use crate::services::error_handling::{BenchError, BenchResult, LogHelper};

pub mod marks {
    pub const DATA_GEN_START: &str = "data-gen-start";
    pub const DATA_GEN_END: &str = "data-gen-end";
    pub const SORT_START: &str = "sort-start";
    pub const SEARCH_START: &str = "search-start";
    pub const RENDER_END: &str = "render-end";
}

pub mod measures {
    pub const DATA_GENERATION: &str = "Data Generation";
    pub const SORT_DURATION: &str = "Sort Duration";
    pub const SEARCH_DURATION: &str = "Search Duration";

    /// Display order.
    pub const ALL: [&str; 3] = [DATA_GENERATION, SORT_DURATION, SEARCH_DURATION];
}

/// Milliseconds since an arbitrary process-wide origin.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Milliseconds since navigation start, from `window.performance`.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;

    /// Mirrors a mark into the platform's own timeline, if it has one.
    fn publish_mark(&self, name: &str);

    fn publish_measure(&self, name: &str, start_mark: &str, end_mark: &str);
}

/// `Instant` natively, `window.performance` in the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        now_ms()
    }

    fn publish_mark(&self, _name: &str) {}

    fn publish_measure(&self, _name: &str, _start_mark: &str, _end_mark: &str) {}
}

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        now_ms()
    }

    fn publish_mark(&self, name: &str) {
        let Some(performance) = web_sys::window().and_then(|window| window.performance()) else {
            LogHelper::log_recoverable("publish_mark", &BenchError::browser_api("performance"));
            return;
        };
        if let Err(err) = performance.mark(name) {
            tracing::debug!(mark = %name, error = ?err, "Browser rejected performance mark");
        }
    }

    fn publish_measure(&self, name: &str, start_mark: &str, end_mark: &str) {
        let Some(performance) = web_sys::window().and_then(|window| window.performance()) else {
            return;
        };
        if let Err(err) =
            performance.measure_with_start_mark_and_end_mark(name, start_mark, end_mark)
        {
            tracing::debug!(measure = %name, error = ?err, "Browser rejected performance measure");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub start_ms: f64,
    pub duration_ms: f64,
}

#[derive(Debug, Default)]
struct PerfLog {
    marks: HashMap<String, f64>,
    measurements: VecDeque<Measurement>,
    capacity: usize,
}

impl PerfLog {
    fn push(&mut self, measurement: Measurement) {
        while self.measurements.len() >= self.capacity.max(1) {
            self.measurements.pop_front();
        }
        self.measurements.push_back(measurement);
    }
}

/// Named marks and the measures between them, shared across the page.
#[derive(Clone)]
pub struct PerfRecorder {
    clock: Arc<dyn Clock>,
    log: Arc<Mutex<PerfLog>>,
}

impl PerfRecorder {
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(Arc::new(SystemClock), capacity)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            clock,
            log: Arc::new(Mutex::new(PerfLog {
                capacity,
                ..Default::default()
            })),
        }
    }

    /// Records `name` at the current time, replacing any earlier mark of that name.
    pub fn mark(&self, name: &str) {
        let now = self.clock.now_ms();
        self.log.lock().marks.insert(name.to_string(), now);
        self.clock.publish_mark(name);
        trace!(mark = %name, at_ms = now, "Performance mark");
    }

    pub fn has_mark(&self, name: &str) -> bool {
        self.log.lock().marks.contains_key(name)
    }

    pub fn clear_mark(&self, name: &str) {
        self.log.lock().marks.remove(name);
    }

    pub fn measure(&self, name: &str, start_mark: &str, end_mark: &str) -> BenchResult<Measurement> {
        let measurement = {
            let mut log = self.log.lock();
            let lookup = |mark: &str| {
                log.marks
                    .get(mark)
                    .copied()
                    .ok_or_else(|| BenchError::MarkNotFound {
                        name: mark.to_string(),
                    })
            };
            let start_ms = lookup(start_mark)?;
            let end_ms = lookup(end_mark)?;
            let measurement = Measurement {
                name: name.to_string(),
                start_ms,
                duration_ms: end_ms - start_ms,
            };
            log.push(measurement.clone());
            measurement
        };

        self.clock.publish_measure(name, start_mark, end_mark);
        info!(
            measure = %name,
            duration_ms = measurement.duration_ms,
            "Recorded measure"
        );
        Ok(measurement)
    }

    /// Measures only if `start_mark` is set, then consumes it so later renders
    /// do not re-measure from a stale start. Failures are ignored.
    pub fn measure_pending(&self, name: &str, start_mark: &str, end_mark: &str) -> Option<Measurement> {
        match self.measure(name, start_mark, end_mark) {
            Ok(measurement) => {
                self.clear_mark(start_mark);
                Some(measurement)
            }
            Err(e) => {
                LogHelper::log_recoverable(name, &e);
                None
            }
        }
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        self.log.lock().measurements.iter().cloned().collect()
    }

    pub fn latest(&self, name: &str) -> Option<Measurement> {
        self.log
            .lock()
            .measurements
            .iter()
            .rev()
            .find(|m| m.name == name)
            .cloned()
    }

    pub fn clear(&self) {
        let mut log = self.log.lock();
        log.marks.clear();
        log.measurements.clear();
    }
}

impl Default for PerfRecorder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl PartialEq for PerfRecorder {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.log, &other.log)
    }
}

impl fmt::Debug for PerfRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log = self.log.lock();
        f.debug_struct("PerfRecorder")
            .field("marks", &log.marks.len())
            .field("measurements", &log.measurements.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    /// Clock that advances 10ms on every read and accepts any publish.
    fn ticking_clock() -> MockClock {
        let mut clock = MockClock::new();
        let mut now = 0.0;
        clock.expect_now_ms().returning(move || {
            now += 10.0;
            now
        });
        clock.expect_publish_mark().return_const(());
        clock.expect_publish_measure().return_const(());
        clock
    }

    #[test]
    fn test_measure_between_marks() {
        let recorder = PerfRecorder::with_clock(Arc::new(ticking_clock()), 8);
        recorder.mark(marks::SORT_START);
        recorder.mark("unrelated");
        recorder.mark(marks::RENDER_END);

        let m = recorder
            .measure(measures::SORT_DURATION, marks::SORT_START, marks::RENDER_END)
            .unwrap();
        assert_eq!(m.start_ms, 10.0);
        assert_eq!(m.duration_ms, 20.0);
        assert_eq!(recorder.latest(measures::SORT_DURATION), Some(m));
    }

    #[test]
    fn test_missing_mark_is_an_error() {
        let recorder = PerfRecorder::with_clock(Arc::new(ticking_clock()), 8);
        recorder.mark(marks::RENDER_END);
        let err = recorder
            .measure(measures::SEARCH_DURATION, marks::SEARCH_START, marks::RENDER_END)
            .unwrap_err();
        assert!(matches!(err, BenchError::MarkNotFound { ref name } if name == marks::SEARCH_START));
        assert!(recorder.measurements().is_empty());
    }

    #[test]
    fn test_pending_measure_consumes_start_mark() {
        let recorder = PerfRecorder::with_clock(Arc::new(ticking_clock()), 8);
        recorder.mark(marks::SEARCH_START);
        recorder.mark(marks::RENDER_END);
        assert!(recorder
            .measure_pending(measures::SEARCH_DURATION, marks::SEARCH_START, marks::RENDER_END)
            .is_some());
        assert!(!recorder.has_mark(marks::SEARCH_START));

        recorder.mark(marks::RENDER_END);
        assert!(recorder
            .measure_pending(measures::SEARCH_DURATION, marks::SEARCH_START, marks::RENDER_END)
            .is_none());
        assert_eq!(recorder.measurements().len(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let recorder = PerfRecorder::with_clock(Arc::new(ticking_clock()), 2);
        recorder.mark("a");
        recorder.mark("b");
        for name in ["first", "second", "third"] {
            recorder.measure(name, "a", "b").unwrap();
        }
        let names: Vec<_> = recorder.measurements().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["second", "third"]);
    }

    #[test]
    fn test_marks_and_measures_are_published() {
        let mut clock = MockClock::new();
        clock.expect_now_ms().return_const(5.0);
        clock
            .expect_publish_mark()
            .with(eq(marks::DATA_GEN_START))
            .times(1)
            .return_const(());
        clock
            .expect_publish_mark()
            .with(eq(marks::DATA_GEN_END))
            .times(1)
            .return_const(());
        clock
            .expect_publish_measure()
            .with(
                eq(measures::DATA_GENERATION),
                eq(marks::DATA_GEN_START),
                eq(marks::DATA_GEN_END),
            )
            .times(1)
            .return_const(());

        let recorder = PerfRecorder::with_clock(Arc::new(clock), 4);
        recorder.mark(marks::DATA_GEN_START);
        recorder.mark(marks::DATA_GEN_END);
        let m = recorder
            .measure(measures::DATA_GENERATION, marks::DATA_GEN_START, marks::DATA_GEN_END)
            .unwrap();
        assert_eq!(m.duration_ms, 0.0);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let recorder = PerfRecorder::with_clock(Arc::new(ticking_clock()), 4);
        recorder.mark("a");
        recorder.measure("m", "a", "a").unwrap();
        recorder.clear();
        assert!(!recorder.has_mark("a"));
        assert!(recorder.measurements().is_empty());
    }
}
