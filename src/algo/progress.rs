//! Progress reporting for per-point passes over large triangulations.
//!
//! Cell construction walks the points in fixed-size chunks and reports after
//! each one. Pass a [`Progress`] to observe it:
//!
//! ```
//! use dualmesh::algo::Progress;
//!
//! let progress = Progress::new(|done, total, stage| {
//!     eprintln!("{stage}: {done}/{total} points");
//! });
//! let ranges: Vec<_> = progress.chunks(10, 4, "Building Voronoi cells").collect();
//! assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
//! ```

use std::ops::Range;

type Callback = dyn Fn(usize, usize, &str) + Send + Sync;

/// Receives `(done, total, stage)` while a pass runs.
///
/// `done` never decreases within one pass and equals `total` on the last call.
pub struct Progress {
    callback: Box<Callback>,
}

impl Progress {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// A reporter that ignores every update.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }

    /// Send one update.
    #[inline]
    pub fn report(&self, done: usize, total: usize, stage: &str) {
        (self.callback)(done, total, stage);
    }

    /// Split `0..total` into ranges of at most `chunk` items.
    ///
    /// The start of every range is reported before it is yielded, and
    /// `(total, total)` once the ranges run out.
    pub fn chunks<'a>(&'a self, total: usize, chunk: usize, stage: &'a str) -> Chunks<'a> {
        Chunks {
            progress: self,
            stage,
            total,
            chunk: chunk.max(1),
            next: 0,
            finished: false,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

/// Iterator returned by [`Progress::chunks`].
pub struct Chunks<'a> {
    progress: &'a Progress,
    stage: &'a str,
    total: usize,
    chunk: usize,
    next: usize,
    finished: bool,
}

impl Iterator for Chunks<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.next < self.total {
            let start = self.next;
            self.next = (start + self.chunk).min(self.total);
            self.progress.report(start, self.total, self.stage);
            return Some(start..self.next);
        }
        if !self.finished {
            self.finished = true;
            self.progress.report(self.total, self.total, self.stage);
        }
        None
    }
}
