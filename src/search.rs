//! # Temporal eclipse search
//!
//! Scans a time range for eclipse windows and hands every non-blank grid to a
//! [`GridSink`].
//!
//! ## Phases
//!
//! ```text
//! Searching ──feasible──▶ Candidate ──grid──▶ InWindow ──no grid──▶ Ending ──▶ Searching
//!     ▲                       │
//!     └──infeasible, no grid──┘   (near miss)
//! ```
//!
//! - **Searching**: coarse steps of [`RunOptions::search_step`] using the geocentric
//!   feasibility test only. The search resumes one step *before* the first feasible
//!   instant, so the window start is never skipped.
//! - **Candidate**: a full grid is rasterized every [`RunOptions::time_step`]. Blank grids
//!   are skipped; if the geocentric test turns infeasible, or the end of the range is
//!   reached, before any grid is populated the window is a near miss and the search goes
//!   back to *Searching*.
//! - **InWindow**: every populated grid is emitted with a strictly increasing index.
//! - **Ending**: the first blank grid after the window started closes it; the instant one
//!   time step later is where *Searching* resumes.
//!
//! Grid indices start at 1 and continue across windows, so the emitted frames of a whole
//! range form a single numbered sequence.

use tracing::{debug, info};

use crate::eclipse_errors::EclipseError;
use crate::ephemeris::EphemerisProvider;
use crate::feasibility::eclipse_impossible;
use crate::options::RunOptions;
use crate::raster::{rasterize, PercentageGrid};
use crate::time::{advance, Instant};

/// Index of the first emitted grid.
pub const FIRST_GRID_INDEX: u32 = 1;

/// Receiver of the populated grids of a search.
pub trait GridSink {
    /// Consume the grid sampled at `instant`, numbered `index`.
    fn emit(
        &mut self,
        grid: &PercentageGrid,
        index: u32,
        instant: &Instant,
    ) -> Result<(), EclipseError>;
}

/// Phase of the search state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Searching,
    Candidate,
    InWindow,
    Ending,
}

/// A contiguous run of populated grids.
#[derive(Debug, Clone, PartialEq)]
pub struct EclipseWindow {
    /// Instant of the first populated grid.
    pub start: Instant,
    /// Instant at which the search resumes, one time step after the first blank grid.
    pub end: Instant,
    /// Index of the first emitted grid.
    pub first_index: u32,
    /// Number of grids emitted for this window.
    pub images: u32,
}

/// Result of tracing one candidate window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutcome {
    Closed(EclipseWindow),
    /// Feasible geometry but no populated grid; the search resumes at `resume_at`.
    NearMiss { resume_at: Instant },
}

/// What a completed search produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchSummary {
    pub windows: Vec<EclipseWindow>,
    pub near_misses: usize,
    /// Instant where the scan stopped.
    pub last_instant: Option<Instant>,
}

impl SearchSummary {
    /// Total number of emitted grids.
    pub fn images(&self) -> u32 {
        self.windows.iter().map(|w| w.images).sum()
    }
}

/// Search driver tying an ephemeris provider to a grid sink.
pub struct EclipseSearch<'a, E, S> {
    ephemeris: &'a E,
    sink: &'a mut S,
    options: &'a RunOptions,
    next_index: u32,
    phase: SearchPhase,
}

impl<'a, E, S> EclipseSearch<'a, E, S>
where
    E: EphemerisProvider,
    S: GridSink,
{
    /// Build a search; the options are validated here.
    pub fn new(
        ephemeris: &'a E,
        sink: &'a mut S,
        options: &'a RunOptions,
    ) -> Result<Self, EclipseError> {
        options.validate()?;
        Ok(EclipseSearch {
            ephemeris,
            sink,
            options,
            next_index: FIRST_GRID_INDEX,
            phase: SearchPhase::Searching,
        })
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Index the next emitted grid will carry.
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    fn enter(&mut self, phase: SearchPhase) {
        if self.phase != phase {
            debug!("{:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Coarse scan for the next instant where an eclipse may be visible.
    ///
    /// Arguments
    /// ---------
    /// * `start`: first instant tested.
    /// * `limit`: the scan gives up once it passes this instant.
    ///
    /// Return
    /// ------
    /// * `Some(t)` with `t` the last infeasible instant before the first feasible one
    ///   (or `start` itself if already feasible), `None` if `limit` is passed first.
    pub fn find_next_start(
        &mut self,
        start: &Instant,
        limit: &Instant,
    ) -> Result<Option<Instant>, EclipseError> {
        self.enter(SearchPhase::Searching);
        let mut last = *start;
        let mut current = *start;

        while eclipse_impossible(self.ephemeris, &current)? {
            if current > *limit {
                return Ok(None);
            }
            last = current;
            current = advance(&current, self.options.search_step);
        }
        Ok(Some(last))
    }

    /// Rasterize from `start` until the window closes or turns out to be a near miss.
    ///
    /// A candidate with no populated grid yet is abandoned at `limit`; once a window has
    /// opened it is traced to its first blank grid regardless of `limit`.
    pub fn trace_window(
        &mut self,
        start: &Instant,
        limit: &Instant,
    ) -> Result<WindowOutcome, EclipseError> {
        self.enter(SearchPhase::Candidate);
        let mut current = *start;
        let mut window: Option<EclipseWindow> = None;

        loop {
            match self.phase {
                SearchPhase::Ending => {
                    if let Some(mut closed) = window {
                        closed.end = current;
                        info!(
                            "Eclipse ends at {current} ({} images from index {})",
                            closed.images, closed.first_index
                        );
                        return Ok(WindowOutcome::Closed(closed));
                    }
                    return Ok(WindowOutcome::NearMiss {
                        resume_at: current,
                    });
                }
                _ => match rasterize(self.ephemeris, &current, self.options)? {
                    Some(grid) => {
                        if window.is_none() {
                            info!("Eclipse begins at {current}");
                            window = Some(EclipseWindow {
                                start: current,
                                end: current,
                                first_index: self.next_index,
                                images: 0,
                            });
                        }
                        self.enter(SearchPhase::InWindow);
                        debug!("Eclipse happening at {current}, image {}", self.next_index);
                        self.sink.emit(&grid, self.next_index, &current)?;
                        self.next_index += 1;
                        if let Some(w) = window.as_mut() {
                            w.images += 1;
                        }
                        current = advance(&current, self.options.time_step);
                    }
                    None => {
                        current = advance(&current, self.options.time_step);
                        if window.is_some() {
                            self.enter(SearchPhase::Ending);
                        } else if current >= *limit {
                            info!("Range ends at {current} before any eclipse became visible");
                            self.enter(SearchPhase::Searching);
                            return Ok(WindowOutcome::NearMiss {
                                resume_at: current,
                            });
                        } else if eclipse_impossible(self.ephemeris, &current)? {
                            info!("Near miss, no eclipse visible before {current}");
                            self.enter(SearchPhase::Searching);
                            return Ok(WindowOutcome::NearMiss {
                                resume_at: current,
                            });
                        }
                    }
                },
            }
        }
    }

    /// Find and emit every eclipse window starting before `end`.
    ///
    /// A window that begins before `end` is traced to completion even if it runs past it.
    ///
    /// Errors
    /// ------
    /// * [`EclipseError::InvalidRange`] when `end` is not after `start`.
    /// * any provider or sink error, which aborts the search.
    pub fn run(&mut self, start: &Instant, end: &Instant) -> Result<SearchSummary, EclipseError> {
        if end <= start {
            return Err(EclipseError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let mut summary = SearchSummary::default();
        let mut current = *start;

        while current < *end {
            info!("Looking for eclipse alignment potential on or after {current}");
            let Some(candidate) = self.find_next_start(&current, end)? else {
                break;
            };

            info!("Potential eclipse at {candidate}, switching to lat/lon calculation");
            match self.trace_window(&candidate, end)? {
                WindowOutcome::Closed(window) => {
                    current = window.end;
                    summary.windows.push(window);
                }
                WindowOutcome::NearMiss { resume_at } => {
                    current = resume_at;
                    summary.near_misses += 1;
                }
            }
            self.enter(SearchPhase::Searching);
        }

        info!("End of search range reached at {current}");
        summary.last_instant = Some(current);
        Ok(summary)
    }

    /// Rasterize a single instant and emit it if populated.
    ///
    /// Return
    /// ------
    /// * `true` when a grid was emitted.
    pub fn render_instant(&mut self, instant: &Instant) -> Result<bool, EclipseError> {
        match rasterize(self.ephemeris, instant, self.options)? {
            Some(grid) => {
                self.sink.emit(&grid, self.next_index, instant)?;
                self.next_index += 1;
                Ok(true)
            }
            None => {
                info!("No eclipse visible at {instant}");
                Ok(false)
            }
        }
    }
}

/// Search `[start, end)` and emit every populated grid to `sink`.
pub fn search_range<E: EphemerisProvider, S: GridSink>(
    ephemeris: &E,
    sink: &mut S,
    start: &Instant,
    end: &Instant,
    options: &RunOptions,
) -> Result<SearchSummary, EclipseError> {
    EclipseSearch::new(ephemeris, sink, options)?.run(start, end)
}
