use std::{
    sync::{
        Arc, Mutex,
        mpsc::{Receiver, channel},
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

use crate::{
    animation::{Animator, CancelToken, Frame, Pacer, PlaybackStatus, StepQueue, Surface},
    config::MazeConfig,
    error::{MazeError, Result},
    generators::generate_maze,
    maze::{Coord, Maze, grid::GridEvent},
    solvers::{Solution, solve_maze},
};

/// Timings and results of the latest run, recomputed each time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub generation_time: Duration,
    pub solving_time: Duration,
    /// Number of cells on the solution path, entrance and exit included.
    pub path_length: usize,
}

/// What an in-flight playback is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Solving,
}

/// The surface together with the replica frame it is drawn from.
struct Canvas<S> {
    frame: Frame,
    surface: S,
}

struct Playback {
    phase: Phase,
    cancel: CancelToken,
    handle: JoinHandle<std::io::Result<PlaybackStatus>>,
}

/// One maze instance: owns its grid, visited set and path, and paces every
/// change onto a rendering surface on a background thread.
///
/// Only one generation or solve may animate at a time. Requests made while a
/// playback is in flight are rejected with [`MazeError::Busy`]; [`reset`]
/// is the only way to interrupt one.
///
/// [`reset`]: MazeSession::reset
pub struct MazeSession<S> {
    config: MazeConfig,
    maze: Maze,
    events: Receiver<GridEvent>,
    solution: Solution,
    stats: RunStats,
    pacer: Pacer,
    canvas: Arc<Mutex<Canvas<S>>>,
    playback: Option<Playback>,
}

impl<S: Surface + Send + 'static> MazeSession<S> {
    pub fn new(config: MazeConfig, surface: S) -> Result<Self> {
        config.validate()?;
        let (tx, events) = channel();
        let maze = Maze::new(config.size, Some(tx))?;
        let frame = Frame::from_grid(maze.grid());
        let pacer = Pacer::new(config.interval);
        let mut session = MazeSession {
            config,
            maze,
            events,
            solution: Solution::default(),
            stats: RunStats::default(),
            pacer,
            canvas: Arc::new(Mutex::new(Canvas { frame, surface })),
            playback: None,
        };
        // Show the initial all-wall grid
        session.flush_now()?;
        Ok(session)
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn visited(&self) -> &[Coord] {
        &self.solution.visited
    }

    pub fn path(&self) -> &[Coord] {
        &self.solution.path
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Handle for adjusting the animation speed while a playback runs.
    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    /// Run `f` against the surface, waiting for the current step to finish drawing.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut canvas = self.canvas.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut canvas.surface)
    }

    /// Repaint the surface from the current frame without waiting for the next step.
    pub fn redraw(&self) -> Result<()> {
        let mut canvas = self.canvas.lock().unwrap_or_else(|e| e.into_inner());
        let Canvas { frame, surface } = &mut *canvas;
        surface.redraw(frame)?;
        Ok(())
    }

    /// Whether a playback is still animating.
    pub fn is_busy(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }

    pub fn phase(&self) -> Phase {
        match &self.playback {
            Some(p) if !p.handle.is_finished() => p.phase,
            _ => Phase::Idle,
        }
    }

    fn ensure_idle(&self, request: &str) -> Result<()> {
        if self.is_busy() {
            tracing::info!(request, phase = ?self.phase(), "rejecting request while busy");
            return Err(MazeError::Busy);
        }
        Ok(())
    }

    /// Carve a fresh maze with the configured generator and animate it.
    pub fn generate(&mut self) -> Result<()> {
        self.ensure_idle("generate")?;
        self.wait()?;

        let generator = self.config.generator;
        tracing::info!(%generator, size = self.config.size, "generating maze");
        self.solution = Solution::default();
        self.stats = RunStats::default();

        let started = Instant::now();
        let result = generate_maze(&mut self.maze, generator, self.config.seed);
        self.stats.generation_time = started.elapsed();

        let mut queue = StepQueue::new();
        queue.extend_from_events(&self.events);
        tracing::info!(
            steps = queue.len(),
            elapsed = ?self.stats.generation_time,
            ok = result.is_ok(),
            "generation finished"
        );
        self.spawn_playback(Phase::Generating, queue);
        result
    }

    /// Solve the current maze with the configured solver and animate the search.
    ///
    /// Returns [`MazeError::NotGenerated`] before any successful generation and
    /// [`MazeError::Unreachable`] if a generated maze has no route; the path
    /// stays empty in both cases.
    pub fn solve(&mut self) -> Result<&Solution> {
        self.ensure_idle("solve")?;
        self.wait()?;

        if !self.maze.is_generated() {
            tracing::info!("solve requested before generation");
            return Err(MazeError::NotGenerated);
        }

        let solver = self.config.solver;
        tracing::info!(%solver, "solving maze");
        let started = Instant::now();
        let solution = solve_maze(&self.maze, solver);
        self.stats.solving_time = started.elapsed();
        self.stats.path_length = solution.path.len();

        let mut queue = StepQueue::new();
        queue.extend_from_solution(&solution);
        self.solution = solution;
        tracing::info!(
            visited = self.solution.visited.len(),
            path_length = self.stats.path_length,
            elapsed = ?self.stats.solving_time,
            "solve finished"
        );
        self.spawn_playback(Phase::Solving, queue);

        if !self.solution.is_found() {
            tracing::warn!("generated maze has no route from entrance to exit");
            return Err(MazeError::Unreachable);
        }
        Ok(&self.solution)
    }

    /// Abort any in-flight playback and return to an all-wall grid with no
    /// visited cells, no path and zeroed statistics.
    pub fn reset(&mut self) -> Result<()> {
        self.cancel_playback()?;
        self.maze.reset();
        self.solution = Solution::default();
        self.stats = RunStats::default();
        self.flush_now()
    }

    /// Apply new settings. A size change rebuilds the maze, cancelling any playback.
    pub fn set_config(&mut self, config: MazeConfig) -> Result<()> {
        config.validate()?;
        self.pacer.set_interval(config.interval);
        let resized = config.size != self.config.size;
        self.config = config;
        if resized {
            self.cancel_playback()?;
            let (tx, events) = channel();
            self.maze = Maze::new(self.config.size, Some(tx))?;
            self.events = events;
            self.solution = Solution::default();
            self.stats = RunStats::default();
            self.flush_now()?;
        }
        Ok(())
    }

    /// Block until the current playback ends.
    ///
    /// A playback thread that panicked is reported as [`MazeError::PlaybackPanicked`].
    pub fn wait(&mut self) -> Result<PlaybackStatus> {
        let Some(playback) = self.playback.take() else {
            return Ok(PlaybackStatus::Completed);
        };
        match playback.handle.join() {
            Ok(status) => Ok(status?),
            Err(_) => {
                tracing::error!(phase = ?playback.phase, "playback thread panicked");
                Err(MazeError::PlaybackPanicked)
            }
        }
    }

    fn cancel_playback(&mut self) -> Result<()> {
        if let Some(playback) = &self.playback {
            if !playback.handle.is_finished() {
                tracing::info!(phase = ?playback.phase, "cancelling playback");
            }
            playback.cancel.cancel();
        }
        self.wait()?;
        Ok(())
    }

    /// Draw pending grid events immediately, without pacing.
    fn flush_now(&mut self) -> Result<()> {
        let mut queue = StepQueue::new();
        queue.extend_from_events(&self.events);
        let mut canvas = self.canvas.lock().unwrap_or_else(|e| e.into_inner());
        let Canvas { frame, surface } = &mut *canvas;
        while let Some(step) = queue.pop() {
            frame.apply(&step);
            surface.draw(frame, &step)?;
        }
        Ok(())
    }

    fn spawn_playback(&mut self, phase: Phase, mut queue: StepQueue) {
        let cancel = CancelToken::new();
        let animator = Animator::new(self.pacer.clone(), cancel.clone());
        let canvas = Arc::clone(&self.canvas);
        let handle = std::thread::spawn(move || -> std::io::Result<PlaybackStatus> {
            loop {
                let status = {
                    let mut canvas = canvas.lock().unwrap_or_else(|e| e.into_inner());
                    let Canvas { frame, surface } = &mut *canvas;
                    animator.tick(&mut queue, frame, surface)?
                };
                if let Some(status) = status {
                    tracing::debug!(?phase, ?status, "playback ended");
                    return Ok(status);
                }
                animator.pause();
            }
        });
        self.playback = Some(Playback {
            phase,
            cancel,
            handle,
        });
    }
}

impl<S> Drop for MazeSession<S> {
    fn drop(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.cancel.cancel();
            let _ = playback.handle.join();
        }
    }
}
