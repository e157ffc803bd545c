mod renderer;

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{RecvTimeoutError, Sender},
    },
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    terminal::{self, ClearType},
};

pub use renderer::TerminalSurface;

use crate::{
    config::MazeConfig,
    error::{MazeError, Result},
    generators::Generator,
    session::{MazeSession, Phase},
    solvers::Solver,
};

/// Timeout for receiving input events, a.k.a. how often the status line refreshes
const INPUT_RECV_TIMEOUT: Duration = Duration::from_millis(100);
/// Timeout for polling input events in the input thread, a.k.a.
/// how often to check the exit flag
const USER_INPUT_EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);
/// Sizes offered when cycling with the `z` key
const SIZE_PRESETS: [usize; 4] = [15, 21, 31, 41];

const CONTROLS: &str =
    "g: generate  s: solve  r: reset  m: generator  n: solver  z: size  ↑/↓: speed  Esc: exit";

enum UserInputEvent {
    KeyPress(event::KeyEvent),
    Resize,
}

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
/// even if the panic occurs in a different thread
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Interactive loop: keys drive generation, solving and reset on one maze session.
pub fn run(config: MazeConfig) -> Result<()> {
    let mut session = MazeSession::new(config, TerminalSurface::new())?;

    let exit = Arc::new(AtomicBool::new(false));
    let (user_input_event_tx, user_input_event_rx) = std::sync::mpsc::channel::<UserInputEvent>();
    let exit_for_input = exit.clone();
    // Spawn a thread to listen for user input
    let input_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
        listen_to_user_input(
            user_input_event_tx,
            USER_INPUT_EVENT_POLL_TIMEOUT,
            &exit_for_input,
        )
    });

    tracing::info!("Started main app loop");
    let mut message = String::from("Press g to generate a maze.");
    let mut last_phase = None;
    let result = loop {
        let phase = session.phase();
        if last_phase != Some(phase) {
            if let Err(e) = draw_status(&session, &message) {
                break Err(e.into());
            }
            last_phase = Some(phase);
        }

        let event = match user_input_event_rx.recv_timeout(INPUT_RECV_TIMEOUT) {
            Ok(event) => event,
            // Skip to next iteration to refresh the status line
            Err(RecvTimeoutError::Timeout) => continue,
            // Input thread has exited
            Err(RecvTimeoutError::Disconnected) => break Ok(()),
        };

        let outcome = match event {
            UserInputEvent::KeyPress(key_event) => match key_event.code {
                KeyCode::Esc => {
                    tracing::debug!("[app loop] Esc key pressed, cancelling playback");
                    break session.reset();
                }
                KeyCode::Char('g') => session
                    .generate()
                    .map(|_| format!("Generating with {}.", session.config().generator)),
                KeyCode::Char('s') => session.solve().map(|solution| {
                    format!("Route found: {} cells.", solution.path.len())
                }),
                KeyCode::Char('r') => session.reset().map(|_| "Maze reset.".to_string()),
                KeyCode::Char('m') => next_generator(&mut session),
                KeyCode::Char('n') => next_solver(&mut session),
                KeyCode::Char('z') => next_size(&mut session),
                KeyCode::Up => {
                    let interval = session.pacer().speed_up();
                    Ok(format!("Speed: {} ms per step.", interval.as_millis()))
                }
                KeyCode::Down => {
                    let interval = session.pacer().slow_down();
                    Ok(format!("Speed: {} ms per step.", interval.as_millis()))
                }
                _ => continue, // Ignore other keys
            },
            UserInputEvent::Resize => session.redraw().map(|_| "Terminal resized.".to_string()),
        };

        message = match outcome {
            Ok(msg) => msg,
            Err(MazeError::Io(e)) => break Err(e.into()),
            Err(e) => {
                tracing::info!(error = %e, "request refused");
                e.to_string()
            }
        };
        if let Err(e) = draw_status(&session, &message) {
            break Err(e.into());
        }
    };

    // Signal the input thread to exit and wait for it
    exit.store(true, Ordering::Relaxed);
    match input_thread_failure(input_thread_handle.join()) {
        Some(reason) => tracing::warn!(reason = %reason, "Input thread did not exit cleanly"),
        None => tracing::debug!("Input thread finished"),
    }
    tracing::info!("Exiting main app loop");
    result
}

fn draw_status(session: &MazeSession<TerminalSurface>, message: &str) -> std::io::Result<()> {
    let config = session.config();
    let stats = session.stats();
    let phase = match session.phase() {
        Phase::Idle => "Idle",
        Phase::Generating => "Generating",
        Phase::Solving => "Solving",
    };
    let lines = [
        format!(
            "[{phase}] {size}x{size} | {generator} | {solver} | {speed} ms | generation {generation:.2?} | solve {solve:.2?} | path {path}",
            size = config.size,
            generator = config.generator,
            solver = config.solver,
            speed = session.pacer().interval().as_millis(),
            generation = stats.generation_time,
            solve = stats.solving_time,
            path = stats.path_length,
        ),
        message.to_string(),
        CONTROLS.to_string(),
    ];
    session.with_surface(|surface| surface.draw_status(&lines))
}

fn next_generator(session: &mut MazeSession<TerminalSurface>) -> Result<String> {
    let mut config = session.config().clone();
    let idx = Generator::ALL
        .iter()
        .position(|&g| g == config.generator)
        .unwrap_or(0);
    config.generator = Generator::ALL[(idx + 1) % Generator::ALL.len()];
    let msg = format!("Generator: {}.", config.generator);
    session.set_config(config)?;
    Ok(msg)
}

fn next_solver(session: &mut MazeSession<TerminalSurface>) -> Result<String> {
    let mut config = session.config().clone();
    let idx = Solver::ALL
        .iter()
        .position(|&s| s == config.solver)
        .unwrap_or(0);
    config.solver = Solver::ALL[(idx + 1) % Solver::ALL.len()];
    let msg = format!("Solver: {}.", config.solver);
    session.set_config(config)?;
    Ok(msg)
}

fn next_size(session: &mut MazeSession<TerminalSurface>) -> Result<String> {
    let mut config = session.config().clone();
    config.size = SIZE_PRESETS
        .iter()
        .copied()
        .find(|&s| s > config.size)
        .unwrap_or(SIZE_PRESETS[0]);
    let msg = format!("Size: {0}x{0}.", config.size);
    session.set_config(config)?;
    Ok(msg)
}

/// Why the input thread stopped abnormally, if it did.
fn input_thread_failure(joined: std::thread::Result<std::io::Result<()>>) -> Option<String> {
    match joined {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(format!("terminal input error: {e}")),
        Err(_) => Some("input thread panicked".to_string()),
    }
}

/// Listen for user input events (key presses and resize)
/// This function runs in a separate thread, and is the only place where user input is read
fn listen_to_user_input(
    user_input_event_tx: Sender<UserInputEvent>,
    event_poll_timeout: Duration,
    exit: &AtomicBool,
) -> std::io::Result<()> {
    loop {
        if exit.load(Ordering::Relaxed) {
            return Ok(());
        }

        // Poll for events with a timeout
        if !event::poll(event_poll_timeout)? {
            // No event available, continue loop to check the flag again
            continue;
        }

        // We only care about key presses and resizes
        let input_event = match event::read()? {
            event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                UserInputEvent::KeyPress(key_event)
            }
            event::Event::Resize(_, _) => UserInputEvent::Resize,
            _ => continue, // Ignore other events
        };

        // Should exit input thread on Esc key
        let should_exit = matches!(
            input_event,
            UserInputEvent::KeyPress(event::KeyEvent {
                code: KeyCode::Esc,
                ..
            })
        );

        // Send the input event to the main thread
        if user_input_event_tx.send(input_event).is_err() {
            // Receiver has been dropped, exit the thread
            return Ok(());
        }

        if should_exit {
            tracing::debug!("[input loop] Esc key pressed, exiting");
            return Ok(());
        }
    }
}
