mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use pursuit_core::{
    Direction as Move, State,
    cell::{Cell, Pursuer},
    level::parse_grid,
    problem::{PursuitProblem, coin_count},
    search::{SearchLimits, SearchOutcome, SearchProblem, astar_search},
};
use ratatui::{
    crossterm::{
        self,
        event::{self, Event, KeyCode},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
    widgets::*,
};
use std::{
    io::{self, Stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Solve a pursuit board and replay the plan", long_about = None)]
struct Args {
    /// Level file to load
    #[arg(short, long, value_name = "MAP_FILE", default_value = "maps/level01.txt")]
    map: PathBuf,

    /// Give up after expanding this many search nodes
    #[arg(long, value_name = "N")]
    max_expansions: Option<usize>,

    /// Milliseconds between replayed moves
    #[arg(long, value_name = "MS", default_value_t = 300)]
    tick_ms: u64,

    /// Print the plan and exit instead of opening the terminal UI
    #[arg(long)]
    print: bool,
}

/// What the solver came back with.
struct Solution {
    /// Boards from the start position to the last one reached.
    frames: Vec<State>,
    /// Actions between consecutive frames.
    actions: Vec<Move>,
    summary: String,
}

fn solve(start: State, limits: &SearchLimits) -> Result<Solution> {
    let problem = PursuitProblem::new(start).context("Invalid level")?;
    let outcome = astar_search(&problem, limits);
    let stats = outcome.stats();
    info!(
        expanded = stats.expanded,
        generated = stats.generated,
        "search finished"
    );

    let solution = match outcome {
        SearchOutcome::Solved { node, .. } => Solution {
            frames: node.path().into_iter().cloned().collect(),
            actions: node.solution(),
            summary: format!(
                "Solved in {} moves ({} nodes expanded)",
                node.depth, stats.expanded
            ),
        },
        SearchOutcome::Exhausted { .. } => Solution {
            frames: vec![problem.initial().clone()],
            actions: Vec::new(),
            summary: format!(
                "No safe way to collect every coin ({} nodes expanded)",
                stats.expanded
            ),
        },
        SearchOutcome::LimitReached { .. } => Solution {
            frames: vec![problem.initial().clone()],
            actions: Vec::new(),
            summary: format!("Gave up after {} expansions", stats.expanded),
        },
    };
    Ok(solution)
}

struct App {
    solution: Solution,
    /// Index of the frame on screen.
    step: usize,
    paused: bool,
    /// Flag to control the main loop.
    should_quit: bool,
}

impl App {
    fn new(solution: Solution) -> Self {
        App {
            solution,
            step: 0,
            paused: false,
            should_quit: false,
        }
    }

    fn board(&self) -> &State {
        &self.solution.frames[self.step]
    }

    /// Advances the replay by one move.
    fn tick(&mut self) {
        if !self.paused && self.step + 1 < self.solution.frames.len() {
            self.step += 1;
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Sets the quit flag.
    fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.map)
        .with_context(|| format!("Failed to read level file {}", args.map.display()))?;
    let start = parse_grid(&text)
        .with_context(|| format!("Failed to load level {}", args.map.display()))?;

    let limits = SearchLimits {
        max_expansions: args.max_expansions,
    };
    let solution = solve(start, &limits)?;

    if args.print {
        print_solution(&solution);
        return Ok(());
    }

    // Set up the terminal
    let mut terminal = setup_terminal()?;

    let mut app = App::new(solution);
    let result = run_app(&mut terminal, &mut app, Duration::from_millis(args.tick_ms));

    // Restore the terminal state even if the loop failed
    restore_terminal(&mut terminal)?;

    result
}

fn print_solution(solution: &Solution) {
    println!("{}", solution.summary);
    if !solution.actions.is_empty() {
        let plan: String = solution.actions.iter().map(|m| m.letter()).collect();
        println!("Plan: {plan}");
    }
    if let Some(last) = solution.frames.last() {
        for row in last.to_rows() {
            let line: Vec<String> = row.iter().map(|code| format!("{code:2}")).collect();
            println!("{}", line.join(" "));
        }
    }
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the main loop of the TUI application.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    KeyCode::Char(' ') => app.toggle_pause(),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Renders the user interface.
fn ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(70), // Area for the board
            Constraint::Percentage(20), // Area for replay status
            Constraint::Percentage(10), // Area for help
        ])
        .split(frame.area());

    render_board(frame, main_layout[0], app.board());
    render_status(frame, main_layout[1], app);

    let help_text = Paragraph::new("Press 'space' to pause, 'q' or 'Esc' to quit.")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help_text, main_layout[2]);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.solution.actions.len();
    let last_move = app
        .step
        .checked_sub(1)
        .and_then(|i| app.solution.actions.get(i))
        .map(|m| format!("{m:?}"))
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(app.solution.summary.clone()),
        Line::from(format!(
            "Move {}/{}  Last: {}  Coins left: {}{}",
            app.step,
            total,
            last_move,
            coin_count(app.board()),
            if app.paused { "  [paused]" } else { "" }
        )),
    ];

    let status =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Replay"));
    frame.render_widget(status, area);
}

fn pursuer_color(pursuer: Pursuer) -> Color {
    match pursuer {
        Pursuer::Blue => Color::Blue,
        Pursuer::Yellow => Color::Yellow,
        Pursuer::Green => Color::Green,
        Pursuer::Red => Color::Red,
    }
}

/// Renders the board onto the frame.
fn render_board(frame: &mut Frame, area: Rect, board: &State) {
    let mut lines: Vec<Line> = Vec::with_capacity(board.rows());

    for row in board.to_rows() {
        let spans: Vec<Span> = row
            .into_iter()
            .map(|code| match Cell::decode(code) {
                Some(Cell::Wall) => Span::styled("#", Style::default().fg(Color::DarkGray)),
                Some(Cell::Empty) => Span::raw(" "),
                Some(Cell::Coin) => Span::styled(".", Style::default().fg(Color::Yellow)),
                Some(Cell::Player) => {
                    Span::styled("@", Style::default().fg(Color::LightYellow).bold())
                }
                Some(Cell::Pursuer { pursuer, on_coin }) => {
                    let style = Style::default().fg(pursuer_color(pursuer));
                    let style = if on_coin { style.underlined() } else { style };
                    Span::styled("G", style)
                }
                Some(Cell::Capture) => Span::styled("X", Style::default().fg(Color::Red).bold()),
                None => Span::raw("?"),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let board_paragraph = Paragraph::new(lines)
        .block(Block::default().title("Pursuit World").borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(board_paragraph, area);
}
