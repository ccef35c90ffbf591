//! pisim - Terminal User Interface
//!
//! Animated Monte Carlo π estimation using ratatui.
//! App logic lives in `pisim::tui::pi_app`.
//!
//! ```bash
//! cargo run --bin pisim-tui --features tui -- [config.yaml] [--seed N]
//! ```

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use pisim::config::PiConfig;
    use pisim::tui::pi_app::PiApp;

    // Logs would corrupt the alternate screen; only enable when asked and
    // redirect stderr, e.g. `RUST_LOG=debug pisim-tui 2> pisim.log`.
    if std::env::var_os("RUST_LOG").is_some() {
        pisim::init_logging();
    }

    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().and_then(|s| s.parse().ok()),
            _ => config_path = Some(arg),
        }
    }

    let mut config = match config_path {
        Some(path) => match PiConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading '{path}': {e}");
                eprintln!("Usage: pisim-tui [config.yaml] [--seed N]");
                std::process::exit(1);
            }
        },
        None => PiConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }

    tui::run(PiApp::from_config(&config))
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin pisim-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use pisim::driver::RunState;
    use pisim::renderers::Rgb;
    use pisim::tui::pi_app::PiApp;
    use ratatui::{
        backend::{Backend, CrosstermBackend},
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{
            canvas::{Canvas, Circle, Points},
            Block, Borders, Gauge, Paragraph, Sparkline,
        },
        Frame, Terminal,
    };
    use std::io;
    use std::time::{Duration, Instant};

    /// Run the TUI application.
    pub fn run(mut app: PiApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_main_loop(&mut terminal, &mut app, Duration::from_millis(33));

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop<B: Backend>(
        terminal: &mut Terminal<B>,
        app: &mut PiApp,
        tick_rate: Duration,
    ) -> io::Result<()> {
        loop {
            let start = Instant::now();
            terminal.draw(|f| ui(f, app))?;

            let timeout = tick_rate.saturating_sub(start.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit() {
                break;
            }

            app.update();
        }
        Ok(())
    }

    fn ui(f: &mut Frame, app: &PiApp) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(3),
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .split(body[1]);

        render_title(f, rows[0], app);
        render_canvas(f, body[0], app);
        render_stats(f, side[0], app);
        render_progress(f, side[1], app);
        render_error_history(f, side[2], app);
        render_settings(f, rows[2], app);
    }

    fn state_color(state: RunState) -> Color {
        match state {
            RunState::Idle => Color::Gray,
            RunState::Running => Color::Green,
            RunState::Stopped => Color::Yellow,
        }
    }

    const fn to_color(rgb: Rgb) -> Color {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }

    fn render_title(f: &mut Frame, area: Rect, app: &PiApp) {
        let state = app.state();
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " MONTE CARLO π ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(format!("[{state}]"), Style::default().fg(state_color(state))),
            Span::raw(" | "),
            Span::styled(
                format!("Seed: {}", app.driver.seed()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title(
            "Controls: [S] Start  [X] Stop  [R] Reset  [I] Instant  [+/-] Speed  [[/]] Points  [Q] Quit",
        ));
        f.render_widget(title, area);
    }

    fn render_canvas(f: &mut Frame, area: Rect, app: &PiApp) {
        let surface = app.driver.renderer();
        let groups: Vec<(Color, Vec<(f64, f64)>)> = surface
            .points_by_color()
            .into_iter()
            .map(|(rgb, coords)| {
                // Canvas y grows downward; ratatui y grows upward.
                let flipped = coords.into_iter().map(|(x, y)| (x, 1.0 - y)).collect();
                (to_color(rgb), flipped)
            })
            .collect();
        let boundary = surface.boundary();

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title("Unit Square"))
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(move |ctx| {
                for (color, coords) in &groups {
                    ctx.draw(&Points {
                        coords,
                        color: *color,
                    });
                }
                if let Some(rgb) = boundary {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 1.0,
                        radius: 1.0,
                        color: to_color(rgb),
                    });
                }
            });
        f.render_widget(canvas, area);
    }

    fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:<16}"), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color)),
        ])
    }

    fn render_stats(f: &mut Frame, area: Rect, app: &PiApp) {
        let r = app.result();
        let error_color = if r.total_points == 0 {
            Color::White
        } else if r.error < 1.0 {
            Color::Green
        } else if r.error < 5.0 {
            Color::Yellow
        } else {
            Color::Red
        };

        let stats = Paragraph::new(vec![
            stat_line("Total points", r.total_points.to_string(), Color::White),
            stat_line("Inside circle", r.inside_circle.to_string(), Color::Green),
            stat_line("Estimated π", format!("{:.6}", r.estimated_pi), Color::Cyan),
            stat_line("Actual π", format!("{:.6}", r.actual_pi), Color::White),
            stat_line("Error", format!("{:.4}%", r.error), error_color),
            stat_line(
                "Frames",
                app.driver.frames_rendered().to_string(),
                Color::DarkGray,
            ),
        ])
        .block(Block::default().borders(Borders::ALL).title("Results"));
        f.render_widget(stats, area);
    }

    fn render_progress(f: &mut Frame, area: Rect, app: &PiApp) {
        let progress = app.progress().clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(state_color(app.state())))
            .ratio(progress)
            .label(format!(
                "{}/{}",
                app.driver.total_points(),
                app.driver.total_points() + app.driver.remaining()
            ));
        f.render_widget(gauge, area);
    }

    fn render_error_history(f: &mut Frame, area: Rect, app: &PiApp) {
        let sparkline = Sparkline::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Error % (per frame)"),
            )
            .data(&app.error_history)
            .style(Style::default().fg(Color::Magenta));
        f.render_widget(sparkline, area);
    }

    fn render_settings(f: &mut Frame, area: Rect, app: &PiApp) {
        let settings = Paragraph::new(Line::from(vec![
            Span::styled("Points/run: ", Style::default().fg(Color::Gray)),
            Span::styled(app.points.to_string(), Style::default().fg(Color::White)),
            Span::raw(" | "),
            Span::styled("Points/frame: ", Style::default().fg(Color::Gray)),
            Span::styled(
                app.points_per_frame.to_string(),
                Style::default().fg(Color::Cyan),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(settings, area);
    }

}
