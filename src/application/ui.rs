use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::CommandInput;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::PlotWindow;
use crate::domain::services::Sessions;
use crate::domain::services::WateringSession;

const THRESHOLD_STEP: i64 = 5;

fn status_lines(app_state: &AppState) -> Vec<Line<'static>> {
    let session = &app_state.session;
    let label = Style::default().add_modifier(Modifier::BOLD);

    let port = match &app_state.connected_port {
        Some(port) => Span::styled(port.to_string(), Style::default().fg(Color::Green)),
        None => Span::styled("not connected", Style::default().fg(Color::Red)),
    };
    let watering = match session.is_watering() {
        true => Span::styled("ON", Style::default().fg(Color::Cyan)),
        false => Span::raw("OFF"),
    };
    let last = match session.latest() {
        Some(sample) => format!("{}% at {} min", sample.percentage, sample.time),
        None => "none".to_string(),
    };

    return vec![
        Line::from(vec![Span::styled("Port: ", label), port]),
        Line::from(vec![Span::styled("Watering: ", label), watering]),
        Line::from(vec![
            Span::styled("Threshold: ", label),
            Span::raw(format!("{}%", session.threshold())),
        ]),
        Line::from(vec![
            Span::styled("Interval: ", label),
            Span::raw(format!("{} min", session.interval())),
        ]),
        Line::from(vec![Span::styled("Last reading: ", label), Span::raw(last)]),
        Line::from(vec![
            Span::styled("Session: ", label),
            Span::raw(app_state.session_id.to_string()),
        ]),
    ];
}

async fn save_session(sessions: &Sessions, app_state: &AppState) -> Result<()> {
    let port = app_state
        .connected_port
        .clone()
        .unwrap_or_else(|| return Config::get(ConfigKey::Port));

    return sessions
        .save(&app_state.session_id, &port, &app_state.session)
        .await;
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = CommandInput::new(false);
    let sessions = Sessions::default();

    let port = Config::get(ConfigKey::Port);
    if !port.is_empty() {
        tx.send(Action::ChannelConnect(port))?;
    }

    loop {
        textarea.set_block(CommandInput::block(app_state.input_rejected));

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
                .split(frame.size());

            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(layout[0]);

            let side = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Length(8), Constraint::Min(1)])
                .split(panes[1]);

            if side[1].width != app_state.last_known_width
                || side[1].height != app_state.last_known_height
            {
                app_state.set_rect(side[1]);
            }

            let samples = app_state.session.samples();
            PlotWindow::from_samples(samples).render(
                frame,
                panes[0],
                samples,
                app_state.session.threshold(),
            );

            frame.render_widget(
                Paragraph::new(status_lines(app_state)).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title("Status"),
                ),
                side[0],
            );

            app_state
                .console
                .render(frame, side[1], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                side[1].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            frame.render_widget(textarea.widget(), layout[1]);
        })?;

        match events.next().await? {
            event @ (Event::ChannelConnected(_)
            | Event::ChannelDisconnected()
            | Event::ChannelMessage(_)
            | Event::ChannelSent(..)) => {
                app_state.handle_channel_event(event);
            }
            Event::KeyboardAltUp() => {
                app_state.adjust_threshold(THRESHOLD_STEP);
            }
            Event::KeyboardAltDown() => {
                app_state.adjust_threshold(-THRESHOLD_STEP);
            }
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLW() => {
                app_state.toggle_watering(&tx)?;
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");
                textarea = CommandInput::new(false);

                if app_state.handle_input(&input_str, &tx)? {
                    break;
                }

                if app_state.save_requested {
                    app_state.save_requested = false;
                    match save_session(&sessions, app_state).await {
                        Ok(()) => {
                            let text = format!("Saved session {}.", app_state.session_id);
                            app_state.add_message(Message::new(Author::Waterline, &text));
                        }
                        Err(err) => {
                            let text = format!("Failed to save session: {err}");
                            app_state.add_message(Message::error(&text));
                        }
                    }
                }
            }
            Event::KeyboardPaste(text) => {
                for c in text.chars() {
                    match c {
                        '\r' => (),
                        '\n' => textarea.insert_newline(),
                        _ => textarea.insert_char(c),
                    }
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => (),
        }
    }

    save_session(&sessions, app_state).await?;
    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

/// Restores the saved session named by the config, or starts a fresh one
/// from the configured threshold and interval.
async fn load_session() -> Result<(String, WateringSession)> {
    let session_id = Config::get(ConfigKey::SessionID);
    if !session_id.is_empty() {
        let snapshot = Sessions::default().load(&session_id).await?;
        return Ok((session_id, snapshot.state));
    }

    let session = WateringSession::new(Config::threshold()?, Config::interval()?)?;
    return Ok((Sessions::create_id(), session));
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let (session_id, session) = load_session().await?;
    let mut app_state = AppState::new(&session_id, session);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
