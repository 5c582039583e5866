use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::panel::{
    controller::DeviceController,
    draft::Field,
    view::{StatusBoxState, StatusView},
};

use super::app::App;

const KEY_HELP: &str =
    "tab device  ↑↓ field  ←→ adjust  s single  l loop  x stop all  q quit";

pub fn draw(frame: &mut Frame, app: &App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, app);
    draw_devices(frame, body, app);

    frame.render_widget(
        Paragraph::new(KEY_HELP).style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("Relay panel", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::raw(app.clock().text().to_string()),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_devices(frame: &mut Frame, area: Rect, app: &App) {
    let controllers = app.registry().controllers();

    if controllers.is_empty() {
        frame.render_widget(Paragraph::new("No devices configured"), area);
        return;
    }

    let columns = Layout::horizontal(
        controllers
            .iter()
            .map(|_| Constraint::Ratio(1, controllers.len() as u32)),
    )
    .split(area);

    for (index, (controller, column)) in controllers.iter().zip(columns.iter()).enumerate() {
        let selected_field = (index == app.selected_device()).then(|| app.selected_field());
        draw_device(frame, *column, controller, selected_field);
    }
}

fn box_style(state: StatusBoxState) -> Style {
    match state {
        StatusBoxState::On => Style::default().fg(Color::Black).bg(Color::Green),
        StatusBoxState::Off => Style::default().fg(Color::White).bg(Color::DarkGray),
        StatusBoxState::Pending => Style::default().fg(Color::Black).bg(Color::Yellow),
    }
}

fn draw_device(
    frame: &mut Frame,
    area: Rect,
    controller: &DeviceController,
    selected_field: Option<Field>,
) {
    let border_style = match selected_field {
        Some(_) => Style::default().fg(Color::Cyan),
        None => Style::default(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(
            " {} {} ",
            controller.device.icon, controller.device.label
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [fields_area, status_area, counter_area, gauge_area, actions_area] = Layout::vertical([
        Constraint::Length(Field::ALL.len() as u16),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(inner);

    let field_lines: Vec<Line> = Field::ALL
        .iter()
        .map(|field| {
            let text = format!(
                "{:<12} {:>4}",
                field.label(),
                controller.draft.field(*field).display()
            );

            if selected_field == Some(*field) {
                Line::styled(
                    format!("> {}", text),
                    Style::default().add_modifier(Modifier::REVERSED),
                )
            } else {
                Line::raw(format!("  {}", text))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(field_lines), fields_area);

    let status = controller.status();
    draw_status(
        frame,
        [status_area, counter_area, gauge_area, actions_area],
        status,
    );
}

fn draw_status(frame: &mut Frame, areas: [Rect; 4], status: &StatusView) {
    let [status_area, counter_area, gauge_area, actions_area] = areas;

    frame.render_widget(
        Paragraph::new(format!(" {}", status.indicator)).style(box_style(status.box_state)),
        Rect {
            height: 1,
            ..status_area
        },
    );

    frame.render_widget(
        Paragraph::new(vec![
            Line::raw(format!("mode: {}", status.mode_label)),
            Line::raw(format!("left: {}", status.counter)),
        ]),
        counter_area,
    );

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(status.progress / 100.0)
            .label(format!("{:.0}%", status.progress)),
        gauge_area,
    );

    let action_style = if status.start_disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[s] start single", action_style),
            Span::raw("  "),
            Span::styled("[l] start loop", action_style),
        ])),
        actions_area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{
        api::{
            commands::CommandSender,
            status::{DeviceStatusBuilder, Mode, Phase, StatusSnapshot},
        },
        event::Event,
        panel::{controller::Device, registry::Registry},
        protocols::http::mk_hyper_http_client,
        settings::{ServerSettings, Settings},
    };

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();

        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }

        text
    }

    #[test]
    fn draws_devices_and_status() {
        let settings = Settings {
            server: ServerSettings {
                url: "http://127.0.0.1:9".to_string(),
                poll_interval_ms: 300,
                request_timeout_ms: 5000,
            },
            devices: Default::default(),
        };
        let registry = Registry::new([Device {
            key: "pump".to_string(),
            icon: "*".to_string(),
            label: "Pump".to_string(),
        }]);
        let mut app = App::new(
            registry,
            CommandSender::new(&settings, &mk_hyper_http_client()),
        );
        app.handle_event(Event::Status(StatusSnapshot::from([(
            "pump".to_string(),
            DeviceStatusBuilder::default()
                .mode(Mode::Loop)
                .phase(Phase::On)
                .phase_left(7u64)
                .seconds_left(42u64)
                .percent(50.0)
                .build()
                .unwrap(),
        )])));

        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Pump"), "{}", text);
        assert!(text.contains("relay closed (7 s)"), "{}", text);
        assert!(text.contains("mode: loop (on)"), "{}", text);
        assert!(text.contains("left: 42"), "{}", text);
        assert!(text.contains("50%"), "{}", text);
    }
}
