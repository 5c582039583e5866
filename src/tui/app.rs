use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::{
    api::commands::CommandSender,
    clock::ClockWidget,
    event::{Event, EventReceiver},
    panel::{controller::DeviceController, draft::Field, registry::Registry},
};

use super::ui;

/// Owns the registry and all other UI state.
pub struct App {
    registry: Registry,
    clock: ClockWidget,
    commands: CommandSender,
    selected_device: usize,
    selected_field: usize,
    running: bool,
}

impl App {
    pub fn new(registry: Registry, commands: CommandSender) -> Self {
        App {
            registry,
            clock: ClockWidget::new(),
            commands,
            selected_device: 0,
            selected_field: 0,
            running: true,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn clock(&self) -> &ClockWidget {
        &self.clock
    }

    pub fn selected_device(&self) -> usize {
        self.selected_device
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL[self.selected_field]
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn run(
        mut self,
        mut terminal: DefaultTerminal,
        mut events: EventReceiver,
    ) -> Result<()> {
        while self.is_running() {
            terminal.draw(|frame| ui::draw(frame, &self))?;

            match events.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Terminal(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key)
            }
            Event::Terminal(_) => {}
            Event::Status(snapshot) => self.registry.apply_snapshot(&snapshot),
            Event::Clock(now) => self.clock.tick(&now),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false
            }
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Tab => self.select_device(1),
            KeyCode::BackTab => self.select_device(-1),
            KeyCode::Down => self.select_field(1),
            KeyCode::Up => self.select_field(-1),
            KeyCode::Right | KeyCode::Char('+') => self.adjust_selected(1),
            KeyCode::Left | KeyCode::Char('-') => self.adjust_selected(-1),
            KeyCode::Char('s') => {
                if let Some(controller) = self.current() {
                    controller.start_single(&self.commands);
                }
            }
            KeyCode::Char('l') => {
                if let Some(controller) = self.current() {
                    controller.start_loop(&self.commands);
                }
            }
            KeyCode::Char('x') => self.commands.stop_all(),
            _ => {}
        }
    }

    fn current(&self) -> Option<&DeviceController> {
        self.registry.get(self.selected_device)
    }

    fn select_device(&mut self, step: isize) {
        if self.registry.is_empty() {
            return;
        }

        let len = self.registry.len() as isize;
        self.selected_device = (self.selected_device as isize + step).rem_euclid(len) as usize;
    }

    fn select_field(&mut self, step: isize) {
        let len = Field::ALL.len() as isize;
        self.selected_field = (self.selected_field as isize + step).rem_euclid(len) as usize;
    }

    fn adjust_selected(&mut self, delta: i64) {
        let field = self.selected_field();

        if let Some(controller) = self.registry.get_mut(self.selected_device) {
            controller.draft.field_mut(field).adjust(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::status::{DeviceStatusBuilder, Mode, StatusSnapshot},
        panel::controller::Device,
        protocols::http::mk_hyper_http_client,
        settings::{ServerSettings, Settings},
    };

    fn mk_app() -> App {
        let settings = Settings {
            server: ServerSettings {
                url: "http://127.0.0.1:9".to_string(),
                poll_interval_ms: 300,
                request_timeout_ms: 5000,
            },
            devices: Default::default(),
        };
        let registry = Registry::new(["air", "power"].map(|key| Device {
            key: key.to_string(),
            icon: String::new(),
            label: key.to_string(),
        }));

        App::new(
            registry,
            CommandSender::new(&settings, &mk_hyper_http_client()),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Terminal(CrosstermEvent::Key(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        ))));
    }

    #[test]
    fn arrows_edit_the_selected_field() {
        let mut app = mk_app();

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);

        let air = &app.registry().controllers()[0].draft;
        let power = &app.registry().controllers()[1].draft;
        assert_eq!(app.selected_field(), Field::Secs);
        assert_eq!(air.secs.value(), 59);
        assert_eq!(power.secs.value(), 2);
        assert_eq!(air.mins.value(), 0);
    }

    #[test]
    fn selection_wraps_around() {
        let mut app = mk_app();

        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Up);

        assert_eq!(app.selected_device(), 1);
        assert_eq!(app.selected_field(), Field::TotMin);
    }

    #[test]
    fn start_with_empty_draft_is_a_no_op() {
        let mut app = mk_app();

        // Would panic on spawn if a request were submitted outside a runtime.
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('l'));

        assert!(app.is_running());
    }

    #[test]
    fn status_event_updates_registry() {
        let mut app = mk_app();
        let snapshot = StatusSnapshot::from([(
            "air".to_string(),
            DeviceStatusBuilder::default()
                .mode(Mode::PendingLoop)
                .build()
                .unwrap(),
        )]);

        app.handle_event(Event::Status(snapshot));

        assert!(app.registry().controllers()[0].status().flags.pending);
        assert!(!app.registry().controllers()[1].status().flags.active);
    }

    #[test]
    fn quit_keys_stop_the_app() {
        let mut app = mk_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.is_running());

        let mut app = mk_app();
        app.handle_event(Event::Terminal(CrosstermEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ))));
        assert!(!app.is_running());
    }
}
