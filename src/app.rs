use crate::config::AppConfig;
use crate::event::{AppEvent, Event, EventHandler};
use crate::modules::chat::{ChatHandler, ChatService, ChatTask};
use crate::util::{database::Database, dify::DifyClient};
use crate::{log_debug, log_info};
use color_eyre::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{KeyEvent, KeyEventKind},
};
use std::sync::Arc;

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Chat screen state and key handling
    pub chat: ChatHandler,
    /// Runs chat tasks against the API and the store
    pub service: ChatService,
    /// Event handler.
    pub events: EventHandler,
    /// Ticks seen so far, drives the "waiting" spinner
    pub tick_count: usize,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend = DifyClient::new(&config.dify)?;
        if config.dify.api_key.is_none() {
            crate::log_warn!("DIFY_API_KEY is not set; messages will fail until it is configured");
        }

        let database = Database::from_config(&config.store)?;
        let service = ChatService::new(Arc::new(backend), database, config.user_id.clone())
            .with_limits(config.history_limit, config.conversation_limit);
        let chat = ChatHandler::new(config.user_id.clone(), service.persistence_enabled());

        log_info!("Chat client started for user {}", config.user_id);

        Ok(Self {
            running: true,
            chat,
            service,
            events: EventHandler::new(),
            tick_count: 0,
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        for task in self.chat.startup_tasks() {
            self.dispatch(task);
        }

        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {
                    self.tick();
                    // Only animate while waiting on a reply
                    needs_redraw = self.chat.state().sending;
                }
                Event::Crossterm(event) => match event {
                    crossterm::event::Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        self.handle_key_events(key_event)?;
                        needs_redraw = true;
                    }
                    crossterm::event::Event::Resize(_, _) => needs_redraw = true,
                    _ => {}
                },
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if let Some(event) = self.chat.handle_key(key_event) {
            self.events.send(event);
        }
        Ok(())
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::Dispatch(task) => self.dispatch(task),
            AppEvent::Completed(outcome) => {
                for task in self.chat.apply(outcome) {
                    self.dispatch(task);
                }
            }
        }
    }

    /// Run `task` on its own tokio task and report the outcome as an app event.
    pub fn dispatch(&self, task: ChatTask) {
        log_debug!("Dispatching {:?}", task);
        let service = self.service.clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let outcome = service.run(task).await;
            let _ = sender.send(Event::App(AppEvent::Completed(outcome)));
        });
    }

    /// Handles the tick event of the terminal.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
