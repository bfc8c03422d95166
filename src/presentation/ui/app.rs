//! Main application screen.

use std::sync::Arc;
use std::time::Instant;

use color_eyre::eyre::Result;
use crossterm::event::Event;
use ratatui::DefaultTerminal;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::{ImageLoadSupervisor, LoadEvent, LoadHandle, LoadHooks};
use crate::domain::entities::SourceSet;
use crate::domain::ports::ImageFetchPort;
use crate::infrastructure::config::AppConfig;
use crate::presentation::events::{EventHandler, UiAction};
use crate::presentation::view_model::ImageViewModel;
use crate::presentation::widgets::ImageView;

/// Top-level application: one resilient image view and its load cycle.
pub struct App {
    config: AppConfig,
    sources: SourceSet,
    supervisor: ImageLoadSupervisor,
    event_rx: mpsc::UnboundedReceiver<LoadEvent>,
    model: ImageViewModel,
    handle: Option<LoadHandle>,
    picker: Picker,
    protocol: Option<StatefulProtocol>,
    tick: u64,
}

impl App {
    /// Creates the application, probing the terminal for its image protocol.
    #[must_use]
    pub fn new(
        config: AppConfig,
        sources: SourceSet,
        alt: String,
        fetcher: Arc<dyn ImageFetchPort>,
    ) -> Self {
        let picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());
        Self::build(config, sources, alt, fetcher, picker)
    }

    /// Creates the application with the halfblocks protocol, skipping the
    /// terminal query.
    #[must_use]
    pub fn halfblocks(
        config: AppConfig,
        sources: SourceSet,
        alt: String,
        fetcher: Arc<dyn ImageFetchPort>,
    ) -> Self {
        Self::build(config, sources, alt, fetcher, Picker::halfblocks())
    }

    fn build(
        config: AppConfig,
        sources: SourceSet,
        alt: String,
        fetcher: Arc<dyn ImageFetchPort>,
        picker: Picker,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let supervisor = ImageLoadSupervisor::new(fetcher, event_tx);
        let model = ImageViewModel::new(
            alt,
            config.ui.show_skeleton,
            config.ui.motion(),
            config.ui.fade_duration(),
            sources.fallback().is_some(),
        );

        Self {
            config,
            sources,
            supervisor,
            event_rx,
            model,
            handle: None,
            picker,
            protocol: None,
            tick: 0,
        }
    }

    /// Starts (or restarts) the load cycle for the current source pair.
    ///
    /// Any in-flight load is cancelled first, so a pending retry timer from
    /// the previous cycle can never reach the new one.
    pub fn start_load(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
        }
        self.model.reset(self.sources.fallback().is_some());
        self.protocol = None;
        self.handle = Some(self.supervisor.spawn(
            self.sources.clone(),
            self.config.loader.retry_policy(),
            LoadHooks::new(),
        ));
    }

    /// Switches to a new source pair and restarts the load cycle.
    pub fn set_sources(&mut self, sources: SourceSet) {
        if sources.identity() != self.sources.identity() {
            self.sources = sources;
        }
        self.start_load();
    }

    /// Applies all pending load events to the view model.
    pub fn drain_load_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if let LoadEvent::Loaded { image, .. } = &event {
                self.protocol = Some(self.picker.new_resize_protocol((**image).clone()));
            }
            self.model.on_event(&event, Instant::now());
        }
    }

    /// Returns the current view model.
    #[must_use]
    pub const fn model(&self) -> &ImageViewModel {
        &self.model
    }

    /// Runs the main loop until the user quits.
    ///
    /// # Errors
    /// Returns error if terminal drawing or event polling fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        info!(source = %self.sources.primary(), "Starting image load");
        self.start_load();
        let handler = EventHandler::new();

        loop {
            self.drain_load_events();

            let now = Instant::now();
            let view = ImageView::new(&self.model, self.config.ui.skeleton_variant)
                .show_alt(self.config.ui.show_alt_text)
                .tick(self.tick)
                .at(now);
            let protocol = &mut self.protocol;
            terminal.draw(|frame| {
                frame.render_stateful_widget(view, frame.area(), protocol);
            })?;

            if let Some(Event::Key(key)) = handler.poll()? {
                match EventHandler::action_for(&key) {
                    UiAction::Quit => break,
                    UiAction::Reload => {
                        debug!("Restarting load cycle");
                        self.start_load();
                    }
                    UiAction::None => {}
                }
            }
            self.tick = self.tick.wrapping_add(1);
        }

        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("sources", &self.sources)
            .field("tick", &self.tick)
            .field("has_protocol", &self.protocol.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mock::ScriptedFetch;

    fn test_app(fetcher: Arc<ScriptedFetch>, fallback: Option<&str>) -> App {
        let sources = SourceSet::new("/img/a.png", fallback.map(String::from)).unwrap();
        App::halfblocks(
            AppConfig::default(),
            sources,
            "Test image".to_string(),
            fetcher,
        )
    }

    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_load_resolves_into_protocol() {
        let fetcher = Arc::new(ScriptedFetch::new(vec![Ok(ScriptedFetch::tiny_image())]));
        let mut app = test_app(fetcher, None);

        app.start_load();
        settle().await;
        app.drain_load_events();

        assert!(app.model().phase().is_success());
        assert!(app.protocol.is_some());
    }

    #[tokio::test]
    async fn test_reload_resets_view_state() {
        let fetcher = Arc::new(ScriptedFetch::new(vec![Ok(ScriptedFetch::tiny_image())]));
        let mut app = test_app(fetcher, None);

        app.start_load();
        settle().await;
        app.drain_load_events();
        assert!(app.model().phase().is_success());

        app.start_load();
        assert!(app.model().phase().is_loading());
        assert!(app.protocol.is_none());
    }

    #[tokio::test]
    async fn test_set_sources_rekeys_the_view() {
        let fetcher = Arc::new(ScriptedFetch::new(vec![
            Ok(ScriptedFetch::tiny_image()),
            Ok(ScriptedFetch::tiny_image()),
        ]));
        let mut app = test_app(fetcher.clone(), None);

        app.start_load();
        settle().await;
        app.drain_load_events();

        app.set_sources(SourceSet::new("/img/b.png", None).unwrap());
        settle().await;
        app.drain_load_events();

        assert!(app.model().phase().is_success());
        assert_eq!(app.model().active_url(), Some("/img/b.png"));
        assert_eq!(fetcher.requested(), vec!["/img/a.png", "/img/b.png"]);
    }
}
