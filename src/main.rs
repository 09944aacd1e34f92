//! ShotTimer - Interval Screenshot Tool
//!
//! Three windows driven by one iced daemon:
//! - Main window (save path, region, interval, count, hide flag, start)
//! - Region selector (translucent full-screen overlay, drag to draw)
//! - Preview popup (latest thumbnail, bottom-right, auto-hides)

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use iced::widget::{
    button, canvas, checkbox, column, container, horizontal_space, row, text, text_input,
};
use iced::{daemon, keyboard, window, Alignment, Element, Length, Padding, Point, Size, Subscription, Task, Theme};
use log::{debug, error, info, warn};

use shottimer::capture::file::desktop_dir;
use shottimer::capture::{create_capture_engine, SystemClipboard};
use shottimer::constants::{timing, window as main_window};
use shottimer::{
    CaptureEngine, CaptureRequest, CaptureRun, DisplayGeometry, RegionSelector, Settings,
};

mod ui;

use ui::theme::{self, colors};
use ui::{PreviewImage, SelectorEvent, SelectorOverlay};

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum WindowType {
    Main,
    Selector,
    Preview,
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone)]
enum Message {
    MainWindowOpened(window::Id),
    SelectorOpened(window::Id),
    PreviewOpened(window::Id),
    WindowClosed(window::Id),

    // Form fields
    SavePathChanged(String),
    IntervalChanged(String),
    CountChanged(String),
    HideWindowToggled(bool),

    // Save path buttons
    BrowseFolder,
    FolderPicked(Option<PathBuf>),
    UseDesktop,

    // Region
    SelectRegion,
    Selector(SelectorEvent),
    CancelSelection,
    FullScreen,

    // Capture run
    StartCapture,
    CaptureTick(CaptureRun),
    RestoreMainWindow,
    HidePreview,
}

impl From<SelectorEvent> for Message {
    fn from(event: SelectorEvent) -> Self {
        Message::Selector(event)
    }
}

// ============================================================================
// Application State
// ============================================================================

struct ShotTimerApp {
    windows: BTreeMap<window::Id, WindowType>,
    main_id: Option<window::Id>,
    selector_id: Option<window::Id>,
    preview_id: Option<window::Id>,

    settings: Settings,
    /// Region field text, "x1,y1,x2,y2" or empty
    region_text: String,
    selector: RegionSelector,
    display: Option<DisplayGeometry>,

    engine: Box<dyn CaptureEngine>,
    clipboard: SystemClipboard,
    preview: Option<PreviewImage>,

    status_message: String,
    status_is_error: bool,
}

impl ShotTimerApp {
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let engine = create_capture_engine();

        let mut app = Self {
            windows: BTreeMap::new(),
            main_id: None,
            selector_id: None,
            preview_id: None,

            settings,
            region_text: String::new(),
            selector: RegionSelector::default(),
            display: None,

            engine,
            clipboard: SystemClipboard::new(),
            preview: None,

            status_message: "Ready to capture".to_string(),
            status_is_error: false,
        };
        app.refresh_display();

        let main_settings = window::Settings {
            size: Size::new(main_window::DEFAULT_WIDTH, main_window::DEFAULT_HEIGHT),
            position: window::Position::Specific(Point::new(
                main_window::DEFAULT_X,
                main_window::DEFAULT_Y,
            )),
            resizable: true,
            ..Default::default()
        };

        let (id, open_task) = window::open(main_settings);
        app.main_id = Some(id);
        (app, open_task.map(Message::MainWindowOpened))
    }

    fn title(&self, window_id: window::Id) -> String {
        match self.windows.get(&window_id) {
            Some(WindowType::Main) | None => "ShotTimer".to_string(),
            Some(WindowType::Selector) => "ShotTimer - Select Region".to_string(),
            Some(WindowType::Preview) => "ShotTimer - Preview".to_string(),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    /// Re-read the primary display geometry, keeping the last good value on failure
    fn refresh_display(&mut self) -> Option<DisplayGeometry> {
        match self.engine.display() {
            Ok(display) => {
                debug!("Primary display: {:?}", display);
                self.display = Some(display);
            }
            Err(e) => warn!("Could not read display geometry: {}", e),
        }
        self.display
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MainWindowOpened(id) => {
                self.windows.insert(id, WindowType::Main);
                info!("Main window opened: {:?}", id);
                return window::gain_focus(id);
            }

            Message::SelectorOpened(id) => {
                self.windows.insert(id, WindowType::Selector);
                debug!("Selector overlay opened: {:?}", id);
                return Task::batch([
                    window::change_mode(id, window::Mode::Fullscreen),
                    window::gain_focus(id),
                ]);
            }

            Message::PreviewOpened(id) => {
                self.windows.insert(id, WindowType::Preview);
                debug!("Preview popup opened: {:?}", id);
            }

            Message::WindowClosed(id) => {
                self.windows.remove(&id);

                if self.main_id == Some(id) {
                    info!("Main window closed, exiting");
                    self.main_id = None;
                    return iced::exit();
                }
                if self.selector_id == Some(id) {
                    self.selector_id = None;
                    self.selector.cancel();
                    return self.show_main_window();
                }
                if self.preview_id == Some(id) {
                    self.preview_id = None;
                }
            }

            Message::SavePathChanged(path) => self.settings.save_path = path,
            Message::IntervalChanged(interval) => self.settings.interval = interval,
            Message::CountChanged(count) => self.settings.count = count,
            Message::HideWindowToggled(hide) => self.settings.hide_window = hide,

            Message::BrowseFolder => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select Folder")
                            .pick_folder()
                            .await
                            .map(|folder| folder.path().to_path_buf())
                    },
                    Message::FolderPicked,
                );
            }

            Message::FolderPicked(folder) => match folder {
                Some(folder) => {
                    info!("Save folder set to {:?}", folder);
                    self.settings.save_path = folder.to_string_lossy().into_owned();
                }
                None => debug!("Folder selection cancelled"),
            },

            Message::UseDesktop => {
                self.settings.save_path = desktop_dir().to_string_lossy().into_owned();
            }

            Message::SelectRegion => {
                if self.selector_id.is_some() {
                    return Task::none();
                }
                self.refresh_display();
                self.selector.begin();
                info!("Region selection started");

                let overlay_settings = window::Settings {
                    position: window::Position::Specific(Point::ORIGIN),
                    decorations: false,
                    transparent: true,
                    resizable: false,
                    level: window::Level::AlwaysOnTop,
                    ..Default::default()
                };
                let (id, open_task) = window::open(overlay_settings);
                self.selector_id = Some(id);

                let mut tasks = vec![open_task.map(Message::SelectorOpened)];
                if let Some(main_id) = self.main_id {
                    tasks.push(window::change_mode(main_id, window::Mode::Hidden));
                }
                return Task::batch(tasks);
            }

            Message::Selector(event) => match event {
                SelectorEvent::Pressed(point) => self.selector.press(point),
                SelectorEvent::Moved(point) => {
                    self.selector.move_to(point);
                }
                SelectorEvent::Released(point) => {
                    match self.selector.release(point) {
                        Some(region) => {
                            info!("Region selected: {}", region);
                            self.region_text = region.to_string();
                        }
                        None => debug!("Drag ended without an anchor; region unchanged"),
                    }
                    return self.finish_selection();
                }
            },

            Message::CancelSelection => {
                if self.selector.is_drawing() {
                    info!("Region selection cancelled");
                    self.selector.cancel();
                    return self.finish_selection();
                }
            }

            Message::FullScreen => match self.refresh_display() {
                Some(display) => {
                    self.region_text = display.full_region().to_string();
                    info!("Region set to full screen: {}", self.region_text);
                }
                None => self.set_error("Could not read the screen size"),
            },

            Message::StartCapture => {
                let request = match CaptureRequest::from_inputs(
                    &self.settings.save_path,
                    &self.region_text,
                    &self.settings.interval,
                    &self.settings.count,
                    self.settings.hide_window,
                ) {
                    Ok(request) => request,
                    Err(e) => {
                        error!("Cannot start capture: {}", e);
                        self.set_error(e.to_string());
                        return Task::none();
                    }
                };

                if let Err(e) = self.settings.save() {
                    error!("Failed to save settings: {:#}", e);
                }

                info!(
                    "Starting capture run: {} shots every {}s into {:?}",
                    request.count, request.interval_secs, request.save_dir
                );
                self.set_status(format!(
                    "Capturing {} shots every {}s",
                    request.count, request.interval_secs
                ));

                let run = CaptureRun::new(request);
                let timers = run.start_timers();
                let mut tasks = Vec::new();

                if let Some(restore) = timers.restore_window {
                    if let Some(main_id) = self.main_id {
                        tasks.push(window::change_mode(main_id, window::Mode::Hidden));
                    }
                    debug!("Main window comes back in {:?}", restore);
                    tasks.push(Task::perform(tokio::time::sleep(restore), |_| {
                        Message::RestoreMainWindow
                    }));
                }

                if timers.first_capture.is_zero() {
                    tasks.push(Task::done(Message::CaptureTick(run)));
                } else {
                    tasks.push(Task::perform(
                        tokio::time::sleep(timers.first_capture),
                        move |_| Message::CaptureTick(run.clone()),
                    ));
                }
                return Task::batch(tasks);
            }

            Message::CaptureTick(run) => return self.capture_tick(run),

            Message::RestoreMainWindow => return self.show_main_window(),

            Message::HidePreview => {
                if let Some(id) = self.preview_id {
                    return window::change_mode(id, window::Mode::Hidden);
                }
            }
        }

        Task::none()
    }

    /// Take one capture of `run` and schedule the next tick if any remain
    fn capture_tick(&mut self, mut run: CaptureRun) -> Task<Message> {
        if run.is_finished() {
            info!("Capture run finished: {} shots", run.completed());
            return Task::none();
        }

        let shot = run.completed() + 1;
        let total = run.request().count;
        let (outcome, next) = match run.tick(self.engine.as_mut(), &mut self.clipboard) {
            Ok(result) => result,
            Err(e) => {
                error!("Capture {}/{} failed, run stopped: {}", shot, total, e);
                self.set_error(format!("Capture failed: {}", e));
                return Task::none();
            }
        };

        self.set_status(format!("Saved {} ({}/{})", outcome.path.display(), shot, total));
        let mut tasks = vec![self.show_preview(PreviewImage::from_thumbnail(outcome.thumbnail))];

        match next {
            Some(delay) => tasks.push(Task::perform(tokio::time::sleep(delay), move |_| {
                Message::CaptureTick(run.clone())
            })),
            None => info!("Capture run finished: {} shots", run.completed()),
        }

        Task::batch(tasks)
    }

    /// Swap in a new thumbnail, show the popup, and hide it again later
    fn show_preview(&mut self, preview: PreviewImage) -> Task<Message> {
        let size = preview.size;
        self.preview = Some(preview);

        let show = match self.preview_id {
            Some(id) => Task::batch([
                window::resize(id, size),
                window::change_mode(id, window::Mode::Windowed),
            ]),
            None => {
                let (id, open_task) = window::open(ui::preview::window_settings(size));
                self.preview_id = Some(id);
                open_task.map(Message::PreviewOpened)
            }
        };

        // Every update arms its own timer; an older one may hide a newer thumbnail early.
        let hide = Task::perform(
            tokio::time::sleep(Duration::from_millis(timing::PREVIEW_VISIBLE_MS)),
            |_| Message::HidePreview,
        );

        Task::batch([show, hide])
    }

    fn finish_selection(&mut self) -> Task<Message> {
        let mut tasks = Vec::new();
        if let Some(id) = self.selector_id.take() {
            self.windows.remove(&id);
            tasks.push(window::close(id));
        }
        tasks.push(self.show_main_window());
        Task::batch(tasks)
    }

    fn show_main_window(&self) -> Task<Message> {
        match self.main_id {
            Some(id) => Task::batch([
                window::change_mode(id, window::Mode::Windowed),
                window::gain_focus(id),
            ]),
            None => Task::none(),
        }
    }

    // ========================================================================
    // Views
    // ========================================================================

    fn view(&self, window_id: window::Id) -> Element<'_, Message> {
        match self.windows.get(&window_id) {
            Some(WindowType::Main) => self.view_main(),
            Some(WindowType::Selector) => self.view_selector(),
            Some(WindowType::Preview) => ui::preview::view(self.preview.as_ref()),
            None => container(text("Loading..."))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        }
    }

    fn view_main(&self) -> Element<'_, Message> {
        let label = |content: &'static str| text(content).size(12).color(colors::TEXT_SECONDARY);
        let small_button = |content: &'static str, message: Message| {
            button(text(content).size(13))
                .padding(Padding::from([6, 12]))
                .style(theme::secondary_button)
                .on_press(message)
        };

        let save_section = container(
            column![
                label("Save path"),
                row![
                    text_input("Folder for screenshots", &self.settings.save_path)
                        .on_input(Message::SavePathChanged)
                        .padding(6),
                    small_button("Browse", Message::BrowseFolder),
                    small_button("Desktop", Message::UseDesktop),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            ]
            .spacing(6),
        )
        .padding(12)
        .width(Length::Fill)
        .style(theme::section);

        // No on_input: the region is only set by the two buttons below
        let region_section = container(
            column![
                label("Capture region"),
                text_input("Whole screen", &self.region_text).padding(6),
                row![
                    small_button("Select region", Message::SelectRegion),
                    small_button("Full screen", Message::FullScreen),
                ]
                .spacing(8),
            ]
            .spacing(6),
        )
        .padding(12)
        .width(Length::Fill)
        .style(theme::section);

        let timing_section = container(
            column![
                label("Interval (seconds)"),
                text_input("5", &self.settings.interval)
                    .on_input(Message::IntervalChanged)
                    .padding(6),
                label("Number of shots"),
                text_input("10", &self.settings.count)
                    .on_input(Message::CountChanged)
                    .padding(6),
                checkbox("Hide window while capturing", self.settings.hide_window)
                    .on_toggle(Message::HideWindowToggled)
                    .size(16)
                    .text_size(13),
            ]
            .spacing(6),
        )
        .padding(12)
        .width(Length::Fill)
        .style(theme::section);

        let start_button = button(text("Start Capture").size(15))
            .padding(Padding::from([10, 32]))
            .style(theme::start_button)
            .on_press(Message::StartCapture);

        let status_color = if self.status_is_error {
            colors::DANGER
        } else {
            colors::TEXT_MUTED
        };

        let content = column![
            text("ShotTimer").size(18).color(colors::ACCENT),
            save_section,
            region_section,
            timing_section,
            row![horizontal_space(), start_button, horizontal_space()],
            text(&self.status_message).size(12).color(status_color),
        ]
        .spacing(12)
        .padding(16);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::window_panel)
            .into()
    }

    fn view_selector(&self) -> Element<'_, Message> {
        canvas(SelectorOverlay {
            selector: &self.selector,
            display: self.display,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::close_events().map(Message::WindowClosed),
            keyboard::on_key_press(|key, _modifiers| match key.as_ref() {
                keyboard::Key::Named(keyboard::key::Named::Escape) => {
                    Some(Message::CancelSelection)
                }
                _ => None,
            }),
        ])
    }

    fn theme(&self, window_id: window::Id) -> Theme {
        match self.windows.get(&window_id) {
            // Overlay and popup need a see-through window background
            Some(WindowType::Selector) | Some(WindowType::Preview) => theme::transparent(),
            _ => Theme::Dark,
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> iced::Result {
    // Initialize logger with wgpu warnings filtered out
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .filter_module("naga", log::LevelFilter::Error)
        .init();
    info!("ShotTimer starting...");

    daemon(ShotTimerApp::title, ShotTimerApp::update, ShotTimerApp::view)
        .subscription(ShotTimerApp::subscription)
        .theme(ShotTimerApp::theme)
        .run_with(ShotTimerApp::new)
}
