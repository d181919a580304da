// SPDX-License-Identifier: MPL-2.0
//! Demo host for the notification manager.
//!
//! A small iced window with one button per severity. It owns the
//! [`Manager`], hands a [`Notifier`] to its call sites, renders the toast
//! overlay from `snapshot()` and tears the manager down with the window.

mod message;
pub mod paths;
mod subscription;
mod visible;

pub use message::{Flags, Message};

use crate::config;
use crate::diagnostics::DiagnosticsCollector;
use crate::notifications::{Manager, Notifier, Severity};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::toast::{self, Toast};
use iced::widget::{button, column, row, stack, text, Container};
use iced::{window, Element, Length, Subscription, Task};
use std::fmt;
use visible::VisibleToasts;

pub const WINDOW_DEFAULT_WIDTH: f32 = 720.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 480.0;

/// Sample messages, modelled on what the education client raises.
const SAMPLE_MESSAGES: [(Severity, &str); 4] = [
    (Severity::Success, "Upload complete"),
    (Severity::Error, "Could not reach the course server"),
    (Severity::Warning, "Quiz closes in 5 minutes"),
    (Severity::Info, "New message from your instructor"),
];

pub struct App {
    notifications: Manager,
    notifier: Notifier,
    diagnostics: Option<DiagnosticsCollector>,
    /// What the overlay draws; re-read when the manager's revision moves.
    visible: VisibleToasts,
    raised: usize,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("notifications", &self.notifications)
            .field("raised", &self.raised)
            .finish()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window::Settings {
            size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_override(flags.config_dir);
        let (config, config_warning) = config::load();

        let notifications =
            Manager::with_runtime(config.notifications.dwell(), flags.runtime);
        let diagnostics = config.diagnostics.enabled.then(|| {
            let collector = DiagnosticsCollector::new(config.diagnostics.capacity());
            notifications.set_diagnostics(collector.handle());
            collector
        });
        let notifier = notifications.notifier();

        if let Some(warning) = config_warning {
            notifier.warning(warning);
        }

        let visible = VisibleToasts::new(&notifications);
        let app = Self {
            notifications,
            notifier,
            diagnostics,
            visible,
            raised: 0,
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        "Edu Toast".to_string()
    }

    fn refresh(&mut self) {
        self.visible.sync(&self.notifications);
        if let Some(collector) = &mut self.diagnostics {
            collector.process_pending();
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Raise(severity) => {
                let sample = SAMPLE_MESSAGES
                    .iter()
                    .find(|(kind, _)| *kind == severity)
                    .map_or("Notification", |(_, text)| *text);
                self.raised += 1;
                self.notifier.raise(format!("{sample} ({})", self.raised), severity);
            }
            Message::ClearAll => self.notifications.clear(),
            Message::Toast(toast::Message::Dismiss(id)) => {
                self.notifications.dismiss(id);
            }
            Message::Tick(_) => {}
        }
        self.refresh();
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let buttons = SAMPLE_MESSAGES.iter().fold(
            row![].spacing(spacing::SM),
            |row, (severity, _)| {
                row.push(
                    button(text(severity.as_str()).size(typography::BODY))
                        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                        .on_press(Message::Raise(*severity)),
                )
            },
        );

        let controls = column![
            text("Raise a notification").size(typography::TITLE_MD),
            buttons,
            button(text("Clear all").size(typography::BODY)).on_press(Message::ClearAll),
            text(format!("{} active", self.visible.len())).size(typography::CAPTION),
        ]
        .spacing(spacing::MD);

        let content = Container::new(controls)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing::LG);

        stack![content, Toast::view_overlay(self.visible.as_slice()).map(Message::Toast)].into()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(!self.visible.is_empty())
    }
}
