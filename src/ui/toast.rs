// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering notifications.
//!
//! Toasts are the visual projection of [`Manager::snapshot`]: small cards
//! with a severity-colored border, a glyph, the message and a close button
//! that emits [`Message::Dismiss`]. The severity-to-presentation mapping is
//! owned here; the manager only stores the tag.
//!
//! [`Manager::snapshot`]: crate::notifications::Manager::snapshot

use crate::notifications::{Notification, NotificationId, Severity};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Messages emitted by the toast overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The user closed a toast.
    Dismiss(NotificationId),
}

/// Visual descriptor for a severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub accent: Color,
    pub glyph: &'static str,
}

impl Presentation {
    #[must_use]
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Success => Self {
                accent: palette::SUCCESS_500,
                glyph: "✓",
            },
            Severity::Error => Self {
                accent: palette::ERROR_500,
                glyph: "✕",
            },
            Severity::Warning => Self {
                accent: palette::WARNING_500,
                glyph: "!",
            },
            Severity::Info => Self {
                accent: palette::INFO_500,
                glyph: "i",
            },
        }
    }
}

pub struct Toast;

impl Toast {
    /// Renders a single toast notification.
    pub fn view(notification: &Notification) -> Element<'_, Message> {
        let presentation = Presentation::for_severity(notification.severity());
        let accent_color = presentation.accent;

        let glyph = Text::new(presentation.glyph)
            .size(typography::BODY)
            .width(Length::Fixed(sizing::TOAST_GLYPH))
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent_color),
            });

        let message_widget = Text::new(notification.message())
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            });

        let dismiss_button = button(text("×").size(typography::BODY))
            .on_press(Message::Dismiss(notification.id()))
            .padding(spacing::XXS)
            .style(dismiss_button_style);

        // Layout: [glyph] [message] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(glyph)
            .push(
                Container::new(message_widget)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// Renders all notifications stacked in the bottom-right corner, oldest on top.
    pub fn view_overlay(notifications: &[Notification]) -> Element<'_, Message> {
        if notifications.is_empty() {
            return Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        let toasts: Vec<Element<'_, Message>> =
            notifications.iter().map(Self::view).collect();

        let toast_column = Column::with_children(toasts)
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Right);

        Container::new(toast_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::MD)
            .into()
    }
}

fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover_background = |alpha: f32| {
        Some(iced::Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        }))
    };

    let (background, text_color) = match status {
        button::Status::Active => (None, base.text),
        button::Status::Hovered => (hover_background(opacity::OVERLAY_SUBTLE), base.text),
        button::Status::Pressed => (hover_background(opacity::OVERLAY_MEDIUM), base.text),
        button::Status::Disabled => (
            None,
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
        ),
    };

    button::Style {
        background,
        text_color,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_container_style_uses_accent_color() {
        let accent = palette::SUCCESS_500;
        let style = toast_container_style(&Theme::Dark, accent);

        assert_eq!(style.border.color, accent);
        assert!(style.background.is_some());
    }

    #[test]
    fn each_severity_has_its_own_presentation() {
        let presentations: Vec<_> = Severity::ALL
            .into_iter()
            .map(Presentation::for_severity)
            .collect();

        for (i, a) in presentations.iter().enumerate() {
            for b in &presentations[i + 1..] {
                assert_ne!(a.accent, b.accent);
                assert_ne!(a.glyph, b.glyph);
            }
        }
    }

    #[test]
    fn dismiss_button_is_transparent_until_hovered() {
        let active = dismiss_button_style(&Theme::Light, button::Status::Active);
        let hovered = dismiss_button_style(&Theme::Light, button::Status::Hovered);

        assert!(active.background.is_none());
        assert!(hovered.background.is_some());
    }
}
