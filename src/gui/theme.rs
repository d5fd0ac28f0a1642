//! Custom theme definitions for the application - Dark Theme

use iced::widget::{button, container, scrollable, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// --- Dark Color Palette ---

pub const BACKGROUND: Color = Color::from_rgb(0.071, 0.086, 0.110); // Slate 950
pub const SURFACE: Color = Color::from_rgb(0.118, 0.141, 0.176); // Slate 900
pub const SURFACE_RAISED: Color = Color::from_rgb(0.157, 0.184, 0.227); // Slate 800
pub const BORDER: Color = Color::from_rgb(0.216, 0.251, 0.302); // Slate 700

pub const TEAL_500: Color = Color::from_rgb(0.078, 0.722, 0.651); // Primary actions
pub const TEAL_400: Color = Color::from_rgb(0.176, 0.831, 0.749); // Hover state
pub const TEAL_900: Color = Color::from_rgb(0.075, 0.306, 0.290); // Subtle fill

pub const EMERALD_500: Color = Color::from_rgb(0.063, 0.725, 0.506); // Success
pub const AMBER_500: Color = Color::from_rgb(0.961, 0.620, 0.094); // Warning
pub const RED_500: Color = Color::from_rgb(0.937, 0.267, 0.267); // Danger
pub const RED_950: Color = Color::from_rgb(0.271, 0.071, 0.071); // Danger fill

pub const TEXT_PRIMARY: Color = Color::from_rgb(0.945, 0.961, 0.976); // Slate 100
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.580, 0.639, 0.722); // Slate 400
pub const TEXT_MUTED: Color = Color::from_rgb(0.392, 0.455, 0.545); // Slate 500

pub const ACCENT: Color = TEAL_500;
pub const SUCCESS: Color = EMERALD_500;
pub const WARNING: Color = AMBER_500;
pub const DANGER: Color = RED_500;

// --- Container Styles ---

pub struct MainContainer;

impl container::StyleSheet for MainContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(BACKGROUND)),
            ..Default::default()
        }
    }
}

pub struct PanelContainer;

impl container::StyleSheet for PanelContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(SURFACE)),
            border: Border {
                color: BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
        }
    }
}

pub struct SidebarContainer;

impl container::StyleSheet for SidebarContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_SECONDARY),
            background: Some(Background::Color(SURFACE)),
            border: Border {
                color: BORDER,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        }
    }
}

// --- Button Styles ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(TEAL_500)),
            text_color: BACKGROUND,
            border: Border {
                radius: 10.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.078, 0.722, 0.651, 0.25),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            background: Some(Background::Color(TEAL_400)),
            ..active
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            background: Some(Background::Color(SURFACE_RAISED)),
            text_color: TEXT_MUTED,
            ..active
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SURFACE_RAISED)),
            text_color: TEXT_PRIMARY,
            border: Border {
                radius: 10.0.into(),
                color: BORDER,
                width: 1.0,
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            background: Some(Background::Color(TEAL_900)),
            ..active
        }
    }
}

pub struct DestructiveButton;

impl button::StyleSheet for DestructiveButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: RED_500,
            border: Border {
                radius: 10.0.into(),
                color: RED_500,
                width: 1.0,
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            background: Some(Background::Color(RED_950)),
            ..active
        }
    }
}

pub enum SidebarButtonStyle {
    Active,
    Inactive,
}

impl button::StyleSheet for SidebarButtonStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        match self {
            Self::Active => button::Appearance {
                background: Some(Background::Color(TEAL_900)),
                text_color: TEAL_400,
                border: Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            Self::Inactive => button::Appearance {
                background: None,
                text_color: TEXT_SECONDARY,
                border: Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        match self {
            Self::Active => self.active(style),
            Self::Inactive => button::Appearance {
                text_color: TEXT_PRIMARY,
                background: Some(Background::Color(SURFACE_RAISED)),
                border: Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }
}

// --- Input Styles ---

pub struct InputStyle;

impl text_input::StyleSheet for InputStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(SURFACE_RAISED),
            border: Border {
                radius: 10.0.into(),
                width: 1.0,
                color: BORDER,
            },
            icon_color: TEXT_MUTED,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            border: Border {
                color: TEAL_500,
                ..active.border
            },
            ..active
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        TEXT_MUTED
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        TEXT_PRIMARY
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.078, 0.722, 0.651, 0.35)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            background: Background::Color(SURFACE),
            ..active
        }
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        TEXT_MUTED
    }
}

pub struct InputErrorStyle;

impl text_input::StyleSheet for InputErrorStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(SURFACE_RAISED),
            border: Border {
                radius: 10.0.into(),
                width: 1.0,
                color: RED_500,
            },
            icon_color: RED_500,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        self.active(style)
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        TEXT_MUTED
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        TEXT_PRIMARY
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.937, 0.267, 0.267, 0.35)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        self.active(style)
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        TEXT_MUTED
    }
}

// --- Scrollable Styles ---

pub struct ScrollableStyle;

impl ScrollableStyle {
    fn appearance(scroller_alpha: f32) -> scrollable::Appearance {
        scrollable::Appearance {
            container: container::Appearance::default(),
            scrollbar: scrollable::Scrollbar {
                background: None,
                border: Border::default(),
                scroller: scrollable::Scroller {
                    color: Color {
                        a: scroller_alpha,
                        ..TEAL_500
                    },
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                },
            },
            gap: None,
        }
    }
}

impl scrollable::StyleSheet for ScrollableStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> scrollable::Appearance {
        Self::appearance(0.35)
    }

    fn hovered(
        &self,
        _style: &Self::Style,
        is_mouse_over_scrollbar: bool,
    ) -> scrollable::Appearance {
        Self::appearance(if is_mouse_over_scrollbar { 0.6 } else { 0.35 })
    }
}

// --- Progress Bar Styles ---

pub struct ProgressBarStyle;

impl iced::widget::progress_bar::StyleSheet for ProgressBarStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> iced::widget::progress_bar::Appearance {
        iced::widget::progress_bar::Appearance {
            background: Background::Color(SURFACE_RAISED),
            bar: Background::Color(TEAL_500),
            border_radius: 5.0.into(),
        }
    }
}

pub struct ProgressBarCompleted;

impl iced::widget::progress_bar::StyleSheet for ProgressBarCompleted {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> iced::widget::progress_bar::Appearance {
        iced::widget::progress_bar::Appearance {
            background: Background::Color(SURFACE_RAISED),
            bar: Background::Color(EMERALD_500),
            border_radius: 5.0.into(),
        }
    }
}
