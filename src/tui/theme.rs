// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::{Color, Modifier, Style};

/// Style palette for the chat shell.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TuiTheme;

impl TuiTheme {
    pub(crate) fn base_style(&self) -> Style {
        Style::default()
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(Color::Yellow)
        } else {
            self.base_style().fg(Color::DarkGray)
        }
    }

    pub(crate) fn user_tag_style(&self) -> Style {
        self.base_style().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn assistant_tag_style(&self) -> Style {
        self.base_style().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn system_style(&self) -> Style {
        self.base_style().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    }

    pub(crate) fn heading_style(&self) -> Style {
        self.base_style().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn subheading_style(&self) -> Style {
        self.base_style().fg(Color::LightCyan).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn emphasis_style(&self) -> Style {
        self.base_style().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn inline_code_style(&self) -> Style {
        self.base_style().fg(Color::LightCyan)
    }

    pub(crate) fn code_block_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    pub(crate) fn schematic_style(&self) -> Style {
        self.base_style().fg(Color::Gray)
    }

    pub(crate) fn highlight_style(&self) -> Style {
        self.base_style().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn citation_style(&self) -> Style {
        self.base_style().fg(Color::Blue)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(Color::Red)
    }

    pub(crate) fn dim_style(&self) -> Style {
        self.base_style().fg(Color::DarkGray)
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn busy_style(&self) -> Style {
        self.base_style().fg(Color::Yellow).add_modifier(Modifier::ITALIC)
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        self.base_style().fg(Color::Gray)
    }
}
