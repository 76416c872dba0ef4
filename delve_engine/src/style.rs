//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn object_style(&self) -> ColoredString;
    fn enemy_style(&self) -> ColoredString;
    fn space_style(&self) -> ColoredString;
    fn space_titlebar_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn tile_style(&self) -> ColoredString;
    fn event_style(&self) -> ColoredString;
    fn exit_open_style(&self) -> ColoredString;
    fn exit_closed_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn ok_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{self}]");
        bracketed.truecolor(75, 80, 75)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn object_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn enemy_style(&self) -> ColoredString {
        self.truecolor(200, 50, 50).underline()
    }
    fn space_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10)
    }
    fn space_titlebar_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn tile_style(&self) -> ColoredString {
        self.truecolor(150, 150, 150)
    }
    fn event_style(&self) -> ColoredString {
        self.italic().truecolor(230, 230, 30)
    }
    fn exit_open_style(&self) -> ColoredString {
        self.italic().truecolor(110, 220, 110)
    }
    fn exit_closed_style(&self) -> ColoredString {
        self.italic().truecolor(200, 50, 50)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn ok_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
}

impl GameStyle for String {
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn object_style(&self) -> ColoredString {
        self.as_str().object_style()
    }
    fn enemy_style(&self) -> ColoredString {
        self.as_str().enemy_style()
    }
    fn space_style(&self) -> ColoredString {
        self.as_str().space_style()
    }
    fn space_titlebar_style(&self) -> ColoredString {
        self.as_str().space_titlebar_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn tile_style(&self) -> ColoredString {
        self.as_str().tile_style()
    }
    fn event_style(&self) -> ColoredString {
        self.as_str().event_style()
    }
    fn exit_open_style(&self) -> ColoredString {
        self.as_str().exit_open_style()
    }
    fn exit_closed_style(&self) -> ColoredString {
        self.as_str().exit_closed_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn ok_style(&self) -> ColoredString {
        self.as_str().ok_style()
    }
}
