// Presentation constants: token styling tables and pane chrome metrics.

use slate_core::{Color, TextStyle, TokenKind};

// Pane chrome
pub const TAB_BAR_HEIGHT: f32 = 30.0;
pub const DRAG_THRESHOLD: f32 = 5.0;

// Drop overlay
pub const DROP_OVERLAY_FILL: Color = Color::new(0.0, 0.667, 0.667, 0.31);
pub const DROP_OVERLAY_BORDER: Color = Color::new(0.0, 0.784, 0.784, 1.0);
pub const DROP_OVERLAY_DIM: Color = Color::new(0.0, 0.0, 0.0, 0.39);

/// Style for a token kind. Keywords render bold, comments italic; the
/// palettes follow the editor's dark theme with a muted light variant.
pub fn token_style(kind: TokenKind, dark: bool) -> TextStyle {
    let foreground = if dark {
        match kind {
            TokenKind::Keyword => Color::rgb(1.0, 0.50, 0.0),
            TokenKind::Type => Color::rgb(0.0, 0.667, 0.667),
            TokenKind::String => Color::rgb(0.565, 0.933, 0.565),
            TokenKind::Comment => Color::rgb(0.392, 0.392, 0.392),
            TokenKind::Number => Color::rgb(0.710, 0.808, 0.659),
            TokenKind::Builtin => Color::rgb(0.863, 0.863, 0.667),
            TokenKind::Function => Color::rgb(0.863, 0.863, 0.392),
            TokenKind::Decorator => Color::rgb(0.306, 0.788, 0.690),
            TokenKind::Operator => Color::rgb(1.0, 0.50, 0.0),
        }
    } else {
        match kind {
            TokenKind::Keyword => Color::rgb(0.70, 0.30, 0.0),
            TokenKind::Type => Color::rgb(0.0, 0.45, 0.45),
            TokenKind::String => Color::rgb(0.13, 0.55, 0.13),
            TokenKind::Comment => Color::rgb(0.45, 0.45, 0.45),
            TokenKind::Number => Color::rgb(0.35, 0.45, 0.30),
            TokenKind::Builtin => Color::rgb(0.55, 0.50, 0.15),
            TokenKind::Function => Color::rgb(0.50, 0.50, 0.10),
            TokenKind::Decorator => Color::rgb(0.10, 0.50, 0.42),
            TokenKind::Operator => Color::rgb(0.70, 0.30, 0.0),
        }
    };
    TextStyle {
        foreground,
        bold: kind == TokenKind::Keyword,
        italic: kind == TokenKind::Comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_style() {
        for kind in TokenKind::ALL {
            let dark = token_style(kind, true);
            let light = token_style(kind, false);
            assert!(dark.foreground.a > 0.0);
            assert!(light.foreground.a > 0.0);
        }
    }

    #[test]
    fn keyword_bold_comment_italic() {
        assert!(token_style(TokenKind::Keyword, true).bold);
        assert!(token_style(TokenKind::Comment, true).italic);
        assert!(!token_style(TokenKind::String, true).bold);
    }
}
