use colored::{Color, ColoredString, Colorize};

/// The character that introduces a formatting code in Minecraft text.
pub const FORMAT_PREFIX: char = '§';

const RESET: &str = "§r";

/// A formatting tag usable in [`colourf`] markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Grey,
    DarkGrey,
    Blue,
    Green,
    Aqua,
    Red,
    Purple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
}

impl Format {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "black" => Self::Black,
            "dark-blue" => Self::DarkBlue,
            "dark-green" => Self::DarkGreen,
            "dark-aqua" => Self::DarkAqua,
            "dark-red" => Self::DarkRed,
            "dark-purple" => Self::DarkPurple,
            "gold" | "orange" => Self::Gold,
            "grey" | "gray" => Self::Grey,
            "dark-grey" | "dark-gray" => Self::DarkGrey,
            "blue" => Self::Blue,
            "green" => Self::Green,
            "aqua" => Self::Aqua,
            "red" => Self::Red,
            "purple" => Self::Purple,
            "yellow" => Self::Yellow,
            "white" => Self::White,
            "obfuscated" => Self::Obfuscated,
            "b" | "bold" => Self::Bold,
            "s" | "strikethrough" => Self::Strikethrough,
            "u" | "underline" => Self::Underline,
            "i" | "italic" => Self::Italic,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Black => "§0",
            Self::DarkBlue => "§1",
            Self::DarkGreen => "§2",
            Self::DarkAqua => "§3",
            Self::DarkRed => "§4",
            Self::DarkPurple => "§5",
            Self::Gold => "§6",
            Self::Grey => "§7",
            Self::DarkGrey => "§8",
            Self::Blue => "§9",
            Self::Green => "§a",
            Self::Aqua => "§b",
            Self::Red => "§c",
            Self::Purple => "§d",
            Self::Yellow => "§e",
            Self::White => "§f",
            Self::Obfuscated => "§k",
            Self::Bold => "§l",
            Self::Strikethrough => "§m",
            Self::Underline => "§n",
            Self::Italic => "§o",
        }
    }
}

/// Turns `<red>text</red>` style markup into `§` formatting codes.
///
/// Closing a tag resets the formatting and re-applies every tag that is still open,
/// so nested markup such as `<grey>Value: <yellow>1</yellow> ms</grey>` keeps the
/// outer colour after the inner one ends. Unknown tags are kept verbatim.
#[must_use]
pub fn colourf(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 8);
    let mut open: Vec<Format> = Vec::new();
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('>') else {
            rest = tail;
            break;
        };
        let tag = &tail[1..end];

        if let Some(name) = tag.strip_prefix('/') {
            let position = Format::from_name(name)
                .and_then(|format| open.iter().rposition(|open| *open == format));
            if let Some(position) = position {
                open.remove(position);
                out.push_str(RESET);
                for format in &open {
                    out.push_str(format.code());
                }
                rest = &tail[end + 1..];
                continue;
            }
        } else if let Some(format) = Format::from_name(tag) {
            open.push(format);
            out.push_str(format.code());
            rest = &tail[end + 1..];
            continue;
        }

        out.push('<');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

/// Removes every `§x` formatting code from `text`.
#[must_use]
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == FORMAT_PREFIX {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// Renders `§` formatting codes as ANSI escapes for a terminal.
#[must_use]
pub fn to_ansi(text: &str) -> String {
    let mut style = AnsiStyle::default();
    let mut out = String::with_capacity(text.len() * 2);
    let mut segment = String::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != FORMAT_PREFIX {
            segment.push(c);
            continue;
        }
        if !segment.is_empty() {
            out.push_str(&style.paint(&segment).to_string());
            segment.clear();
        }
        if let Some(code) = chars.next() {
            style.apply(code);
        }
    }
    if !segment.is_empty() {
        out.push_str(&style.paint(&segment).to_string());
    }
    out
}

#[derive(Default)]
struct AnsiStyle {
    colour: Option<Color>,
    bold: bool,
    italic: bool,
    underline: bool,
    strikethrough: bool,
}

impl AnsiStyle {
    fn apply(&mut self, code: char) {
        let colour = match code.to_ascii_lowercase() {
            '0' => Color::Black,
            '1' => Color::Blue,
            '2' => Color::Green,
            '3' => Color::Cyan,
            '4' => Color::Red,
            '5' => Color::Magenta,
            '6' => Color::Yellow,
            '7' => Color::White,
            '8' => Color::BrightBlack,
            '9' => Color::BrightBlue,
            'a' => Color::BrightGreen,
            'b' => Color::BrightCyan,
            'c' => Color::BrightRed,
            'd' => Color::BrightMagenta,
            'e' => Color::BrightYellow,
            'f' => Color::BrightWhite,
            'l' => {
                self.bold = true;
                return;
            }
            'o' => {
                self.italic = true;
                return;
            }
            'n' => {
                self.underline = true;
                return;
            }
            'm' => {
                self.strikethrough = true;
                return;
            }
            'r' => {
                *self = Self::default();
                return;
            }
            _ => return,
        };
        // Colour codes reset the formatting codes, as in game.
        *self = Self {
            colour: Some(colour),
            ..Self::default()
        };
    }

    fn paint(&self, segment: &str) -> ColoredString {
        let mut painted = segment.normal();
        if let Some(colour) = self.colour {
            painted = painted.color(colour);
        }
        if self.bold {
            painted = painted.bold();
        }
        if self.italic {
            painted = painted.italic();
        }
        if self.underline {
            painted = painted.underline();
        }
        if self.strikethrough {
            painted = painted.strikethrough();
        }
        painted
    }
}

/// Formats `num` with `precision` decimals, then trims trailing zeros and a trailing dot.
#[must_use]
pub fn format_float(num: f64, precision: usize) -> String {
    let formatted = format!("{num:.precision$}");
    if !formatted.contains('.') {
        return formatted;
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
